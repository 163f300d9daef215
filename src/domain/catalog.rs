//! Fixed task and base-model catalogs offered on the selection step.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub examples: String,
    pub popular: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Human-readable parameter count, e.g. "110M"
    pub parameters: String,
    /// Task ids this model can be fine-tuned for
    pub tasks: Vec<String>,
}

impl BaseModel {
    pub fn supports(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|t| t == task_id)
    }
}

/// Select -> Configure handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    pub task: String,
    pub model: String,
}

fn task(id: &str, title: &str, description: &str, examples: &str, popular: bool) -> ModelTask {
    ModelTask {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        examples: examples.to_string(),
        popular,
    }
}

fn model(id: &str, name: &str, description: &str, parameters: &str, tasks: &[&str]) -> BaseModel {
    BaseModel {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        parameters: parameters.to_string(),
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
    }
}

pub static TASKS: Lazy<Vec<ModelTask>> = Lazy::new(|| {
    vec![
        task(
            "text-classification",
            "Text Classification",
            "Categorize text into predefined classes or labels",
            "Sentiment analysis, spam detection, topic classification",
            true,
        ),
        task(
            "summarization",
            "Summarization",
            "Generate concise summaries of longer texts",
            "Article summarization, document condensation",
            false,
        ),
        task(
            "question-answering",
            "Question & Answering",
            "Answer questions based on provided context",
            "Reading comprehension, FAQ systems",
            true,
        ),
        task(
            "named-entity-recognition",
            "Named Entity Recognition",
            "Identify and classify named entities in text",
            "Person names, locations, organizations",
            false,
        ),
    ]
});

pub static MODELS: Lazy<Vec<BaseModel>> = Lazy::new(|| {
    vec![
        model(
            "bert-base-uncased",
            "BERT Base Uncased",
            "General-purpose transformer model, great for classification tasks",
            "110M",
            &["text-classification", "named-entity-recognition"],
        ),
        model(
            "distilbert-base-uncased",
            "DistilBERT Base Uncased",
            "Faster, smaller version of BERT with 97% performance",
            "66M",
            &["text-classification", "named-entity-recognition"],
        ),
        model(
            "t5-small",
            "T5 Small",
            "Text-to-text transfer transformer, versatile for many tasks",
            "60M",
            &["summarization", "question-answering"],
        ),
        model(
            "bart-large-cnn",
            "BART Large CNN",
            "Optimized for summarization and text generation",
            "406M",
            &["summarization"],
        ),
    ]
});

pub fn find_task(id: &str) -> Option<&'static ModelTask> {
    TASKS.iter().find(|t| t.id == id)
}

pub fn find_model(id: &str) -> Option<&'static BaseModel> {
    MODELS.iter().find(|m| m.id == id)
}
