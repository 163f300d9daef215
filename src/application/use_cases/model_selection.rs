use tracing::info;

use crate::domain::catalog::{self, BaseModel, ModelSelection, ModelTask};
use crate::domain::error::{AppError, Result};

/// Task and base-model choice for the select step.
pub struct ModelSelectionUseCase;

impl ModelSelectionUseCase {
    pub fn tasks() -> &'static [ModelTask] {
        catalog::TASKS.as_slice()
    }

    /// Models that support `task`, or every model when no task is chosen yet.
    pub fn available_models(task: Option<&str>) -> Vec<&'static BaseModel> {
        catalog::MODELS
            .iter()
            .filter(|m| task.map_or(true, |t| m.supports(t)))
            .collect()
    }

    pub fn select(task: &str, model: &str) -> Result<ModelSelection> {
        let task_entry = catalog::find_task(task)
            .ok_or_else(|| AppError::ValidationError(format!("Unknown task: {}", task)))?;
        let model_entry = catalog::find_model(model)
            .ok_or_else(|| AppError::ValidationError(format!("Unknown model: {}", model)))?;

        if !model_entry.supports(&task_entry.id) {
            return Err(AppError::ValidationError(format!(
                "Model {} does not support task {}",
                model_entry.id, task_entry.id
            )));
        }

        info!(task = %task_entry.id, model = %model_entry.id, "Model selected");
        Ok(ModelSelection {
            task: task_entry.id.clone(),
            model: model_entry.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_task() {
        let ids: Vec<&str> = ModelSelectionUseCase::available_models(Some("summarization"))
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t5-small", "bart-large-cnn"]);
    }

    #[test]
    fn test_no_task_lists_everything() {
        assert_eq!(ModelSelectionUseCase::available_models(None).len(), 4);
        assert_eq!(ModelSelectionUseCase::tasks().len(), 4);
    }

    #[test]
    fn test_select_valid_pair() {
        let selection =
            ModelSelectionUseCase::select("text-classification", "distilbert-base-uncased")
                .unwrap();
        assert_eq!(selection.task, "text-classification");
        assert_eq!(selection.model, "distilbert-base-uncased");
    }

    #[test]
    fn test_select_rejects_unsupported_pair() {
        let err = ModelSelectionUseCase::select("summarization", "bert-base-uncased").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(ModelSelectionUseCase::select("translation", "t5-small").is_err());
        assert!(ModelSelectionUseCase::select("summarization", "gpt-2").is_err());
    }
}
