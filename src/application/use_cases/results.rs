//! Results view: illustrative metrics, model card, and the simulated
//! download / deploy / API-key actions.

use std::time::Duration;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::time::sleep;
use tracing::info;
use uuid::Uuid;

use crate::domain::catalog::{self, ModelSelection};
use crate::domain::results::{ApiKey, Deployment, DeploymentStatus, FinalMetrics, ModelArtifact};
use crate::infrastructure::config::ResultsSettings;

pub const API_KEY_PREFIX: &str = "at_";
pub const ARTIFACT_FILE_NAME: &str = "fine-tuned-model.bin";

pub struct ResultsUseCase {
    settings: ResultsSettings,
    metrics: FinalMetrics,
}

impl ResultsUseCase {
    pub fn new(settings: ResultsSettings) -> Self {
        Self {
            settings,
            metrics: FinalMetrics::default(),
        }
    }

    pub fn final_metrics(&self) -> &FinalMetrics {
        &self.metrics
    }

    /// Markdown model card for the chosen base model and task.
    pub fn model_card(&self, selection: &ModelSelection) -> String {
        let task_title = catalog::find_task(&selection.task)
            .map(|t| t.title.as_str())
            .unwrap_or(selection.task.as_str());
        let m = &self.metrics;

        format!(
            "# Fine-tuned Model\n\
             \n\
             ## Model Description\n\
             This model was fine-tuned using Auto Tune on a custom dataset for {task_lower}.\n\
             \n\
             ## Training Details\n\
             - **Base Model**: {model}\n\
             - **Task**: {task}\n\
             - **Training Time**: {time}\n\
             - **Final Accuracy**: {accuracy}%\n\
             \n\
             ## Performance Metrics\n\
             - **Accuracy**: {accuracy}%\n\
             - **F1 Score**: {f1}\n\
             - **Precision**: {precision}\n\
             - **Recall**: {recall}\n\
             \n\
             ## Usage\n\
             ```python\n\
             from transformers import AutoTokenizer, AutoModelForSequenceClassification\n\
             \n\
             tokenizer = AutoTokenizer.from_pretrained(\"your-username/your-model\")\n\
             model = AutoModelForSequenceClassification\
             .from_pretrained(\"your-username/your-model\")\n\
             ```\n\
             \n\
             Generated with Auto Tune - https://auto-tune.dev",
            task_lower = task_title.to_lowercase(),
            model = selection.model,
            task = task_title,
            time = m.training_time,
            accuracy = m.accuracy,
            f1 = m.f1_score,
            precision = m.precision,
            recall = m.recall,
        )
    }

    /// Placeholder model file, delivered after the download delay.
    pub async fn download(&self) -> ModelArtifact {
        sleep(Duration::from_millis(self.settings.download_delay_ms)).await;
        info!(file = ARTIFACT_FILE_NAME, "Simulated model download ready");
        ModelArtifact {
            file_name: ARTIFACT_FILE_NAME.to_string(),
            bytes: b"Model file content".to_vec(),
        }
    }

    /// Pretend to publish the model; always succeeds after the deploy delay.
    pub async fn deploy(&self) -> Deployment {
        sleep(Duration::from_millis(self.settings.deploy_delay_ms)).await;
        info!(url = %self.settings.hub_url, "Simulated deployment finished");
        Deployment {
            status: DeploymentStatus::Deployed,
            url: Some(self.settings.hub_url.clone()),
        }
    }

    /// Issue a throwaway inference key. Nothing is stored.
    pub fn issue_api_key(&self) -> ApiKey {
        let digest = Sha256::digest(Uuid::new_v4().as_bytes());
        let key = format!("{}{}", API_KEY_PREFIX, &hex::encode(digest)[..32]);
        let fingerprint = format!("{}...", &key[..API_KEY_PREFIX.len() + 6]);
        info!(fingerprint = %fingerprint, "Issued simulated API key");
        ApiKey {
            key,
            fingerprint,
            created_at: Utc::now(),
        }
    }
}

impl Default for ResultsUseCase {
    fn default() -> Self {
        Self::new(ResultsSettings::default())
    }
}
