//! Typed hand-off state shared by the workflow steps.
//!
//! Each step writes its output here and the next step reads it back; a step
//! whose inputs are missing reports the stage the caller should go back to.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::catalog::ModelSelection;
use crate::domain::csv::UploadedDataset;
use crate::domain::error::{AppError, Result};
use crate::domain::training::{TrainingCompletion, TrainingConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStage {
    Upload,
    Select,
    Configure,
    Train,
    Results,
}

impl WorkflowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStage::Upload => "upload",
            WorkflowStage::Select => "select",
            WorkflowStage::Configure => "configure",
            WorkflowStage::Train => "train",
            WorkflowStage::Results => "results",
        }
    }
}

fn missing(stage: WorkflowStage) -> AppError {
    AppError::NotFound(format!("complete the {} step first", stage.as_str()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSession {
    upload: Option<UploadedDataset>,
    selection: Option<ModelSelection>,
    training_config: Option<TrainingConfig>,
    completion: Option<TrainingCompletion>,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Furthest step the user may open.
    pub fn stage(&self) -> WorkflowStage {
        if self.completion.is_some() {
            WorkflowStage::Results
        } else if self.training_config.is_some() {
            WorkflowStage::Train
        } else if self.selection.is_some() {
            WorkflowStage::Configure
        } else if self.upload.is_some() {
            WorkflowStage::Select
        } else {
            WorkflowStage::Upload
        }
    }

    /// A new dataset invalidates every later choice.
    pub fn record_upload(&mut self, dataset: UploadedDataset) {
        debug!(name = %dataset.name, "Upload recorded");
        self.upload = Some(dataset);
        self.selection = None;
        self.training_config = None;
        self.completion = None;
    }

    pub fn record_selection(&mut self, selection: ModelSelection) -> Result<()> {
        self.upload()?;
        self.selection = Some(selection);
        self.training_config = None;
        self.completion = None;
        Ok(())
    }

    pub fn record_training_config(&mut self, config: TrainingConfig) -> Result<()> {
        self.upload()?;
        self.selection()?;
        self.training_config = Some(config);
        self.completion = None;
        Ok(())
    }

    pub fn record_completion(&mut self, completion: TrainingCompletion) -> Result<()> {
        self.training_config()?;
        self.completion = Some(completion);
        Ok(())
    }

    pub fn upload(&self) -> Result<&UploadedDataset> {
        self.upload.as_ref().ok_or_else(|| missing(WorkflowStage::Upload))
    }

    pub fn selection(&self) -> Result<&ModelSelection> {
        self.selection.as_ref().ok_or_else(|| missing(WorkflowStage::Select))
    }

    pub fn training_config(&self) -> Result<&TrainingConfig> {
        self.training_config
            .as_ref()
            .ok_or_else(|| missing(WorkflowStage::Configure))
    }

    pub fn completion(&self) -> Result<&TrainingCompletion> {
        self.completion.as_ref().ok_or_else(|| missing(WorkflowStage::Train))
    }

    /// Serialized form for handing the session to a view layer.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::ValidationError(format!("Invalid session data: {}", e)))
    }

    /// Back to an empty session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::{CompletionReason, TrainingMetrics};

    fn dataset() -> UploadedDataset {
        UploadedDataset {
            name: "reviews.csv".to_string(),
            size: 128,
            headers: vec!["text".to_string(), "label".to_string()],
            row_count: 5,
        }
    }

    fn selection() -> ModelSelection {
        ModelSelection {
            task: "text-classification".to_string(),
            model: "bert-base-uncased".to_string(),
        }
    }

    fn completion() -> TrainingCompletion {
        TrainingCompletion {
            reason: CompletionReason::Finished,
            final_progress: 100.0,
            final_metrics: TrainingMetrics::initial(),
        }
    }

    #[test]
    fn test_happy_path_stages() {
        let mut session = WorkflowSession::new();
        assert_eq!(session.stage(), WorkflowStage::Upload);

        session.record_upload(dataset());
        assert_eq!(session.stage(), WorkflowStage::Select);

        session.record_selection(selection()).unwrap();
        assert_eq!(session.stage(), WorkflowStage::Configure);

        session
            .record_training_config(TrainingConfig::default())
            .unwrap();
        assert_eq!(session.stage(), WorkflowStage::Train);

        session.record_completion(completion()).unwrap();
        assert_eq!(session.stage(), WorkflowStage::Results);
    }

    #[test]
    fn test_missing_prerequisites() {
        let mut session = WorkflowSession::new();
        let err = session.record_selection(selection()).unwrap_err();
        assert_eq!(
            err,
            AppError::NotFound("complete the upload step first".to_string())
        );

        session.record_upload(dataset());
        assert!(session
            .record_training_config(TrainingConfig::default())
            .is_err());
        assert!(session.record_completion(completion()).is_err());
        assert!(session.completion().is_err());
    }

    #[test]
    fn test_new_upload_resets_downstream() {
        let mut session = WorkflowSession::new();
        session.record_upload(dataset());
        session.record_selection(selection()).unwrap();
        session
            .record_training_config(TrainingConfig::default())
            .unwrap();

        session.record_upload(dataset());
        assert!(session.selection().is_err());
        assert!(session.training_config().is_err());
        assert_eq!(session.stage(), WorkflowStage::Select);
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let mut session = WorkflowSession::new();
        session.record_upload(dataset());
        session.record_selection(selection()).unwrap();

        let json = session.to_json().unwrap();
        let restored = WorkflowSession::from_json(&json).unwrap();
        assert_eq!(restored, session);
        assert!(json.contains("\"rowCount\":5"));

        assert!(matches!(
            WorkflowSession::from_json("{not json"),
            Err(AppError::ValidationError(_))
        ));

        session.reset();
        assert_eq!(session, WorkflowSession::default());
    }
}
