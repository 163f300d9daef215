use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::csv::UploadedDataset;
use crate::domain::error::Result;
use crate::domain::training::TrainingConfig;

/// Validated configuration plus the time estimate shown before training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlan {
    pub config: TrainingConfig,
    pub estimated_minutes: u64,
}

pub struct ConfigureUseCase;

impl ConfigureUseCase {
    pub fn plan(config: TrainingConfig, dataset: &UploadedDataset) -> Result<TrainingPlan> {
        config.check()?;
        let estimated_minutes = config.estimated_minutes(dataset.row_count);
        info!(
            epochs = config.epochs,
            batch_size = config.batch_size,
            learning_rate = config.learning_rate,
            estimated_minutes,
            "Training configured"
        );
        Ok(TrainingPlan {
            config,
            estimated_minutes,
        })
    }
}
