use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

/// Batch size slider moves in increments of this value.
pub const BATCH_SIZE_STEP: u32 = 8;

/// Hyperparameters chosen on the configure step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainingConfig {
    #[validate(range(min = 1, max = 10))]
    pub epochs: u32,

    #[validate(range(min = 8, max = 64))]
    pub batch_size: u32,

    #[validate(range(min = 0.00001, max = 0.0001))]
    pub learning_rate: f64,

    pub advanced_settings: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 10000))]
    pub warmup_steps: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub weight_decay: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 16, max = 4096))]
    pub max_length: Option<u32>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 3,
            batch_size: 16,
            learning_rate: 0.00002,
            advanced_settings: false,
            warmup_steps: None,
            weight_decay: None,
            max_length: None,
        }
    }
}

impl TrainingConfig {
    /// Range checks plus the batch size step constraint.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.batch_size % BATCH_SIZE_STEP != 0 {
            return Err(AppError::ValidationError(format!(
                "batch_size must be a multiple of {}, got {}",
                BATCH_SIZE_STEP, self.batch_size
            )));
        }
        Ok(())
    }

    /// Rough wall-clock estimate in minutes for a dataset of `row_count` rows.
    ///
    /// A zero workload falls back to 1000 sample-epochs.
    pub fn estimated_minutes(&self, row_count: usize) -> u64 {
        let workload = match self.epochs as u64 * row_count as u64 {
            0 => 1000,
            n => n,
        };
        let per_minute = self.batch_size as u64 * 60;
        if per_minute == 0 {
            return workload;
        }
        workload.div_ceil(per_minute)
    }
}
