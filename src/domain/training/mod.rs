// ============================================================
// TRAINING DOMAIN LAYER
// ============================================================
// Hyperparameters, simulated run state, and log entries

mod config;
mod log;
mod state;

pub use config::{TrainingConfig, BATCH_SIZE_STEP};
pub use log::{LogLevel, TrainingLogEntry};
pub use state::{
    CompletionReason, SimulationPhase, SimulationSnapshot, TrainingCompletion, TrainingMetrics,
};
