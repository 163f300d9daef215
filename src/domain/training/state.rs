use serde::{Deserialize, Serialize};

use super::TrainingLogEntry;

/// Why a simulated run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionReason {
    /// Progress reached 100%
    Finished,
    /// The user pressed stop
    Stopped,
}

/// Lifecycle of a simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "phase", content = "reason")]
pub enum SimulationPhase {
    Initializing,
    Running,
    Paused,
    Completed(CompletionReason),
}

impl SimulationPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Initializing | Self::Running | Self::Paused)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Synthetic metrics shown on the training dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingMetrics {
    /// Percent, within [0, ceiling]
    pub accuracy: f64,
    /// Within [floor, 2.5]
    pub loss: f64,
    /// Whole seconds of simulated wall time
    pub time_elapsed: u64,
}

impl TrainingMetrics {
    pub const INITIAL_LOSS: f64 = 2.5;

    pub fn initial() -> Self {
        Self {
            accuracy: 0.0,
            loss: Self::INITIAL_LOSS,
            time_elapsed: 0,
        }
    }
}

/// Read-only copy of the simulator state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub phase: SimulationPhase,
    pub progress: f64,
    pub metrics: TrainingMetrics,
    pub current_epoch: u32,
    pub total_epochs: u32,
    pub current_step: u64,
    pub is_training: bool,
    pub is_paused: bool,
    pub logs: Vec<TrainingLogEntry>,
}

impl SimulationSnapshot {
    /// `m:ss` rendering of the elapsed time.
    pub fn formatted_elapsed(&self) -> String {
        let secs = self.metrics.time_elapsed;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Train -> Results handoff, sent once when a run ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingCompletion {
    pub reason: CompletionReason,
    pub final_progress: f64,
    pub final_metrics: TrainingMetrics,
}
