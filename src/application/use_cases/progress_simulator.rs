//! Timer-free core of the simulated training run.
//!
//! `ProgressSimulator` owns every piece of run state and mutates it only
//! through `begin`, `tick`, `toggle_pause` and `stop`. Whatever drives the
//! clock (see `training_session`) calls `tick` on a fixed interval; the
//! simulator itself decides whether a tick does anything.

use tracing::{debug, info};

use crate::application::use_cases::log_templates::{
    LogMessageProvider, MessageContext, MessageTemplates, SelectionPolicy,
};
use crate::domain::error::{AppError, Result};
use crate::domain::training::{
    CompletionReason, LogLevel, SimulationPhase, SimulationSnapshot, TrainingCompletion,
    TrainingConfig, TrainingLogEntry, TrainingMetrics,
};
use crate::infrastructure::config::SimulatorSettings;
use crate::infrastructure::random::{RandomSource, StdRandom};

pub const STOPPED_MESSAGE: &str = "Training stopped by user";
pub const COMPLETED_MESSAGE: &str = "Training completed successfully!";
pub const PAUSED_MESSAGE: &str = "Training paused";
pub const RESUMED_MESSAGE: &str = "Training resumed";

/// What a single `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (initializing, paused or completed); nothing changed
    Idle,
    /// Progress moved forward
    Advanced,
    /// Progress reached 100 on this tick
    Completed,
}

pub struct ProgressSimulator {
    settings: SimulatorSettings,
    config: TrainingConfig,
    model_label: Option<String>,
    phase: SimulationPhase,
    progress: f64,
    metrics: TrainingMetrics,
    current_epoch: u32,
    current_step: u64,
    elapsed_ms: u64,
    logs: Vec<TrainingLogEntry>,
    random: Box<dyn RandomSource>,
    messages: Box<dyn LogMessageProvider>,
}

impl ProgressSimulator {
    /// Rejects settings that would break the progress or metric bounds.
    pub fn new(config: TrainingConfig, settings: SimulatorSettings) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid simulator settings: {}", e)))?;
        Ok(Self {
            settings,
            config,
            model_label: None,
            phase: SimulationPhase::Initializing,
            progress: 0.0,
            metrics: TrainingMetrics::initial(),
            current_epoch: 1,
            current_step: 0,
            elapsed_ms: 0,
            logs: Vec::new(),
            random: Box::new(StdRandom::from_entropy()),
            messages: Box::new(MessageTemplates::standard(SelectionPolicy::Random)),
        })
    }

    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_messages(mut self, messages: Box<dyn LogMessageProvider>) -> Self {
        self.messages = messages;
        self
    }

    /// Base model name used in the startup log lines.
    pub fn with_model_label(mut self, model: impl Into<String>) -> Self {
        self.model_label = Some(model.into());
        self
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn current_epoch(&self) -> u32 {
        self.current_epoch
    }

    pub fn is_training(&self) -> bool {
        self.phase.is_active()
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SimulationPhase::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.phase.is_completed()
    }

    pub fn logs(&self) -> &[TrainingLogEntry] {
        &self.logs
    }

    fn total_epochs(&self) -> u32 {
        self.config.epochs.max(1)
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            phase: self.phase,
            progress: self.progress,
            metrics: self.metrics,
            current_epoch: self.current_epoch,
            total_epochs: self.total_epochs(),
            current_step: self.current_step,
            is_training: self.is_training(),
            is_paused: self.is_paused(),
            logs: self.logs.clone(),
        }
    }

    /// The Train -> Results handoff, once the run has ended.
    pub fn completion(&self) -> Option<TrainingCompletion> {
        match self.phase {
            SimulationPhase::Completed(reason) => Some(TrainingCompletion {
                reason,
                final_progress: self.progress,
                final_metrics: self.metrics,
            }),
            _ => None,
        }
    }

    /// Leave `Initializing` and seed the startup log lines.
    ///
    /// Returns false if the run already started or ended.
    pub fn begin(&mut self) -> bool {
        if self.phase != SimulationPhase::Initializing {
            return false;
        }
        self.phase = SimulationPhase::Running;

        let model = match &self.model_label {
            Some(model) => format!("Loading base model {}...", model),
            None => "Loading base model...".to_string(),
        };
        let startup = [
            "Initializing training environment...".to_string(),
            model,
            "Tokenizing dataset...".to_string(),
            format!(
                "Starting training: {} epochs, batch size {}, learning rate {:e}",
                self.total_epochs(),
                self.config.batch_size,
                self.config.learning_rate
            ),
        ];
        for message in startup {
            self.push_log(message, LogLevel::Info, None);
        }

        info!(epochs = self.total_epochs(), "Simulated training started");
        true
    }

    /// Advance the run by one timer interval.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != SimulationPhase::Running {
            return TickOutcome::Idle;
        }

        let span = self.settings.max_increment - self.settings.min_increment;
        let increment = self.settings.min_increment + self.random.next_f64() * span;
        self.progress = (self.progress + increment).min(100.0);
        self.current_step += 1;
        self.elapsed_ms += self.settings.tick_interval_ms;
        self.metrics = TrainingMetrics {
            accuracy: accuracy_at(self.progress, self.settings.accuracy_ceiling),
            loss: loss_at(self.progress, self.settings.loss_floor),
            time_elapsed: self.elapsed_ms / 1000,
        };

        if self.random.next_f64() < self.settings.log_probability {
            let ctx = MessageContext {
                epoch: self.current_epoch,
                total_epochs: self.total_epochs(),
                step: self.current_step,
                loss: self.metrics.loss,
                accuracy: self.metrics.accuracy,
                progress: self.progress,
            };
            let message = self.messages.next_message(&ctx, self.random.as_mut());
            self.push_log(message, LogLevel::Info, Some(self.metrics.accuracy));
        }

        // at most one epoch per tick
        let total = self.total_epochs();
        let boundary = self.current_epoch as f64 * 100.0 / total as f64;
        if self.current_epoch < total && self.progress >= boundary {
            self.current_epoch += 1;
            debug!(epoch = self.current_epoch, progress = self.progress, "Epoch advanced");
            let message = format!("Epoch {}/{} started", self.current_epoch, total);
            self.push_log(message, LogLevel::Info, Some(self.metrics.accuracy));
        }

        if self.progress >= 100.0 {
            self.phase = SimulationPhase::Completed(CompletionReason::Finished);
            self.push_log(
                COMPLETED_MESSAGE.to_string(),
                LogLevel::Info,
                Some(self.metrics.accuracy),
            );
            let summary = format!(
                "Final accuracy: {:.1}%, final loss: {:.4}",
                self.metrics.accuracy, self.metrics.loss
            );
            self.push_log(summary, LogLevel::Info, Some(self.metrics.accuracy));
            info!(steps = self.current_step, "Simulated training finished");
            return TickOutcome::Completed;
        }

        TickOutcome::Advanced
    }

    /// Flip between running and paused, logging the transition.
    ///
    /// Returns false when the run is not in a pausable state.
    pub fn toggle_pause(&mut self) -> bool {
        let (next, message) = match self.phase {
            SimulationPhase::Running => (SimulationPhase::Paused, PAUSED_MESSAGE),
            SimulationPhase::Paused => (SimulationPhase::Running, RESUMED_MESSAGE),
            _ => return false,
        };
        self.phase = next;
        self.push_log(message.to_string(), LogLevel::Info, None);
        debug!(phase = ?self.phase, "Pause toggled");
        true
    }

    /// End the run early without claiming full progress.
    ///
    /// Returns false if the run had already ended.
    pub fn stop(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        self.phase = SimulationPhase::Completed(CompletionReason::Stopped);
        self.push_log(STOPPED_MESSAGE.to_string(), LogLevel::Warning, None);
        info!(progress = self.progress, "Simulated training stopped by user");
        true
    }

    fn push_log(&mut self, message: String, level: LogLevel, accuracy: Option<f64>) {
        let entry = TrainingLogEntry::now(
            self.current_epoch,
            self.current_step,
            self.metrics.loss,
            accuracy,
            message,
        )
        .with_level(level);
        self.logs.push(entry);
        if self.logs.len() > self.settings.log_cap {
            let excess = self.logs.len() - self.settings.log_cap;
            self.logs.drain(..excess);
        }
    }
}

/// Linear decay from 2.5 to `floor` over the run.
pub fn loss_at(progress: f64, floor: f64) -> f64 {
    let initial = TrainingMetrics::INITIAL_LOSS.max(floor);
    let remaining = 1.0 - (progress / 100.0).clamp(0.0, 1.0);
    (floor + remaining * (initial - floor)).clamp(floor, initial)
}

/// Linear growth from 0 to `ceiling` over the run.
pub fn accuracy_at(progress: f64, ceiling: f64) -> f64 {
    ((progress / 100.0) * ceiling).min(ceiling)
}
