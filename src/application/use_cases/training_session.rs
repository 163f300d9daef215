//! Drives a `ProgressSimulator` from a single tokio interval.
//!
//! The timer task never captures flags by value: each tick locks the shared
//! simulator and lets it decide whether to do anything, so pausing or stopping
//! never re-arms the timer. Dropping the handle aborts the task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{oneshot, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info};

use crate::application::use_cases::progress_simulator::{ProgressSimulator, TickOutcome};
use crate::domain::training::{SimulationSnapshot, TrainingCompletion};
use crate::infrastructure::config::SimulatorSettings;

type SharedSimulator = Arc<Mutex<ProgressSimulator>>;

fn lock(simulator: &SharedSimulator) -> MutexGuard<'_, ProgressSimulator> {
    simulator.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct TrainingSession;

impl TrainingSession {
    /// Spawn the timer task for `simulator`. Must be called inside a tokio runtime.
    ///
    /// Tick interval and delays come from the simulator's own settings.
    pub fn start(simulator: ProgressSimulator) -> TrainingHandle {
        let settings = simulator.settings().clone();
        let simulator: SharedSimulator = Arc::new(Mutex::new(simulator));
        let wake = Arc::new(Notify::new());
        let (completion_tx, completion_rx) = oneshot::channel();

        let task = tokio::spawn(drive(
            simulator.clone(),
            settings,
            wake.clone(),
            completion_tx,
        ));

        TrainingHandle {
            simulator,
            wake,
            task,
            completion: Some(completion_rx),
        }
    }
}

async fn drive(
    simulator: SharedSimulator,
    settings: SimulatorSettings,
    wake: Arc<Notify>,
    completion_tx: oneshot::Sender<TrainingCompletion>,
) {
    tokio::select! {
        _ = sleep(settings.init_delay()) => {}
        _ = wake.notified() => {}
    }
    lock(&simulator).begin();

    let mut ticker = interval(settings.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick of a tokio interval completes immediately
    ticker.tick().await;

    loop {
        if lock(&simulator).is_completed() {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                if lock(&simulator).tick() == TickOutcome::Completed {
                    break;
                }
            }
            // stop requested; re-check the phase
            _ = wake.notified() => {}
        }
    }
    debug!("Training timer stopped");

    sleep(settings.completion_delay()).await;
    let completion = lock(&simulator).completion();
    if let Some(completion) = completion {
        info!(reason = ?completion.reason, "Training completion signalled");
        let _ = completion_tx.send(completion);
    }
}

/// Owner of a running simulation; the view holds this while it is open.
pub struct TrainingHandle {
    simulator: SharedSimulator,
    wake: Arc<Notify>,
    task: JoinHandle<()>,
    completion: Option<oneshot::Receiver<TrainingCompletion>>,
}

impl TrainingHandle {
    pub fn snapshot(&self) -> SimulationSnapshot {
        lock(&self.simulator).snapshot()
    }

    /// Returns false when the run cannot be paused or resumed.
    pub fn toggle_pause(&self) -> bool {
        lock(&self.simulator).toggle_pause()
    }

    /// Stop the run; the completion signal follows after the completion delay.
    pub fn stop(&self) -> bool {
        let stopped = lock(&self.simulator).stop();
        if stopped {
            self.wake.notify_one();
        }
        stopped
    }

    /// Take the one-shot completion receiver. Yields `None` after the first call.
    pub fn take_completion_signal(&mut self) -> Option<oneshot::Receiver<TrainingCompletion>> {
        self.completion.take()
    }

    /// Wait for the run to end and the completion delay to pass.
    ///
    /// Returns `None` if the signal was already taken or the task was cancelled.
    pub async fn wait_for_completion(&mut self) -> Option<TrainingCompletion> {
        let receiver = self.completion.take()?;
        receiver.await.ok()
    }

    /// Whether the timer task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the timer without producing a completion signal.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TrainingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::log_templates::{MessageTemplates, SelectionPolicy};
    use crate::application::use_cases::progress_simulator::STOPPED_MESSAGE;
    use crate::domain::training::{CompletionReason, SimulationPhase, TrainingConfig};
    use crate::infrastructure::random::SequenceRandom;
    use std::time::Duration;
    use tokio::time::Instant;

    fn simulator(epochs: u32, sample: f64, settings: &SimulatorSettings) -> ProgressSimulator {
        let config = TrainingConfig {
            epochs,
            ..Default::default()
        };
        ProgressSimulator::new(config, settings.clone())
            .unwrap()
            .with_random(Box::new(SequenceRandom::constant(sample)))
            .with_messages(Box::new(MessageTemplates::standard(
                SelectionPolicy::RoundRobin,
            )))
    }

    #[tokio::test(start_paused = true)]
    async fn test_initializing_until_delay_passes() {
        let settings = SimulatorSettings::default();
        let handle = TrainingSession::start(simulator(3, 0.5, &settings));

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(handle.snapshot().phase, SimulationPhase::Initializing);

        sleep(Duration::from_millis(1100)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.phase, SimulationPhase::Running);
        assert_eq!(snapshot.progress, 0.0);
        assert_eq!(snapshot.logs.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_signals_once() {
        let settings = SimulatorSettings::default();
        let mut handle = TrainingSession::start(simulator(5, 0.5, &settings));

        let completion = handle.wait_for_completion().await.unwrap();
        assert_eq!(completion.reason, CompletionReason::Finished);
        assert_eq!(completion.final_progress, 100.0);

        // the receiver is consumed; no second signal exists
        assert!(handle.wait_for_completion().await.is_none());
        assert!(handle.take_completion_signal().is_none());

        let snapshot = handle.snapshot();
        assert!(!snapshot.is_training);
        assert_eq!(snapshot.current_epoch, 5);

        sleep(Duration::from_millis(1)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_holds_progress() {
        let settings = SimulatorSettings::default();
        let handle = TrainingSession::start(simulator(3, 0.5, &settings));

        sleep(settings.init_delay() + settings.tick_interval() * 5).await;
        assert!(handle.toggle_pause());
        let paused = handle.snapshot();
        assert!(paused.is_paused);

        sleep(settings.tick_interval() * 10).await;
        assert_eq!(handle.snapshot(), paused);

        assert!(handle.toggle_pause());
        sleep(settings.tick_interval() * 3).await;
        assert!(handle.snapshot().progress > paused.progress);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_mid_run_signals_after_delay() {
        let settings = SimulatorSettings::default();
        let mut handle = TrainingSession::start(simulator(5, 0.0, &settings));
        let signal = handle.take_completion_signal().unwrap();

        sleep(settings.init_delay()).await;
        while handle.snapshot().progress < 42.0 {
            sleep(settings.tick_interval()).await;
        }
        let progress_at_stop = handle.snapshot().progress;

        let stopped_at = Instant::now();
        assert!(handle.stop());
        assert!(!handle.stop());

        let completion = signal.await.unwrap();
        assert!(stopped_at.elapsed() >= settings.completion_delay());
        assert_eq!(completion.reason, CompletionReason::Stopped);
        assert_eq!(completion.final_progress, progress_at_stop);

        let snapshot = handle.snapshot();
        assert!(!snapshot.is_training);
        assert_eq!(snapshot.progress, progress_at_stop);
        let stopped_lines = snapshot
            .logs
            .iter()
            .filter(|l| l.message == STOPPED_MESSAGE)
            .count();
        assert_eq!(stopped_lines, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_initialization() {
        let settings = SimulatorSettings::default();
        let mut handle = TrainingSession::start(simulator(3, 0.5, &settings));

        assert!(handle.stop());
        let completion = handle.wait_for_completion().await.unwrap();
        assert_eq!(completion.reason, CompletionReason::Stopped);
        assert_eq!(completion.final_progress, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let settings = SimulatorSettings::default();
        let handle = TrainingSession::start(simulator(3, 0.5, &settings));
        let shared = handle.simulator.clone();

        sleep(settings.init_delay() + settings.tick_interval() * 3).await;
        drop(handle);
        // let the runtime process the abort
        sleep(Duration::from_millis(1)).await;

        let before = lock(&shared).snapshot();
        sleep(settings.tick_interval() * 20).await;
        assert_eq!(lock(&shared).snapshot(), before);
        assert!(before.is_training);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_follows_simulator_settings() {
        let settings = SimulatorSettings {
            tick_interval_ms: 400,
            init_delay_ms: 100,
            completion_delay_ms: 100,
            ..Default::default()
        };
        let handle = TrainingSession::start(simulator(3, 0.5, &settings));

        sleep(Duration::from_millis(100 + 400 * 10 + 50)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.current_step, 10);
        assert_eq!(snapshot.progress, 10.0);
        // 10 ticks of 0.4s
        assert_eq!(snapshot.metrics.time_elapsed, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_completion_signal() {
        let settings = SimulatorSettings::default();
        let mut handle = TrainingSession::start(simulator(3, 0.5, &settings));
        handle.cancel();
        assert!(handle.wait_for_completion().await.is_none());
    }
}
