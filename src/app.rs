use std::path::Path;

use tracing::info;

use crate::application::{
    ConfigureUseCase, ModelSelectionUseCase, ProgressSimulator, ResultsUseCase, TrainingHandle,
    TrainingPlan, TrainingSession, UploadOutcome, UploadUseCase, WorkflowSession,
};
use crate::domain::catalog::ModelSelection;
use crate::domain::csv::UploadedFile;
use crate::domain::error::Result;
use crate::domain::training::{TrainingCompletion, TrainingConfig};
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::logging::init_tracing;

/// Application state handed from one view controller to the next.
pub struct AppState {
    pub config: AppConfig,
    pub session: WorkflowSession,
    pub upload_use_case: UploadUseCase,
    pub results_use_case: ResultsUseCase,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            upload_use_case: UploadUseCase::new(&config.upload),
            results_use_case: ResultsUseCase::new(config.results.clone()),
            session: WorkflowSession::new(),
            config,
        })
    }

    /// Upload view: parse the file and record the handoff on success only.
    pub fn upload(&mut self, file: &UploadedFile) -> Result<UploadOutcome> {
        let outcome = self.upload_use_case.process(file)?;
        self.session.record_upload(outcome.dataset.clone());
        Ok(outcome)
    }

    /// Select view.
    pub fn select_model(&mut self, task: &str, model: &str) -> Result<ModelSelection> {
        self.session.upload()?;
        let selection = ModelSelectionUseCase::select(task, model)?;
        self.session.record_selection(selection.clone())?;
        Ok(selection)
    }

    /// Configure view.
    pub fn configure(&mut self, config: TrainingConfig) -> Result<TrainingPlan> {
        let dataset = self.session.upload()?;
        self.session.selection()?;
        let plan = ConfigureUseCase::plan(config, dataset)?;
        self.session.record_training_config(plan.config.clone())?;
        Ok(plan)
    }

    /// Train view: spawn the simulated run. Requires a tokio runtime.
    pub fn start_training(&self) -> Result<TrainingHandle> {
        let config = self.session.training_config()?.clone();
        let selection = self.session.selection()?;
        let simulator = ProgressSimulator::new(config, self.config.simulator.clone())?
            .with_model_label(selection.model.clone());
        info!(model = %selection.model, "Starting simulated training");
        Ok(TrainingSession::start(simulator))
    }

    /// Consume the completion signal of a run.
    pub fn finish_training(&mut self, completion: TrainingCompletion) -> Result<()> {
        self.session.record_completion(completion)
    }

    /// Results view: model card for the finished run.
    pub fn model_card(&self) -> Result<String> {
        self.session.completion()?;
        let selection = self.session.selection()?;
        Ok(self.results_use_case.model_card(selection))
    }
}

/// Load configuration, install tracing, and build the initial state.
pub fn init(config_file: Option<&Path>) -> Result<AppState> {
    let config = ConfigService::load(config_file)?;
    init_tracing(&config.log_filter);
    info!("Auto Tune core initialised");
    AppState::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::WorkflowStage;
    use crate::domain::error::AppError;
    use crate::domain::training::CompletionReason;

    fn state() -> AppState {
        let mut config = AppConfig::default();
        config.simulator.tick_interval_ms = 500;
        AppState::new(config).unwrap()
    }

    fn csv_file() -> UploadedFile {
        UploadedFile::new("customer-reviews.csv", "text,label\ngreat,1\nbad,0\nfine,1\n")
    }

    #[test]
    fn test_failed_upload_keeps_previous_state() {
        let mut app = state();
        app.upload(&csv_file()).unwrap();
        app.select_model("text-classification", "bert-base-uncased")
            .unwrap();

        let err = app
            .upload(&UploadedFile::new("broken.csv", "header-only\n"))
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(app.session.upload().unwrap().name, "customer-reviews.csv");
        assert_eq!(app.session.stage(), WorkflowStage::Configure);
    }

    #[test]
    fn test_steps_require_earlier_handoffs() {
        let mut app = state();
        assert!(matches!(
            app.select_model("summarization", "t5-small"),
            Err(AppError::NotFound(_))
        ));
        assert!(app.configure(TrainingConfig::default()).is_err());
        assert!(app.model_card().is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.simulator.loss_floor = 3.0;
        assert!(matches!(AppState::new(config), Err(AppError::ConfigError(_))));

        let mut config = AppConfig::default();
        config.simulator.min_increment = -2.0;
        config.simulator.max_increment = -1.0;
        assert!(matches!(AppState::new(config), Err(AppError::ConfigError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_training_requires_configuration() {
        let mut app = state();
        app.upload(&csv_file()).unwrap();
        assert!(app.start_training().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_flow() {
        let mut app = state();

        let outcome = app.upload(&csv_file()).unwrap();
        assert_eq!(outcome.preview.headers, vec!["text", "label"]);
        assert_eq!(outcome.dataset.row_count, 3);

        app.select_model("text-classification", "distilbert-base-uncased")
            .unwrap();
        let plan = app
            .configure(TrainingConfig {
                epochs: 2,
                batch_size: 32,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(plan.estimated_minutes, 1);

        let mut handle = app.start_training().unwrap();
        let completion = handle.wait_for_completion().await.unwrap();
        assert_eq!(completion.reason, CompletionReason::Finished);
        assert_eq!(handle.snapshot().current_epoch, 2);

        app.finish_training(completion).unwrap();
        assert_eq!(app.session.stage(), WorkflowStage::Results);

        let card = app.model_card().unwrap();
        assert!(card.contains("distilbert-base-uncased"));
    }
}
