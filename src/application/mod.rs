pub mod use_cases;

pub use use_cases::configure::{ConfigureUseCase, TrainingPlan};
pub use use_cases::history::HistoryUseCase;
pub use use_cases::model_selection::ModelSelectionUseCase;
pub use use_cases::progress_simulator::{ProgressSimulator, TickOutcome};
pub use use_cases::results::ResultsUseCase;
pub use use_cases::training_session::{TrainingHandle, TrainingSession};
pub use use_cases::upload::{UploadOutcome, UploadUseCase};
pub use use_cases::workflow::{WorkflowSession, WorkflowStage};
