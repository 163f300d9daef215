pub mod configure;
pub mod history;
pub mod log_templates;
pub mod model_selection;
pub mod progress_simulator;
pub mod results;
pub mod training_session;
pub mod upload;
pub mod workflow;
