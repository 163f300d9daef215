//! Headless core of a no-code fine-tuning workflow.
//!
//! Upload a CSV, pick a task and base model, configure hyperparameters, run a
//! simulated training loop, and view illustrative results. Nothing is trained
//! for real; the progress simulator only fabricates a plausible-looking run.

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use app::{init, AppState};
pub use domain::error::{AppError, Result};
