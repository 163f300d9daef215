pub mod catalog;
pub mod error;
pub mod history;
pub mod results;
pub mod training;

// Upload preview module
pub mod csv;
