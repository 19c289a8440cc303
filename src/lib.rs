pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

// Use cases and views on one side, the backend adapter on the other
pub mod app;
pub mod infra;

pub use error::{QeventError, Result};
