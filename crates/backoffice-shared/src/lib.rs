//! # Back Office Shared
//!
//! Shared utilities, configuration, and telemetry for the back office services.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::AppError;
pub use types::*;
