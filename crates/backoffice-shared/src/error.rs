//! Process-level setup errors

use thiserror::Error;

/// Errors surfaced while bootstrapping a process: configuration loading
/// and anything else that happens before the domain layer exists.
/// Domain failures use `DomainError` in the core crate instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
