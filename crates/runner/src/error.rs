//! Error types for the runner crate

use herald_orchestrator::{ConfigError, OrchestratorError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid partner configuration: {0}")]
    Partners(#[from] ConfigError),

    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Session was shut down")]
    ShutDown,
}

pub type Result<T> = std::result::Result<T, RunnerError>;
