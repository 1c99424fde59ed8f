//! Orchestrator errors

use herald_ports::SignalError;
use thiserror::Error;

/// Structural problems in the partner configuration
///
/// Always fatal to `init`: the tier budgets would be undefined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Partner definition has an empty name")]
    EmptyName,

    #[error("Duplicate partner: {0}")]
    DuplicatePartner(String),

    #[error("Partner {0} has no timeout")]
    MissingTimeout(String),

    #[error("Partner {0} depends on itself")]
    SelfDependency(String),

    #[error("Partner {partner} depends on unknown partner {dependency}")]
    UnknownDependency { partner: String, dependency: String },

    #[error("Dependency cycle: {path}")]
    DependencyCycle { path: String },
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Invalid partner configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to subscribe to completion signal of {partner}: {source}")]
    Subscription {
        partner: String,
        #[source]
        source: SignalError,
    },

    #[error("Orchestrator must be initialised inside a tokio runtime")]
    NoRuntime,

    #[error("Unknown partner: {0}")]
    UnknownPartner(String),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
