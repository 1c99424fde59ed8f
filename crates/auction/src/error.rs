//! Error types for the auction crate

use thiserror::Error;

/// Adapter registration errors
///
/// Never fatal: the adapter is left out and the rest of the registry works.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Adapter has no name")]
    MissingName,

    #[error("Adapter {0} is not bound to a partner")]
    MissingPartner(String),

    #[error("Adapter {0} is already registered")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
