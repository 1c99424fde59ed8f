use thiserror::Error;

/// Errors raised by a signal bus
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("Invalid topic: {0:?}")]
    InvalidTopic(String),

    #[error("Signal bus closed")]
    Closed,
}

pub type SignalResult<T> = std::result::Result<T, SignalError>;

/// Errors raised by a wrapper adapter call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Bid request failed: {0}")]
    Request(String),

    #[error("Bid request timed out")]
    Timeout,

    #[error("Library not loaded")]
    NotLoaded,
}

pub type AdapterResult<T> = std::result::Result<T, AdapterError>;
