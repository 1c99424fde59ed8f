use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::values::Timestamp;

/// Partner lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadinessStatus {
    /// Waiting for a completion signal
    #[default]
    Pending,
    /// Completion signal received
    Ready,
    /// Tier deadline elapsed first (fail-open, not an error)
    Timeout,
    /// Partner reported a load failure
    Error,
}

impl ReadinessStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ReadinessStatus::Pending)
    }

    /// Ready or timed out; dependents may load and auctions may dispatch
    pub fn is_settled(&self) -> bool {
        matches!(self, ReadinessStatus::Ready | ReadinessStatus::Timeout)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }
}

/// Mutable status row for one active partner
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartnerStatus {
    pub status: ReadinessStatus,
    /// Set when the partner became ready
    pub ready_at: Option<Timestamp>,
}

impl PartnerStatus {
    pub fn pending() -> Self {
        Self::default()
    }
}

/// Point-in-time copy of partner statuses, keyed by partner name
pub type StatusSnapshot = BTreeMap<String, PartnerStatus>;
