//! Auction state and archive entries

use herald_core::{Bid, BidderStatus, SlotId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One slot auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionState {
    pub slot_id: SlotId,
    /// Identity of this auction; responses from an older one are dropped
    pub generation: Uuid,
    /// Merged bids, arrival order
    pub bids: Vec<Bid>,
    /// Adapter -> response latency (ms)
    pub bidder_timing: BTreeMap<String, u64>,
    pub started_at: Timestamp,
    pub timeout_budget_ms: u64,
    /// One entry per registered adapter
    pub statuses: BTreeMap<String, BidderStatus>,
}

impl AuctionState {
    pub fn new<'a>(
        slot_id: impl Into<SlotId>,
        started_at: Timestamp,
        timeout_budget_ms: u64,
        adapters: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            slot_id: slot_id.into(),
            generation: Uuid::new_v4(),
            bids: Vec::new(),
            bidder_timing: BTreeMap::new(),
            started_at,
            timeout_budget_ms,
            statuses: adapters
                .into_iter()
                .map(|name| (name.to_string(), BidderStatus::Off))
                .collect(),
        }
    }

    /// Status of an adapter (`Off` if it is not part of this auction)
    pub fn status(&self, adapter: &str) -> BidderStatus {
        self.statuses.get(adapter).copied().unwrap_or_default()
    }

    /// Adapters still waiting for a response
    pub fn pending(&self) -> Vec<&str> {
        self.with_status(BidderStatus::Pending)
    }

    pub fn with_status(&self, status: BidderStatus) -> Vec<&str> {
        self.statuses
            .iter()
            .filter(|(_, s)| **s == status)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// No adapter is pending any more
    pub fn is_settled(&self) -> bool {
        !self.statuses.values().any(|s| *s == BidderStatus::Pending)
    }

    /// Highest CPM; the earliest arrival wins ties
    pub fn highest_bid(&self) -> Option<&Bid> {
        self.bids.iter().reduce(|best, bid| if bid.cpm > best.cpm { bid } else { best })
    }
}

/// A cleared auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub archived_at: Timestamp,
    pub state: AuctionState,
}
