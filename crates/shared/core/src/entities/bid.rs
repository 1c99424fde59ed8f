use serde::{Deserialize, Serialize};

use crate::values::Cpm;

/// Creative size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single bid returned by a wrapper adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Bidder that produced the bid (adapter-defined, may differ from the adapter name)
    pub bidder: String,
    /// Price per thousand impressions
    pub cpm: Cpm,
    pub size: Option<AdSize>,
    pub creative_id: Option<String>,
}

impl Bid {
    pub fn new(bidder: impl Into<String>, cpm: Cpm) -> Self {
        Self {
            bidder: bidder.into(),
            cpm,
            size: None,
            creative_id: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(AdSize::new(width, height));
        self
    }

    pub fn with_creative(mut self, creative_id: impl Into<String>) -> Self {
        self.creative_id = Some(creative_id.into());
        self
    }
}

/// Result of one `request_bids` call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BidResponse {
    pub success: bool,
    pub bids: Vec<Bid>,
    pub reason: Option<String>,
}

impl BidResponse {
    /// Successful response carrying bids (possibly none)
    pub fn with_bids(bids: Vec<Bid>) -> Self {
        Self {
            success: true,
            bids,
            reason: None,
        }
    }

    /// Successful response with nothing to offer
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            success: true,
            bids: Vec::new(),
            reason: Some(reason.into()),
        }
    }

    /// Unsuccessful response
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            bids: Vec::new(),
            reason: Some(reason.into()),
        }
    }

    /// True if the response contributes at least one bid
    pub fn has_bids(&self) -> bool {
        self.success && !self.bids.is_empty()
    }
}

/// Library-specific description of a slot, as reported by an adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdUnit {
    /// Adapter-side ad unit code
    pub code: String,
    pub slot_id: String,
    pub sizes: Vec<AdSize>,
}

impl AdUnit {
    pub fn new(code: impl Into<String>, slot_id: impl Into<String>, sizes: Vec<AdSize>) -> Self {
        Self {
            code: code.into(),
            slot_id: slot_id.into(),
            sizes,
        }
    }
}

/// Per-adapter status within one slot auction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BidderStatus {
    /// Not participating in this auction
    #[default]
    Off,
    /// Request dispatched, no answer yet
    Pending,
    HasBids,
    NoBids,
}
