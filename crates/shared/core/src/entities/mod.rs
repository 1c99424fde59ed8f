mod bid;
mod partner;
mod partner_status;

pub use bid::{AdSize, AdUnit, Bid, BidResponse, BidderStatus};
pub use partner::{
    MIN_PARTNER_TIMEOUT_MS, PartnerDefinition, SignalSource, Tier, partner_complete_topic,
};
pub use partner_status::{PartnerStatus, ReadinessStatus, StatusSnapshot};
