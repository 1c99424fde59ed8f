//! Herald Core Domain
//!
//! Pure domain types for partner readiness and slot auctions.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Bidding
    AdSize,
    AdUnit,
    Bid,
    BidResponse,
    BidderStatus,
    // Partners
    MIN_PARTNER_TIMEOUT_MS,
    PartnerDefinition,
    PartnerStatus,
    ReadinessStatus,
    SignalSource,
    StatusSnapshot,
    Tier,
    partner_complete_topic,
};
pub use values::{Cpm, DimensionContext, DimensionPredicate, SlotId, Timestamp};
