use async_trait::async_trait;
use herald_core::{AdUnit, BidResponse, DimensionContext};
use std::time::Duration;

use crate::error::AdapterResult;

/// Wrapper adapter - one per bidding library
///
/// The method set is the integration contract; the adapter registry only
/// checks what the type system cannot (names, uniqueness).
#[async_trait]
pub trait WrapperAdapter: Send + Sync {
    /// Adapter name, unique within a registry
    fn name(&self) -> &str;

    /// Partner whose readiness gates this adapter
    fn partner(&self) -> &str;

    /// Configuration flag; disabled adapters do not count as enabled wrappers
    fn is_enabled(&self) -> bool {
        true
    }

    /// Has the underlying library finished loading?
    fn is_library_loaded(&self) -> bool;

    /// One-time setup once the library is available
    fn init(&self, ctx: &DimensionContext);

    /// Does this adapter have configuration for the slot?
    fn has_slot_config(&self, slot_id: &str, ctx: &DimensionContext) -> bool;

    /// Library-specific ad unit for the slot, if any
    fn get_ad_unit(&self, slot_id: &str, ctx: &DimensionContext) -> Option<AdUnit>;

    /// Request bids for a slot, expected to resolve within `timeout`
    async fn request_bids(
        &self,
        slot_id: &str,
        ctx: &DimensionContext,
        timeout: Duration,
    ) -> AdapterResult<BidResponse>;

    /// Push winning targeting for the slot into the ad server
    fn apply_targeting(&self, slot_id: &str);

    /// Drop any per-slot state (optional)
    fn clear_slot(&self, _slot_id: &str) {}
}
