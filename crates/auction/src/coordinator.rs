//! Auction Coordinator
//!
//! Runs one auction per slot: every ready, slot-applicable adapter is asked
//! for bids concurrently under a single timeout budget, and the answers are
//! merged into the slot's state as they arrive.
//!
//! ## Dispatch
//!
//! ```text
//! request_auction(slot)
//!   │
//!   ├─ no async runtime ──────────────► off
//!   ├─ partner inactive / unsettled ──► off
//!   ├─ adapter disabled ──────────────► off
//!   ├─ no slot config ────────────────► off
//!   └─ otherwise ─────────────────────► pending ── spawn request_bids
//!                                                      │
//!                     response with bids ──► hasBids ◄─┤
//!        empty / failed / over budget ─────► noBids  ◄─┘
//! ```
//!
//! Adapter calls are never killed. A response that arrives after its budget,
//! after the auction was cleared, or for an older generation of the slot is
//! dropped on arrival.

use crate::registry::AdapterRegistry;
use crate::rules::TimeoutConfig;
use crate::state::{ArchiveEntry, AuctionState};
use crate::targeting::DimensionMatcher;
use dashmap::DashMap;
use herald_core::{AdUnit, Bid, BidResponse, BidderStatus, DimensionContext, SlotId};
use herald_ports::{Clock, PartnerReadiness, TargetingEvaluator, WrapperAdapter};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinatorConfig {
    pub timeouts: TimeoutConfig,
    /// Archive entries kept per slot; unbounded when unset
    pub archive_limit: Option<usize>,
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct AuctionOptions {
    pub context: DimensionContext,
    /// Use this budget instead of the rule-derived one
    pub timeout_override: Option<Duration>,
}

impl AuctionOptions {
    pub fn new(context: DimensionContext) -> Self {
        Self {
            context,
            timeout_override: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }
}

/// How one adapter call ended
#[derive(Debug)]
enum CallOutcome {
    Response(BidResponse),
    Failed(String),
    OverBudget,
}

struct ActiveAuction {
    state: AuctionState,
    started: Instant,
}

struct Inner {
    adapters: AdapterRegistry,
    readiness: Arc<dyn PartnerReadiness>,
    evaluator: Arc<dyn TargetingEvaluator>,
    clock: Arc<dyn Clock>,
    config: CoordinatorConfig,
    active: DashMap<SlotId, ActiveAuction>,
    archive: DashMap<SlotId, VecDeque<ArchiveEntry>>,
}

/// Handle on a dispatched auction
pub struct AuctionRequest {
    pub slot_id: SlotId,
    pub generation: Uuid,
    /// Adapters asked for bids, registration order
    pub dispatched: Vec<String>,
    pub timeout: Duration,
    handles: Vec<JoinHandle<()>>,
    inner: Weak<Inner>,
}

impl AuctionRequest {
    /// Wait until every dispatched adapter has answered or run out of budget
    ///
    /// Returns the auction's state, or None if it was cleared or replaced in
    /// the meantime.
    pub async fn settled(self) -> Option<AuctionState> {
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!("Bid collection task for {} failed: {}", self.slot_id, e);
            }
        }
        let inner = self.inner.upgrade()?;
        inner
            .active
            .get(&self.slot_id)
            .filter(|active| active.state.generation == self.generation)
            .map(|active| active.state.clone())
    }
}

/// Per-slot bid collection
///
/// Cheap to clone; clones share the same auctions.
#[derive(Clone)]
pub struct AuctionCoordinator {
    inner: Arc<Inner>,
}

impl AuctionCoordinator {
    pub fn new(
        adapters: AdapterRegistry,
        readiness: Arc<dyn PartnerReadiness>,
        clock: Arc<dyn Clock>,
        config: CoordinatorConfig,
    ) -> Self {
        Self::with_evaluator(adapters, readiness, Arc::new(DimensionMatcher), clock, config)
    }

    pub fn with_evaluator(
        adapters: AdapterRegistry,
        readiness: Arc<dyn PartnerReadiness>,
        evaluator: Arc<dyn TargetingEvaluator>,
        clock: Arc<dyn Clock>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                adapters,
                readiness,
                evaluator,
                clock,
                config,
                active: DashMap::new(),
                archive: DashMap::new(),
            }),
        }
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.inner.adapters
    }

    /// Rule-derived bid timeout for a context
    pub fn timeout_for(&self, ctx: &DimensionContext) -> Duration {
        self.inner
            .config
            .timeouts
            .calculate(ctx, self.inner.evaluator.as_ref())
    }

    /// Start an auction for a slot
    ///
    /// An auction still active for the slot is replaced and archived.
    /// Must be called within a tokio runtime.
    pub fn request_auction(&self, slot_id: &str, options: AuctionOptions) -> AuctionRequest {
        let AuctionOptions {
            context,
            timeout_override,
        } = options;
        let timeout = timeout_override.unwrap_or_else(|| self.timeout_for(&context));
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        let mut state = AuctionState::new(
            slot_id,
            self.inner.clock.now(),
            timeout_ms,
            self.inner.adapters.names(),
        );
        let generation = state.generation;

        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            warn!("No async runtime; auction on {} dispatches no adapters", slot_id);
        }

        let mut participants = Vec::new();
        for adapter in self.inner.adapters.iter() {
            if runtime.is_some() && self.can_dispatch(adapter.as_ref(), slot_id, &context) {
                state
                    .statuses
                    .insert(adapter.name().to_string(), BidderStatus::Pending);
                participants.push(adapter.clone());
            }
        }

        let replaced = self.inner.active.insert(
            slot_id.to_string(),
            ActiveAuction {
                state,
                started: Instant::now(),
            },
        );
        if let Some(previous) = replaced {
            debug!("Replacing active auction {} on {}", previous.state.generation, slot_id);
            self.retire(slot_id.to_string(), previous);
        }

        let dispatched: Vec<String> = participants.iter().map(|a| a.name().to_string()).collect();
        info!(
            "Auction {} for {}: {} of {} adapters, budget {}ms",
            generation,
            slot_id,
            dispatched.len(),
            self.inner.adapters.len(),
            timeout_ms
        );

        let context = Arc::new(context);
        let handles = match runtime {
            Some(runtime) => participants
                .into_iter()
                .map(|adapter| {
                    let weak = Arc::downgrade(&self.inner);
                    let slot = slot_id.to_string();
                    let context = context.clone();
                    runtime.spawn(async move {
                        let outcome = collect_bids(adapter.clone(), &slot, context, timeout).await;
                        if let Some(inner) = weak.upgrade() {
                            inner.merge(&slot, generation, adapter.name(), outcome);
                        }
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        AuctionRequest {
            slot_id: slot_id.to_string(),
            generation,
            dispatched,
            timeout,
            handles,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn can_dispatch(&self, adapter: &dyn WrapperAdapter, slot_id: &str, ctx: &DimensionContext) -> bool {
        let partner = adapter.partner();
        if !self.inner.readiness.is_active(partner) {
            debug!("{}: partner {} inactive", adapter.name(), partner);
            return false;
        }
        if !self.inner.readiness.is_settled(partner) {
            debug!("{}: partner {} not ready", adapter.name(), partner);
            return false;
        }
        if !adapter.is_enabled() {
            debug!("{}: disabled", adapter.name());
            return false;
        }
        if !adapter.has_slot_config(slot_id, ctx) {
            debug!("{}: no config for {}", adapter.name(), slot_id);
            return false;
        }
        true
    }

    /// Push targeting for every adapter that bid on the slot
    ///
    /// Returns the number of adapters applied.
    pub fn apply_bids(&self, slot_id: &str) -> usize {
        let winners: Vec<String> = match self.inner.active.get(slot_id) {
            Some(active) => active
                .state
                .with_status(BidderStatus::HasBids)
                .into_iter()
                .map(str::to_string)
                .collect(),
            None => return 0,
        };

        let mut applied = 0;
        for name in &winners {
            if let Some(adapter) = self.inner.adapters.get(name) {
                adapter.apply_targeting(slot_id);
                applied += 1;
            }
        }
        debug!("Applied targeting from {} adapters on {}", applied, slot_id);
        applied
    }

    /// Retire the slot's auction into the archive
    ///
    /// Returns false if there was no active auction (nothing is archived).
    pub fn clear_auction(&self, slot_id: &str) -> bool {
        let Some((slot, active)) = self.inner.active.remove(slot_id) else {
            return false;
        };
        self.retire(slot, active);
        true
    }

    /// Archive a removed auction and notify adapters
    fn retire(&self, slot: SlotId, active: ActiveAuction) {
        let pending = active.state.pending().len();
        if pending > 0 {
            debug!(
                "Clearing {} with {} adapters still pending; their responses will be dropped",
                slot, pending
            );
        }

        {
            let mut entries = self.inner.archive.entry(slot.clone()).or_default();
            entries.push_back(ArchiveEntry {
                archived_at: self.inner.clock.now(),
                state: active.state,
            });
            if let Some(limit) = self.inner.config.archive_limit {
                while entries.len() > limit {
                    entries.pop_front();
                }
            }
        }

        for adapter in self.inner.adapters.iter() {
            adapter.clear_slot(&slot);
        }
    }

    /// At least one adapter whose partner is active and whose flag is enabled
    pub fn has_enabled_wrappers(&self) -> bool {
        self.inner
            .adapters
            .iter()
            .any(|a| a.is_enabled() && self.inner.readiness.is_active(a.partner()))
    }

    /// Run `init` on every adapter whose library has loaded
    ///
    /// Returns the number of adapters initialised.
    pub fn initialize_adapters(&self, ctx: &DimensionContext) -> usize {
        let mut initialized = 0;
        for adapter in self.inner.adapters.iter() {
            if adapter.is_library_loaded() {
                adapter.init(ctx);
                initialized += 1;
            } else {
                warn!("Library for {} not loaded; skipping init", adapter.name());
            }
        }
        initialized
    }

    /// Ad units each adapter defines for a slot, registration order
    pub fn ad_units(&self, slot_id: &str, ctx: &DimensionContext) -> Vec<(String, AdUnit)> {
        self.inner
            .adapters
            .iter()
            .filter_map(|a| {
                a.get_ad_unit(slot_id, ctx)
                    .map(|unit| (a.name().to_string(), unit))
            })
            .collect()
    }

    /// Snapshot of the slot's active auction
    pub fn auction(&self, slot_id: &str) -> Option<AuctionState> {
        self.inner
            .active
            .get(slot_id)
            .map(|active| active.state.clone())
    }

    /// Archived auctions for a slot, oldest first
    pub fn archive(&self, slot_id: &str) -> Vec<ArchiveEntry> {
        self.inner
            .archive
            .get(slot_id)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn highest_bid(&self, slot_id: &str) -> Option<Bid> {
        self.inner
            .active
            .get(slot_id)
            .and_then(|active| active.state.highest_bid().cloned())
    }

    /// Slots with an active auction
    pub fn active_slots(&self) -> Vec<SlotId> {
        self.inner.active.iter().map(|e| e.key().clone()).collect()
    }
}

/// Call an adapter without letting it overrun the budget
///
/// The call runs in its own task; on timeout the task is detached, not
/// aborted.
async fn collect_bids(
    adapter: Arc<dyn WrapperAdapter>,
    slot_id: &str,
    context: Arc<DimensionContext>,
    timeout: Duration,
) -> CallOutcome {
    let slot = slot_id.to_string();
    let call = tokio::spawn(async move { adapter.request_bids(&slot, &context, timeout).await });

    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(Ok(response))) => CallOutcome::Response(response),
        Ok(Ok(Err(e))) => CallOutcome::Failed(e.to_string()),
        Ok(Err(e)) => CallOutcome::Failed(format!("task failed: {}", e)),
        Err(_) => CallOutcome::OverBudget,
    }
}

impl Inner {
    /// Fold one adapter's outcome into the slot's auction
    fn merge(&self, slot_id: &str, generation: Uuid, adapter: &str, outcome: CallOutcome) {
        let Some(mut active) = self.active.get_mut(slot_id) else {
            debug!("Dropping {} response for cleared auction on {}", adapter, slot_id);
            return;
        };
        if active.state.generation != generation {
            debug!("Dropping {} response from an older auction on {}", adapter, slot_id);
            return;
        }
        if active.state.status(adapter) != BidderStatus::Pending {
            return;
        }

        let latency_ms = u64::try_from(active.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = match outcome {
            CallOutcome::Response(response) if response.has_bids() => {
                debug!(
                    "{} returned {} bids for {} in {}ms",
                    adapter,
                    response.bids.len(),
                    slot_id,
                    latency_ms
                );
                active.state.bids.extend(response.bids);
                BidderStatus::HasBids
            }
            CallOutcome::Response(response) => {
                if !response.success {
                    warn!(
                        "{} request for {} unsuccessful: {}",
                        adapter,
                        slot_id,
                        response.reason.as_deref().unwrap_or("no reason given")
                    );
                }
                BidderStatus::NoBids
            }
            CallOutcome::Failed(reason) => {
                warn!("{} request for {} failed: {}", adapter, slot_id, reason);
                BidderStatus::NoBids
            }
            CallOutcome::OverBudget => {
                warn!(
                    "{} exceeded {}ms budget for {}",
                    adapter, active.state.timeout_budget_ms, slot_id
                );
                BidderStatus::NoBids
            }
        };

        active
            .state
            .bidder_timing
            .insert(adapter.to_string(), latency_ms);
        active.state.statuses.insert(adapter.to_string(), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use herald_clock::ManualClock;
    use herald_ports::{AdapterError, AdapterResult};
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Fixed partner states: active unless listed inactive
    struct StaticReadiness {
        settled: HashSet<&'static str>,
        inactive: HashSet<&'static str>,
    }

    impl StaticReadiness {
        fn all_ready() -> Arc<Self> {
            Arc::new(Self {
                settled: ["prebid", "amazonaps"].into_iter().collect(),
                inactive: HashSet::new(),
            })
        }
    }

    impl PartnerReadiness for StaticReadiness {
        fn is_active(&self, partner: &str) -> bool {
            !self.inactive.contains(partner)
        }

        fn is_settled(&self, partner: &str) -> bool {
            self.settled.contains(partner)
        }
    }

    enum Reply {
        Bids(Vec<Bid>),
        Error,
        After(Duration, Vec<Bid>),
    }

    struct ScriptedAdapter {
        name: &'static str,
        partner: &'static str,
        slot_config: bool,
        reply: Reply,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedAdapter {
        fn new(name: &'static str, partner: &'static str, reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                name,
                partner,
                slot_config: true,
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn without_slot_config(name: &'static str, partner: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                partner,
                slot_config: false,
                reply: Reply::Bids(Vec::new()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WrapperAdapter for ScriptedAdapter {
        fn name(&self) -> &str {
            self.name
        }

        fn partner(&self) -> &str {
            self.partner
        }

        fn is_library_loaded(&self) -> bool {
            true
        }

        fn init(&self, _ctx: &DimensionContext) {}

        fn has_slot_config(&self, _slot_id: &str, _ctx: &DimensionContext) -> bool {
            self.slot_config
        }

        fn get_ad_unit(&self, slot_id: &str, _ctx: &DimensionContext) -> Option<AdUnit> {
            self.slot_config
                .then(|| AdUnit::new(format!("{}-{}", self.name, slot_id), slot_id, Vec::new()))
        }

        async fn request_bids(
            &self,
            slot_id: &str,
            _ctx: &DimensionContext,
            _timeout: Duration,
        ) -> AdapterResult<BidResponse> {
            self.calls.lock().unwrap().push(format!("request:{}", slot_id));
            match &self.reply {
                Reply::Bids(bids) => Ok(BidResponse::with_bids(bids.clone())),
                Reply::Error => Err(AdapterError::Request("network".to_string())),
                Reply::After(delay, bids) => {
                    tokio::time::sleep(*delay).await;
                    Ok(BidResponse::with_bids(bids.clone()))
                }
            }
        }

        fn apply_targeting(&self, slot_id: &str) {
            self.calls.lock().unwrap().push(format!("apply:{}", slot_id));
        }

        fn clear_slot(&self, slot_id: &str) {
            self.calls.lock().unwrap().push(format!("clear:{}", slot_id));
        }
    }

    fn coordinator(
        adapters: Vec<Arc<ScriptedAdapter>>,
        readiness: Arc<dyn PartnerReadiness>,
        config: CoordinatorConfig,
    ) -> AuctionCoordinator {
        let mut registry = AdapterRegistry::new();
        for adapter in adapters {
            registry.register(adapter).unwrap();
        }
        AuctionCoordinator::new(registry, readiness, ManualClock::new(None), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_merge_and_skip_without_slot_config() {
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(vec![Bid::new("appnexus", dec!(1.5))]));
        let b = ScriptedAdapter::without_slot_config("aps", "amazonaps");
        let coord = coordinator(
            vec![a.clone(), b.clone()],
            StaticReadiness::all_ready(),
            CoordinatorConfig::default(),
        );

        let request = coord.request_auction("slot-1", AuctionOptions::default());
        assert_eq!(request.dispatched, vec!["prebid".to_string()]);
        let state = request.settled().await.unwrap();

        assert_eq!(state.bids.len(), 1);
        assert_eq!(state.bids[0].cpm, dec!(1.5));
        assert_eq!(state.status("prebid"), BidderStatus::HasBids);
        assert_eq!(state.status("aps"), BidderStatus::Off);
        assert!(b.calls().is_empty());
    }

    #[test]
    fn test_no_runtime_dispatches_nothing() {
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(vec![Bid::new("appnexus", dec!(1.5))]));
        let coord = coordinator(vec![a.clone()], StaticReadiness::all_ready(), CoordinatorConfig::default());

        let request = coord.request_auction("slot-1", AuctionOptions::default());
        assert!(request.dispatched.is_empty());

        let state = coord.auction("slot-1").unwrap();
        assert!(state.is_settled());
        assert_eq!(state.status("prebid"), BidderStatus::Off);
        assert!(a.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_call_is_no_bids() {
        let _ = env_logger::try_init();
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Error);
        let coord = coordinator(vec![a], StaticReadiness::all_ready(), CoordinatorConfig::default());

        let state = coord
            .request_auction("slot-1", AuctionOptions::default())
            .settled()
            .await
            .unwrap();
        assert_eq!(state.status("prebid"), BidderStatus::NoBids);
        assert!(state.bidder_timing.contains_key("prebid"));
        assert!(state.bids.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_over_budget_adapter_is_no_bids_and_late_bids_dropped() {
        let slow = ScriptedAdapter::new(
            "prebid",
            "prebid",
            Reply::After(Duration::from_millis(3000), vec![Bid::new("late", dec!(9))]),
        );
        let coord = coordinator(vec![slow], StaticReadiness::all_ready(), CoordinatorConfig::default());

        let state = coord
            .request_auction(
                "slot-1",
                AuctionOptions::default().with_timeout(Duration::from_millis(500)),
            )
            .settled()
            .await
            .unwrap();
        assert_eq!(state.status("prebid"), BidderStatus::NoBids);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        let state = coord.auction("slot-1").unwrap();
        assert!(state.bids.is_empty());
        assert_eq!(state.status("prebid"), BidderStatus::NoBids);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_is_idempotent() {
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(vec![Bid::new("ix", dec!(0.8))]));
        let coord = coordinator(vec![a.clone()], StaticReadiness::all_ready(), CoordinatorConfig::default());

        coord
            .request_auction("slot-1", AuctionOptions::default())
            .settled()
            .await;
        assert!(coord.clear_auction("slot-1"));
        assert!(!coord.clear_auction("slot-1"));

        assert_eq!(coord.archive("slot-1").len(), 1);
        assert!(coord.auction("slot-1").is_none());
        assert_eq!(
            a.calls().iter().filter(|c| *c == "clear:slot-1").count(),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_archive_limit_evicts_oldest() {
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(Vec::new()));
        let coord = coordinator(
            vec![a],
            StaticReadiness::all_ready(),
            CoordinatorConfig {
                archive_limit: Some(2),
                ..Default::default()
            },
        );

        let mut generations = Vec::new();
        for _ in 0..3 {
            let request = coord.request_auction("slot-1", AuctionOptions::default());
            generations.push(request.generation);
            request.settled().await;
            coord.clear_auction("slot-1");
        }

        let archived: Vec<Uuid> = coord
            .archive("slot-1")
            .into_iter()
            .map(|entry| entry.state.generation)
            .collect();
        assert_eq!(archived, generations[1..].to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_bids_only_for_bidders() {
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(vec![Bid::new("ix", dec!(0.8))]));
        let b = ScriptedAdapter::new("aps", "amazonaps", Reply::Bids(Vec::new()));
        let coord = coordinator(
            vec![a.clone(), b.clone()],
            StaticReadiness::all_ready(),
            CoordinatorConfig::default(),
        );

        coord
            .request_auction("slot-1", AuctionOptions::default())
            .settled()
            .await;
        assert_eq!(coord.apply_bids("slot-1"), 1);
        assert!(a.calls().contains(&"apply:slot-1".to_string()));
        assert!(!b.calls().contains(&"apply:slot-1".to_string()));
        assert_eq!(coord.apply_bids("unknown"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_auction_replaces_active_one() {
        let slow = ScriptedAdapter::new(
            "prebid",
            "prebid",
            Reply::After(Duration::from_millis(100), vec![Bid::new("ix", dec!(1))]),
        );
        let coord = coordinator(vec![slow], StaticReadiness::all_ready(), CoordinatorConfig::default());

        let first = coord.request_auction("slot-1", AuctionOptions::default());
        let second = coord.request_auction("slot-1", AuctionOptions::default());
        assert_ne!(first.generation, second.generation);

        assert!(first.settled().await.is_none());
        let state = second.settled().await.unwrap();
        assert_eq!(state.bids.len(), 1);
        assert_eq!(coord.archive("slot-1").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_has_enabled_wrappers() {
        let readiness = Arc::new(StaticReadiness {
            settled: HashSet::new(),
            inactive: ["amazonaps"].into_iter().collect(),
        });
        let b = ScriptedAdapter::new("aps", "amazonaps", Reply::Bids(Vec::new()));
        let coord = coordinator(vec![b.clone()], readiness.clone(), CoordinatorConfig::default());
        assert!(!coord.has_enabled_wrappers());

        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(Vec::new()));
        let coord = coordinator(vec![a, b], readiness, CoordinatorConfig::default());
        assert!(coord.has_enabled_wrappers());
        assert!(!coord.adapters().is_empty());
    }

    #[tokio::test]
    async fn test_ad_units_and_init() {
        let a = ScriptedAdapter::new("prebid", "prebid", Reply::Bids(Vec::new()));
        let b = ScriptedAdapter::without_slot_config("aps", "amazonaps");
        let coord = coordinator(vec![a, b], StaticReadiness::all_ready(), CoordinatorConfig::default());

        let units = coord.ad_units("slot-1", &DimensionContext::new());
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].0, "prebid");
        assert_eq!(units[0].1.code, "prebid-slot-1");
        assert_eq!(coord.initialize_adapters(&DimensionContext::new()), 2);
    }
}
