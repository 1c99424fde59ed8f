//! Readiness Orchestrator
//!
//! Turns the partner graph into three "all accounted for" signals, one per
//! tier, each fired exactly once.
//!
//! ## Lifecycle
//!
//! ```text
//!             signal received
//!   pending ─────────────────────► ready
//!      │
//!      ├── tier deadline ────────► timeout   (fail-open: counts as settled)
//!      │
//!      └── report_error ─────────► error
//! ```
//!
//! A tier fires when all of its partners have left `pending` or when its
//! deadline elapses, whichever comes first. The deadline is derived from the
//! tier's critical path, never configured directly.
//!
//! ## Concurrency
//!
//! Signal handlers, deadline timers and callers may all touch the same rows.
//! Every status transition is a check-and-set under the row's map guard, and
//! every tier fire goes through a compare-and-swap flag, so a late signal
//! racing a deadline can never produce two transitions or two callbacks.

use crate::config::OrchestratorConfig;
use crate::error::{OrchestratorError, Result};
use crate::graph::DependencyGraph;
use crate::registry::PartnerRegistry;
use dashmap::DashMap;
use herald_core::{PartnerStatus, ReadinessStatus, StatusSnapshot, Tier, Timestamp};
use herald_ports::{Clock, PartnerReadiness, SignalBus};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Tier callback: `(status_snapshot, elapsed_ms)`
pub type TierCallback = Box<dyn FnOnce(StatusSnapshot, u64) + Send + 'static>;

/// Optional callbacks, one per tier
#[derive(Default)]
pub struct ReadinessCallbacks {
    /// Blocking tier settled; receives the blocking partners' statuses
    pub on_partners_ready: Option<TierCallback>,
    /// Independent tier settled; receives every active partner's status
    pub on_all_partners_ready: Option<TierCallback>,
    /// Non-core tier settled; receives the non-core partners' statuses
    pub on_non_core_ready: Option<TierCallback>,
}

impl ReadinessCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_partners_ready(
        mut self,
        f: impl FnOnce(StatusSnapshot, u64) + Send + 'static,
    ) -> Self {
        self.on_partners_ready = Some(Box::new(f));
        self
    }

    pub fn on_all_partners_ready(
        mut self,
        f: impl FnOnce(StatusSnapshot, u64) + Send + 'static,
    ) -> Self {
        self.on_all_partners_ready = Some(Box::new(f));
        self
    }

    pub fn on_non_core_ready(
        mut self,
        f: impl FnOnce(StatusSnapshot, u64) + Send + 'static,
    ) -> Self {
        self.on_non_core_ready = Some(Box::new(f));
        self
    }
}

/// Where a tier stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierProgress {
    Waiting,
    Fired,
    /// Torn down before firing
    Abandoned,
}

/// Why a tier fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FireReason {
    Completed,
    Deadline,
}

struct TierState {
    tier: Tier,
    /// Computed budget
    timeout: Duration,
    /// Active partners of the tier
    members: Vec<String>,
    fired: AtomicBool,
    callback: Mutex<Option<TierCallback>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    progress: watch::Sender<TierProgress>,
}

struct Inner {
    registry: PartnerRegistry,
    graph: DependencyGraph,
    statuses: DashMap<String, PartnerStatus>,
    clock: Arc<dyn Clock>,
    /// Monotonic start, for elapsed times and deadlines
    start: Instant,
    /// Wall-clock start
    started_at: Timestamp,
    tiers: [TierState; 3],
    /// Tier checks are deferred until every subscription is in place
    armed: AtomicBool,
    torn_down: AtomicBool,
}

/// Partner lifecycle scheduler
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ReadinessOrchestrator {
    inner: Arc<Inner>,
}

impl ReadinessOrchestrator {
    /// Build status rows, subscribe to completion signals and start the tier
    /// deadlines.
    ///
    /// Must be called within a tokio runtime. Configuration errors and
    /// subscription failures abort init; no callback fires for a failed init.
    pub fn init(
        registry: PartnerRegistry,
        callbacks: ReadinessCallbacks,
        bus: &dyn SignalBus,
        clock: Arc<dyn Clock>,
        config: OrchestratorConfig,
    ) -> Result<Self> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| OrchestratorError::NoRuntime)?;
        let start = Instant::now();
        let started_at = clock.now();

        let graph = DependencyGraph::build(&registry)?;

        let statuses = DashMap::new();
        for partner in registry.active() {
            statuses.insert(partner.name.clone(), PartnerStatus::pending());
        }

        let ReadinessCallbacks {
            on_partners_ready,
            on_all_partners_ready,
            on_non_core_ready,
        } = callbacks;
        let tier_state = |tier: Tier, callback: Option<TierCallback>| {
            let critical_path = graph.critical_path(tier, &registry);
            let timeout = config.tier_budget(critical_path);
            let members: Vec<String> = registry.tier(tier).map(|p| p.name.clone()).collect();
            info!(
                "Tier {}: {} partners, critical path {}ms, budget {}ms",
                tier,
                members.len(),
                critical_path.as_millis(),
                timeout.as_millis()
            );
            TierState {
                tier,
                timeout,
                members,
                fired: AtomicBool::new(false),
                callback: Mutex::new(callback),
                timer: Mutex::new(None),
                progress: watch::Sender::new(TierProgress::Waiting),
            }
        };
        let tiers = [
            tier_state(Tier::Blocking, on_partners_ready),
            tier_state(Tier::Independent, on_all_partners_ready),
            tier_state(Tier::NonCore, on_non_core_ready),
        ];

        let inner = Arc::new(Inner {
            registry,
            graph,
            statuses,
            clock,
            start,
            started_at,
            tiers,
            armed: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        });

        // Subscriptions first: a replayed signal only records its transition
        // until the instance is armed.
        for partner in inner.registry.active() {
            let Some(topic) = partner.signal_topic() else {
                debug!(
                    "Partner {} has no completion signal; it can only time out",
                    partner.name
                );
                continue;
            };
            let weak: Weak<Inner> = Arc::downgrade(&inner);
            let name = partner.name.clone();
            bus.subscribe_once(
                &topic,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_signal(&name);
                    }
                }),
                true,
            )
            .map_err(|source| OrchestratorError::Subscription {
                partner: partner.name.clone(),
                source,
            })?;
        }

        inner.armed.store(true, Ordering::SeqCst);
        for tier in Tier::ALL {
            inner.check_tier(tier);
        }

        for state in &inner.tiers {
            if state.fired.load(Ordering::SeqCst) {
                continue;
            }
            let weak = Arc::downgrade(&inner);
            let tier = state.tier;
            let deadline = inner.start + state.timeout;
            let handle = runtime.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                if let Some(inner) = weak.upgrade() {
                    inner.expire_tier(tier);
                }
            });
            *state.timer.lock() = Some(handle);
        }

        Ok(Self { inner })
    }

    /// Current status of a partner (None if unknown or inactive)
    pub fn status(&self, name: &str) -> Option<PartnerStatus> {
        self.inner.statuses.get(name).map(|row| row.clone())
    }

    /// Statuses of all active partners
    pub fn snapshot(&self) -> StatusSnapshot {
        self.inner.snapshot_all()
    }

    /// Statuses of the active partners of one tier
    pub fn tier_snapshot(&self, tier: Tier) -> StatusSnapshot {
        self.inner.snapshot_tier(tier)
    }

    /// Computed budget for a tier
    pub fn tier_timeout(&self, tier: Tier) -> Duration {
        self.inner.tier(tier).timeout
    }

    pub fn has_fired(&self, tier: Tier) -> bool {
        self.inner.tier(tier).fired.load(Ordering::SeqCst)
    }

    /// Time since init
    pub fn elapsed(&self) -> Duration {
        self.inner.start.elapsed()
    }

    /// Wall-clock time of init
    pub fn start_time(&self) -> Timestamp {
        self.inner.started_at
    }

    pub fn get_dependency(&self, name: &str) -> Option<&str> {
        self.inner.graph.get_dependency(name)
    }

    pub fn get_dependents(&self, name: &str) -> Vec<&str> {
        self.inner.graph.get_dependents(name)
    }

    /// May this partner start loading?
    ///
    /// True if the partner is active and either has no dependency or its
    /// dependency is ready or timed out. An errored dependency blocks.
    pub fn can_load(&self, name: &str) -> bool {
        if !self.inner.registry.is_active(name) {
            return false;
        }
        match self.get_dependency(name) {
            None => true,
            Some(dependency) => self
                .status(dependency)
                .is_some_and(|row| row.status.is_settled()),
        }
    }

    /// Mark a pending partner as failed
    ///
    /// Returns false if the partner had already left `pending`.
    pub fn report_error(&self, name: &str, reason: &str) -> Result<bool> {
        if !self.inner.statuses.contains_key(name) {
            return Err(OrchestratorError::UnknownPartner(name.to_string()));
        }
        if self.inner.torn_down.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let changed = self.inner.transition(name, ReadinessStatus::Error);
        if changed {
            warn!("Partner {} failed to load: {}", name, reason);
            self.inner.after_transition(name);
        }
        Ok(changed)
    }

    /// Wait until a tier has fired
    ///
    /// Returns false if the orchestrator was torn down first.
    pub async fn wait_for_tier(&self, tier: Tier) -> bool {
        let mut rx = self.inner.tier(tier).progress.subscribe();
        match rx.wait_for(|progress| *progress != TierProgress::Waiting).await {
            Ok(progress) => *progress == TierProgress::Fired,
            Err(_) => false,
        }
    }

    pub fn tier_progress(&self, tier: Tier) -> TierProgress {
        *self.inner.tier(tier).progress.borrow()
    }

    /// Stop all deadlines and drop pending callbacks
    ///
    /// Late signals and timers are ignored afterwards. Status rows are
    /// cleared, so nothing reads as settled.
    pub fn teardown(&self) {
        if self.inner.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        for state in &self.inner.tiers {
            if let Some(handle) = state.timer.lock().take() {
                handle.abort();
            }
            state.callback.lock().take();
            state.progress.send_if_modified(|progress| {
                if *progress == TierProgress::Waiting {
                    *progress = TierProgress::Abandoned;
                    true
                } else {
                    false
                }
            });
        }
        self.inner.statuses.clear();
        info!(
            "Readiness orchestrator torn down after {}ms",
            self.elapsed().as_millis()
        );
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::SeqCst)
    }

    /// Partner registry this orchestrator was built from
    pub fn registry(&self) -> &PartnerRegistry {
        &self.inner.registry
    }
}

impl PartnerReadiness for ReadinessOrchestrator {
    fn is_active(&self, partner: &str) -> bool {
        self.inner.registry.is_active(partner)
    }

    fn is_settled(&self, partner: &str) -> bool {
        self.status(partner)
            .is_some_and(|row| row.status.is_settled())
    }
}

impl Inner {
    fn tier(&self, tier: Tier) -> &TierState {
        &self.tiers[tier.index()]
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn on_signal(&self, name: &str) {
        if self.torn_down.load(Ordering::SeqCst) {
            debug!("Ignoring completion of {} after teardown", name);
            return;
        }
        if self.transition(name, ReadinessStatus::Ready) {
            info!("Partner {} ready after {}ms", name, self.elapsed_ms());
            self.after_transition(name);
        } else {
            debug!("Ignoring late completion of {}", name);
        }
    }

    /// Atomic `pending -> to`; false if the row is missing or already settled
    fn transition(&self, name: &str, to: ReadinessStatus) -> bool {
        let Some(mut row) = self.statuses.get_mut(name) else {
            return false;
        };
        if !row.status.is_pending() {
            return false;
        }
        row.status = to;
        if to == ReadinessStatus::Ready {
            row.ready_at = Some(self.clock.now());
        }
        true
    }

    fn after_transition(&self, name: &str) {
        if !self.armed.load(Ordering::SeqCst) {
            return;
        }
        if let Some(partner) = self.registry.get(name) {
            self.check_tier(partner.tier);
        }
    }

    /// Fire the tier if none of its partners is pending any more
    fn check_tier(&self, tier: Tier) {
        let state = self.tier(tier);
        if state.fired.load(Ordering::SeqCst) {
            return;
        }
        let all_settled = state.members.iter().all(|name| {
            self.statuses
                .get(name)
                .is_some_and(|row| !row.status.is_pending())
        });
        if all_settled {
            self.fire(tier, FireReason::Completed);
        }
    }

    /// Deadline: time out every partner still pending, then fire
    fn expire_tier(&self, tier: Tier) {
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }
        let state = self.tier(tier);
        if state.fired.load(Ordering::SeqCst) {
            return;
        }
        for name in &state.members {
            if self.transition(name, ReadinessStatus::Timeout) {
                warn!(
                    "Partner {} timed out after {}ms (tier {})",
                    name,
                    state.timeout.as_millis(),
                    tier
                );
            }
        }
        self.fire(tier, FireReason::Deadline);
    }

    fn fire(&self, tier: Tier, reason: FireReason) {
        let state = self.tier(tier);
        if state
            .fired
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let elapsed_ms = self.elapsed_ms();
        let snapshot = match tier {
            Tier::Independent => self.snapshot_all(),
            _ => self.snapshot_tier(tier),
        };
        info!(
            "Tier {} ready after {}ms ({:?}, budget {}ms)",
            tier,
            elapsed_ms,
            reason,
            state.timeout.as_millis()
        );

        if reason == FireReason::Completed
            && let Some(handle) = state.timer.lock().take()
        {
            handle.abort();
        }

        let callback = state.callback.lock().take();
        if let Some(callback) = callback {
            callback(snapshot, elapsed_ms);
        }
        state.progress.send_replace(TierProgress::Fired);
    }

    fn snapshot_all(&self) -> StatusSnapshot {
        self.statuses
            .iter()
            .map(|row| (row.key().clone(), row.value().clone()))
            .collect()
    }

    fn snapshot_tier(&self, tier: Tier) -> StatusSnapshot {
        self.tier(tier)
            .members
            .iter()
            .filter_map(|name| {
                self.statuses
                    .get(name)
                    .map(|row| (name.clone(), row.clone()))
            })
            .collect()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for state in &self.tiers {
            if let Some(handle) = state.timer.lock().take() {
                handle.abort();
            }
        }
    }
}
