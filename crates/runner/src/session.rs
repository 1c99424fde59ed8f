//! Page Session - one page view, end to end
//!
//! Wires configuration, signal bus, orchestrator and coordinator together:
//!
//! 1. `start`: partner registry, orchestrator init, adapter registration
//! 2. `run_auctions`: wait for the blocking tier, auction every slot
//!    concurrently, apply targeting from the bidders
//! 3. `shutdown`: clear remaining auctions, tear the orchestrator down

use crate::config::HeraldConfig;
use crate::error::{Result, RunnerError};
use herald_auction::{AdapterRegistry, AuctionCoordinator, AuctionOptions, AuctionState};
use herald_clock::SystemClock;
use herald_core::{DimensionContext, Tier};
use herald_orchestrator::{ReadinessCallbacks, ReadinessOrchestrator};
use herald_ports::{Clock, SignalBus, WrapperAdapter};
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct PageSession {
    orchestrator: ReadinessOrchestrator,
    coordinator: AuctionCoordinator,
    bus: Arc<dyn SignalBus>,
    adapters_initialized: AtomicBool,
}

impl PageSession {
    /// Start a session on the system clock
    pub fn start(
        config: HeraldConfig,
        bus: Arc<dyn SignalBus>,
        adapters: Vec<Arc<dyn WrapperAdapter>>,
        callbacks: ReadinessCallbacks,
    ) -> Result<Self> {
        Self::start_with_clock(config, bus, adapters, callbacks, Arc::new(SystemClock::new()))
    }

    /// Start a session
    ///
    /// Partner configuration errors and subscription failures are fatal.
    /// Adapters that fail registration are logged and left out.
    pub fn start_with_clock(
        config: HeraldConfig,
        bus: Arc<dyn SignalBus>,
        adapters: Vec<Arc<dyn WrapperAdapter>>,
        callbacks: ReadinessCallbacks,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let registry = config.partner_registry()?;
        let orchestrator = ReadinessOrchestrator::init(
            registry,
            callbacks,
            bus.as_ref(),
            clock.clone(),
            config.orchestrator.clone(),
        )?;

        let mut adapter_registry = AdapterRegistry::new();
        let offered = adapters.len();
        for adapter in adapters {
            // Rejections are already logged by the registry
            let _ = adapter_registry.register(adapter);
        }
        if adapter_registry.len() < offered {
            warn!(
                "{} of {} wrapper adapters rejected",
                offered - adapter_registry.len(),
                offered
            );
        }

        let coordinator = AuctionCoordinator::new(
            adapter_registry,
            Arc::new(orchestrator.clone()),
            clock,
            config.auction.clone(),
        );
        info!(
            "Page session started: {} partners, {} adapters",
            orchestrator.snapshot().len(),
            coordinator.adapters().len()
        );

        Ok(Self {
            orchestrator,
            coordinator,
            bus,
            adapters_initialized: AtomicBool::new(false),
        })
    }

    pub fn orchestrator(&self) -> &ReadinessOrchestrator {
        &self.orchestrator
    }

    pub fn coordinator(&self) -> &AuctionCoordinator {
        &self.coordinator
    }

    pub fn bus(&self) -> &Arc<dyn SignalBus> {
        &self.bus
    }

    /// Auction every slot once the blocking partners are accounted for
    ///
    /// Returns the settled state of each slot, in input order. Slots cleared
    /// while their auction ran are left out.
    pub async fn run_auctions(
        &self,
        slots: &[&str],
        ctx: &DimensionContext,
    ) -> Result<Vec<AuctionState>> {
        if self.orchestrator.is_torn_down() || !self.orchestrator.wait_for_tier(Tier::Blocking).await {
            return Err(RunnerError::ShutDown);
        }
        if !self.coordinator.has_enabled_wrappers() {
            info!("No enabled wrappers; skipping auctions");
            return Ok(Vec::new());
        }
        if !self.adapters_initialized.swap(true, Ordering::SeqCst) {
            let initialized = self.coordinator.initialize_adapters(ctx);
            info!("Initialized {} wrapper adapters", initialized);
        }

        let requests: Vec<_> = slots
            .iter()
            .map(|slot| {
                self.coordinator
                    .request_auction(slot, AuctionOptions::new(ctx.clone()))
            })
            .collect();

        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let slot = request.slot_id.clone();
            match request.settled().await {
                Some(state) => {
                    let applied = self.coordinator.apply_bids(&slot);
                    info!(
                        "Auction on {} settled: {} bids, {} bidders applied",
                        slot,
                        state.bids.len(),
                        applied
                    );
                    results.push(state);
                }
                None => warn!("Auction on {} was cleared before it settled", slot),
            }
        }
        Ok(results)
    }

    /// Clear remaining auctions and tear the orchestrator down
    ///
    /// Returns the number of auctions cleared.
    pub fn shutdown(&self) -> usize {
        let cleared = self
            .coordinator
            .active_slots()
            .iter()
            .filter(|slot| self.coordinator.clear_auction(slot))
            .count();
        self.orchestrator.teardown();
        info!("Page session shut down, {} auctions cleared", cleared);
        cleared
    }
}
