//! Simulated wrapper adapter
//!
//! A bidding library stand-in with random latency, fill rate and CPMs.
//! Records the targeting and clear calls it receives.

use async_trait::async_trait;
use herald_core::{AdSize, AdUnit, Bid, BidResponse, DimensionContext};
use herald_ports::{AdapterError, AdapterResult, WrapperAdapter};
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Simulated adapter behaviour
#[derive(Debug, Clone)]
pub struct SimulatedAdapterConfig {
    /// Slots the adapter is configured for; empty means every slot
    pub slots: HashSet<String>,
    /// Response latency range (ms)
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Probability of returning a bid (0.0 to 1.0)
    pub fill_rate: f64,
    /// Probability that the request errors (0.0 to 1.0)
    pub error_rate: f64,
    /// CPM range in cents
    pub min_cpm_cents: i64,
    pub max_cpm_cents: i64,
    pub library_loaded: bool,
    pub enabled: bool,
}

impl Default for SimulatedAdapterConfig {
    fn default() -> Self {
        Self {
            slots: HashSet::new(),
            min_latency_ms: 50,
            max_latency_ms: 400,
            fill_rate: 0.8,
            error_rate: 0.0,
            min_cpm_cents: 10,
            max_cpm_cents: 500,
            library_loaded: true,
            enabled: true,
        }
    }
}

pub struct SimulatedAdapter {
    name: String,
    partner: String,
    config: SimulatedAdapterConfig,
    rng: Mutex<StdRng>,
    initialized: AtomicBool,
    targeted: Mutex<Vec<String>>,
    cleared: Mutex<Vec<String>>,
}

impl SimulatedAdapter {
    pub fn new(
        name: impl Into<String>,
        partner: impl Into<String>,
        config: SimulatedAdapterConfig,
        seed: u64,
    ) -> Self {
        Self {
            name: name.into(),
            partner: partner.into(),
            config,
            rng: Mutex::new(rand::SeedableRng::seed_from_u64(seed)),
            initialized: AtomicBool::new(false),
            targeted: Mutex::new(Vec::new()),
            cleared: Mutex::new(Vec::new()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Slots targeting was applied to, in call order
    pub fn targeted(&self) -> Vec<String> {
        self.targeted.lock().clone()
    }

    /// Slots cleared, in call order
    pub fn cleared(&self) -> Vec<String> {
        self.cleared.lock().clone()
    }

    /// Draw (latency, error?, bid?) for one request
    fn draw(&self) -> (Duration, bool, Option<Decimal>) {
        let mut rng = self.rng.lock();
        let c = &self.config;
        let latency = rng.gen_range(c.min_latency_ms..=c.max_latency_ms.max(c.min_latency_ms));
        let errors = rng.gen_bool(c.error_rate.clamp(0.0, 1.0));
        let fills = rng.gen_bool(c.fill_rate.clamp(0.0, 1.0));
        let cents = rng.gen_range(c.min_cpm_cents..=c.max_cpm_cents.max(c.min_cpm_cents));
        (
            Duration::from_millis(latency),
            errors,
            fills.then(|| Decimal::new(cents, 2)),
        )
    }
}

#[async_trait]
impl WrapperAdapter for SimulatedAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn partner(&self) -> &str {
        &self.partner
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn is_library_loaded(&self) -> bool {
        self.config.library_loaded
    }

    fn init(&self, _ctx: &DimensionContext) {
        self.initialized.store(true, Ordering::SeqCst);
    }

    fn has_slot_config(&self, slot_id: &str, _ctx: &DimensionContext) -> bool {
        self.config.slots.is_empty() || self.config.slots.contains(slot_id)
    }

    fn get_ad_unit(&self, slot_id: &str, ctx: &DimensionContext) -> Option<AdUnit> {
        self.has_slot_config(slot_id, ctx).then(|| {
            AdUnit::new(
                format!("{}/{}", self.name, slot_id),
                slot_id,
                vec![AdSize::new(300, 250), AdSize::new(728, 90)],
            )
        })
    }

    async fn request_bids(
        &self,
        slot_id: &str,
        _ctx: &DimensionContext,
        _timeout: Duration,
    ) -> AdapterResult<BidResponse> {
        if !self.is_initialized() {
            return Err(AdapterError::NotLoaded);
        }
        let (latency, errors, cpm) = self.draw();
        tokio::time::sleep(latency).await;

        if errors {
            return Err(AdapterError::Request(format!("{} endpoint unavailable", self.name)));
        }
        debug!("{} answered for {} after {}ms", self.name, slot_id, latency.as_millis());
        Ok(match cpm {
            Some(cpm) => BidResponse::with_bids(vec![
                Bid::new(self.name.as_str(), cpm)
                    .with_size(300, 250)
                    .with_creative(format!("{}-{}", self.name, slot_id)),
            ]),
            None => BidResponse::empty("no fill"),
        })
    }

    fn apply_targeting(&self, slot_id: &str) {
        self.targeted.lock().push(slot_id.to_string());
    }

    fn clear_slot(&self, slot_id: &str) {
        self.cleared.lock().push(slot_id.to_string());
    }
}
