//! Partner Feed - simulated partner scripts
//!
//! Stands in for real partner scripts: each active partner "loads" after a
//! random delay and publishes its completion signal. A partner with a
//! dependency only starts loading once its dependency has loaded. Some
//! partners can be made to hang forever, to exercise the deadlines.

use herald_orchestrator::PartnerRegistry;
use herald_ports::SignalBus;
use log::{debug, warn};
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Configuration for simulated partner loading
#[derive(Debug, Clone)]
pub struct PartnerFeedConfig {
    /// Shortest load time (ms)
    pub min_delay_ms: u64,
    /// Longest load time (ms)
    pub max_delay_ms: u64,
    /// Probability that a partner never signals (0.0 to 1.0)
    pub hang_probability: f64,
}

impl Default for PartnerFeedConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 50,
            max_delay_ms: 600,
            hang_probability: 0.0,
        }
    }
}

/// When a partner will signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerLoad {
    pub partner: String,
    pub topic: String,
    /// Time from start until the signal; None if the partner hangs
    pub at: Option<Duration>,
}

pub struct PartnerFeed {
    config: PartnerFeedConfig,
    rng: StdRng,
}

impl PartnerFeed {
    pub fn new(config: PartnerFeedConfig) -> Self {
        Self {
            config,
            rng: rand::SeedableRng::from_entropy(),
        }
    }

    /// Create with a specific seed for reproducible runs
    pub fn with_seed(config: PartnerFeedConfig, seed: u64) -> Self {
        Self {
            config,
            rng: rand::SeedableRng::seed_from_u64(seed),
        }
    }

    /// Draw load times for every active partner
    ///
    /// Declaration order. A dependent's load time starts from its
    /// dependency's; if the dependency hangs, the dependent loads on its own.
    pub fn plan(&mut self, registry: &PartnerRegistry) -> Vec<PartnerLoad> {
        let mut own: HashMap<&str, Option<Duration>> = HashMap::new();
        for partner in registry.active() {
            let at = if self.rng.gen_bool(self.config.hang_probability.clamp(0.0, 1.0)) {
                None
            } else {
                let (lo, hi) = (
                    self.config.min_delay_ms,
                    self.config.max_delay_ms.max(self.config.min_delay_ms),
                );
                Some(Duration::from_millis(self.rng.gen_range(lo..=hi)))
            };
            own.insert(partner.name.as_str(), at);
        }

        registry
            .active()
            .map(|partner| {
                let topic = partner.signal_topic();
                let own_at = own.get(partner.name.as_str()).copied().flatten();
                let at = topic.as_ref().and(own_at).map(|mut at| {
                    let mut dependency = partner.depends_on.as_deref();
                    while let Some(name) = dependency {
                        if let Some(Some(offset)) = own.get(name) {
                            at += *offset;
                        }
                        dependency = registry.get(name).and_then(|p| p.depends_on.as_deref());
                    }
                    at
                });
                PartnerLoad {
                    partner: partner.name.clone(),
                    topic: topic.unwrap_or_default(),
                    at,
                }
            })
            .collect()
    }

    /// Publish each planned signal at its time
    pub fn spawn(&mut self, registry: &PartnerRegistry, bus: Arc<dyn SignalBus>) -> Vec<JoinHandle<()>> {
        self.plan(registry)
            .into_iter()
            .filter_map(|load| {
                let Some(at) = load.at else {
                    debug!("Partner {} will never signal", load.partner);
                    return None;
                };
                let bus = bus.clone();
                Some(tokio::spawn(async move {
                    tokio::time::sleep(at).await;
                    debug!("Partner {} loaded after {}ms", load.partner, at.as_millis());
                    if let Err(e) = bus.publish(&load.topic) {
                        warn!("Failed to publish {}: {}", load.topic, e);
                    }
                }))
            })
            .collect()
    }
}
