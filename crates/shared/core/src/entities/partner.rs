use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lower bound applied to every partner timeout (milliseconds)
pub const MIN_PARTNER_TIMEOUT_MS: u64 = 100;

/// Conventional completion topic for a partner: `plugin.{name}.complete`
pub fn partner_complete_topic(name: &str) -> String {
    format!("plugin.{}.complete", name)
}

/// Scheduling tier of a partner
///
/// Each tier produces its own "all accounted for" signal with its own
/// deadline, so a slow non-core partner never delays blocking delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// Gates ad delivery
    Blocking,
    /// Loaded alongside, does not gate delivery
    Independent,
    /// Nice-to-have integrations
    NonCore,
}

impl Tier {
    /// All tiers in scheduling order
    pub const ALL: [Tier; 3] = [Tier::Blocking, Tier::Independent, Tier::NonCore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Independent => "independent",
            Self::NonCore => "nonCore",
        }
    }

    /// Stable index, used for per-tier arrays
    pub fn index(&self) -> usize {
        match self {
            Self::Blocking => 0,
            Self::Independent => 1,
            Self::NonCore => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a partner's completion signal comes from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalSource {
    /// `plugin.{name}.complete`
    #[default]
    Conventional,
    /// Explicit topic name
    Topic(String),
    /// No signal will ever arrive; the partner can only time out
    Unavailable,
}

/// Static definition of a partner integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerDefinition {
    /// Unique key
    pub name: String,
    /// Inactive partners get no status row and never gate anything
    pub active: bool,
    /// Load budget in milliseconds (never below `MIN_PARTNER_TIMEOUT_MS`)
    pub timeout_ms: u64,
    /// Partner that must settle before this one may load
    pub depends_on: Option<String>,
    pub tier: Tier,
    pub signal: SignalSource,
}

impl PartnerDefinition {
    /// Create an active partner with no dependency
    pub fn new(name: impl Into<String>, tier: Tier, timeout_ms: u64) -> Self {
        Self {
            name: name.into(),
            active: true,
            timeout_ms: timeout_ms.max(MIN_PARTNER_TIMEOUT_MS),
            depends_on: None,
            tier,
            signal: SignalSource::Conventional,
        }
    }

    /// Shorthand for a blocking-tier partner
    pub fn blocking(name: impl Into<String>, timeout_ms: u64) -> Self {
        Self::new(name, Tier::Blocking, timeout_ms)
    }

    /// Shorthand for an independent-tier partner
    pub fn independent(name: impl Into<String>, timeout_ms: u64) -> Self {
        Self::new(name, Tier::Independent, timeout_ms)
    }

    /// Shorthand for a non-core partner
    pub fn non_core(name: impl Into<String>, timeout_ms: u64) -> Self {
        Self::new(name, Tier::NonCore, timeout_ms)
    }

    pub fn with_dependency(mut self, partner: impl Into<String>) -> Self {
        self.depends_on = Some(partner.into());
        self
    }

    pub fn with_signal(mut self, signal: SignalSource) -> Self {
        self.signal = signal;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Topic to subscribe to, or None if the partner never signals
    pub fn signal_topic(&self) -> Option<String> {
        match &self.signal {
            SignalSource::Conventional => Some(partner_complete_topic(&self.name)),
            SignalSource::Topic(topic) => Some(topic.clone()),
            SignalSource::Unavailable => None,
        }
    }
}
