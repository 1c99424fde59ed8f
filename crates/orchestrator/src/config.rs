//! Partner and orchestrator configuration
//!
//! Partners are declared in JSON (camelCase), e.g.
//!
//! ```json
//! { "name": "prebid", "timeout": 1000, "dependsOn": "cmp", "tier": "blocking" }
//! ```

use crate::error::ConfigError;
use herald_core::{PartnerDefinition, SignalSource, Tier};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Budget floor applied to every tier (ms)
pub const DEFAULT_MIN_TIMEOUT_MS: u64 = 1000;

fn default_active() -> bool {
    true
}

/// Partner definition as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSpec {
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Load budget (ms); required
    pub timeout: Option<u64>,
    pub depends_on: Option<String>,
    pub tier: Tier,
    #[serde(default)]
    pub signal: SignalSource,
}

impl TryFrom<PartnerSpec> for PartnerDefinition {
    type Error = ConfigError;

    fn try_from(spec: PartnerSpec) -> Result<Self, Self::Error> {
        if spec.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let timeout = spec
            .timeout
            .ok_or_else(|| ConfigError::MissingTimeout(spec.name.clone()))?;

        let mut definition = PartnerDefinition::new(spec.name, spec.tier, timeout)
            .with_signal(spec.signal);
        definition.active = spec.active;
        definition.depends_on = spec.depends_on;
        Ok(definition)
    }
}

/// Orchestrator tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorConfig {
    /// No tier budget is ever shorter than this (ms)
    pub min_timeout_ms: u64,
    /// Time already spent before init, e.g. page-load lag (ms)
    pub elapsed_since_external_start_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            min_timeout_ms: DEFAULT_MIN_TIMEOUT_MS,
            elapsed_since_external_start_ms: 0,
        }
    }
}

impl OrchestratorConfig {
    pub fn min_timeout(&self) -> Duration {
        Duration::from_millis(self.min_timeout_ms)
    }

    pub fn elapsed_since_external_start(&self) -> Duration {
        Duration::from_millis(self.elapsed_since_external_start_ms)
    }

    /// Budget for a tier: `max(min_timeout, critical_path - elapsed_since_external_start)`
    pub fn tier_budget(&self, critical_path: Duration) -> Duration {
        critical_path
            .saturating_sub(self.elapsed_since_external_start())
            .max(self.min_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults() {
        let spec: PartnerSpec =
            serde_json::from_str(r#"{"name": "cmp", "timeout": 500, "tier": "blocking"}"#)
                .unwrap();
        let def = PartnerDefinition::try_from(spec).unwrap();
        assert!(def.active);
        assert_eq!(def.timeout_ms, 500);
        assert_eq!(def.depends_on, None);
        assert_eq!(def.signal, SignalSource::Conventional);
    }

    #[test]
    fn test_missing_timeout_is_config_error() {
        let spec: PartnerSpec =
            serde_json::from_str(r#"{"name": "cmp", "tier": "blocking"}"#).unwrap();
        assert_eq!(
            PartnerDefinition::try_from(spec),
            Err(ConfigError::MissingTimeout("cmp".to_string()))
        );
    }

    #[test]
    fn test_empty_name_is_config_error() {
        let spec: PartnerSpec =
            serde_json::from_str(r#"{"name": " ", "timeout": 10, "tier": "nonCore"}"#).unwrap();
        assert_eq!(PartnerDefinition::try_from(spec), Err(ConfigError::EmptyName));
    }

    #[test]
    fn test_tier_budget() {
        let config = OrchestratorConfig {
            min_timeout_ms: 1000,
            elapsed_since_external_start_ms: 300,
        };
        assert_eq!(
            config.tier_budget(Duration::from_millis(1500)),
            Duration::from_millis(1200)
        );
        // Never below the floor, even when the page is already late
        assert_eq!(
            config.tier_budget(Duration::from_millis(1100)),
            Duration::from_millis(1000)
        );
        assert_eq!(config.tier_budget(Duration::ZERO), Duration::from_millis(1000));
    }
}
