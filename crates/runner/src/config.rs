//! Page configuration
//!
//! One JSON document describing the partners, orchestrator tuning and auction
//! timeouts of a page. A default is embedded in the crate.

use crate::error::{Result, RunnerError};
use herald_auction::CoordinatorConfig;
use herald_orchestrator::{DependencyGraph, OrchestratorConfig, PartnerRegistry, PartnerSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeraldConfig {
    pub partners: Vec<PartnerSpec>,
    pub orchestrator: OrchestratorConfig,
    pub auction: CoordinatorConfig,
}

/// Load configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HeraldConfig> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<HeraldConfig> {
    let config: HeraldConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<HeraldConfig> {
    let default_config = include_str!("herald_config.json");
    load_config_from_str(default_config)
}

impl HeraldConfig {
    /// Validated partner table
    pub fn partner_registry(&self) -> Result<PartnerRegistry> {
        Ok(PartnerRegistry::from_specs(self.partners.clone())?)
    }

    /// Check everything `PageSession::start` would reject
    pub fn validate(&self) -> Result<()> {
        let registry = self.partner_registry()?;
        DependencyGraph::build(&registry)?;

        if self.auction.archive_limit == Some(0) {
            return Err(RunnerError::Invalid(
                "archiveLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Names of active partners, declaration order
    pub fn active_partners(&self) -> Vec<&str> {
        self.partners
            .iter()
            .filter(|p| p.active)
            .map(|p| p.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::Tier;
    use herald_orchestrator::ConfigError;

    #[test]
    fn test_load_default_config() {
        let config = load_default_config().unwrap();
        config.validate().unwrap();
        assert_eq!(config.partners.len(), 6);
        assert_eq!(config.orchestrator.min_timeout_ms, 1000);
        assert_eq!(config.auction.timeouts.base_timeout, 1500);
        assert_eq!(config.auction.archive_limit, Some(20));
    }

    #[test]
    fn test_active_partners() {
        let config = load_default_config().unwrap();
        let active = config.active_partners();
        assert!(active.contains(&"prebid"));
        assert!(!active.contains(&"comscore"));
    }

    #[test]
    fn test_default_registry_tiers() {
        let registry = load_default_config().unwrap().partner_registry().unwrap();
        assert_eq!(registry.tier(Tier::Blocking).count(), 2);
        assert_eq!(registry.tier(Tier::NonCore).count(), 1);
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let config = load_config_from_str(
            r#"{"partners": [
                {"name": "a", "timeout": 100, "tier": "blocking", "dependsOn": "b"},
                {"name": "b", "timeout": 100, "tier": "blocking", "dependsOn": "a"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(RunnerError::Partners(ConfigError::DependencyCycle { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_archive() {
        let config = load_config_from_str(r#"{"auction": {"archiveLimit": 0}}"#).unwrap();
        assert!(matches!(config.validate(), Err(RunnerError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            load_config_from_str("{"),
            Err(RunnerError::Parse(_))
        ));
        assert!(matches!(
            load_config("/nonexistent/herald.json"),
            Err(RunnerError::Io(_))
        ));
    }
}
