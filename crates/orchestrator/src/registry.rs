//! Partner Registry
//!
//! Static table of partner definitions, validated once and never mutated.

use crate::config::PartnerSpec;
use crate::error::ConfigError;
use herald_core::{MIN_PARTNER_TIMEOUT_MS, PartnerDefinition, Tier};
use std::collections::HashMap;

/// Validated partner table
#[derive(Debug, Clone, Default)]
pub struct PartnerRegistry {
    /// Definitions in declaration order
    partners: Vec<PartnerDefinition>,
    /// Name -> position in `partners`
    index: HashMap<String, usize>,
}

impl PartnerRegistry {
    /// Validate and store definitions
    ///
    /// Names must be non-empty and unique. Timeouts are floor-clamped.
    pub fn new(definitions: Vec<PartnerDefinition>) -> Result<Self, ConfigError> {
        let mut partners = Vec::with_capacity(definitions.len());
        let mut index = HashMap::with_capacity(definitions.len());

        for mut definition in definitions {
            if definition.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if index.contains_key(&definition.name) {
                return Err(ConfigError::DuplicatePartner(definition.name));
            }
            definition.timeout_ms = definition.timeout_ms.max(MIN_PARTNER_TIMEOUT_MS);
            index.insert(definition.name.clone(), partners.len());
            partners.push(definition);
        }

        Ok(Self { partners, index })
    }

    /// Build from raw configuration entries
    pub fn from_specs(specs: Vec<PartnerSpec>) -> Result<Self, ConfigError> {
        let definitions = specs
            .into_iter()
            .map(PartnerDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(definitions)
    }

    pub fn get(&self, name: &str) -> Option<&PartnerDefinition> {
        self.index.get(name).map(|&i| &self.partners[i])
    }

    /// Known and active
    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.active)
    }

    /// All definitions, declaration order
    pub fn iter(&self) -> impl Iterator<Item = &PartnerDefinition> {
        self.partners.iter()
    }

    /// Active definitions, declaration order
    pub fn active(&self) -> impl Iterator<Item = &PartnerDefinition> {
        self.partners.iter().filter(|p| p.active)
    }

    /// Active definitions of one tier, declaration order
    pub fn tier(&self, tier: Tier) -> impl Iterator<Item = &PartnerDefinition> {
        self.active().filter(move |p| p.tier == tier)
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PartnerRegistry {
        PartnerRegistry::new(vec![
            PartnerDefinition::blocking("cmp", 500),
            PartnerDefinition::blocking("prebid", 1000).with_dependency("cmp"),
            PartnerDefinition::independent("amazonaps", 800),
            PartnerDefinition::non_core("chartbeat", 2000).inactive(),
        ])
        .unwrap()
    }

    #[test]
    fn test_tier_grouping() {
        let registry = sample();
        let blocking: Vec<_> = registry.tier(Tier::Blocking).map(|p| p.name.as_str()).collect();
        assert_eq!(blocking, vec!["cmp", "prebid"]);
        assert_eq!(registry.tier(Tier::Independent).count(), 1);
        // Inactive partners are not part of any tier
        assert_eq!(registry.tier(Tier::NonCore).count(), 0);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_is_active() {
        let registry = sample();
        assert!(registry.is_active("cmp"));
        assert!(!registry.is_active("chartbeat"));
        assert!(!registry.is_active("unknown"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = PartnerRegistry::new(vec![
            PartnerDefinition::blocking("cmp", 500),
            PartnerDefinition::independent("cmp", 800),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicatePartner("cmp".to_string())
        );
    }

    #[test]
    fn test_timeout_floor_applied_to_literal_definitions() {
        let mut definition = PartnerDefinition::blocking("cmp", 500);
        definition.timeout_ms = 0;
        let registry = PartnerRegistry::new(vec![definition]).unwrap();
        assert_eq!(
            registry.get("cmp").unwrap().timeout_ms,
            MIN_PARTNER_TIMEOUT_MS
        );
    }
}
