//! Dependency Graph
//!
//! Each partner has at most one dependency edge. Edges are validated once at
//! build time (no self edges, no unknown targets, no cycles), which is what
//! makes the critical path well defined.

use crate::error::ConfigError;
use crate::registry::PartnerRegistry;
use herald_core::Tier;
use log::warn;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Dependency edges between active partners
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// partner -> partner it depends on
    dependency: HashMap<String, String>,
    /// Active partners, declaration order
    order: Vec<String>,
}

impl DependencyGraph {
    /// Build and validate the graph for a registry
    ///
    /// Every definition is checked, active or not. An edge to an inactive
    /// partner is dropped: that partner will never settle, so waiting on it
    /// would only ever end in a timeout.
    pub fn build(registry: &PartnerRegistry) -> Result<Self, ConfigError> {
        let mut dependency = HashMap::new();

        for partner in registry.iter() {
            let Some(dep) = &partner.depends_on else {
                continue;
            };
            if *dep == partner.name {
                return Err(ConfigError::SelfDependency(partner.name.clone()));
            }
            let Some(target) = registry.get(dep) else {
                return Err(ConfigError::UnknownDependency {
                    partner: partner.name.clone(),
                    dependency: dep.clone(),
                });
            };
            if !partner.active {
                continue;
            }
            if !target.active {
                warn!(
                    "Partner {} depends on inactive partner {}; ignoring the dependency",
                    partner.name, dep
                );
                continue;
            }
            dependency.insert(partner.name.clone(), dep.clone());
        }

        let graph = Self {
            dependency,
            order: registry.active().map(|p| p.name.clone()).collect(),
        };
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// Out-degree is at most one, so following edges from every node and
    /// remembering nodes already proven acyclic is linear overall.
    fn check_acyclic(&self) -> Result<(), ConfigError> {
        let mut proven: HashSet<&str> = HashSet::new();

        for start in &self.order {
            let mut path: Vec<&str> = Vec::new();
            let mut on_path: HashSet<&str> = HashSet::new();
            let mut current = Some(start.as_str());

            while let Some(name) = current {
                if proven.contains(name) {
                    break;
                }
                if !on_path.insert(name) {
                    let cycle_start = path.iter().position(|p| *p == name).unwrap_or(0);
                    let mut cycle: Vec<&str> = path[cycle_start..].to_vec();
                    cycle.push(name);
                    return Err(ConfigError::DependencyCycle {
                        path: cycle.join(" -> "),
                    });
                }
                path.push(name);
                current = self.get_dependency(name);
            }
            proven.extend(path);
        }
        Ok(())
    }

    /// Direct dependency of a partner - O(1)
    pub fn get_dependency(&self, name: &str) -> Option<&str> {
        self.dependency.get(name).map(String::as_str)
    }

    /// Partners that depend directly on `name`, declaration order - O(n)
    pub fn get_dependents(&self, name: &str) -> Vec<&str> {
        self.order
            .iter()
            .filter(|p| self.get_dependency(p) == Some(name))
            .map(String::as_str)
            .collect()
    }

    /// The partner followed by all of its ancestors
    pub fn chain(&self, name: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.order.iter().find(|p| *p == name).map(String::as_str);
        while let Some(partner) = current {
            chain.push(partner);
            current = self.get_dependency(partner);
        }
        chain
    }

    /// Sum of timeouts along a partner's chain
    pub fn chain_timeout(&self, name: &str, registry: &PartnerRegistry) -> Duration {
        self.chain(name)
            .into_iter()
            .filter_map(|p| registry.get(p))
            .map(|p| p.timeout())
            .sum()
    }

    /// Longest chain timeout among the active partners of a tier
    ///
    /// Zero for an empty tier.
    pub fn critical_path(&self, tier: Tier, registry: &PartnerRegistry) -> Duration {
        registry
            .tier(tier)
            .map(|p| self.chain_timeout(&p.name, registry))
            .max()
            .unwrap_or(Duration::ZERO)
    }
}
