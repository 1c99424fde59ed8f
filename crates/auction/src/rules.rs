//! Timeout Rule Engine
//!
//! Per-request bid timeouts: a base value plus the deltas of every rule whose
//! predicate matches the request context.
//!
//! ```json
//! {
//!   "baseTimeout": 1500,
//!   "rules": [
//!     { "include": { "geo": ["uk"] }, "add": 200 },
//!     { "exclude": { "device": ["desktop"] }, "add": 300 }
//!   ]
//! }
//! ```

use herald_core::{DimensionContext, DimensionPredicate};
use herald_ports::TargetingEvaluator;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bid timeout used when nothing is configured (ms)
pub const DEFAULT_BASE_TIMEOUT_MS: u64 = 1500;

/// One additive adjustment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutRule {
    /// Applies only when this predicate matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<DimensionPredicate>,
    /// Never applies when this predicate matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<DimensionPredicate>,
    /// Delta in ms, may be negative
    pub add: i64,
}

impl TimeoutRule {
    pub fn add(delta_ms: i64) -> Self {
        Self {
            add: delta_ms,
            ..Default::default()
        }
    }

    pub fn including(mut self, predicate: DimensionPredicate) -> Self {
        self.include = Some(predicate);
        self
    }

    pub fn excluding(mut self, predicate: DimensionPredicate) -> Self {
        self.exclude = Some(predicate);
        self
    }

    pub fn applies(&self, ctx: &DimensionContext, evaluator: &dyn TargetingEvaluator) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|predicate| evaluator.matches(predicate, ctx));
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|predicate| evaluator.matches(predicate, ctx));
        included && !excluded
    }
}

/// Sum the deltas of every applicable rule onto `base_timeout_ms`
///
/// Rules stack in declaration order; the result never goes below zero.
pub fn calculate_timeout(
    base_timeout_ms: u64,
    rules: &[TimeoutRule],
    ctx: &DimensionContext,
    evaluator: &dyn TargetingEvaluator,
) -> u64 {
    let delta: i64 = rules
        .iter()
        .filter(|rule| rule.applies(ctx, evaluator))
        .map(|rule| rule.add)
        .fold(0, i64::saturating_add);
    base_timeout_ms.saturating_add_signed(delta)
}

/// Timeout rule configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeoutConfig {
    pub base_timeout: u64,
    pub rules: Vec<TimeoutRule>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            base_timeout: DEFAULT_BASE_TIMEOUT_MS,
            rules: Vec::new(),
        }
    }
}

impl TimeoutConfig {
    pub fn new(base_timeout: u64) -> Self {
        Self {
            base_timeout,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: TimeoutRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Timeout for a request context
    pub fn calculate(&self, ctx: &DimensionContext, evaluator: &dyn TargetingEvaluator) -> Duration {
        Duration::from_millis(calculate_timeout(
            self.base_timeout,
            &self.rules,
            ctx,
            evaluator,
        ))
    }
}
