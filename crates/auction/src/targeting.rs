//! Dimension Matcher
//!
//! Default targeting evaluator for timeout rules.

use herald_core::{DimensionContext, DimensionPredicate};
use herald_ports::TargetingEvaluator;

/// Matches a predicate against a context
///
/// A predicate matches when every dimension it names has at least one
/// context value among the allowed values (case-insensitive). An empty
/// predicate matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionMatcher;

impl DimensionMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl TargetingEvaluator for DimensionMatcher {
    fn matches(&self, predicate: &DimensionPredicate, ctx: &DimensionContext) -> bool {
        predicate.dimensions().all(|(dimension, allowed)| {
            ctx.values(dimension).iter().any(|value| {
                allowed
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(value))
            })
        })
    }
}
