use herald_core::{DimensionContext, DimensionPredicate};

/// Port for dimension predicate evaluation
///
/// Targeting rule languages vary per publisher; the timeout rule engine only
/// needs a yes/no answer per predicate.
pub trait TargetingEvaluator: Send + Sync {
    /// Does the context satisfy the predicate?
    fn matches(&self, predicate: &DimensionPredicate, ctx: &DimensionContext) -> bool;
}
