/// Narrow read-only view of partner readiness
///
/// The auction side only ever needs these two answers, so it never sees the
/// orchestrator's status rows.
pub trait PartnerReadiness: Send + Sync {
    /// Partner is configured and active
    fn is_active(&self, partner: &str) -> bool;

    /// Partner is ready or has timed out
    fn is_settled(&self, partner: &str) -> bool;
}
