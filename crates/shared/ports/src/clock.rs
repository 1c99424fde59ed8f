use herald_core::Timestamp;

/// Port for wall-clock time
///
/// Used to stamp readiness transitions and archived auctions:
/// - Real system time for production
/// - Manually advanced time for deterministic tests
///
/// Deadlines and latencies are measured on the async runtime's monotonic
/// clock, not through this port.
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
