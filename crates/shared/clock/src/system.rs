use chrono::Utc;
use herald_core::Timestamp;
use herald_ports::Clock;

/// Wall clock for live page sessions
///
/// Stamps partner `ready_at` times and auction archive entries. Deadlines
/// never read it; they run on the runtime's monotonic timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    #[test]
    fn test_tracks_wall_time() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let before = Utc::now();
        let stamped = clock.now();
        let after = Utc::now();

        assert!(stamped >= before && stamped <= after);
        assert_eq!(clock.name(), "SystemClock");
    }

    #[test]
    fn test_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(clock.now() - first >= Duration::milliseconds(9));
    }
}
