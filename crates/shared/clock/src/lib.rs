//! Herald Clock Infrastructure
//!
//! Wall-clock sources behind the `Clock` port:
//!
//! - [`SystemClock`]: real time, for production
//! - [`ManualClock`]: frozen time that only moves when advanced, for tests
//!
//! ## Usage
//!
//! ```ignore
//! use herald_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::new(None);
//! let t0 = clock.now();
//! clock.advance(Duration::milliseconds(250));
//! assert_eq!(clock.now() - t0, Duration::milliseconds(250));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use herald_ports::Clock;
