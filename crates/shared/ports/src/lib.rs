//! Herald Ports
//!
//! Port definitions (traits) for the Herald system.
//! These define the boundaries between the readiness/auction logic and the
//! page it runs on: signal transport, bidding libraries, targeting and time.

mod adapter;
mod clock;
mod error;
mod readiness;
mod signal;
mod targeting;

pub use adapter::WrapperAdapter;
pub use clock::Clock;
pub use error::{AdapterError, AdapterResult, SignalError, SignalResult};
pub use readiness::PartnerReadiness;
pub use signal::{SignalBus, SignalHandler};
pub use targeting::TargetingEvaluator;
