//! Herald Signals
//!
//! Lifecycle signal transport for the Herald system. Provides:
//! - Topic naming for partner completion signals
//! - An in-process bus implementing the `SignalBus` port
//!
//! ## Architecture
//!
//! ```text
//! Partner scripts (CMP, Prebid, APS, ...)
//!         │ publish
//!    ┌────▼────┐
//!    │ Signal  │  topics: plugin.{name}.complete
//!    │  Bus    │  (fired flag kept per topic for replay)
//!    └────┬────┘
//!         │ subscribe_once(topic, handler, replay)
//!    ┌────▼─────────┐
//!    │ Readiness    │
//!    │ Orchestrator │
//!    └──────────────┘
//! ```
//!
//! The bus is synchronous: handlers run on the publisher's call stack, after
//! the topic's lock has been released. Any transport that honours the
//! replay contract can replace it behind the port.

pub mod channel;
pub mod topics;

pub use channel::ChannelSignalBus;
pub use herald_ports::{SignalBus, SignalError, SignalHandler};
pub use topics::Topics;
