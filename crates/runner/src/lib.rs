//! Herald Runner - Page Sessions
//!
//! Runs the whole system for one page view:
//!
//! - **Config**: partners, orchestrator tuning and auction timeouts as JSON
//! - **Partner Feed**: simulated partner scripts signalling completion
//! - **Simulated Adapter**: bidding library stand-in
//! - **Page Session**: orchestrator plus coordinator, start to shutdown
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────┐        plugin.X.complete
//!   │  Partner Feed   │ ─────────────────────────┐
//!   └─────────────────┘                          ▼
//!                                       ┌─────────────────┐
//!                                       │   Signal Bus    │
//!                                       └────────┬────────┘
//! ┌──────────────────────────────────────────────┼───────────────────┐
//! │                    PAGE SESSION              ▼                   │
//! │                                  ┌───────────────────────┐       │
//! │   HeraldConfig ────────────────► │ Readiness Orchestrator│       │
//! │                                  └───────────┬───────────┘       │
//! │                                              │ blocking tier     │
//! │                                              ▼                   │
//! │                                  ┌───────────────────────┐       │
//! │   slots + context ─────────────► │  Auction Coordinator  │       │
//! │                                  └───────────┬───────────┘       │
//! └──────────────────────────────────────────────┼───────────────────┘
//!                                                │ request_bids
//!                                                ▼
//!                                   ┌───────────────────────┐
//!                                   │   Wrapper Adapters    │
//!                                   └───────────────────────┘
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod feed;
pub mod session;

// Re-export main types
pub use adapter::{SimulatedAdapter, SimulatedAdapterConfig};
pub use config::{HeraldConfig, load_config, load_config_from_str, load_default_config};
pub use error::{Result, RunnerError};
pub use feed::{PartnerFeed, PartnerFeedConfig, PartnerLoad};
pub use session::PageSession;
