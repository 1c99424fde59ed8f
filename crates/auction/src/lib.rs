//! Herald Auction Coordinator
//!
//! Per-slot bid collection, gated by partner readiness:
//! - **Timeout Rule Engine**: base budget plus stacked, context-dependent deltas
//! - **Adapter Registry**: one wrapper adapter per bidding library
//! - **Auction Coordinator**: concurrent `request_bids` under one budget,
//!   arrival-order merge, bounded per-slot archive
//!
//! ## Architecture
//!
//! ```text
//!                        ┌──────────────────────────────────────┐
//!  PartnerReadiness ────►│          AuctionCoordinator          │
//!  (orchestrator)        │                                      │
//!                        │  TimeoutConfig ──► budget per request │
//!  DimensionContext ────►│                                      │
//!                        │  AdapterRegistry                     │
//!                        │    ├─ adapter A ──► request_bids ─┐  │
//!                        │    ├─ adapter B ──► request_bids ─┤  │
//!                        │    └─ adapter C (off)             │  │
//!                        │                                   ▼  │
//!                        │  AuctionState: bids, timing, status  │
//!                        └──────────────┬───────────────────────┘
//!                                       │ clear_auction
//!                                       ▼
//!                                Archive (per slot)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use herald_auction::{AdapterRegistry, AuctionCoordinator, AuctionOptions, CoordinatorConfig};
//!
//! let mut adapters = AdapterRegistry::new();
//! adapters.register(Arc::new(PrebidAdapter::new()))?;
//!
//! let coordinator = AuctionCoordinator::new(adapters, orchestrator, clock, CoordinatorConfig::default());
//! let state = coordinator
//!     .request_auction("top-banner", AuctionOptions::new(ctx))
//!     .settled()
//!     .await;
//! coordinator.apply_bids("top-banner");
//! ```

pub mod coordinator;
pub mod error;
pub mod registry;
pub mod rules;
pub mod state;
pub mod targeting;

// Re-export main types
pub use coordinator::{AuctionCoordinator, AuctionOptions, AuctionRequest, CoordinatorConfig};
pub use error::{RegistrationError, Result};
pub use registry::AdapterRegistry;
pub use rules::{DEFAULT_BASE_TIMEOUT_MS, TimeoutConfig, TimeoutRule, calculate_timeout};
pub use state::{ArchiveEntry, AuctionState};
pub use targeting::DimensionMatcher;
