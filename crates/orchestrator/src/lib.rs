//! Herald Readiness Orchestrator
//!
//! Schedules third-party partner loading on a page and tells the page when
//! each group of partners is accounted for:
//! - **Dependency Graph**: each partner may wait on one other partner
//! - **Critical Path Budgets**: tier deadlines derived from the longest chain
//! - **Fail-Open Timeouts**: a partner that never signals is marked timed out
//! - **Exactly-Once Tier Callbacks**: blocking, independent, non-core
//!
//! ## Architecture
//!
//! ```text
//! Partner config ──► PartnerRegistry ──► DependencyGraph
//!                                              │ critical paths
//!                     ┌────────────────────────▼───────────────────────┐
//!                     │            ReadinessOrchestrator               │
//!  SignalBus ────────►│  status rows: pending → ready/timeout/error    │
//!  plugin.X.complete  │                                                │
//!                     │  blocking ─┐  independent ─┐  nonCore ─┐       │
//!  tier deadlines ───►│            ▼               ▼           ▼       │
//!                     │  on_partners_ready  on_all_partners  on_non_core│
//!                     └─────────────────────┬──────────────────────────┘
//!                                           │ PartnerReadiness
//!                                           ▼
//!                                   Auction Coordinator
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use herald_orchestrator::{PartnerRegistry, ReadinessCallbacks, ReadinessOrchestrator};
//!
//! let registry = PartnerRegistry::new(vec![
//!     PartnerDefinition::blocking("cmp", 500),
//!     PartnerDefinition::blocking("prebid", 1000).with_dependency("cmp"),
//! ])?;
//!
//! let orchestrator = ReadinessOrchestrator::init(
//!     registry,
//!     ReadinessCallbacks::new().on_partners_ready(|snapshot, elapsed_ms| {
//!         println!("blocking partners settled after {}ms", elapsed_ms);
//!     }),
//!     &bus,
//!     clock,
//!     OrchestratorConfig::default(),
//! )?;
//!
//! if orchestrator.can_load("prebid") {
//!     // inject the prebid script
//! }
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod registry;

// Re-export main types
pub use config::{DEFAULT_MIN_TIMEOUT_MS, OrchestratorConfig, PartnerSpec};
pub use error::{ConfigError, OrchestratorError, Result};
pub use graph::DependencyGraph;
pub use orchestrator::{ReadinessCallbacks, ReadinessOrchestrator, TierCallback, TierProgress};
pub use registry::PartnerRegistry;
