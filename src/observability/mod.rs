//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + sync produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (dispatch and route counters)
//!
//! Consumers:
//!     → whatever tracing subscriber / metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder on its own
//! - Metric updates are no-ops until a recorder exists

pub mod logging;
pub mod metrics;
