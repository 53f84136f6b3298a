//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing subsystem produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (dispatch counters, slot gauge)
//! ```
//!
//! # Design Decisions
//! - The library only emits; the binary (or embedding app) installs subscribers
//! - Metrics are cheap (facade calls, no-op without a recorder)

pub mod logging;
pub mod metrics;
