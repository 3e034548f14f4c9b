//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the forwarder produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! tower-http produces:
//!     → per-request spans carrying x-request-id
//! ```
//!
//! # Design Decisions
//! - Credentials are never logged, only which source supplied them
//! - Metrics are cheap and optional (no recorder, no cost beyond a branch)

pub mod logging;
pub mod metrics;
