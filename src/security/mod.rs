//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! API request:
//!     → http/request.rs (credential extraction)
//!     → handler
//!     → cors.rs (stamp CORS headers on the response)
//! ```
//!
//! # Design Decisions
//! - The gateway never stores credentials; each request carries its own
//! - CORS is permissive and identical for every API response

pub mod cors;

pub use cors::{cors_middleware, preflight, CorsPolicy};
