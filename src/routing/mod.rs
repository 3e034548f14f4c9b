//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! /api/networks/... request (method, path)
//!     → shortcuts.rs (split path params, match the static table)
//!     → Return: Shortcut (upstream method + path) or a 404/405 error
//! ```
//!
//! # Design Decisions
//! - The table is static; nothing is registered at runtime
//! - Deterministic: same method and path always resolve the same way
//! - Path parameters are interpolated verbatim

pub mod shortcuts;

pub use shortcuts::{route_rest_shortcut, Shortcut};
