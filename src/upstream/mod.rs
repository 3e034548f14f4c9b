//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! ForwardSpec (method, path, credential, headers, body)
//!     → forwarder.rs (authorize, dispatch)
//!     → upstream control plane
//!     → forwarder.rs (filter headers, stream body)
//!     → Response to caller
//! ```

pub mod forwarder;

pub use forwarder::{ForwardSpec, Forwarder, RELAYED_HEADERS};
