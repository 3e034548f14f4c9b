//! ZeroTier Central API gateway library.
//!
//! Authenticates and forwards `/api` requests to the upstream control plane
//! and serves a static asset bundle for everything else.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
