//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table, middleware)
//!     → handlers.rs (pick passthrough or convenience route)
//!     → request.rs (buffer body, extract credential and path)
//!     → body.rs (negotiate the upstream body)
//!     → upstream::Forwarder (dispatch + relay)
//!     → security::cors (stamp CORS headers)
//!     → Send to client
//! ```

pub mod body;
pub mod handlers;
pub mod request;
pub mod server;

pub use request::{InboundRequest, X_REQUEST_ID, X_ZT_TOKEN};
pub use server::GatewayServer;
