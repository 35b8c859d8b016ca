//! Proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → server.rs (axum router, shared AppState)
//!     → dispatcher.rs
//!         OPTIONS        → 204 + CORS set
//!         status path    → 200 liveness body
//!         reset path     → zero cursors, 200
//!         anything else  → routing::resolve → forward → relay
//!     → headers.rs (fixed CORS/cache set stamped on every response)
//! ```

pub mod dispatcher;
pub mod headers;
pub mod server;

pub use server::{AppState, Gateway};
