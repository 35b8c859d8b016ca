//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path + raw query
//!     → table.rs (longest-prefix lookup)
//!     → route.rs (backend selection, ordinal cursor advance)
//!     → Return: concrete backend Url or ResolveError
//!
//! Table compilation (at startup):
//!     prefix → RouteConfig map
//!     → normalize prefixes (trailing slash)
//!     → sort by prefix length, longest first
//!     → freeze as RouteTable (shape immutable, cursors atomic)
//! ```
//!
//! # Design Decisions
//! - Longest-matching-prefix wins; lookup is deterministic
//! - No regex in the hot path, prefix matching only
//! - Ordinal cursors are lock-free atomics with exact saturation

pub mod route;
pub mod table;

pub use route::Route;
pub use table::{ResolveError, RouteTable};
