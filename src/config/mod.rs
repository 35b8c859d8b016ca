//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes.yaml (path from AVENUES_CONFIG_FILE, or ./routes.yaml)
//!     → loader.rs (read, parse, resolve *_path PEM material)
//!     → semantic validation
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the dispatch handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Missing status/reset paths fall back to built-in defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{config_file_path, load_config, load_config_from, resolve, GatewayConfig};
pub use schema::{ConfigFile, RouteConfig, RouteKind};
