//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env + process environment
//!     → settings.rs (credentials, model paths; never fails)
//!
//! optional TOML file (--config)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; no file is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ListenerConfig, LoggingConfig, ObservabilityConfig, ServiceConfig, TimeoutConfig};
pub use settings::Settings;
