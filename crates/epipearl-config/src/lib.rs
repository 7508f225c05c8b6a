//! # Epipearl Config
//!
//! TOML configuration for the epipearl client: which device to talk to, how
//! patiently, and where logs go.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
