//! Utility modules for configuration and error handling.

pub mod error;
pub mod config;

// Re-export commonly used types for convenience
pub use config::IscConfig;
pub use error::{ConfigError, IscError, OutputError, ParseError};
