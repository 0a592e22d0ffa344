//! Configuration module for the spritecut CLI
//!
//! Provides types and parsing for `scut.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, ConfigError};
pub use schema::*;
