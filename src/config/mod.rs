//! Configuration for pixmon
//!
//! Provides types, discovery and loading for `pixmon.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError,
    CONFIG_FILE,
};
pub use schema::*;
