//! Configuration loading
//!
//! Defaults, then an optional JSON/TOML file, then `ROUTEWATCH_*`
//! environment overrides.

pub mod loader;

pub use loader::{apply_env_overrides, find_config_file, load, load_from_file};
