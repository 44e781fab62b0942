//! Configuration loading
//!
//! Builds a [`SessionConfig`](yametrika_domain::SessionConfig) from the
//! environment or from a JSON/TOML file.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
