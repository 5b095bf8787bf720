//! Parsing and validation of `bitloom.toml` build configuration files.
//!
//! The configuration controls how a netlist container allocates names,
//! which construction checks are enforced, and the bounds used by the
//! reference evaluator. Every section is optional.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
