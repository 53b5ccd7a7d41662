//! Configuration module for Sumi-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The configuration is built once at startup and passed by
//! reference; nothing here is process-global.
//!
//! # Example
//!
//! ```no_run
//! use sumi_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Probe mode: {:?}", config.probe.mode);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClassifyConfig, Config, FetchConfig, ForbiddenConfig, OutputConfig, ProbeConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
