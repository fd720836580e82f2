//! Configuration module for Site-Census
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use site_census::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("census.toml")).unwrap();
//! println!("Crawl scope: {}", config.scope_substring());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CategoryRule, Config, OutputConfig, RendererConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
