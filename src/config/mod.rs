//! Configuration loading and resolution for fix-rpath.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Merging the cascade with command-line overrides into [`Settings`]

pub mod cascade;
pub mod parser;
pub mod settings;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, NO_USER_CONFIG_ENV, discover_configs, load_merged_config, merge_configs,
	user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use settings::{Overrides, Settings};
pub use types::{Config, LoadedConfig, MergedConfig};
