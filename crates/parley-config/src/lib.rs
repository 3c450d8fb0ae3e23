//! Configuration system for Parley.
//!
//! Provides TOML-based configuration with:
//! - Model artifact locations (`[models]`)
//! - An optional external knowledge file (`[knowledge]`)
//! - Chat session text (`[chat]`)
//! - Config file layering (user config dir + project-local overrides)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    LoadedConfig, load_config, load_config_file, load_config_with_options, xdg_config_dir,
    xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
