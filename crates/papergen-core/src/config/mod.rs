//! Configuration management for papergen

pub mod env_loader;
mod file_loader;

pub mod loader;
pub mod model;

pub use env_loader::{apply_env, apply_env_from};
pub use file_loader::load_from_file;
pub use loader::{
    ConfigLoader, ConfigOverrides, ConfigSource, DEFAULT_CONFIG_FILE, load_config,
    user_config_path,
};
pub use model::{Config, DEFAULT_ENDPOINT, LoggingConfig, TimeoutConfig};
