//! Shared configuration for the tweetmood workspace.

pub mod app_config;
pub mod config;

pub use app_config::{AppConfig, Environment, NluCredentials, TwitterCredentials};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
