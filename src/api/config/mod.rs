//! Configuration module - environment-driven settings for the gateway.

pub mod settings;

pub use settings::{ConfigError, OpenSearchAuthMode, Settings};
