//! VCPanel Settings Crate
//!
//! Handles panel configuration, operator preferences, and persistence.

pub mod config;
pub mod error;

pub use config::{Config, PathsConfig, Preferences};
pub use error::{SettingsError, SettingsResult};
