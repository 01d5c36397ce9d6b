//! NSPanel Lovelace UI configuration library
//!
//! This module exports the configuration model for testing and integration.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod model;

pub use config::{ConfigLoader, ConfigStore};
pub use error::{ConfigError, ConfigResult};
pub use model::{Card, Entity, ObjectId, PanelConfig};
