//! Shared handle to the current panel configuration.
//!
//! Readers take a snapshot with [`ConfigStore::current`] and keep using it for
//! as long as they like. A reload builds a complete new [`PanelConfig`] first
//! and only then swaps it in, so readers never see a half-built model.

use crate::error::ConfigResult;
use crate::model::PanelConfig;
use arc_swap::ArcSwap;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Atomically swappable [`PanelConfig`].
pub struct ConfigStore {
    current: ArcSwap<PanelConfig>,
}

impl ConfigStore {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            current: ArcSwap::from(Arc::new(config)),
        }
    }

    /// Load a raw document and wrap the result.
    pub fn load(raw: Value) -> ConfigResult<Self> {
        Ok(Self::new(PanelConfig::load(raw)?))
    }

    /// Snapshot of the configuration visible to readers right now.
    pub fn current(&self) -> Arc<PanelConfig> {
        self.current.load_full()
    }

    /// Build a new model from `raw` and publish it.
    ///
    /// On error the previous model stays in place.
    pub fn reload(&self, raw: Value) -> ConfigResult<Arc<PanelConfig>> {
        let config = Arc::new(PanelConfig::load(raw)?);
        self.current.store(Arc::clone(&config));
        info!(cards = config.cards().len(), "panel config replaced");
        Ok(config)
    }
}
