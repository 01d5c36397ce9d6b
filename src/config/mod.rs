//! Panel configuration sources.
//!
//! Configuration is resolved in two layers with field-by-field YAML merging:
//! 1. **Defaults** - Embedded at build time from `./config/defaults.yaml`
//! 2. **User** - The panel document handed to the model (usually a section
//!    of an `apps.yaml`)
//!
//! ## Merge Strategy
//! - Mappings: Deep merge field-by-field, user values win
//! - Sequences (`cards`, `hiddenCards`, ...): Replaced wholesale
//!
//! ## Environment Variables
//! - `LUI_CONFIG_PATH` - Explicit config file (overrides discovery)

mod defaults;
mod loader;
mod merge;
mod store;

pub use defaults::{DEFAULTS_YAML, default_document};
pub use loader::{CONFIG_FILE_NAME, CONFIG_PATH_ENV, ConfigLoader, ConfigPaths};
pub use merge::{MAX_MERGE_DEPTH, deep_merge, deep_merge_all};
pub use store::ConfigStore;
