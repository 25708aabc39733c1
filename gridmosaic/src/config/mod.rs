//! User configuration.

mod settings;

pub use settings::{
    Settings, SettingsError, DEFAULT_DATASETS, DEFAULT_LOG_DIR, DEFAULT_SUPPORT_DIR,
};
