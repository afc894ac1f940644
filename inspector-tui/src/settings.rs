//! Loading of the view configuration file.

use std::fs;
use std::io;
use std::path::Path;

use inspector_lib::config::ViewConfig;
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read a config file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<ViewConfig, SettingsError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ViewConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Read the config file, logging and ignoring any error.
pub fn load_or_default(path: Option<&Path>) -> ViewConfig {
    let Some(path) = path else {
        return ViewConfig::default();
    };
    load(path).unwrap_or_else(|e| {
        log::warn!("ignoring {}: {}", path.display(), e);
        ViewConfig::default()
    })
}
