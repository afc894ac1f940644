//! View configuration

use serde::{Deserialize, Serialize};

/// Configuration for a tree view.
///
/// # Example
///
/// ```
/// use inspector_lib::config::ViewConfig;
///
/// let config = ViewConfig::default().with_alternating_rows(false);
/// assert!(!config.alternating_rows);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Report even rows so the renderer can alternate row backgrounds.
    ///
    /// Default: true
    pub alternating_rows: bool,

    /// Expand the root node when a tree is first loaded.
    ///
    /// Default: true
    pub expand_root_on_load: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            alternating_rows: true,
            expand_root_on_load: true,
        }
    }
}

impl ViewConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether rows alternate.
    pub fn with_alternating_rows(mut self, enabled: bool) -> Self {
        self.alternating_rows = enabled;
        self
    }

    /// Sets whether the root is expanded on load.
    pub fn with_expand_root_on_load(mut self, enabled: bool) -> Self {
        self.expand_root_on_load = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ViewConfig = serde_json::from_str(r#"{ "alternating_rows": false }"#).unwrap();
        assert_eq!(
            config,
            ViewConfig::new()
                .with_alternating_rows(false)
                .with_expand_root_on_load(true)
        );
    }
}
