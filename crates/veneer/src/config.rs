//! Runtime configuration for the wrapper layer.
//!
//! Configuration is read from TOML. Every field has a default, so a partial
//! (or empty) document is valid:
//!
//! ```toml
//! status_clear_delay_ms = 5000
//! window_id_prefix = "win"
//!
//! [fallback_screen]
//! width = 1920
//! height = 1080
//!
//! [tree_view]
//! auto_expand = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use veneer_core::logging::targets;

use crate::error::{Result, VeneerError};

/// Screen dimensions used when the toolkit cannot report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
        }
    }
}

/// Defaults applied to newly constructed tree views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewDefaults {
    /// Expand every branch after `set_tree`.
    pub auto_expand: bool,
    /// Sort by a column when its header is clicked.
    pub sortable: bool,
}

/// Configuration shared by an [`Application`](crate::Application) and the
/// widgets it creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeneerConfig {
    /// Delay before a status bar message is cleared, in milliseconds.
    pub status_clear_delay_ms: u64,
    /// Screen size reported when the toolkit has no default screen.
    pub fallback_screen: ScreenSize,
    /// Default text area line limit (0 means unbounded).
    pub text_area_line_limit: usize,
    /// Tree view construction defaults.
    pub tree_view: TreeViewDefaults,
    /// Prefix for generated window ids.
    pub window_id_prefix: String,
}

impl Default for VeneerConfig {
    fn default() -> Self {
        Self {
            status_clear_delay_ms: 10_000,
            fallback_screen: ScreenSize::default(),
            text_area_line_limit: 0,
            tree_view: TreeViewDefaults::default(),
            window_id_prefix: "win".to_string(),
        }
    }
}

impl VeneerConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| VeneerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// The status bar auto-clear delay.
    pub fn status_clear_delay(&self) -> Duration {
        Duration::from_millis(self.status_clear_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = VeneerConfig::default();
        assert_eq!(config.status_clear_delay(), Duration::from_secs(10));
        assert_eq!(config.fallback_screen, ScreenSize { width: 1600, height: 1200 });
        assert_eq!(config.text_area_line_limit, 0);
        assert_eq!(config.window_id_prefix, "win");
    }

    #[test]
    fn test_partial_document() {
        let config = VeneerConfig::from_toml_str(
            r#"
            status_clear_delay_ms = 500

            [tree_view]
            sortable = true
            "#,
        )
        .unwrap();
        assert_eq!(config.status_clear_delay(), Duration::from_millis(500));
        assert!(config.tree_view.sortable);
        assert!(!config.tree_view.auto_expand);
        assert_eq!(config.window_id_prefix, "win");
    }

    #[test]
    fn test_bad_document() {
        let err = VeneerConfig::from_toml_str("status_clear_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, VeneerError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window_id_prefix = \"view\"").unwrap();
        writeln!(file, "[fallback_screen]\nwidth = 800\nheight = 600").unwrap();

        let config = VeneerConfig::load(file.path()).unwrap();
        assert_eq!(config.window_id_prefix, "view");
        assert_eq!(config.fallback_screen.width, 800);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = VeneerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, VeneerError::ConfigIo { .. }));
    }
}
