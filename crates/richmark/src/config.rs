//! Render configuration loaded from YAML.
//!
//! A configuration file supplies the base attributes the document root
//! inherits and overrides for the stylesheet's rules:
//!
//! ```yaml
//! base:
//!   family: Menlo
//!   size: 18
//! rules:
//!   strong: { bold: true, color: "#ff8800" }
//!   heading: { size: 32 }
//! ```
//!
//! Both sections are optional. Base fields left out keep their defaults
//! (Helvetica, 24, regular, black); rules left out keep the standard
//! stylesheet's rule for that kind.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::style::{Attributes, StyleRule, Stylesheet};

/// Error returned when a configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Base attributes plus stylesheet: everything a render needs besides the
/// document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderConfig {
    pub base: Attributes,
    pub stylesheet: Stylesheet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    base: StyleRule,
    rules: Option<Stylesheet>,
}

impl RenderConfig {
    /// Parses a configuration from YAML source.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = if source.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(source)?
        };

        let mut base = Attributes::default();
        raw.base.apply_to(&mut base);

        let stylesheet = match raw.rules {
            Some(rules) => Stylesheet::standard().merge(rules),
            None => Stylesheet::standard(),
        };

        Ok(Self { base, stylesheet })
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded render config");
        Self::from_yaml(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, StyleKind, HEADING_SIZE};
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = RenderConfig::from_yaml("").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.stylesheet, Stylesheet::standard());
    }

    #[test]
    fn test_partial_base() {
        let config = RenderConfig::from_yaml("base:\n  size: 18\n  color: blue\n").unwrap();
        assert_eq!(config.base.family, "Helvetica");
        assert_eq!(config.base.size, 18.0);
        assert_eq!(config.base.color, Color::Blue);
        assert!(!config.base.bold);
    }

    #[test]
    fn test_rules_overlay_standard() {
        let config = RenderConfig::from_yaml("rules:\n  strong:\n    color: '#ff8800'\n").unwrap();
        assert_eq!(
            config.stylesheet.rule(StyleKind::Strong),
            Some(&StyleRule::new().color(Color::Rgb(255, 136, 0)))
        );
        assert_eq!(
            config.stylesheet.rule(StyleKind::Heading),
            Some(&StyleRule::new().size(HEADING_SIZE))
        );
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = RenderConfig::from_yaml("theme: dark\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(RenderConfig::from_yaml("base:\n  color: mauve\n").is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base:\n  family: Menlo").unwrap();

        let config = RenderConfig::from_path(file.path()).unwrap();
        assert_eq!(config.base.family, "Menlo");
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = RenderConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
