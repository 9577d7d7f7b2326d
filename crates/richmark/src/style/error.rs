//! Style errors.

use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The name is not one of the eight ANSI color names.
    #[error("unknown color name '{0}'")]
    UnknownName(String),
    /// A `#` prefix was not followed by exactly six hex digits.
    #[error("invalid hex color '{0}', expected #rrggbb")]
    InvalidHex(String),
}

/// Error returned when a stylesheet cannot be loaded.
#[derive(Debug, Error)]
pub enum StylesheetError {
    /// The YAML source was malformed or named an unknown kind or field.
    #[error("invalid stylesheet: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
