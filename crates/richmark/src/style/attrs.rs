//! The attribute set carried down the document tree.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Font family used when nothing else is configured.
pub const DEFAULT_FAMILY: &str = "Helvetica";

/// Font size used when nothing else is configured.
pub const DEFAULT_SIZE: f32 = 24.0;

/// Resolved presentation attributes in effect at a point in the tree.
///
/// `Attributes` is a plain value: every node that changes a field works on
/// its own clone, so siblings and ancestors never see the change.
///
/// # Example
///
/// ```rust
/// use richmark::{Attributes, Color};
///
/// let base = Attributes::new("Menlo", 18.0).with_color(Color::Blue);
/// let loud = base.clone().with_bold(true);
///
/// assert!(!base.bold);
/// assert!(loud.bold);
/// assert_eq!(loud.color, Color::Blue);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub color: Color,
}

impl Attributes {
    /// Creates a regular-weight, black attribute set.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            color: Color::Black,
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for Attributes {
    /// Helvetica, 24pt, regular, black.
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, DEFAULT_SIZE)
    }
}
