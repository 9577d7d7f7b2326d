//! Partial attribute overrides.

use serde::{Deserialize, Serialize};

use super::attrs::Attributes;
use super::color::Color;

/// A set of attribute overrides applied by one node kind.
///
/// Each field is optional; [`apply_to`](StyleRule::apply_to) overwrites
/// only the fields that are set and leaves the rest as inherited.
///
/// # Example
///
/// ```rust
/// use richmark::{Attributes, Color, StyleRule};
///
/// let rule = StyleRule::new().bold(true).color(Color::Red);
/// let mut attrs = Attributes::default();
/// rule.apply_to(&mut attrs);
///
/// assert!(attrs.bold);
/// assert_eq!(attrs.color, Color::Red);
/// assert_eq!(attrs.size, 24.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl StyleRule {
    /// Creates a rule that overrides nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns true if the rule overrides no field.
    pub fn is_empty(&self) -> bool {
        self.family.is_none() && self.size.is_none() && self.bold.is_none() && self.color.is_none()
    }

    /// Overwrites the fields this rule sets, in place.
    ///
    /// Callers that still need the original must clone first; the
    /// stylesheet does this for them.
    pub fn apply_to(&self, attrs: &mut Attributes) {
        if let Some(family) = &self.family {
            attrs.family.clone_from(family);
        }
        if let Some(size) = self.size {
            attrs.size = size;
        }
        if let Some(bold) = self.bold {
            attrs.bold = bold;
        }
        if let Some(color) = self.color {
            attrs.color = color;
        }
    }
}
