//! The rule table mapping style-bearing node kinds to attribute overrides.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::attrs::Attributes;
use super::color::Color;
use super::error::StylesheetError;
use super::rule::StyleRule;

/// Size every heading gets in the standard stylesheet, whatever its level.
pub const HEADING_SIZE: f32 = 48.0;

/// Color strong emphasis gets in the standard stylesheet.
pub const STRONG_COLOR: Color = Color::Red;

/// Node kinds that carry a style rule.
///
/// Structural kinds such as paragraphs pass attributes through untouched
/// and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Strong emphasis (`**text**`).
    Strong,
    /// A heading of any level.
    Heading,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKind::Strong => f.write_str("strong"),
            StyleKind::Heading => f.write_str("heading"),
        }
    }
}

/// The stylesheet: one [`StyleRule`] per style-bearing kind.
///
/// A stylesheet is plain data. Build one at startup and pass it by
/// reference to the [`Renderer`](crate::Renderer); tests can hand the
/// renderer a different table without touching any shared state.
///
/// # Example
///
/// ```rust
/// use richmark::{Attributes, Color, StyleKind, StyleRule, Stylesheet};
///
/// let sheet = Stylesheet::standard()
///     .add(StyleKind::Strong, StyleRule::new().bold(true).color(Color::Blue));
///
/// let base = Attributes::default();
/// let strong = sheet.apply(StyleKind::Strong, &base);
///
/// assert!(strong.bold);
/// assert_eq!(strong.color, Color::Blue);
/// assert!(!base.bold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stylesheet {
    rules: HashMap<StyleKind, StyleRule>,
}

impl Stylesheet {
    /// Creates a stylesheet with no rules; every kind renders as inherited.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Creates the standard stylesheet.
    ///
    /// | Kind | Override |
    /// |------|----------|
    /// | strong | bold, red |
    /// | heading | size 48 (any level) |
    pub fn standard() -> Self {
        Self::new()
            .add(
                StyleKind::Strong,
                StyleRule::new().bold(true).color(STRONG_COLOR),
            )
            .add(StyleKind::Heading, StyleRule::new().size(HEADING_SIZE))
    }

    /// Parses a stylesheet from YAML, a map of kind name to rule.
    ///
    /// ```yaml
    /// strong: { bold: true, color: "#ff8800" }
    /// heading: { size: 32 }
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, StylesheetError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Sets the rule for a kind, returning the updated stylesheet for chaining.
    pub fn add(mut self, kind: StyleKind, rule: StyleRule) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    /// Replaces the rules of every kind `other` defines, keeping the rest.
    pub fn merge(mut self, other: Stylesheet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Returns the rule for a kind, if one is defined.
    pub fn rule(&self, kind: StyleKind) -> Option<&StyleRule> {
        self.rules.get(&kind)
    }

    /// Returns true if no kind has a rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Derives the attributes for a subtree of the given kind.
    ///
    /// The result is a fresh copy of `attrs` with the kind's rule applied;
    /// `attrs` itself is left as it was. A kind with no rule yields an
    /// unchanged copy.
    pub fn apply(&self, kind: StyleKind, attrs: &Attributes) -> Attributes {
        let mut derived = attrs.clone();
        if let Some(rule) = self.rules.get(&kind) {
            tracing::trace!(%kind, ?rule, "applying style rule");
            rule.apply_to(&mut derived);
        }
        derived
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::standard()
    }
}
