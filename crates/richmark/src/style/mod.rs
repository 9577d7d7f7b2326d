//! Attribute sets and the rules that derive them.
//!
//! This module provides the styling primitives of the cascade:
//!
//! - [`Attributes`]: the resolved family, size, weight and color at a node
//! - [`Color`]: named or RGB text colors
//! - [`StyleRule`]: a partial override of an attribute set
//! - [`Stylesheet`]: the table mapping each [`StyleKind`] to its rule
//!
//! A node's attributes are its parent's attributes with its own rule, if
//! any, applied on top. Nothing else cascades.

mod attrs;
mod color;
mod error;
mod rule;
mod sheet;

pub use attrs::{Attributes, DEFAULT_FAMILY, DEFAULT_SIZE};
pub use color::{rgb_to_ansi256, Color};
pub use error::{ColorParseError, StylesheetError};
pub use rule::StyleRule;
pub use sheet::{StyleKind, Stylesheet, HEADING_SIZE, STRONG_COLOR};
