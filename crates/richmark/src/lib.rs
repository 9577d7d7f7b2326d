//! # richmark - cascading styles from markdown trees to rich text
//!
//! `richmark` walks a parsed markdown document and produces
//! [`StyledText`]: text where every run carries the font family, size,
//! weight and color in effect at that point of the tree.
//!
//! ## The cascade
//!
//! Each node inherits its parent's [`Attributes`]. Node kinds with a rule
//! in the [`Stylesheet`] derive a modified copy for their own subtree;
//! everything else passes the inherited set through unchanged. A sibling
//! never sees what another sibling derived.
//!
//! | Node | Attributes for its children |
//! |------|-----------------------------|
//! | paragraph | inherited |
//! | heading (any level) | inherited, size 48 |
//! | strong | inherited, bold, red |
//! | text | rendered with inherited |
//!
//! Other node kinds (emphasis, code, links, lists, quotes...) are not
//! rendered: a document containing one fails with
//! [`RenderError::UnsupportedNodeKind`].
//!
//! ## Quick start
//!
//! ```rust
//! use richmark::{parse, Attributes, Color, Renderer, Stylesheet};
//!
//! let doc = parse("# Heading **strong**\nHello **Markdown**!").unwrap();
//!
//! let sheet = Stylesheet::standard();
//! let base = Attributes::new("Helvetica", 24.0);
//! let text = Renderer::new(&sheet).render_document(&doc, &base).unwrap();
//!
//! assert_eq!(text.to_string(), "Heading strong\nHello Markdown!");
//! assert_eq!(text.attributes_at(0).unwrap().size, 48.0);
//! assert_eq!(text.attributes_at(21).unwrap().color, Color::Red);
//! ```
//!
//! ## Output
//!
//! [`OutputMode`] turns the result into a string for a terminal (ANSI),
//! plain text, a tagged debug form or JSON. [`RenderConfig`] loads the base
//! attributes and rule overrides from YAML.

pub mod config;
pub mod document;
pub mod output;
pub mod render;
pub mod style;
pub mod styled;

pub use config::{ConfigError, RenderConfig};
pub use document::{parse, parse_with_max_depth, Block, Document, Inline, MarkdownError, NodeKind};
pub use output::{terminal_style, OutputMode};
pub use render::{Render, RenderError, Renderer, BLOCK_SEPARATOR};
pub use style::{
    rgb_to_ansi256, Attributes, Color, ColorParseError, StyleKind, StyleRule, Stylesheet,
    StylesheetError, DEFAULT_FAMILY, DEFAULT_SIZE, HEADING_SIZE, STRONG_COLOR,
};
pub use styled::{Run, StyledText};

/// Parses markdown and renders it in one step.
///
/// Parse failures and render failures are both reported as [`Error`].
///
/// ```rust
/// use richmark::{render_markdown, RenderConfig};
///
/// let text = render_markdown("Hello **world**", &RenderConfig::default()).unwrap();
/// assert_eq!(text.to_string(), "Hello world");
///
/// assert!(render_markdown("> quoted", &RenderConfig::default()).is_err());
/// ```
pub fn render_markdown(source: &str, config: &RenderConfig) -> Result<StyledText, Error> {
    let document = parse(source)?;
    let text = Renderer::new(&config.stylesheet).render_document(&document, &config.base)?;
    Ok(text)
}

/// Any failure of [`render_markdown`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Markdown(#[from] MarkdownError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
