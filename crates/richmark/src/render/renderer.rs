//! Depth-first rendering of document trees.

use crate::document::{Block, Document, Inline, NodeKind};
use crate::style::{Attributes, StyleKind, Stylesheet};
use crate::styled::StyledText;

use super::error::RenderError;

/// Inserted between consecutive root blocks.
pub const BLOCK_SEPARATOR: &str = "\n";

/// Renders document nodes with a [`Stylesheet`].
///
/// Each node is rendered with the attributes it inherits from its parent.
/// Strong emphasis and headings derive a new set from the stylesheet for
/// their own subtree; paragraphs and text pass the inherited set through.
/// Children are rendered in order and concatenated.
///
/// Only paragraphs, headings, text and strong emphasis are rendered. Any
/// other node kind aborts the whole render with
/// [`RenderError::UnsupportedNodeKind`].
///
/// # Example
///
/// ```rust
/// use richmark::{Attributes, Block, Color, Inline, Renderer, Stylesheet};
///
/// let sheet = Stylesheet::standard();
/// let renderer = Renderer::new(&sheet);
///
/// let blocks = vec![
///     Block::heading(1, vec![Inline::text("Title")]),
///     Block::paragraph(vec![Inline::strong(vec![Inline::text("Body")])]),
/// ];
/// let text = renderer.render_blocks(&blocks, &Attributes::default()).unwrap();
///
/// assert_eq!(text.to_string(), "Title\nBody");
/// assert_eq!(text.attributes_at(0).unwrap().size, 48.0);
/// assert_eq!(text.attributes_at(6).unwrap().color, Color::Red);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'s> {
    stylesheet: &'s Stylesheet,
    max_depth: Option<usize>,
}

impl<'s> Renderer<'s> {
    /// Creates a renderer with no depth limit.
    pub fn new(stylesheet: &'s Stylesheet) -> Self {
        Self {
            stylesheet,
            max_depth: None,
        }
    }

    /// Limits how deeply nested a rendered document may be.
    ///
    /// Root blocks are at depth 1. A node deeper than `limit` aborts the
    /// render with [`RenderError::DepthLimitExceeded`].
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn stylesheet(&self) -> &'s Stylesheet {
        self.stylesheet
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Renders a whole document.
    ///
    /// See [`render_blocks`](Self::render_blocks).
    pub fn render_document(
        &self,
        document: &Document,
        base: &Attributes,
    ) -> Result<StyledText, RenderError> {
        self.render_blocks(document.blocks(), base)
    }

    /// Renders root blocks and joins them with [`BLOCK_SEPARATOR`].
    ///
    /// Every root block starts from `base`; nothing one block derives is
    /// seen by the next.
    pub fn render_blocks(
        &self,
        blocks: &[Block],
        base: &Attributes,
    ) -> Result<StyledText, RenderError> {
        tracing::debug!(blocks = blocks.len(), "rendering document");
        let rendered = blocks
            .iter()
            .map(|block| self.block(block, base, 1))
            .collect::<Result<Vec<_>, _>>()?;
        let text = StyledText::join(rendered, BLOCK_SEPARATOR);
        tracing::debug!(runs = text.runs().len(), bytes = text.len(), "rendered document");
        Ok(text)
    }

    /// Renders a single node with the given inherited attributes.
    pub fn render<N: Render + ?Sized>(
        &self,
        node: &N,
        attrs: &Attributes,
    ) -> Result<StyledText, RenderError> {
        node.render(self, attrs)
    }

    fn block(
        &self,
        block: &Block,
        attrs: &Attributes,
        depth: usize,
    ) -> Result<StyledText, RenderError> {
        self.check_depth(depth)?;
        match block {
            Block::Paragraph { children } => self.inlines(children, attrs, depth),
            Block::Heading { children, .. } => {
                let attrs = self.stylesheet.apply(StyleKind::Heading, attrs);
                self.inlines(children, &attrs, depth)
            }
            Block::BlockQuote { .. }
            | Block::List { .. }
            | Block::CodeBlock { .. }
            | Block::Html { .. }
            | Block::ThematicBreak => Err(unsupported(block.kind())),
        }
    }

    fn inline(
        &self,
        inline: &Inline,
        attrs: &Attributes,
        depth: usize,
    ) -> Result<StyledText, RenderError> {
        self.check_depth(depth)?;
        match inline {
            Inline::Text { content } => Ok(StyledText::new(content.as_str(), attrs.clone())),
            Inline::Strong { children } => {
                let attrs = self.stylesheet.apply(StyleKind::Strong, attrs);
                self.inlines(children, &attrs, depth)
            }
            Inline::Emphasis { .. }
            | Inline::Code { .. }
            | Inline::Link { .. }
            | Inline::Image { .. }
            | Inline::Html { .. }
            | Inline::SoftBreak
            | Inline::HardBreak => Err(unsupported(inline.kind())),
        }
    }

    fn inlines(
        &self,
        children: &[Inline],
        attrs: &Attributes,
        depth: usize,
    ) -> Result<StyledText, RenderError> {
        let rendered = children
            .iter()
            .map(|child| self.inline(child, attrs, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StyledText::concat(rendered))
    }

    fn check_depth(&self, depth: usize) -> Result<(), RenderError> {
        match self.max_depth {
            Some(limit) if depth > limit => {
                tracing::debug!(depth, limit, "document too deep");
                Err(RenderError::DepthLimitExceeded { limit })
            }
            _ => Ok(()),
        }
    }
}

fn unsupported(kind: NodeKind) -> RenderError {
    tracing::debug!(%kind, "rejecting unsupported node");
    RenderError::UnsupportedNodeKind { kind }
}

/// A node that can be rendered on its own.
///
/// Implemented by [`Block`] and [`Inline`], so [`Renderer::render`] accepts
/// either family.
pub trait Render {
    /// Renders this node and its subtree with inherited `attrs`.
    fn render(&self, renderer: &Renderer<'_>, attrs: &Attributes)
        -> Result<StyledText, RenderError>;
}

impl Render for Block {
    fn render(
        &self,
        renderer: &Renderer<'_>,
        attrs: &Attributes,
    ) -> Result<StyledText, RenderError> {
        renderer.block(self, attrs, 1)
    }
}

impl Render for Inline {
    fn render(
        &self,
        renderer: &Renderer<'_>,
        attrs: &Attributes,
    ) -> Result<StyledText, RenderError> {
        renderer.inline(self, attrs, 1)
    }
}

impl Render for Document {
    fn render(
        &self,
        renderer: &Renderer<'_>,
        attrs: &Attributes,
    ) -> Result<StyledText, RenderError> {
        renderer.render_document(self, attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, StyleRule};

    fn base() -> Attributes {
        Attributes::new("F", 24.0)
    }

    #[test]
    fn test_text_carries_inherited_attributes() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let attrs = base().with_color(Color::Blue);

        let text = renderer.render(&Inline::text("plain"), &attrs).unwrap();
        assert_eq!(text, StyledText::new("plain", attrs));
    }

    #[test]
    fn test_paragraph_passes_attributes_through() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let para = Block::paragraph(vec![Inline::text("a"), Inline::text("b")]);

        let text = renderer.render(&para, &base()).unwrap();
        assert_eq!(text, StyledText::new("ab", base()));
    }

    #[test]
    fn test_strong_overrides_bold_and_color() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let strong = Inline::strong(vec![Inline::text("x")]);

        let text = renderer.render(&strong, &base()).unwrap();
        let attrs = text.attributes_at(0).unwrap();
        assert!(attrs.bold);
        assert_eq!(attrs.color, Color::Red);
        assert_eq!(attrs.family, "F");
        assert_eq!(attrs.size, 24.0);
    }

    #[test]
    fn test_heading_ignores_level() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);

        for level in 1..=6 {
            let heading = Block::heading(level, vec![Inline::text("h")]);
            let text = renderer.render(&heading, &base()).unwrap();
            let attrs = text.attributes_at(0).unwrap();
            assert_eq!(attrs.size, 48.0, "level {}", level);
            assert!(!attrs.bold);
            assert_eq!(attrs.color, Color::Black);
        }
    }

    #[test]
    fn test_strong_inside_heading_keeps_heading_size() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let heading = Block::heading(
            2,
            vec![
                Inline::text("Heading "),
                Inline::strong(vec![Inline::text("strong")]),
            ],
        );

        let text = renderer.render(&heading, &base()).unwrap();
        let plain = text.attributes_at(0).unwrap();
        let strong = text.attributes_at(8).unwrap();
        assert_eq!(plain.size, 48.0);
        assert!(!plain.bold);
        assert_eq!(strong.size, 48.0);
        assert!(strong.bold);
        assert_eq!(strong.color, Color::Red);
    }

    #[test]
    fn test_custom_stylesheet_is_used() {
        let sheet = Stylesheet::new().add(StyleKind::Strong, StyleRule::new().family("Mono"));
        let renderer = Renderer::new(&sheet);
        let strong = Inline::strong(vec![Inline::text("x")]);

        let text = renderer.render(&strong, &base()).unwrap();
        let attrs = text.attributes_at(0).unwrap();
        assert_eq!(attrs.family, "Mono");
        assert!(!attrs.bold);
    }

    #[test]
    fn test_empty_paragraph_renders_empty() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let text = renderer.render(&Block::paragraph(vec![]), &base()).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_unsupported_inline_aborts() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let para = Block::paragraph(vec![
            Inline::text("ok "),
            Inline::Emphasis {
                children: vec![Inline::text("no")],
            },
        ]);

        let err = renderer.render(&para, &base()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedNodeKind {
                kind: NodeKind::Emphasis
            }
        );
    }

    #[test]
    fn test_unsupported_nested_in_strong_aborts() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let strong = Inline::strong(vec![Inline::HardBreak]);

        let err = renderer.render(&strong, &base()).unwrap_err();
        assert_eq!(err.unsupported_kind(), Some(NodeKind::HardBreak));
    }

    #[test]
    fn test_unsupported_block_aborts_document() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let blocks = vec![
            Block::paragraph(vec![Inline::text("fine")]),
            Block::ThematicBreak,
        ];

        let err = renderer.render_blocks(&blocks, &base()).unwrap_err();
        assert_eq!(err.unsupported_kind(), Some(NodeKind::ThematicBreak));
    }

    #[test]
    fn test_depth_limit() {
        let sheet = Stylesheet::standard();
        let nested = Block::paragraph(vec![Inline::strong(vec![Inline::strong(vec![
            Inline::text("deep"),
        ])])]);

        let ok = Renderer::new(&sheet).with_max_depth(4);
        assert!(ok.render(&nested, &base()).is_ok());

        let tight = Renderer::new(&sheet).with_max_depth(3);
        assert_eq!(
            tight.render(&nested, &base()).unwrap_err(),
            RenderError::DepthLimitExceeded { limit: 3 }
        );
    }

    #[test]
    fn test_document_render_trait() {
        let sheet = Stylesheet::standard();
        let renderer = Renderer::new(&sheet);
        let doc = Document::new(vec![
            Block::paragraph(vec![Inline::text("a")]),
            Block::paragraph(vec![Inline::text("b")]),
        ]);

        let text = renderer.render(&doc, &base()).unwrap();
        assert_eq!(text.to_string(), "a\nb");
    }
}
