//! The document tree consumed by the renderer.
//!
//! A [`Document`] is an ordered list of [`Block`]s; text-bearing blocks hold
//! [`Inline`] nodes. The tree is built once (usually by [`parse`]) and only
//! read afterwards.
//!
//! The model covers more of CommonMark than the renderer styles. Kinds the
//! renderer has no rule for still get a variant so that a document using
//! them can be represented and then rejected by name.

mod markdown;

use std::fmt;

use serde::Serialize;

pub use markdown::{parse, parse_with_max_depth, MarkdownError};

/// A parsed document: the ordered root blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

/// A structural node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        children: Vec<Inline>,
    },
    /// `level` is 1 through 6.
    Heading {
        level: u8,
        children: Vec<Inline>,
    },
    BlockQuote {
        children: Vec<Block>,
    },
    /// Each item is its own list of blocks. `start` is set for ordered lists.
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock {
        info: String,
        literal: String,
    },
    Html {
        literal: String,
    },
    ThematicBreak,
}

impl Block {
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<Inline>) -> Self {
        Block::Heading { level, children }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Block::Paragraph { .. } => NodeKind::Paragraph,
            Block::Heading { .. } => NodeKind::Heading,
            Block::BlockQuote { .. } => NodeKind::BlockQuote,
            Block::List { .. } => NodeKind::List,
            Block::CodeBlock { .. } => NodeKind::CodeBlock,
            Block::Html { .. } => NodeKind::HtmlBlock,
            Block::ThematicBreak => NodeKind::ThematicBreak,
        }
    }
}

/// A text-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text {
        content: String,
    },
    Strong {
        children: Vec<Inline>,
    },
    Emphasis {
        children: Vec<Inline>,
    },
    Code {
        literal: String,
    },
    Link {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
    Image {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
    Html {
        literal: String,
    },
    SoftBreak,
    HardBreak,
}

impl Inline {
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text {
            content: content.into(),
        }
    }

    pub fn strong(children: Vec<Inline>) -> Self {
        Inline::Strong { children }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Inline::Text { .. } => NodeKind::Text,
            Inline::Strong { .. } => NodeKind::Strong,
            Inline::Emphasis { .. } => NodeKind::Emphasis,
            Inline::Code { .. } => NodeKind::Code,
            Inline::Link { .. } => NodeKind::Link,
            Inline::Image { .. } => NodeKind::Image,
            Inline::Html { .. } => NodeKind::InlineHtml,
            Inline::SoftBreak => NodeKind::SoftBreak,
            Inline::HardBreak => NodeKind::HardBreak,
        }
    }
}

/// Names every block and inline variant, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Paragraph,
    Heading,
    BlockQuote,
    List,
    CodeBlock,
    HtmlBlock,
    ThematicBreak,
    Text,
    Strong,
    Emphasis,
    Code,
    Link,
    Image,
    InlineHtml,
    SoftBreak,
    HardBreak,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BlockQuote => "block quote",
            NodeKind::List => "list",
            NodeKind::CodeBlock => "code block",
            NodeKind::HtmlBlock => "html block",
            NodeKind::ThematicBreak => "thematic break",
            NodeKind::Text => "text",
            NodeKind::Strong => "strong",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Code => "code span",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::InlineHtml => "inline html",
            NodeKind::SoftBreak => "soft break",
            NodeKind::HardBreak => "hard break",
        }
    }

    /// Returns true for block-level kinds.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::BlockQuote
                | NodeKind::List
                | NodeKind::CodeBlock
                | NodeKind::HtmlBlock
                | NodeKind::ThematicBreak
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
