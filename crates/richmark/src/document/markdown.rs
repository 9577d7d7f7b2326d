//! CommonMark front end built on `pulldown-cmark`.
//!
//! The pull parser yields a flat stream of start/end events. [`TreeBuilder`]
//! keeps one frame per open container and folds each frame into a
//! [`Block`] or [`Inline`] when its end event arrives.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use thiserror::Error;

use super::{Block, Document, Inline};

/// Error returned when markdown source cannot be turned into a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    /// The parser produced a construct the document model has no node for.
    #[error("unsupported markdown construct: {construct}")]
    UnsupportedSyntax { construct: String },
    /// Start and end events did not pair up.
    #[error("unbalanced markdown events: {0}")]
    Unbalanced(&'static str),
    /// A container opened deeper than the configured limit.
    #[error("document nesting exceeds the depth limit of {limit}")]
    TooDeep { limit: usize },
}

/// Parses CommonMark source into a [`Document`].
///
/// Only CommonMark is enabled: tables, footnotes, strikethrough and task
/// lists are read as plain text.
///
/// # Example
///
/// ```rust
/// use richmark::{parse, Block, Inline};
///
/// let doc = parse("# Title\n\nHello **world**").unwrap();
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.blocks()[0], Block::heading(1, vec![Inline::text("Title")]));
/// ```
pub fn parse(source: &str) -> Result<Document, MarkdownError> {
    build(source, None)
}

/// Parses CommonMark source, refusing to nest containers deeper than
/// `limit`.
///
/// Root blocks are at depth 1, so `limit` matches
/// [`Renderer::with_max_depth`](crate::Renderer::with_max_depth). The check
/// runs while the tree is built: a hostile document fails before a deep
/// tree exists.
///
/// ```rust
/// use richmark::{parse_with_max_depth, MarkdownError};
///
/// assert!(parse_with_max_depth("**a**", 3).is_ok());
///
/// let deep = format!("{}a{}", "**".repeat(10), "**".repeat(10));
/// assert_eq!(
///     parse_with_max_depth(&deep, 4),
///     Err(MarkdownError::TooDeep { limit: 4 })
/// );
/// ```
pub fn parse_with_max_depth(source: &str, limit: usize) -> Result<Document, MarkdownError> {
    build(source, Some(limit))
}

fn build(source: &str, max_depth: Option<usize>) -> Result<Document, MarkdownError> {
    let mut builder = TreeBuilder::new(source, max_depth);
    for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
        builder.event(event, range)?;
    }
    let document = builder.finish()?;
    tracing::debug!(blocks = document.len(), "parsed markdown");
    Ok(document)
}

#[derive(Debug)]
enum Frame {
    /// A container of blocks. `loose` collects inline content that arrives
    /// without an enclosing paragraph, as happens in tight list items.
    Blocks {
        container: BlockContainer,
        blocks: Vec<Block>,
        loose: Option<Vec<Inline>>,
    },
    Inlines {
        container: InlineContainer,
        children: Vec<Inline>,
    },
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Code {
        info: String,
        literal: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockContainer {
    Root,
    BlockQuote,
    Item,
}

#[derive(Debug)]
enum InlineContainer {
    Paragraph,
    Heading(u8),
    Strong,
    Emphasis,
    Link { destination: String, title: String },
    Image { destination: String, title: String },
}

impl Frame {
    fn blocks(container: BlockContainer) -> Self {
        Frame::Blocks {
            container,
            blocks: Vec::new(),
            loose: None,
        }
    }

    fn inlines(container: InlineContainer) -> Self {
        Frame::Inlines {
            container,
            children: Vec::new(),
        }
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Frame>,
    max_depth: Option<usize>,
    /// Source offset where the last block-level html line ended.
    html_end: Option<usize>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, max_depth: Option<usize>) -> Self {
        Self {
            source,
            stack: vec![Frame::blocks(BlockContainer::Root)],
            max_depth,
            html_end: None,
        }
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) -> Result<(), MarkdownError> {
        if !matches!(event, Event::Html(_)) {
            self.html_end = None;
        }
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if let Some(Frame::Code { literal, .. }) = self.stack.last_mut() {
                    literal.push_str(&text);
                    Ok(())
                } else {
                    self.push_inline(Inline::text(text.to_string()))
                }
            }
            Event::Code(code) => self.push_inline(Inline::Code {
                literal: code.to_string(),
            }),
            Event::Html(html) => self.html(html.to_string(), range),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => self.push_block(Block::ThematicBreak),
            other => Err(MarkdownError::UnsupportedSyntax {
                construct: format!("{:?}", other),
            }),
        }
    }

    /// Each line of an html block arrives as its own event. A line that
    /// starts on the line after the previous one continues that block; a
    /// blank line in between starts a new block.
    fn html(&mut self, literal: String, range: Range<usize>) -> Result<(), MarkdownError> {
        let continues = self
            .html_end
            .and_then(|end| self.source.get(end..range.start))
            .map_or(false, |gap| !gap.contains('\n'));
        self.html_end = None;

        match self.stack.last_mut() {
            Some(Frame::Blocks { blocks, loose: None, .. }) => {
                match blocks.last_mut() {
                    Some(Block::Html { literal: previous }) if continues => {
                        previous.push_str(&literal)
                    }
                    _ => blocks.push(Block::Html { literal }),
                }
                self.html_end = Some(range.end);
                Ok(())
            }
            _ => self.push_inline(Inline::Html { literal }),
        }
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), MarkdownError> {
        // The root frame is not a node, so the new frame's depth is the
        // current stack length.
        if let Some(limit) = self.max_depth {
            if self.stack.len() > limit {
                tracing::debug!(depth = self.stack.len(), limit, "markdown too deep");
                return Err(MarkdownError::TooDeep { limit });
            }
        }
        let frame = match tag {
            Tag::Paragraph => Frame::inlines(InlineContainer::Paragraph),
            Tag::Heading(level, _, _) => Frame::inlines(InlineContainer::Heading(level as u8)),
            Tag::Strong => Frame::inlines(InlineContainer::Strong),
            Tag::Emphasis => Frame::inlines(InlineContainer::Emphasis),
            Tag::Link(_, destination, title) => Frame::inlines(InlineContainer::Link {
                destination: destination.to_string(),
                title: title.to_string(),
            }),
            Tag::Image(_, destination, title) => Frame::inlines(InlineContainer::Image {
                destination: destination.to_string(),
                title: title.to_string(),
            }),
            Tag::BlockQuote => Frame::blocks(BlockContainer::BlockQuote),
            Tag::Item => Frame::blocks(BlockContainer::Item),
            Tag::List(start) => Frame::List {
                start,
                items: Vec::new(),
            },
            Tag::CodeBlock(kind) => Frame::Code {
                info: match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                },
                literal: String::new(),
            },
            other => {
                return Err(MarkdownError::UnsupportedSyntax {
                    construct: format!("{:?}", other),
                })
            }
        };
        self.stack.push(frame);
        Ok(())
    }

    fn end(&mut self) -> Result<(), MarkdownError> {
        let frame = self
            .stack
            .pop()
            .ok_or(MarkdownError::Unbalanced("end event without a matching start"))?;

        match frame {
            Frame::Inlines {
                container,
                children,
            } => match container {
                InlineContainer::Paragraph => self.push_block(Block::paragraph(children)),
                InlineContainer::Heading(level) => self.push_block(Block::heading(level, children)),
                InlineContainer::Strong => self.push_inline(Inline::strong(children)),
                InlineContainer::Emphasis => self.push_inline(Inline::Emphasis { children }),
                InlineContainer::Link { destination, title } => self.push_inline(Inline::Link {
                    destination,
                    title,
                    children,
                }),
                InlineContainer::Image { destination, title } => {
                    self.push_inline(Inline::Image {
                        destination,
                        title,
                        children,
                    })
                }
            },
            Frame::Blocks {
                container,
                mut blocks,
                loose,
            } => {
                if let Some(children) = loose {
                    blocks.push(Block::paragraph(children));
                }
                match container {
                    BlockContainer::BlockQuote => {
                        self.push_block(Block::BlockQuote { children: blocks })
                    }
                    BlockContainer::Item => match self.stack.last_mut() {
                        Some(Frame::List { items, .. }) => {
                            items.push(blocks);
                            Ok(())
                        }
                        _ => Err(MarkdownError::Unbalanced("list item outside a list")),
                    },
                    BlockContainer::Root => {
                        Err(MarkdownError::Unbalanced("end event without a matching start"))
                    }
                }
            }
            Frame::List { start, items } => self.push_block(Block::List { start, items }),
            Frame::Code { info, literal } => self.push_block(Block::CodeBlock { info, literal }),
        }
    }

    fn push_block(&mut self, block: Block) -> Result<(), MarkdownError> {
        match self.stack.last_mut() {
            Some(Frame::Blocks { blocks, loose, .. }) => {
                if let Some(children) = loose.take() {
                    blocks.push(Block::paragraph(children));
                }
                blocks.push(block);
                Ok(())
            }
            _ => Err(MarkdownError::Unbalanced("block inside inline content")),
        }
    }

    fn push_inline(&mut self, inline: Inline) -> Result<(), MarkdownError> {
        let children = match self.stack.last_mut() {
            Some(Frame::Inlines { children, .. }) => children,
            Some(Frame::Blocks { loose, .. }) => loose.get_or_insert_with(Vec::new),
            _ => return Err(MarkdownError::Unbalanced("inline outside a text container")),
        };

        // The parser splits text at entities and delimiters; keep one node per run.
        if let (Some(Inline::Text { content: previous }), Inline::Text { content }) =
            (children.last_mut(), &inline)
        {
            previous.push_str(content);
            return Ok(());
        }
        children.push(inline);
        Ok(())
    }

    fn finish(mut self) -> Result<Document, MarkdownError> {
        if self.stack.len() != 1 {
            return Err(MarkdownError::Unbalanced("unclosed container at end of input"));
        }
        match self.stack.pop() {
            Some(Frame::Blocks {
                container: BlockContainer::Root,
                mut blocks,
                loose,
            }) => {
                if let Some(children) = loose {
                    blocks.push(Block::paragraph(children));
                }
                Ok(Document::new(blocks))
            }
            _ => Err(MarkdownError::Unbalanced("document root missing")),
        }
    }
}
