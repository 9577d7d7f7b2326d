//! Render errors.

use thiserror::Error;

use crate::document::NodeKind;

/// Error that aborts a render.
///
/// A render either yields the whole [`StyledText`](crate::StyledText) or
/// one of these; there is no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The document holds a node kind the renderer has no case for.
    ///
    /// Only paragraphs, headings, text and strong emphasis are rendered.
    /// Supporting another kind means extending the renderer, not handling
    /// this error.
    #[error("cannot render {kind} nodes")]
    UnsupportedNodeKind { kind: NodeKind },
    /// The document nests deeper than the renderer's configured limit.
    #[error("document nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

impl RenderError {
    /// Returns the rejected node kind, if that is what stopped the render.
    pub fn unsupported_kind(&self) -> Option<NodeKind> {
        match self {
            RenderError::UnsupportedNodeKind { kind } => Some(*kind),
            RenderError::DepthLimitExceeded { .. } => None,
        }
    }
}
