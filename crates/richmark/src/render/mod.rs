//! The attribute-cascading tree renderer.
//!
//! - [`Renderer`]: walks a document and produces [`StyledText`](crate::StyledText)
//! - [`Render`]: the per-node entry point, implemented by blocks and inlines
//! - [`RenderError`]: why a render was aborted

mod error;
mod renderer;

pub use error::RenderError;
pub use renderer::{Render, Renderer, BLOCK_SEPARATOR};
