//! Attachment point resolution.

use weft_canvas::{Canvas, Capability};
use weft_core::CanvasError;

/// Decides which existing node receives the rendered output.
pub trait AttachmentResolver<C: Canvas> {
    fn resolve(&self, canvas: &C) -> Result<C::Node, CanvasError>;
}

/// The single selected node when it can hold children, else the current
/// page.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionResolver;

impl<C: Canvas> AttachmentResolver<C> for SelectionResolver {
    fn resolve(&self, canvas: &C) -> Result<C::Node, CanvasError> {
        if let [node] = canvas.selection()?.as_slice() {
            if canvas.supports(node, Capability::Children) {
                return Ok(node.clone());
            }
        }
        canvas.current_page()
    }
}

/// Always the same node.
#[derive(Debug, Clone)]
pub struct FixedResolver<N>(pub N);

impl<C, N> AttachmentResolver<C> for FixedResolver<N>
where
    C: Canvas<Node = N>,
    N: Clone + std::fmt::Debug + PartialEq + 'static,
{
    fn resolve(&self, _canvas: &C) -> Result<N, CanvasError> {
        Ok(self.0.clone())
    }
}
