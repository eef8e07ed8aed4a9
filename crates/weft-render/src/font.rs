//! Load-once font gate.

use tracing::trace;
use weft_canvas::{Canvas, FontName};
use weft_core::CanvasError;

/// Makes sure the render font is loaded before any text edit.
///
/// The loaded flag only ever goes from unset to set, and only after the host
/// confirmed the load. A failed load leaves it unset so the next text leaf
/// tries again.
#[derive(Debug, Clone)]
pub struct FontGate {
    font: FontName,
    loaded: bool,
}

impl FontGate {
    pub fn new(font: FontName) -> Self {
        Self { font, loaded: false }
    }

    /// The gated font.
    pub fn font(&self) -> &FontName {
        &self.font
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load the font through `canvas` unless that already succeeded.
    pub async fn ensure_loaded<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), CanvasError> {
        if self.loaded {
            return Ok(());
        }

        trace!(font = %self.font, "loading font");
        canvas.load_font(&self.font).await?;
        self.loaded = true;
        Ok(())
    }
}
