//! State that outlives a single render.

use crate::font::FontGate;
use crate::options::RenderOptions;

/// Options plus the font gate, shared by every request of a session.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub(crate) options: RenderOptions,
    pub(crate) font: FontGate,
}

impl RenderContext {
    pub fn new(options: RenderOptions) -> Self {
        let font = FontGate::new(options.font.clone());
        Self { options, font }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether the render font has been loaded in this session.
    pub fn font_loaded(&self) -> bool {
        self.font.is_loaded()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
