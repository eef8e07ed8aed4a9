//! Rendering options.

use weft_canvas::FontName;

/// Tunables for a render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Font every text leaf uses
    pub font: FontName,
    /// Font size when a node has none
    pub default_font_size: f64,
    /// Width used when only a height is given
    pub default_width: f64,
    /// Height used when only a width is given
    pub default_height: f64,
    /// Primary extent of a horizontal container with a growing child
    pub grow_width: f64,
    /// Primary extent of a vertical container with a growing child
    pub grow_height: f64,
    /// Focus the viewport on the rendered primitives
    pub focus_viewport: bool,
    /// Remove everything created by a request that faults
    pub rollback_on_fault: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font: FontName::default(),
            default_font_size: 14.0,
            default_width: 1.0,
            default_height: 100.0,
            grow_width: 375.0,
            grow_height: 200.0,
            focus_viewport: true,
            rollback_on_fault: false,
        }
    }
}

impl RenderOptions {
    /// Use a different font.
    pub fn with_font(mut self, font: FontName) -> Self {
        self.font = font;
        self
    }

    /// Remove partial output when a request faults.
    pub fn with_rollback(mut self, rollback: bool) -> Self {
        self.rollback_on_fault = rollback;
        self
    }
}
