//! The host canvas interface and the values passed across it.

use std::fmt;

use weft_core::{CanvasError, Edges, Rgba};
use weft_layout::{
    CounterAxisAlign, LayoutAlign, LayoutGrow, LayoutMode, PrimaryAxisAlign, SizingMode,
};

/// A font family and style pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl Default for FontName {
    fn default() -> Self {
        Self::new("Inter", "Regular")
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// A solid paint with unit-range channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub opacity: f64,
}

impl Paint {
    /// Format as `#rrggbb`, ignoring opacity.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        let (r, g, b) = color.to_unit_rgb();
        Self {
            r,
            g,
            b,
            opacity: color.opacity(),
        }
    }
}

/// Width and height of a primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Copy with the extent along `axis` replaced.
    pub fn with_along(mut self, axis: LayoutMode, extent: f64) -> Self {
        match axis {
            LayoutMode::Horizontal => self.width = extent,
            LayoutMode::Vertical => self.height = extent,
        }
        self
    }
}

/// Optional abilities a primitive may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Can own child primitives
    Children,
    /// Has a `layoutGrow` property
    Grow,
    /// Has a `layoutAlign` property that accepts `STRETCH`
    Stretch,
}

/// A design canvas the engine renders into.
///
/// Everything is synchronous except font loading. Appending a child that
/// already has a parent moves it, and appending to the same parent again moves
/// it to the end. A failing call returns a [`CanvasError`]; the engine does not
/// retry.
#[allow(async_fn_in_trait)]
pub trait Canvas {
    /// Handle to a primitive owned by the host.
    type Node: Clone + fmt::Debug + PartialEq + 'static;

    /// Create an auto-layout capable container.
    fn create_frame(&mut self) -> Result<Self::Node, CanvasError>;

    /// Create an empty text leaf.
    fn create_text(&mut self) -> Result<Self::Node, CanvasError>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), CanvasError>;

    /// Detach and destroy a primitive and its descendants.
    fn remove(&mut self, node: &Self::Node) -> Result<(), CanvasError>;

    /// Direct children in order.
    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, CanvasError>;

    fn supports(&self, node: &Self::Node, capability: Capability) -> bool;

    fn set_name(&mut self, node: &Self::Node, name: &str) -> Result<(), CanvasError>;

    fn set_layout_mode(&mut self, node: &Self::Node, mode: LayoutMode) -> Result<(), CanvasError>;

    fn set_primary_axis_align(
        &mut self,
        node: &Self::Node,
        align: PrimaryAxisAlign,
    ) -> Result<(), CanvasError>;

    fn set_counter_axis_align(
        &mut self,
        node: &Self::Node,
        align: CounterAxisAlign,
    ) -> Result<(), CanvasError>;

    fn set_item_spacing(&mut self, node: &Self::Node, spacing: f64) -> Result<(), CanvasError>;

    fn set_padding(&mut self, node: &Self::Node, padding: Edges) -> Result<(), CanvasError>;

    fn set_corner_radius(&mut self, node: &Self::Node, radius: f64) -> Result<(), CanvasError>;

    /// Replace the fills; an empty slice clears them.
    fn set_fills(&mut self, node: &Self::Node, fills: &[Paint]) -> Result<(), CanvasError>;

    fn resize(&mut self, node: &Self::Node, size: Size) -> Result<(), CanvasError>;

    fn size(&self, node: &Self::Node) -> Result<Size, CanvasError>;

    fn set_primary_axis_sizing(
        &mut self,
        node: &Self::Node,
        mode: SizingMode,
    ) -> Result<(), CanvasError>;

    fn set_counter_axis_sizing(
        &mut self,
        node: &Self::Node,
        mode: SizingMode,
    ) -> Result<(), CanvasError>;

    fn set_layout_grow(&mut self, node: &Self::Node, grow: LayoutGrow) -> Result<(), CanvasError>;

    fn set_layout_align(&mut self, node: &Self::Node, align: LayoutAlign)
        -> Result<(), CanvasError>;

    /// Requires the font to be loaded.
    fn set_font_name(&mut self, node: &Self::Node, font: &FontName) -> Result<(), CanvasError>;

    fn set_font_size(&mut self, node: &Self::Node, size: f64) -> Result<(), CanvasError>;

    /// Requires the node's font to be loaded.
    fn set_characters(&mut self, node: &Self::Node, characters: &str) -> Result<(), CanvasError>;

    /// Make a font available for text edits.
    async fn load_font(&mut self, font: &FontName) -> Result<(), CanvasError>;

    /// Currently selected primitives.
    fn selection(&self) -> Result<Vec<Self::Node>, CanvasError>;

    /// The document's default top-level surface.
    fn current_page(&self) -> Result<Self::Node, CanvasError>;

    /// Scroll and zoom the viewport to show `nodes`.
    fn focus_viewport(&mut self, nodes: &[Self::Node]) -> Result<(), CanvasError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_from_rgba() {
        let paint = Paint::from(Rgba::rgba(255, 128, 0, 0.5));
        assert_eq!(paint.r, 1.0);
        assert_eq!(paint.b, 0.0);
        assert_eq!(paint.opacity, 0.5);
        assert_eq!(paint.to_hex(), "#ff8000");
    }

    #[test]
    fn test_size_with_along_axis() {
        let size = Size::new(100.0, 40.0);
        assert_eq!(size.with_along(LayoutMode::Horizontal, 375.0), Size::new(375.0, 40.0));

        let grown = size.with_along(LayoutMode::Vertical, 200.0);
        assert_eq!(grown, Size::new(100.0, 200.0));
    }

    #[test]
    fn test_default_font() {
        assert_eq!(FontName::default().to_string(), "Inter Regular");
    }
}
