//! Depth-first translation of a serialized tree into canvas primitives.
//!
//! Every primitive is appended to its parent before its own children are
//! rendered, and children are rendered strictly in source order. A canvas
//! fault aborts the whole request; whatever was attached before the fault
//! stays on the canvas unless rollback is enabled.

use futures::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, trace, warn};
use weft_canvas::{Canvas, Capability, Paint, Size};
use weft_core::{ElementNode, RenderError, SerializedNode, Styles};
use weft_layout::{
    classify, AutoLayout, LayoutAlign, LayoutGrow, LayoutMode, RenderStrategy, SizingMode,
};

use crate::context::RenderContext;

/// Name given to synthetic margin frames.
const MARGIN_WRAPPER_NAME: &str = "margin-wrapper";

/// Outcome of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport<N> {
    /// Primitives produced for the top-level nodes, in order
    pub top_level: Vec<N>,
    /// Number of primitives created
    pub created: usize,
}

/// Which axes of a container had an explicit size in the styles.
#[derive(Debug, Clone, Copy, Default)]
struct ExplicitSize {
    width: bool,
    height: bool,
}

impl ExplicitSize {
    fn along(self, axis: LayoutMode) -> bool {
        match axis {
            LayoutMode::Horizontal => self.width,
            LayoutMode::Vertical => self.height,
        }
    }
}

/// Renders one request into a canvas.
pub struct Renderer<'a, C: Canvas> {
    canvas: &'a mut C,
    context: &'a mut RenderContext,
    /// Every primitive created so far, in creation order
    created: Vec<C::Node>,
}

impl<'a, C: Canvas> Renderer<'a, C> {
    pub fn new(canvas: &'a mut C, context: &'a mut RenderContext) -> Self {
        Self {
            canvas,
            context,
            created: Vec::new(),
        }
    }

    /// Render a payload under `parent`.
    ///
    /// A root payload renders each child as a top-level node; any other node
    /// is rendered on its own. On a fault the error is returned as is, after
    /// removing the partial output when rollback is enabled.
    pub async fn render_payload(
        mut self,
        payload: &SerializedNode,
        parent: &C::Node,
    ) -> Result<RenderReport<C::Node>, RenderError> {
        match self.render_top_level(payload, parent).await {
            Ok(top_level) => Ok(RenderReport {
                top_level,
                created: self.created.len(),
            }),
            Err(err) => {
                warn!(error = %err, created = self.created.len(), "render aborted");
                if self.context.options.rollback_on_fault {
                    self.rollback();
                }
                Err(err)
            }
        }
    }

    async fn render_top_level(
        &mut self,
        payload: &SerializedNode,
        parent: &C::Node,
    ) -> Result<Vec<C::Node>, RenderError> {
        let mut top_level = Vec::new();
        match payload {
            SerializedNode::Root(root) => {
                for child in &root.children {
                    if let Some(node) = self.render_node(child, parent).await? {
                        top_level.push(node);
                    }
                }
            }
            node => {
                if let Some(node) = self.render_node(node, parent).await? {
                    top_level.push(node);
                }
            }
        }
        Ok(top_level)
    }

    /// Render `node` under `parent` and return the primitive that now sits
    /// directly in `parent` for it, if any.
    ///
    /// A root nested inside the tree yields its first rendered child.
    pub fn render_node<'b>(
        &'b mut self,
        node: &'b SerializedNode,
        parent: &'b C::Node,
    ) -> LocalBoxFuture<'b, Result<Option<C::Node>, RenderError>> {
        async move {
            let strategy = classify(node);
            debug!(
                kind = node.kind_name(),
                tag = node.tag_name().unwrap_or_default(),
                ?strategy,
                "render node"
            );

            match (strategy, node) {
                (RenderStrategy::Flatten, _) => self.render_flattened(node.children(), parent).await,
                (RenderStrategy::TextLeaf, _) => {
                    let content = node.text_content().unwrap_or_default();
                    let leaf = self.create_text_leaf(content, node.styles()).await?;
                    self.canvas.append_child(parent, &leaf)?;
                    Ok(Some(leaf))
                }
                (RenderStrategy::WrappedText, SerializedNode::Element(el)) => {
                    self.render_wrapped_text(el, parent).await.map(Some)
                }
                (strategy, SerializedNode::Element(el)) if strategy.is_container() => {
                    self.render_container(el, parent).await.map(Some)
                }
                // Only elements are classified as frames.
                (_, _) => Ok(None),
            }
        }
        .boxed_local()
    }

    async fn render_flattened(
        &mut self,
        children: &[SerializedNode],
        parent: &C::Node,
    ) -> Result<Option<C::Node>, RenderError> {
        let mut first = None;
        for child in children {
            let produced = self.render_node(child, parent).await?;
            if first.is_none() {
                first = produced;
            }
        }
        Ok(first)
    }

    async fn render_container(
        &mut self,
        el: &ElementNode,
        parent: &C::Node,
    ) -> Result<C::Node, RenderError> {
        let frame = self.create_frame(&el.tag_name)?;
        let layout = AutoLayout::for_element(&el.tag_name, &el.styles);
        self.apply_auto_layout(&frame, &layout)?;
        let explicit = self.apply_geometry(&frame, layout.mode, &el.styles)?;
        self.apply_box_style(&frame, &el.styles)?;
        self.canvas.append_child(parent, &frame)?;

        if let Some(text) = inline_text(el) {
            let leaf = self.create_text_leaf(text, Some(&el.styles)).await?;
            self.canvas.append_child(&frame, &leaf)?;
        }

        let mut grew = false;
        for child in &el.children {
            let direct = match self.margin_wrapper(child, &frame, layout.mode)? {
                Some(wrapper) => {
                    self.render_node(child, &wrapper).await?;
                    Some(wrapper)
                }
                None => self.render_node(child, &frame).await?,
            };
            grew |= self.apply_grow(child, direct.as_ref())?;
        }

        self.finish_children(&frame, layout.mode, grew, explicit)?;
        Ok(frame)
    }

    /// Inline elements with children: their own text first, then the
    /// children directly inside, without margin wrappers.
    async fn render_wrapped_text(
        &mut self,
        el: &ElementNode,
        parent: &C::Node,
    ) -> Result<C::Node, RenderError> {
        let frame = self.create_frame(&el.tag_name)?;
        let layout = AutoLayout::for_element(&el.tag_name, &el.styles);
        self.apply_auto_layout(&frame, &layout)?;
        self.set_axis_sizing(&frame, layout.mode, SizingMode::Auto, SizingMode::Auto)?;
        self.apply_box_style(&frame, &el.styles)?;
        self.canvas.append_child(parent, &frame)?;

        if let Some(text) = inline_text(el) {
            let leaf = self.create_text_leaf(text, Some(&el.styles)).await?;
            self.canvas.append_child(&frame, &leaf)?;
        }

        let mut grew = false;
        for child in &el.children {
            let direct = self.render_node(child, &frame).await?;
            grew |= self.apply_grow(child, direct.as_ref())?;
        }

        self.finish_children(&frame, layout.mode, grew, ExplicitSize::default())?;
        Ok(frame)
    }

    fn create_frame(&mut self, name: &str) -> Result<C::Node, RenderError> {
        let frame = self.canvas.create_frame()?;
        self.created.push(frame.clone());
        self.canvas.set_name(&frame, name)?;
        Ok(frame)
    }

    /// Create a text leaf with the session font. The leaf is not attached.
    async fn create_text_leaf(
        &mut self,
        content: &str,
        styles: Option<&Styles>,
    ) -> Result<C::Node, RenderError> {
        self.context.font.ensure_loaded(&mut *self.canvas).await?;

        let leaf = self.canvas.create_text()?;
        self.created.push(leaf.clone());
        trace!(?leaf, chars = content.len(), "text leaf");

        let font_size = styles
            .and_then(|s| s.font_size)
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(self.context.options.default_font_size);

        self.canvas.set_font_name(&leaf, self.context.font.font())?;
        self.canvas.set_font_size(&leaf, font_size)?;
        self.canvas.set_characters(&leaf, content)?;
        if let Some(color) = styles.and_then(|s| s.color) {
            self.canvas.set_fills(&leaf, &[Paint::from(color)])?;
        }
        Ok(leaf)
    }

    /// Layout mode goes first; the host rejects alignment on a frame
    /// without one.
    fn apply_auto_layout(&mut self, frame: &C::Node, layout: &AutoLayout) -> Result<(), RenderError> {
        self.canvas.set_layout_mode(frame, layout.mode)?;
        self.canvas.set_primary_axis_align(frame, layout.primary_align)?;
        self.canvas.set_counter_axis_align(frame, layout.counter_align)?;
        if let Some(spacing) = layout.item_spacing {
            self.canvas.set_item_spacing(frame, spacing)?;
        }
        Ok(())
    }

    fn apply_geometry(
        &mut self,
        frame: &C::Node,
        mode: LayoutMode,
        styles: &Styles,
    ) -> Result<ExplicitSize, RenderError> {
        let options = &self.context.options;
        let (width, height) = (styles.explicit_width(), styles.explicit_height());
        let (size, horizontal, vertical) = match (width, height) {
            (Some(w), Some(h)) => (Some(Size::new(w, h)), SizingMode::Fixed, SizingMode::Fixed),
            (Some(w), None) => (
                Some(Size::new(w, options.default_height)),
                SizingMode::Fixed,
                SizingMode::Auto,
            ),
            (None, Some(h)) => (
                Some(Size::new(options.default_width, h)),
                SizingMode::Auto,
                SizingMode::Fixed,
            ),
            (None, None) => (None, SizingMode::Auto, SizingMode::Auto),
        };

        if let Some(size) = size {
            self.canvas.resize(frame, size)?;
        }
        self.set_axis_sizing(frame, mode, horizontal, vertical)?;

        Ok(ExplicitSize {
            width: width.is_some(),
            height: height.is_some(),
        })
    }

    fn set_axis_sizing(
        &mut self,
        frame: &C::Node,
        mode: LayoutMode,
        horizontal: SizingMode,
        vertical: SizingMode,
    ) -> Result<(), RenderError> {
        let (primary, counter) = match mode {
            LayoutMode::Horizontal => (horizontal, vertical),
            LayoutMode::Vertical => (vertical, horizontal),
        };
        self.canvas.set_primary_axis_sizing(frame, primary)?;
        self.canvas.set_counter_axis_sizing(frame, counter)?;
        Ok(())
    }

    /// Padding, corner radius and background.
    fn apply_box_style(&mut self, frame: &C::Node, styles: &Styles) -> Result<(), RenderError> {
        self.canvas.set_padding(frame, styles.padding())?;
        if let Some(radius) = styles.border_radius.filter(|r| r.is_finite() && *r >= 0.0) {
            self.canvas.set_corner_radius(frame, radius)?;
        }
        match styles.background_color {
            Some(background) => self.canvas.set_fills(frame, &[Paint::from(background)])?,
            None => self.canvas.set_fills(frame, &[])?,
        }
        Ok(())
    }

    /// Create and attach the frame that carries `child`'s margins, if it has
    /// any.
    fn margin_wrapper(
        &mut self,
        child: &SerializedNode,
        parent: &C::Node,
        mode: LayoutMode,
    ) -> Result<Option<C::Node>, RenderError> {
        let margin = child.styles().map(Styles::margin).unwrap_or_default();
        if !margin.any_positive() {
            return Ok(None);
        }

        trace!(?margin, "margin wrapper");
        let wrapper = self.create_frame(MARGIN_WRAPPER_NAME)?;
        self.canvas.set_layout_mode(&wrapper, mode)?;
        self.canvas.set_fills(&wrapper, &[])?;
        self.canvas.set_padding(&wrapper, margin.positive_only())?;
        self.set_axis_sizing(&wrapper, mode, SizingMode::Auto, SizingMode::Auto)?;
        self.canvas.append_child(parent, &wrapper)?;
        Ok(Some(wrapper))
    }

    /// Mark the primitive standing for `child` as growing when asked to.
    /// Returns whether it was marked.
    fn apply_grow(
        &mut self,
        child: &SerializedNode,
        direct: Option<&C::Node>,
    ) -> Result<bool, RenderError> {
        let wants_grow = child.styles().is_some_and(Styles::grows);
        match direct {
            Some(node) if wants_grow && self.canvas.supports(node, Capability::Grow) => {
                self.canvas.set_layout_grow(node, LayoutGrow::Grow)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Post-passes once every child of `frame` is attached: stretch the
    /// children of a vertical stack, then fix the primary axis of a frame
    /// holding a growing child.
    fn finish_children(
        &mut self,
        frame: &C::Node,
        mode: LayoutMode,
        grew: bool,
        explicit: ExplicitSize,
    ) -> Result<(), RenderError> {
        if mode == LayoutMode::Vertical {
            for child in self.canvas.children(frame)? {
                if self.canvas.supports(&child, Capability::Stretch) {
                    self.canvas.set_layout_align(&child, LayoutAlign::Stretch)?;
                }
            }
        }

        if grew {
            self.canvas.set_primary_axis_sizing(frame, SizingMode::Fixed)?;
            if !explicit.along(mode) {
                let extent = match mode {
                    LayoutMode::Horizontal => self.context.options.grow_width,
                    LayoutMode::Vertical => self.context.options.grow_height,
                };
                trace!(?frame, extent, "growing child fixes primary axis");
                let size = self.canvas.size(frame)?.with_along(mode, extent);
                self.canvas.resize(frame, size)?;
            }
        }
        Ok(())
    }

    /// Remove everything this render created, newest first.
    fn rollback(&mut self) {
        for node in self.created.drain(..).rev() {
            // Descendants of an already removed frame are gone with it.
            if let Err(err) = self.canvas.remove(&node) {
                trace!(?node, error = %err, "rollback skip");
            }
        }
    }
}

/// An element's own text, when it is not blank.
fn inline_text(el: &ElementNode) -> Option<&str> {
    el.text_content.as_deref().filter(|text| !text.trim().is_empty())
}
