//! In-memory scene graph implementing [`Canvas`].
//!
//! The scene mirrors what a design host keeps for a page: frames and text
//! leaves with their auto-layout and text properties. It does not compute
//! geometry; it records the properties set on each node and enforces the
//! same value and ownership rules a host would.

use std::fmt::{self, Write};

use indexmap::IndexMap;
use smallvec::SmallVec;
use weft_core::{CanvasError, Edges};
use weft_layout::{
    CounterAxisAlign, LayoutAlign, LayoutGrow, LayoutMode, PrimaryAxisAlign, SizingMode,
};

use crate::host::{Canvas, Capability, FontName, Paint, Size};

/// Unique identifier for a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneNodeId(pub u64);

impl fmt::Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0:{}", self.0)
    }
}

/// What a scene node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneNodeKind {
    Page,
    Frame,
    Text,
}

impl SceneNodeKind {
    fn supports(self, capability: Capability) -> bool {
        match (self, capability) {
            (SceneNodeKind::Page, Capability::Children) => true,
            (SceneNodeKind::Page, _) => false,
            (SceneNodeKind::Frame, _) => true,
            (SceneNodeKind::Text, Capability::Children) => false,
            (SceneNodeKind::Text, _) => true,
        }
    }
}

/// A node in the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub kind: SceneNodeKind,
    pub name: String,
    pub parent: Option<SceneNodeId>,
    pub children: Vec<SceneNodeId>,

    /// `None` until auto-layout is turned on
    pub layout_mode: Option<LayoutMode>,
    pub primary_align: PrimaryAxisAlign,
    pub counter_align: CounterAxisAlign,
    pub item_spacing: f64,
    pub padding: Edges,
    pub corner_radius: f64,
    pub fills: SmallVec<[Paint; 1]>,
    pub size: Size,
    pub primary_sizing: SizingMode,
    pub counter_sizing: SizingMode,

    pub layout_grow: LayoutGrow,
    pub layout_align: LayoutAlign,

    pub font: FontName,
    pub font_size: f64,
    pub characters: String,
}

impl SceneNode {
    /// Create a node with host defaults for its kind.
    pub fn new(id: SceneNodeId, kind: SceneNodeKind) -> Self {
        let (name, fills, size) = match kind {
            SceneNodeKind::Page => ("Page 1", SmallVec::new(), Size::default()),
            SceneNodeKind::Frame => (
                "Frame",
                SmallVec::from_elem(Paint { r: 1.0, g: 1.0, b: 1.0, opacity: 1.0 }, 1),
                Size::new(100.0, 100.0),
            ),
            SceneNodeKind::Text => (
                "Text",
                SmallVec::from_elem(Paint { r: 0.0, g: 0.0, b: 0.0, opacity: 1.0 }, 1),
                Size::new(0.0, 0.0),
            ),
        };

        Self {
            id,
            kind,
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            layout_mode: None,
            primary_align: PrimaryAxisAlign::Min,
            counter_align: CounterAxisAlign::Min,
            item_spacing: 0.0,
            padding: Edges::default(),
            corner_radius: 0.0,
            fills,
            size,
            primary_sizing: SizingMode::Fixed,
            counter_sizing: SizingMode::Fixed,
            layout_grow: LayoutGrow::Fixed,
            layout_align: LayoutAlign::Inherit,
            font: FontName::default(),
            font_size: 12.0,
            characters: String::new(),
        }
    }
}

/// An in-memory canvas holding one page.
#[derive(Debug, Clone)]
pub struct SceneCanvas {
    /// All nodes, in creation order
    nodes: IndexMap<SceneNodeId, SceneNode>,
    page: SceneNodeId,
    next_id: u64,
    selection: Vec<SceneNodeId>,
    loaded_fonts: Vec<FontName>,
    font_loads: usize,
    /// Primitives created so far (the page excluded)
    created: usize,
    /// Creation fails once `created` reaches this
    creation_limit: Option<usize>,
    viewport: Vec<SceneNodeId>,
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCanvas {
    /// Create a canvas with an empty page.
    pub fn new() -> Self {
        let page = SceneNodeId(1);
        let mut nodes = IndexMap::new();
        nodes.insert(page, SceneNode::new(page, SceneNodeKind::Page));
        Self {
            nodes,
            page,
            next_id: 2,
            selection: Vec::new(),
            loaded_fonts: Vec::new(),
            font_loads: 0,
            created: 0,
            creation_limit: None,
            viewport: Vec::new(),
        }
    }

    /// Reject every creation after `limit` primitives have been created.
    pub fn with_creation_limit(mut self, limit: usize) -> Self {
        self.creation_limit = Some(limit);
        self
    }

    /// The page node.
    pub fn page(&self) -> SceneNodeId {
        self.page
    }

    /// Replace the selection.
    pub fn select(&mut self, nodes: impl IntoIterator<Item = SceneNodeId>) {
        self.selection = nodes.into_iter().collect();
    }

    /// Get a node by ID.
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a node by ID, failing like the host does for unknown handles.
    pub fn node(&self, id: SceneNodeId) -> Result<&SceneNode, CanvasError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| CanvasError::UnknownNode { node: id.to_string() })
    }

    /// Iterate over all nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Child nodes of `id`, in order.
    pub fn child_nodes(&self, id: SceneNodeId) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|child_id| self.nodes.get(child_id))
    }

    /// Number of primitives created (the page excluded).
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Number of font loads that reached the canvas.
    pub fn font_loads(&self) -> usize {
        self.font_loads
    }

    /// Nodes the viewport was last focused on.
    pub fn viewport(&self) -> &[SceneNodeId] {
        &self.viewport
    }

    /// Human-readable outline of the page subtree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_recursive(self.page, 0, &mut out);
        out
    }

    fn outline_recursive(&self, id: SceneNodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };

        let _ = write!(out, "{}", "  ".repeat(depth));
        match node.kind {
            SceneNodeKind::Page => {
                let _ = write!(out, "Page {:?}", node.name);
            }
            SceneNodeKind::Frame => {
                let mode = node.layout_mode.map_or("NONE", LayoutMode::as_str);
                let _ = write!(
                    out,
                    "Frame {:?} {} {}/{}",
                    node.name, mode, node.primary_align, node.counter_align
                );
                if node.item_spacing != 0.0 {
                    let _ = write!(out, " gap={}", node.item_spacing);
                }
                let p = node.padding;
                if p.top != 0.0 || p.right != 0.0 || p.bottom != 0.0 || p.left != 0.0 {
                    let _ = write!(out, " pad={},{},{},{}", p.top, p.right, p.bottom, p.left);
                }
                if node.corner_radius != 0.0 {
                    let _ = write!(out, " radius={}", node.corner_radius);
                }
                write_fills(out, &node.fills);
                let _ = write!(
                    out,
                    " size={}x{} sizing={}/{}",
                    node.size.width, node.size.height, node.primary_sizing, node.counter_sizing
                );
            }
            SceneNodeKind::Text => {
                let _ = write!(out, "Text {:?} size={}", node.characters, node.font_size);
                write_fills(out, &node.fills);
            }
        }
        if node.layout_grow == LayoutGrow::Grow {
            out.push_str(" grow");
        }
        if node.layout_align == LayoutAlign::Stretch {
            out.push_str(" stretch");
        }
        out.push('\n');

        for &child in &node.children {
            self.outline_recursive(child, depth + 1, out);
        }
    }

    fn allocate(&mut self, kind: SceneNodeKind) -> Result<SceneNodeId, CanvasError> {
        if let Some(limit) = self.creation_limit {
            if self.created >= limit {
                return Err(CanvasError::CreationRejected { limit });
            }
        }

        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        self.created += 1;

        // New primitives start on the page, like a host inserting at the top level.
        let mut node = SceneNode::new(id, kind);
        node.parent = Some(self.page);
        self.nodes.insert(id, node);
        if let Some(page) = self.nodes.get_mut(&self.page) {
            page.children.push(id);
        }
        Ok(id)
    }

    fn node_mut(&mut self, id: SceneNodeId) -> Result<&mut SceneNode, CanvasError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| CanvasError::UnknownNode { node: id.to_string() })
    }

    /// A node that must be a frame for `property` to apply.
    fn frame_mut(
        &mut self,
        id: SceneNodeId,
        property: &'static str,
    ) -> Result<&mut SceneNode, CanvasError> {
        let node = self.node_mut(id)?;
        if node.kind != SceneNodeKind::Frame {
            return Err(CanvasError::InvalidProperty {
                property,
                value: format!("not supported on {:?} node {}", node.kind, id),
            });
        }
        Ok(node)
    }

    /// A node that must be a text leaf for `property` to apply.
    fn text_mut(
        &mut self,
        id: SceneNodeId,
        property: &'static str,
    ) -> Result<&mut SceneNode, CanvasError> {
        let node = self.node_mut(id)?;
        if node.kind != SceneNodeKind::Text {
            return Err(CanvasError::InvalidProperty {
                property,
                value: format!("not supported on {:?} node {}", node.kind, id),
            });
        }
        Ok(node)
    }

    /// A node that must support `capability` for `property` to apply.
    fn child_mut(
        &mut self,
        id: SceneNodeId,
        capability: Capability,
        property: &'static str,
    ) -> Result<&mut SceneNode, CanvasError> {
        let node = self.node_mut(id)?;
        if !node.kind.supports(capability) {
            return Err(CanvasError::InvalidProperty {
                property,
                value: format!("not supported on {:?} node {}", node.kind, id),
            });
        }
        Ok(node)
    }

    fn font_loaded(&self, font: &FontName) -> bool {
        self.loaded_fonts.contains(font)
    }

    fn is_ancestor_or_self(&self, candidate: SceneNodeId, of: SceneNodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, id: SceneNodeId) {
        let parent = self.nodes.get_mut(&id).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn remove_recursive(&mut self, id: SceneNodeId) {
        if let Some(node) = self.nodes.shift_remove(&id) {
            for child in node.children {
                self.remove_recursive(child);
            }
        }
        self.selection.retain(|s| *s != id);
    }
}

fn write_fills(out: &mut String, fills: &[Paint]) {
    if let Some(fill) = fills.first() {
        let _ = write!(out, " fill={}", fill.to_hex());
        if fill.opacity < 1.0 {
            let _ = write!(out, "@{}", fill.opacity);
        }
    }
}

fn require_finite(property: &'static str, value: f64) -> Result<(), CanvasError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CanvasError::InvalidProperty {
            property,
            value: value.to_string(),
        })
    }
}

fn require_non_negative(property: &'static str, value: f64) -> Result<(), CanvasError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidProperty {
            property,
            value: value.to_string(),
        })
    }
}

impl Canvas for SceneCanvas {
    type Node = SceneNodeId;

    fn create_frame(&mut self) -> Result<SceneNodeId, CanvasError> {
        self.allocate(SceneNodeKind::Frame)
    }

    fn create_text(&mut self) -> Result<SceneNodeId, CanvasError> {
        self.allocate(SceneNodeKind::Text)
    }

    fn append_child(&mut self, parent: &SceneNodeId, child: &SceneNodeId) -> Result<(), CanvasError> {
        let (parent, child) = (*parent, *child);
        let parent_kind = self.node(parent)?.kind;
        let child_kind = self.node(child)?.kind;

        if !parent_kind.supports(Capability::Children) {
            return Err(CanvasError::NotAContainer { node: parent.to_string() });
        }
        if child_kind == SceneNodeKind::Page {
            return Err(CanvasError::host(format!("Cannot move page {child} into a node")));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(CanvasError::host(format!(
                "Cannot move node {child} into itself or one of its descendants"
            )));
        }

        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn remove(&mut self, node: &SceneNodeId) -> Result<(), CanvasError> {
        let id = *node;
        if id == self.page {
            return Err(CanvasError::host("Cannot remove the page"));
        }
        self.node(id)?;
        self.detach(id);
        self.remove_recursive(id);
        Ok(())
    }

    fn children(&self, node: &SceneNodeId) -> Result<Vec<SceneNodeId>, CanvasError> {
        Ok(self.node(*node)?.children.clone())
    }

    fn supports(&self, node: &SceneNodeId, capability: Capability) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.kind.supports(capability))
    }

    fn set_name(&mut self, node: &SceneNodeId, name: &str) -> Result<(), CanvasError> {
        self.node_mut(*node)?.name = name.to_string();
        Ok(())
    }

    fn set_layout_mode(&mut self, node: &SceneNodeId, mode: LayoutMode) -> Result<(), CanvasError> {
        self.frame_mut(*node, "layoutMode")?.layout_mode = Some(mode);
        Ok(())
    }

    fn set_primary_axis_align(
        &mut self,
        node: &SceneNodeId,
        align: PrimaryAxisAlign,
    ) -> Result<(), CanvasError> {
        self.frame_mut(*node, "primaryAxisAlignItems")?.primary_align = align;
        Ok(())
    }

    fn set_counter_axis_align(
        &mut self,
        node: &SceneNodeId,
        align: CounterAxisAlign,
    ) -> Result<(), CanvasError> {
        self.frame_mut(*node, "counterAxisAlignItems")?.counter_align = align;
        Ok(())
    }

    fn set_item_spacing(&mut self, node: &SceneNodeId, spacing: f64) -> Result<(), CanvasError> {
        require_finite("itemSpacing", spacing)?;
        self.frame_mut(*node, "itemSpacing")?.item_spacing = spacing;
        Ok(())
    }

    fn set_padding(&mut self, node: &SceneNodeId, padding: Edges) -> Result<(), CanvasError> {
        require_non_negative("paddingTop", padding.top)?;
        require_non_negative("paddingRight", padding.right)?;
        require_non_negative("paddingBottom", padding.bottom)?;
        require_non_negative("paddingLeft", padding.left)?;
        self.frame_mut(*node, "padding")?.padding = padding;
        Ok(())
    }

    fn set_corner_radius(&mut self, node: &SceneNodeId, radius: f64) -> Result<(), CanvasError> {
        require_non_negative("cornerRadius", radius)?;
        self.frame_mut(*node, "cornerRadius")?.corner_radius = radius;
        Ok(())
    }

    fn set_fills(&mut self, node: &SceneNodeId, fills: &[Paint]) -> Result<(), CanvasError> {
        for fill in fills {
            for channel in [fill.r, fill.g, fill.b, fill.opacity] {
                if !(0.0..=1.0).contains(&channel) {
                    return Err(CanvasError::InvalidProperty {
                        property: "fills",
                        value: channel.to_string(),
                    });
                }
            }
        }
        let target = self.node_mut(*node)?;
        if target.kind == SceneNodeKind::Page {
            return Err(CanvasError::InvalidProperty {
                property: "fills",
                value: "not supported on pages".into(),
            });
        }
        target.fills = fills.iter().copied().collect();
        Ok(())
    }

    fn resize(&mut self, node: &SceneNodeId, size: Size) -> Result<(), CanvasError> {
        for extent in [size.width, size.height] {
            if !extent.is_finite() || extent < 0.01 {
                return Err(CanvasError::InvalidProperty {
                    property: "size",
                    value: format!("{}x{}", size.width, size.height),
                });
            }
        }
        self.child_mut(*node, Capability::Grow, "size")?.size = size;
        Ok(())
    }

    fn size(&self, node: &SceneNodeId) -> Result<Size, CanvasError> {
        Ok(self.node(*node)?.size)
    }

    fn set_primary_axis_sizing(
        &mut self,
        node: &SceneNodeId,
        mode: SizingMode,
    ) -> Result<(), CanvasError> {
        self.frame_mut(*node, "primaryAxisSizingMode")?.primary_sizing = mode;
        Ok(())
    }

    fn set_counter_axis_sizing(
        &mut self,
        node: &SceneNodeId,
        mode: SizingMode,
    ) -> Result<(), CanvasError> {
        self.frame_mut(*node, "counterAxisSizingMode")?.counter_sizing = mode;
        Ok(())
    }

    fn set_layout_grow(&mut self, node: &SceneNodeId, grow: LayoutGrow) -> Result<(), CanvasError> {
        self.child_mut(*node, Capability::Grow, "layoutGrow")?.layout_grow = grow;
        Ok(())
    }

    fn set_layout_align(
        &mut self,
        node: &SceneNodeId,
        align: LayoutAlign,
    ) -> Result<(), CanvasError> {
        self.child_mut(*node, Capability::Stretch, "layoutAlign")?.layout_align = align;
        Ok(())
    }

    fn set_font_name(&mut self, node: &SceneNodeId, font: &FontName) -> Result<(), CanvasError> {
        if !self.font_loaded(font) {
            return Err(CanvasError::FontNotLoaded {
                family: font.family.clone(),
                style: font.style.clone(),
            });
        }
        self.text_mut(*node, "fontName")?.font = font.clone();
        Ok(())
    }

    fn set_font_size(&mut self, node: &SceneNodeId, size: f64) -> Result<(), CanvasError> {
        if !size.is_finite() || size < 1.0 {
            return Err(CanvasError::InvalidProperty {
                property: "fontSize",
                value: size.to_string(),
            });
        }
        let font = self.text_mut(*node, "fontSize")?.font.clone();
        if !self.font_loaded(&font) {
            return Err(CanvasError::FontNotLoaded {
                family: font.family,
                style: font.style,
            });
        }
        self.text_mut(*node, "fontSize")?.font_size = size;
        Ok(())
    }

    fn set_characters(&mut self, node: &SceneNodeId, characters: &str) -> Result<(), CanvasError> {
        let font = self.text_mut(*node, "characters")?.font.clone();
        if !self.font_loaded(&font) {
            return Err(CanvasError::FontNotLoaded {
                family: font.family,
                style: font.style,
            });
        }
        self.text_mut(*node, "characters")?.characters = characters.to_string();
        Ok(())
    }

    async fn load_font(&mut self, font: &FontName) -> Result<(), CanvasError> {
        self.font_loads += 1;
        if !self.font_loaded(font) {
            self.loaded_fonts.push(font.clone());
        }
        Ok(())
    }

    fn selection(&self) -> Result<Vec<SceneNodeId>, CanvasError> {
        Ok(self.selection.clone())
    }

    fn current_page(&self) -> Result<SceneNodeId, CanvasError> {
        Ok(self.page)
    }

    fn focus_viewport(&mut self, nodes: &[SceneNodeId]) -> Result<(), CanvasError> {
        for id in nodes {
            self.node(*id)?;
        }
        self.viewport = nodes.to_vec();
        Ok(())
    }
}
