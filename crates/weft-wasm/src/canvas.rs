//! A [`Canvas`] backed by a JavaScript host object.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use weft_canvas::{Canvas, Capability, FontName, Paint, Size};
use weft_core::{CanvasError, Edges};
use weft_layout::{
    CounterAxisAlign, LayoutAlign, LayoutGrow, LayoutMode, PrimaryAxisAlign, SizingMode,
};

use crate::types::{FontNameJs, SizeJs, SolidPaintJs};

#[wasm_bindgen(typescript_custom_section)]
const HOST_CANVAS_TS: &str = r#"
export interface HostCanvas {
  createFrame(): string;
  createText(): string;
  appendChild(parent: string, child: string): void;
  remove(node: string): void;
  children(node: string): string[];
  supports(node: string, property: string): boolean;
  setProperty(node: string, property: string, value: unknown): void;
  size(node: string): { width: number; height: number };
  resize(node: string, width: number, height: number): void;
  loadFont(family: string, style: string): Promise<void>;
  selection(): string[];
  currentPage(): string;
  focus(nodes: string[]): void;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// The host-side canvas shim. Nodes are addressed by host id strings.
    #[wasm_bindgen(typescript_type = "HostCanvas")]
    #[derive(Clone)]
    pub type HostCanvas;

    #[wasm_bindgen(method, catch, js_name = createFrame)]
    fn create_frame(this: &HostCanvas) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = createText)]
    fn create_text(this: &HostCanvas) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = appendChild)]
    fn append_child(this: &HostCanvas, parent: &str, child: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn remove(this: &HostCanvas, node: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn children(this: &HostCanvas, node: &str) -> Result<js_sys::Array, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn supports(this: &HostCanvas, node: &str, property: &str) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setProperty)]
    fn set_property(
        this: &HostCanvas,
        node: &str,
        property: &str,
        value: JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn size(this: &HostCanvas, node: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn resize(this: &HostCanvas, node: &str, width: f64, height: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = loadFont)]
    fn load_font(this: &HostCanvas, family: &str, style: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn selection(this: &HostCanvas) -> Result<js_sys::Array, JsValue>;

    #[wasm_bindgen(method, catch, js_name = currentPage)]
    fn current_page(this: &HostCanvas) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn focus(this: &HostCanvas, nodes: js_sys::Array) -> Result<(), JsValue>;
}

/// Turn a thrown JS value into a host fault carrying its message.
fn host_error(err: JsValue) -> CanvasError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    };
    CanvasError::Host { message }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, CanvasError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| CanvasError::host(e.to_string()))
}

fn node_ids(array: js_sys::Array) -> Vec<String> {
    array.iter().filter_map(|v| v.as_string()).collect()
}

/// Property whose presence on a host node signals `capability`.
fn capability_property(capability: Capability) -> &'static str {
    match capability {
        Capability::Children => "appendChild",
        Capability::Grow => "layoutGrow",
        Capability::Stretch => "layoutAlign",
    }
}

/// Adapts a [`HostCanvas`] to the engine's [`Canvas`] trait.
#[derive(Clone)]
pub struct JsCanvas {
    host: HostCanvas,
}

impl JsCanvas {
    pub fn new(host: HostCanvas) -> Self {
        Self { host }
    }

    fn set(&self, node: &str, property: &str, value: impl Into<JsValue>) -> Result<(), CanvasError> {
        self.host
            .set_property(node, property, value.into())
            .map_err(host_error)
    }
}

impl Canvas for JsCanvas {
    type Node = String;

    fn create_frame(&mut self) -> Result<String, CanvasError> {
        self.host.create_frame().map_err(host_error)
    }

    fn create_text(&mut self) -> Result<String, CanvasError> {
        self.host.create_text().map_err(host_error)
    }

    fn append_child(&mut self, parent: &String, child: &String) -> Result<(), CanvasError> {
        self.host.append_child(parent, child).map_err(host_error)
    }

    fn remove(&mut self, node: &String) -> Result<(), CanvasError> {
        self.host.remove(node).map_err(host_error)
    }

    fn children(&self, node: &String) -> Result<Vec<String>, CanvasError> {
        self.host.children(node).map(node_ids).map_err(host_error)
    }

    fn supports(&self, node: &String, capability: Capability) -> bool {
        self.host
            .supports(node, capability_property(capability))
            .unwrap_or(false)
    }

    fn set_name(&mut self, node: &String, name: &str) -> Result<(), CanvasError> {
        self.set(node, "name", name)
    }

    fn set_layout_mode(&mut self, node: &String, mode: LayoutMode) -> Result<(), CanvasError> {
        self.set(node, "layoutMode", mode.as_str())
    }

    fn set_primary_axis_align(
        &mut self,
        node: &String,
        align: PrimaryAxisAlign,
    ) -> Result<(), CanvasError> {
        self.set(node, "primaryAxisAlignItems", align.as_str())
    }

    fn set_counter_axis_align(
        &mut self,
        node: &String,
        align: CounterAxisAlign,
    ) -> Result<(), CanvasError> {
        self.set(node, "counterAxisAlignItems", align.as_str())
    }

    fn set_item_spacing(&mut self, node: &String, spacing: f64) -> Result<(), CanvasError> {
        self.set(node, "itemSpacing", spacing)
    }

    fn set_padding(&mut self, node: &String, padding: Edges) -> Result<(), CanvasError> {
        self.set(node, "paddingTop", padding.top)?;
        self.set(node, "paddingRight", padding.right)?;
        self.set(node, "paddingBottom", padding.bottom)?;
        self.set(node, "paddingLeft", padding.left)
    }

    fn set_corner_radius(&mut self, node: &String, radius: f64) -> Result<(), CanvasError> {
        self.set(node, "cornerRadius", radius)
    }

    fn set_fills(&mut self, node: &String, fills: &[Paint]) -> Result<(), CanvasError> {
        let fills: Vec<SolidPaintJs> = fills.iter().map(SolidPaintJs::from).collect();
        self.set(node, "fills", to_js(&fills)?)
    }

    fn resize(&mut self, node: &String, size: Size) -> Result<(), CanvasError> {
        self.host
            .resize(node, size.width, size.height)
            .map_err(host_error)
    }

    fn size(&self, node: &String) -> Result<Size, CanvasError> {
        let value = self.host.size(node).map_err(host_error)?;
        let size: SizeJs =
            serde_wasm_bindgen::from_value(value).map_err(|e| CanvasError::host(e.to_string()))?;
        Ok(Size::new(size.width, size.height))
    }

    fn set_primary_axis_sizing(&mut self, node: &String, mode: SizingMode) -> Result<(), CanvasError> {
        self.set(node, "primaryAxisSizingMode", mode.as_str())
    }

    fn set_counter_axis_sizing(&mut self, node: &String, mode: SizingMode) -> Result<(), CanvasError> {
        self.set(node, "counterAxisSizingMode", mode.as_str())
    }

    fn set_layout_grow(&mut self, node: &String, grow: LayoutGrow) -> Result<(), CanvasError> {
        // The host models growth as a 0/1 factor.
        let factor = match grow {
            LayoutGrow::Fixed => 0.0,
            LayoutGrow::Grow => 1.0,
        };
        self.set(node, "layoutGrow", factor)
    }

    fn set_layout_align(&mut self, node: &String, align: LayoutAlign) -> Result<(), CanvasError> {
        self.set(node, "layoutAlign", align.as_str())
    }

    fn set_font_name(&mut self, node: &String, font: &FontName) -> Result<(), CanvasError> {
        self.set(node, "fontName", to_js(&FontNameJs::from(font))?)
    }

    fn set_font_size(&mut self, node: &String, size: f64) -> Result<(), CanvasError> {
        self.set(node, "fontSize", size)
    }

    fn set_characters(&mut self, node: &String, characters: &str) -> Result<(), CanvasError> {
        self.set(node, "characters", characters)
    }

    async fn load_font(&mut self, font: &FontName) -> Result<(), CanvasError> {
        let promise = self
            .host
            .load_font(&font.family, &font.style)
            .map_err(host_error)?;
        JsFuture::from(promise).await.map_err(host_error)?;
        Ok(())
    }

    fn selection(&self) -> Result<Vec<String>, CanvasError> {
        self.host.selection().map(node_ids).map_err(host_error)
    }

    fn current_page(&self) -> Result<String, CanvasError> {
        self.host.current_page().map_err(host_error)
    }

    fn focus_viewport(&mut self, nodes: &[String]) -> Result<(), CanvasError> {
        let array: js_sys::Array = nodes.iter().map(|n| JsValue::from(n.as_str())).collect();
        self.host.focus(array).map_err(host_error)
    }
}
