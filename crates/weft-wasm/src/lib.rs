//! WebAssembly bindings for the weft engine.
//!
//! The plugin's main thread hands its canvas shim to an [`Importer`] and
//! forwards UI messages to it.
//!
//! ## Example
//!
//! ```js
//! import { Importer } from 'weft-wasm';
//!
//! const importer = new Importer(hostCanvas, { rollbackOnFault: false });
//!
//! figma.ui.onmessage = async (msg) => {
//!   const reply = await importer.handleMessage(msg);
//!   if (reply) figma.ui.postMessage(reply);
//! };
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use weft_plugin::{InboundMessage, Plugin};

mod canvas;
mod types;

pub use canvas::*;
pub use types::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Message handler for JavaScript.
#[wasm_bindgen]
pub struct Importer {
    host: HostCanvas,
    /// Session state; each request works on a copy and writes it back
    plugin: Rc<RefCell<Plugin>>,
}

#[wasm_bindgen]
impl Importer {
    /// Create an importer drawing through `host`.
    #[wasm_bindgen(constructor)]
    pub fn new(host: HostCanvas, options: JsValue) -> Result<Importer, JsError> {
        let options = if options.is_undefined() || options.is_null() {
            RenderOptionsJs::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
        };

        Ok(Self {
            host,
            plugin: Rc::new(RefCell::new(Plugin::new(options.into_core()))),
        })
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Handle a UI message (an object or its JSON text).
    ///
    /// Resolves to `{ type: "done" }`, `{ type: "error", message }`, or
    /// `undefined` for messages that ask for nothing.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, message: JsValue) -> Result<js_sys::Promise, JsError> {
        let text = match message.as_string() {
            Some(text) => text,
            None => js_sys::JSON::stringify(&message)
                .map(String::from)
                .map_err(|_| JsError::new("Invalid message: not serializable"))?,
        };

        let state = Rc::clone(&self.plugin);
        let mut canvas = JsCanvas::new(self.host.clone());

        Ok(future_to_promise(async move {
            let inbound = match InboundMessage::from_json(&text) {
                Ok(inbound) => inbound,
                Err(_) => return Ok(JsValue::UNDEFINED),
            };

            let mut plugin = state.borrow().clone();
            let reply = plugin.handle_message(&mut canvas, &inbound).await;
            *state.borrow_mut() = plugin;

            match reply {
                Some(reply) => serde_wasm_bindgen::to_value(&reply).map_err(JsValue::from),
                None => Ok(JsValue::UNDEFINED),
            }
        }))
    }
}
