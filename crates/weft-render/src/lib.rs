//! Tree renderer for weft.
//!
//! Walks a serialized markup tree depth-first and issues the canvas calls that
//! rebuild it as auto-layout frames and text leaves.
//!
//! # Example
//!
//! ```
//! use weft_canvas::SceneCanvas;
//! use weft_core::{SerializedNode, Styles};
//! use weft_render::{RenderContext, RenderOptions, Renderer};
//!
//! let tree = SerializedNode::element("div")
//!     .with_styles(Styles { padding_top: Some(16.0), ..Default::default() })
//!     .with_child(SerializedNode::element("p").with_text("Hello"));
//!
//! let mut canvas = SceneCanvas::new();
//! let mut context = RenderContext::new(RenderOptions::default());
//! let page = canvas.page();
//!
//! let report = pollster::block_on(
//!     Renderer::new(&mut canvas, &mut context).render_payload(&tree, &page),
//! )
//! .unwrap();
//!
//! assert_eq!(report.top_level.len(), 1);
//! assert_eq!(report.created, 2);
//! ```

mod context;
mod font;
mod options;
mod renderer;

pub use context::RenderContext;
pub use font::FontGate;
pub use options::RenderOptions;
pub use renderer::{RenderReport, Renderer};
