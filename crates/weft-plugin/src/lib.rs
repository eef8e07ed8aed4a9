//! Message dispatch for weft.
//!
//! Receives `render-html-tree` requests, resolves where the output goes,
//! drives the renderer and produces the reply message.

mod attach;
mod message;
mod plugin;

pub use attach::{AttachmentResolver, FixedResolver, SelectionResolver};
pub use message::{InboundMessage, MessageError, OutboundMessage, RENDER_HTML_TREE};
pub use plugin::Plugin;
