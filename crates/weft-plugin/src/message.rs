//! Inbound and outbound message shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use weft_core::SerializedNode;

/// The only message type that triggers a render.
pub const RENDER_HTML_TREE: &str = "render-html-tree";

/// Errors decoding an inbound message.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The message itself is not a `{ type, payload? }` object
    #[error("Invalid message: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is not a serialized tree
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

/// A message from the UI side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl InboundMessage {
    /// Build a render request for `tree`.
    pub fn render(tree: &SerializedNode) -> Result<Self, MessageError> {
        Ok(Self {
            kind: RENDER_HTML_TREE.to_string(),
            payload: Some(serde_json::to_value(tree)?),
        })
    }

    pub fn from_json(text: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, MessageError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The tree to render, or `None` when this message asks for no render.
    pub fn render_request(&self) -> Option<Result<SerializedNode, MessageError>> {
        if self.kind != RENDER_HTML_TREE {
            return None;
        }
        let payload = self.payload.as_ref()?;
        Some(SerializedNode::deserialize(payload).map_err(MessageError::InvalidPayload))
    }
}

/// A reply to the UI side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    /// The render finished
    Done,
    /// The render faulted; `message` is the fault's text
    Error { message: String },
}

impl OutboundMessage {
    pub fn error(message: impl Into<String>) -> Self {
        OutboundMessage::Error {
            message: message.into(),
        }
    }
}
