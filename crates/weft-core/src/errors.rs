//! Error types for the weft engine.

use thiserror::Error;

/// Top-level error type for a render pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Faults raised by a host canvas.
///
/// Any of these aborts the remainder of a render pass. The display text is
/// what gets reported back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// A fault raised by the host itself, carrying its description text.
    #[error("{message}")]
    Host { message: String },

    #[error("Node not found: {node}")]
    UnknownNode { node: String },

    #[error("Invalid value for {property}: {value}")]
    InvalidProperty { property: &'static str, value: String },

    #[error("Cannot write to node with unloaded font \"{family} {style}\"")]
    FontNotLoaded { family: String, style: String },

    #[error("Node {node} cannot have children")]
    NotAContainer { node: String },

    #[error("Node creation rejected after {limit} primitives")]
    CreationRejected { limit: usize },
}

impl CanvasError {
    /// Create a host fault from any message.
    pub fn host(message: impl Into<String>) -> Self {
        CanvasError::Host { message: message.into() }
    }
}
