//! Core types for the weft markup-to-canvas engine.
//!
//! This crate provides the foundational types used across all other weft crates:
//! - The serialized input tree (`SerializedNode` and its three node kinds)
//! - The flat, pre-resolved style record attached to every node
//! - Error types shared by the renderer and host canvases

pub mod errors;
pub mod node;
pub mod style;

pub use errors::*;
pub use node::*;
pub use style::*;
