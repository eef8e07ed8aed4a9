//! Canvas abstraction for weft.
//!
//! The engine never owns visual primitives. It drives a host canvas through
//! the [`Canvas`] trait: creating frames and text leaves, wiring them into
//! parents, and setting their auto-layout, geometry and text properties.
//!
//! [`SceneCanvas`] is an in-memory host that records the resulting tree. It
//! validates property values the way a real host does, which makes it the
//! reference host for tests and benchmarks.

mod host;
mod scene;

pub use host::{Canvas, Capability, FontName, Paint, Size};
pub use scene::{SceneCanvas, SceneNode, SceneNodeId, SceneNodeKind};
