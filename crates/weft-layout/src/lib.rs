//! Layout decisions for weft.
//!
//! This crate holds the pure half of the engine: it maps CSS-style keywords
//! onto the smaller auto-layout vocabulary of the target canvas and decides
//! which rendering strategy applies to each serialized node. Nothing here
//! touches a canvas.
//!
//! # Architecture
//!
//! 1. **Mapping**: `justify-content`, `align-items`, `flex-direction` and
//!    `text-align` keywords to target enums, tolerant of any input
//! 2. **Auto-layout**: the layout mode a container gets from its tag and styles
//! 3. **Classification**: which of the render strategies a node takes
//!
//! # Example
//!
//! ```
//! use weft_layout::{map_justify_content, PrimaryAxisAlign};
//!
//! assert_eq!(map_justify_content(Some(" Space-Between ")), PrimaryAxisAlign::SpaceBetween);
//! assert_eq!(map_justify_content(Some("space-evenly")), PrimaryAxisAlign::Center);
//! ```

mod auto_layout;
mod classify;
mod mapper;

pub use auto_layout::{
    AutoLayout, CounterAxisAlign, LayoutAlign, LayoutGrow, LayoutMode, PrimaryAxisAlign,
    SizingMode,
};
pub use classify::{classify, is_block_tag, RenderStrategy, BLOCK_TAGS};
pub use mapper::{map_align_items, map_flex_direction, map_justify_content, map_text_align};
