//! Node classification.
//!
//! Classification is structural: it looks at the node kind, the tag, whether
//! the node has children and whether it asks for flex display. It never
//! inspects any other style and never touches a canvas.

use weft_core::SerializedNode;

/// Tags rendered as containers.
pub const BLOCK_TAGS: &[&str] = &[
    "div",
    "section",
    "header",
    "footer",
    "main",
    "article",
    "aside",
    "nav",
    "figure",
    "figcaption",
    "form",
    "fieldset",
    "ul",
    "ol",
    "li",
    "dl",
    "dt",
    "dd",
    "menu",
    "button",
];

/// How a serialized node is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Render each child against the same parent
    Flatten,
    /// A bare text leaf
    TextLeaf,
    /// A text leaf inside a synthetic container that also hosts children
    WrappedText,
    /// A block container with vertical or text-aligned flow
    FlowContainer,
    /// A block container with flex layout
    FlexContainer,
}

impl RenderStrategy {
    /// Whether this strategy goes through the block container path.
    pub fn is_container(self) -> bool {
        matches!(self, RenderStrategy::FlowContainer | RenderStrategy::FlexContainer)
    }
}

/// Whether `tag` is one of the block-level container tags.
pub fn is_block_tag(tag: &str) -> bool {
    let tag = tag.trim();
    BLOCK_TAGS.iter().any(|block| block.eq_ignore_ascii_case(tag))
}

/// Pick the render strategy for a node.
pub fn classify(node: &SerializedNode) -> RenderStrategy {
    match node {
        SerializedNode::Root(_) => RenderStrategy::Flatten,
        SerializedNode::Text(_) => RenderStrategy::TextLeaf,
        SerializedNode::Element(el) => {
            let flex = el.styles.is_flex();
            if is_block_tag(&el.tag_name) {
                if flex {
                    RenderStrategy::FlexContainer
                } else {
                    RenderStrategy::FlowContainer
                }
            } else if !el.children.is_empty() || flex {
                RenderStrategy::WrappedText
            } else {
                RenderStrategy::TextLeaf
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::Styles;

    fn flex() -> Styles {
        Styles {
            display: Some("flex".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_root_flattens() {
        assert_eq!(classify(&SerializedNode::root(vec![])), RenderStrategy::Flatten);
    }

    #[test]
    fn test_text_is_always_a_leaf() {
        let text = SerializedNode::text("hi").with_styles(flex());
        assert_eq!(classify(&text), RenderStrategy::TextLeaf);
    }

    #[test]
    fn test_block_tags() {
        for tag in ["div", "SECTION", "li", "button", "fieldset"] {
            assert!(is_block_tag(tag), "{tag} should be block-level");
        }
        for tag in ["p", "span", "h1", "a", ""] {
            assert!(!is_block_tag(tag), "{tag} should not be block-level");
        }
    }

    #[test]
    fn test_block_elements_are_containers() {
        let div = SerializedNode::element("div");
        assert_eq!(classify(&div), RenderStrategy::FlowContainer);
        assert!(classify(&div).is_container());

        let flex_div = SerializedNode::element("nav").with_styles(flex());
        assert_eq!(classify(&flex_div), RenderStrategy::FlexContainer);

        // Children do not matter for block tags.
        let empty_button = SerializedNode::element("button").with_text("OK");
        assert_eq!(classify(&empty_button), RenderStrategy::FlowContainer);
    }

    #[test]
    fn test_inline_elements() {
        let p = SerializedNode::element("p").with_text("Hello");
        assert_eq!(classify(&p), RenderStrategy::TextLeaf);
        assert!(!classify(&p).is_container());

        let p_with_child = SerializedNode::element("p")
            .with_text("Hello")
            .with_child(SerializedNode::element("strong").with_text("world"));
        assert_eq!(classify(&p_with_child), RenderStrategy::WrappedText);

        let flex_span = SerializedNode::element("span").with_styles(flex());
        assert_eq!(classify(&flex_span), RenderStrategy::WrappedText);
    }
}
