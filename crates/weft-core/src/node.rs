//! The serialized input tree.
//!
//! A tree is produced fresh for every conversion request by the external
//! markup serializer and is never mutated by the engine.

use crate::style::Styles;

/// A node of the serialized markup tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum SerializedNode {
    /// Holder for top-level children only.
    Root(RootNode),
    /// An element with a tag name.
    Element(ElementNode),
    /// A run of text.
    Text(TextNode),
}

/// The payload root.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RootNode {
    pub children: Vec<SerializedNode>,
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ElementNode {
    pub tag_name: String,
    /// Inline text for elements whose only content is text.
    pub text_content: Option<String>,
    pub styles: Styles,
    pub children: Vec<SerializedNode>,
}

/// A text node.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TextNode {
    pub text_content: String,
    pub styles: Styles,
}

impl SerializedNode {
    /// Create a root holding the given children.
    pub fn root(children: Vec<SerializedNode>) -> Self {
        SerializedNode::Root(RootNode { children })
    }

    /// Create an element with a tag and no styles or children.
    pub fn element(tag_name: impl Into<String>) -> Self {
        SerializedNode::Element(ElementNode {
            tag_name: tag_name.into(),
            ..Default::default()
        })
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        SerializedNode::Text(TextNode {
            text_content: content.into(),
            styles: Styles::default(),
        })
    }

    /// Set the styles (no-op on roots).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        match &mut self {
            SerializedNode::Root(_) => {}
            SerializedNode::Element(el) => el.styles = styles,
            SerializedNode::Text(text) => text.styles = styles,
        }
        self
    }

    /// Set the inline text content of an element (no-op on other kinds).
    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        if let SerializedNode::Element(el) = &mut self {
            el.text_content = Some(content.into());
        }
        self
    }

    /// Append a child (no-op on text nodes).
    pub fn with_child(mut self, child: SerializedNode) -> Self {
        match &mut self {
            SerializedNode::Root(root) => root.children.push(child),
            SerializedNode::Element(el) => el.children.push(child),
            SerializedNode::Text(_) => {}
        }
        self
    }

    /// Ordered children; text nodes have none.
    pub fn children(&self) -> &[SerializedNode] {
        match self {
            SerializedNode::Root(root) => &root.children,
            SerializedNode::Element(el) => &el.children,
            SerializedNode::Text(_) => &[],
        }
    }

    /// The node's styles; roots carry none.
    pub fn styles(&self) -> Option<&Styles> {
        match self {
            SerializedNode::Root(_) => None,
            SerializedNode::Element(el) => Some(&el.styles),
            SerializedNode::Text(text) => Some(&text.styles),
        }
    }

    /// Tag name of an element.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            SerializedNode::Element(el) => Some(&el.tag_name),
            _ => None,
        }
    }

    /// Text content of a text node or of a text-bearing element.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            SerializedNode::Root(_) => None,
            SerializedNode::Element(el) => el.text_content.as_deref(),
            SerializedNode::Text(text) => Some(&text.text_content),
        }
    }

    /// Short label for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SerializedNode::Root(_) => "root",
            SerializedNode::Element(_) => "element",
            SerializedNode::Text(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let node = SerializedNode::element("div")
            .with_text("hi")
            .with_child(SerializedNode::text("a"))
            .with_child(SerializedNode::element("span"));

        assert_eq!(node.tag_name(), Some("div"));
        assert_eq!(node.text_content(), Some("hi"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0].kind_name(), "text");
    }

    #[test]
    fn test_root_has_no_tag_or_text() {
        let root = SerializedNode::root(vec![SerializedNode::text("x")]).with_text("ignored");
        assert_eq!(root.tag_name(), None);
        assert_eq!(root.text_content(), None);
        assert!(root.styles().is_none());
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_text_nodes_have_no_children() {
        let text = SerializedNode::text("x").with_child(SerializedNode::element("p"));
        assert!(text.children().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_tagged_tree() {
        let json = r#"{
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "tagName": "div",
                    "styles": { "display": "flex", "gap": 8 },
                    "children": [
                        { "type": "element", "tagName": "p", "textContent": "Hello" },
                        { "type": "text", "textContent": "tail" }
                    ]
                }
            ]
        }"#;

        let node: SerializedNode = serde_json::from_str(json).unwrap();
        let div = &node.children()[0];
        assert_eq!(div.tag_name(), Some("div"));
        assert_eq!(div.styles().and_then(|s| s.gap), Some(8.0));
        assert_eq!(div.children()[0].text_content(), Some("Hello"));
        assert_eq!(div.children()[1].kind_name(), "text");
    }
}
