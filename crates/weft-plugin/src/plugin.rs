//! Request handling.

use tracing::{debug, info, warn};
use weft_canvas::Canvas;
use weft_core::{RenderError, SerializedNode};
use weft_render::{RenderContext, RenderOptions, RenderReport, Renderer};

use crate::attach::{AttachmentResolver, SelectionResolver};
use crate::message::{InboundMessage, OutboundMessage};

/// Handles messages for the lifetime of a plugin session.
///
/// The render context, and with it the font gate, is shared by every request
/// handled by the same `Plugin`.
#[derive(Debug, Clone)]
pub struct Plugin<R = SelectionResolver> {
    context: RenderContext,
    resolver: R,
}

impl Plugin {
    /// Create a plugin that renders into the selection or the current page.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_resolver(options, SelectionResolver)
    }
}

impl Default for Plugin {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl<R> Plugin<R> {
    pub fn with_resolver(options: RenderOptions, resolver: R) -> Self {
        Self {
            context: RenderContext::new(options),
            resolver,
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Handle one message.
    ///
    /// Returns `None` for messages that ask for nothing, otherwise exactly one
    /// reply: `done` after a successful render or `error` with the fault's
    /// text. Output attached before a fault stays on the canvas unless
    /// rollback is enabled.
    pub async fn handle_message<C>(
        &mut self,
        canvas: &mut C,
        message: &InboundMessage,
    ) -> Option<OutboundMessage>
    where
        C: Canvas,
        R: AttachmentResolver<C>,
    {
        let request = match message.render_request() {
            Some(request) => request,
            None => {
                debug!(kind = %message.kind, "ignoring message");
                return None;
            }
        };

        let reply = match request {
            Ok(tree) => match self.render(canvas, &tree).await {
                Ok(_) => OutboundMessage::Done,
                Err(err) => OutboundMessage::error(err.to_string()),
            },
            Err(err) => {
                warn!(error = %err, "rejecting render request");
                OutboundMessage::error(err.to_string())
            }
        };
        Some(reply)
    }

    /// Handle a message given as JSON text. Text that is not a message is
    /// ignored.
    pub async fn handle_json<C>(&mut self, canvas: &mut C, json: &str) -> Option<OutboundMessage>
    where
        C: Canvas,
        R: AttachmentResolver<C>,
    {
        match InboundMessage::from_json(json) {
            Ok(message) => self.handle_message(canvas, &message).await,
            Err(err) => {
                debug!(error = %err, "ignoring unreadable message");
                None
            }
        }
    }

    /// Render `tree` at the attachment point and focus the viewport on the
    /// result.
    pub async fn render<C>(
        &mut self,
        canvas: &mut C,
        tree: &SerializedNode,
    ) -> Result<RenderReport<C::Node>, RenderError>
    where
        C: Canvas,
        R: AttachmentResolver<C>,
    {
        let parent = self.resolver.resolve(canvas)?;
        debug!(?parent, "attachment point");

        let report = Renderer::new(canvas, &mut self.context)
            .render_payload(tree, &parent)
            .await?;

        if !report.top_level.is_empty() && self.context.options().focus_viewport {
            canvas.focus_viewport(&report.top_level)?;
        }
        info!(
            top_level = report.top_level.len(),
            created = report.created,
            "render complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attach::FixedResolver;
    use serde_json::json;
    use weft_canvas::{SceneCanvas, SceneNodeKind};

    fn plugin() -> Plugin {
        Plugin::default()
    }

    fn render_message(payload: serde_json::Value) -> InboundMessage {
        InboundMessage::from_value(json!({ "type": "render-html-tree", "payload": payload }))
            .unwrap()
    }

    fn card() -> serde_json::Value {
        json!({
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "tagName": "div",
                    "styles": { "paddingTop": 8, "backgroundColor": { "r": 255, "g": 255, "b": 255 } },
                    "children": [
                        { "type": "element", "tagName": "h2", "textContent": "Title" },
                        { "type": "text", "textContent": "Body" }
                    ]
                },
                { "type": "element", "tagName": "p", "textContent": "Footnote" }
            ]
        })
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();
        let msg = InboundMessage::from_value(json!({ "type": "ping", "payload": card() })).unwrap();

        assert_eq!(pollster::block_on(plugin.handle_message(&mut canvas, &msg)), None);
        assert_eq!(canvas.created_count(), 0);
    }

    #[test]
    fn test_missing_payload_is_ignored() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();
        let msg = InboundMessage::from_value(json!({ "type": "render-html-tree" })).unwrap();

        assert_eq!(pollster::block_on(plugin.handle_message(&mut canvas, &msg)), None);
        assert_eq!(canvas.created_count(), 0);
    }

    #[test]
    fn test_unreadable_json_is_ignored() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();
        assert_eq!(pollster::block_on(plugin.handle_json(&mut canvas, "not json")), None);
    }

    #[test]
    fn test_render_replies_done_and_focuses() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();

        let reply = pollster::block_on(plugin.handle_message(&mut canvas, &render_message(card())));
        assert_eq!(reply, Some(OutboundMessage::Done));

        let top: Vec<_> = canvas.child_nodes(canvas.page()).map(|n| n.id).collect();
        assert_eq!(top.len(), 2);
        assert_eq!(canvas.viewport(), top.as_slice());
    }

    #[test]
    fn test_focus_can_be_disabled() {
        let mut canvas = SceneCanvas::new();
        let options = RenderOptions {
            focus_viewport: false,
            ..Default::default()
        };
        let mut plugin = Plugin::new(options);

        let reply = pollster::block_on(plugin.handle_message(&mut canvas, &render_message(card())));
        assert_eq!(reply, Some(OutboundMessage::Done));
        assert!(canvas.viewport().is_empty());
    }

    #[test]
    fn test_empty_root_does_not_focus() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();
        let reply = pollster::block_on(
            plugin.handle_message(&mut canvas, &render_message(json!({ "type": "root" }))),
        );
        assert_eq!(reply, Some(OutboundMessage::Done));
        assert!(canvas.viewport().is_empty());
    }

    #[test]
    fn test_single_node_payload() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();
        let payload = json!({ "type": "text", "textContent": "solo" });

        let reply = pollster::block_on(plugin.handle_message(&mut canvas, &render_message(payload)));
        assert_eq!(reply, Some(OutboundMessage::Done));
        assert_eq!(canvas.viewport().len(), 1);
    }

    #[test]
    fn test_invalid_payload_replies_error() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();
        let reply = pollster::block_on(
            plugin.handle_message(&mut canvas, &render_message(json!({ "type": "widget" }))),
        );
        assert!(matches!(
            reply,
            Some(OutboundMessage::Error { message }) if message.starts_with("Invalid payload:")
        ));
    }

    #[test]
    fn test_fault_replies_error_and_keeps_partial_output() {
        // Room for the first div and its title only.
        let mut canvas = SceneCanvas::new().with_creation_limit(2);
        let mut plugin = plugin();

        let reply = pollster::block_on(plugin.handle_message(&mut canvas, &render_message(card())));
        assert_eq!(
            reply,
            Some(OutboundMessage::error("Node creation rejected after 2 primitives"))
        );

        let div = canvas.child_nodes(canvas.page()).next().unwrap();
        assert_eq!(div.name, "div");
        assert_eq!(canvas.child_nodes(div.id).count(), 1);
        assert!(canvas.viewport().is_empty());
    }

    #[test]
    fn test_fifth_of_ten_siblings_faults() {
        let paragraphs: Vec<_> = (1..=10)
            .map(|i| json!({ "type": "element", "tagName": "p", "textContent": format!("p{i}") }))
            .collect();
        let payload = json!({ "type": "element", "tagName": "div", "children": paragraphs });

        let mut canvas = SceneCanvas::new().with_creation_limit(5);
        let mut plugin = plugin();
        let reply = pollster::block_on(plugin.handle_message(&mut canvas, &render_message(payload)));
        assert!(matches!(reply, Some(OutboundMessage::Error { .. })));

        let div = canvas.child_nodes(canvas.page()).next().unwrap();
        let texts: Vec<_> = canvas.child_nodes(div.id).map(|n| n.characters.as_str()).collect();
        assert_eq!(texts, ["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_renders_into_selected_frame() {
        let mut canvas = SceneCanvas::new();
        let target = canvas.create_frame().unwrap();
        canvas.select([target]);
        let mut plugin = plugin();

        pollster::block_on(plugin.handle_message(&mut canvas, &render_message(card())));
        let kinds: Vec<_> = canvas.child_nodes(target).map(|n| n.kind).collect();
        assert_eq!(kinds, [SceneNodeKind::Frame, SceneNodeKind::Text]);
    }

    #[test]
    fn test_fixed_resolver() {
        let mut canvas = SceneCanvas::new();
        let target = canvas.create_frame().unwrap();
        let mut plugin = Plugin::with_resolver(RenderOptions::default(), FixedResolver(target));

        let report = pollster::block_on(plugin.render(&mut canvas, &SerializedNode::text("x"))).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(canvas.child_nodes(target).count(), 1);
    }

    #[test]
    fn test_font_gate_persists_across_requests() {
        let mut canvas = SceneCanvas::new();
        let mut plugin = plugin();

        for _ in 0..3 {
            let reply = pollster::block_on(plugin.handle_message(&mut canvas, &render_message(card())));
            assert_eq!(reply, Some(OutboundMessage::Done));
        }
        assert_eq!(canvas.font_loads(), 1);
        assert!(plugin.context().font_loaded());
    }
}
