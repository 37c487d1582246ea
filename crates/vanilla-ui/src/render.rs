/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Mounting values into containers.

use vanilla_dom::{NodeRef, outer_html};

use crate::attach::AttachmentScheduler;
use crate::context::RenderContext;
use crate::diagnostics::TREE_OPERATION_FAILED;
use crate::resolve::build_into;
use crate::value::Value;

/// The top-level nodes produced by a render call.
#[derive(Debug, Clone)]
pub enum MountResult {
    /// Exactly one top-level node.
    Single(NodeRef),
    /// Zero or several top-level nodes, in order.
    Nodes(Vec<NodeRef>),
}

impl MountResult {
    fn from_nodes(nodes: Vec<NodeRef>) -> Self {
        if let [node] = nodes.as_slice() {
            return MountResult::Single(node.clone());
        }
        MountResult::Nodes(nodes)
    }

    pub fn single(&self) -> Option<&NodeRef> {
        match self {
            MountResult::Single(node) => Some(node),
            MountResult::Nodes(_) => None,
        }
    }

    pub fn nodes(&self) -> Vec<NodeRef> {
        match self {
            MountResult::Single(node) => vec![node.clone()],
            MountResult::Nodes(nodes) => nodes.clone(),
        }
    }

    pub fn into_nodes(self) -> Vec<NodeRef> {
        match self {
            MountResult::Single(node) => vec![node],
            MountResult::Nodes(nodes) => nodes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MountResult::Single(_) => 1,
            MountResult::Nodes(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text_content(&self) -> String {
        self.nodes().iter().map(NodeRef::text_content).collect()
    }

    /// Markup of the top-level nodes, concatenated.
    pub fn to_html(&self) -> String {
        self.nodes().iter().map(outer_html).collect()
    }
}

/// Render `value` into `container` with the default configuration.
///
/// See [`render_with`].
pub fn render(value: impl Into<Value>, container: Option<&NodeRef>) -> MountResult {
    let mut ctx = RenderContext::new();
    render_with(value, container, &mut ctx)
}

/// Render `value` into `container`, replacing its previous children.
///
/// Without a container (or with one that cannot hold children) the value is
/// rendered into a throwaway fragment and the resulting nodes are returned
/// detached.
///
/// - a template is instantiated and resolved
/// - a node is appended as-is, without copying
/// - a list mounts each item in order
/// - a primitive becomes the container's text
///
/// Attribute-position directives run after everything is mounted.
///
/// # Example
///
/// ```rust
/// use vanilla_dom::{NodeRef, inner_html};
/// use vanilla_ui::{html, render};
///
/// let container = NodeRef::element("main");
/// let result = render(html!(["<h1>", "</h1>"], "Hi"), Some(&container));
///
/// assert_eq!(inner_html(&container), "<h1>Hi</h1>");
/// assert!(result.single().unwrap().parent().unwrap().ptr_eq(&container));
/// ```
pub fn render_with(
    value: impl Into<Value>,
    container: Option<&NodeRef>,
    ctx: &mut RenderContext,
) -> MountResult {
    let value = value.into();
    let (target, detached) = match container {
        Some(container) if container.is_container() => (container.clone(), false),
        Some(container) => {
            tracing::debug!(
                kind = ?container.node_type(),
                "Container cannot hold children; rendering detached"
            );
            (NodeRef::fragment(), true)
        }
        None => (NodeRef::fragment(), true),
    };

    target.clear_children();
    let mut scheduler = AttachmentScheduler::new();
    match value {
        Value::Template(_) | Value::Node(_) | Value::List(_) => {
            mount(value, &target, ctx, &mut scheduler)
        }
        Value::Directive(_) => {
            tracing::debug!("A directive has nothing to render at the top level");
        }
        primitive => target.set_text_content(&primitive.to_text()),
    }
    scheduler.flush(&target, ctx);

    let nodes = if detached {
        target.take_children()
    } else {
        target.children()
    };
    tracing::trace!(nodes = nodes.len(), detached, "Render complete");
    MountResult::from_nodes(nodes)
}

fn mount(value: Value, target: &NodeRef, ctx: &mut RenderContext, scheduler: &mut AttachmentScheduler) {
    let result = match value {
        Value::Template(template) => build_into(&template, target, ctx, scheduler),
        Value::Node(node) => target.append_child(&node),
        Value::List(items) => {
            for item in items {
                mount(item, target, ctx, scheduler);
            }
            Ok(())
        }
        Value::Directive(_) => Ok(()),
        primitive => {
            let text = primitive.to_text();
            if text.is_empty() {
                Ok(())
            } else {
                target.append_child(&NodeRef::text(text))
            }
        }
    };
    if let Err(err) = result {
        ctx.error(TREE_OPERATION_FAILED, format!("Could not mount value: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html;
    use pretty_assertions::assert_eq;
    use vanilla_dom::inner_html;

    #[test]
    fn test_single_root_is_returned_as_single() {
        let container = NodeRef::element("div");
        let result = render(html!(["<p>x</p>"]), Some(&container));
        assert!(result.single().unwrap().ptr_eq(&container.first_child().unwrap()));
    }

    #[test]
    fn test_multiple_roots() {
        let container = NodeRef::element("div");
        let result = render(html!(["<p>a</p><p>b</p>"]), Some(&container));
        assert!(result.single().is_none());
        assert_eq!(result.len(), 2);
        assert_eq!(result.to_html(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_previous_children_are_replaced() {
        let container = NodeRef::element("div");
        render(html!(["<p>old</p>"]), Some(&container));
        render(html!(["<p>new</p>"]), Some(&container));
        assert_eq!(inner_html(&container), "<p>new</p>");
    }

    #[test]
    fn test_without_container_nodes_are_detached() {
        let result = render(html!(["<p>a</p><p>b</p>"]), None);
        let nodes = result.into_nodes();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.parent().is_none()));
    }

    #[test]
    fn test_text_container_falls_back_to_detached() {
        let text = NodeRef::text("keep");
        let result = render(html!(["<b></b>"]), Some(&text));
        assert_eq!(text.data().as_deref(), Some("keep"));
        assert!(result.single().unwrap().parent().is_none());
    }

    #[test]
    fn test_primitive_sets_text() {
        let container = NodeRef::element("span");
        container.append_child(&NodeRef::element("b")).unwrap();
        let result = render(Value::Int(42), Some(&container));
        assert_eq!(inner_html(&container), "42");
        assert_eq!(result.text_content(), "42");
    }

    #[test]
    fn test_null_empties_container() {
        let container = NodeRef::element("span");
        container.append_child(&NodeRef::text("x")).unwrap();
        let result = render(Value::Null, Some(&container));
        assert!(result.is_empty());
        assert_eq!(container.child_count(), 0);
    }

    #[test]
    fn test_top_level_list_keeps_every_item() {
        let container = NodeRef::element("ul");
        let items = vec![html!(["<li>1</li>"]), html!(["<li>2</li>"])];
        let result = render(items, Some(&container));
        assert_eq!(result.len(), 2);
        assert_eq!(inner_html(&container), "<li>1</li><li>2</li>");
    }

    #[test]
    fn test_top_level_node_is_moved_not_copied() {
        let node = NodeRef::element("canvas");
        let container = NodeRef::element("div");
        let result = render(&node, Some(&container));
        assert!(result.single().unwrap().ptr_eq(&node));
        assert!(node.parent().unwrap().ptr_eq(&container));
    }

    #[test]
    fn test_container_inside_rendered_node_is_reported() {
        let container = NodeRef::element("div");
        let outer = NodeRef::element("section");
        outer.append_child(&container).unwrap();

        let mut ctx = RenderContext::new();
        render_with(&outer, Some(&container), &mut ctx);
        assert!(ctx.diagnostics.has_code(TREE_OPERATION_FAILED));
        assert_eq!(container.child_count(), 0);
    }
}
