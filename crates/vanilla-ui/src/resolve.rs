/*
 * resolve.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Content placeholder resolution.
//!
//! Each content placeholder in an instantiated fragment is swapped for the
//! node(s) its value stands for. Nested templates run through the same
//! pipeline in a scratch container and their nodes are moved into place.

use vanilla_dom::NodeRef;

use crate::attach::AttachmentScheduler;
use crate::context::RenderContext;
use crate::diagnostics::{MARKER_DETACHED, TREE_OPERATION_FAILED};
use crate::instantiate::instantiate;
use crate::marker;
use crate::template::TemplateResult;
use crate::value::{DirectiveContext, Value};

/// Instantiate `template`, resolve its placeholders and append the result to
/// `container`.
///
/// Attribute placeholders are queued on `scheduler`; the caller decides when
/// to flush it.
pub fn build_into(
    template: &TemplateResult,
    container: &NodeRef,
    ctx: &mut RenderContext,
    scheduler: &mut AttachmentScheduler,
) -> vanilla_dom::Result<()> {
    for diagnostic in template.diagnostics() {
        ctx.report(diagnostic.clone());
    }

    let fragment = instantiate(template.markup(), &ctx.config);
    if !template.is_static() {
        scheduler.collect(template, &fragment, ctx);
        resolve_content(template, &fragment, container, ctx, scheduler);
    }
    container.append_child(&fragment)
}

/// Content placeholders in `fragment`, in document order, with the index of
/// the value each one stands for.
pub fn content_markers(fragment: &NodeRef) -> Vec<(NodeRef, usize)> {
    fragment
        .descendants()
        .into_iter()
        .filter(|node| node.is_comment())
        .filter_map(|node| {
            let index = node.data().and_then(|data| marker::parse_content_data(&data))?;
            Some((node, index))
        })
        .collect()
}

/// Replace every content placeholder in `fragment` with its value.
///
/// Placeholders are collected up front, so nodes inserted along the way are
/// never scanned for placeholders of this template.
pub fn resolve_content(
    template: &TemplateResult,
    fragment: &NodeRef,
    root_container: &NodeRef,
    ctx: &mut RenderContext,
    scheduler: &mut AttachmentScheduler,
) {
    for (placeholder, index) in content_markers(fragment) {
        let Some(parent) = placeholder.parent() else {
            ctx.warn(
                MARKER_DETACHED,
                format!("Placeholder for value {index} was removed before it was resolved"),
            );
            continue;
        };
        let value = template
            .marker_values()
            .get(index)
            .cloned()
            .unwrap_or(Value::Null);

        let value = match value {
            Value::Directive(directive) => directive.call(&DirectiveContext::Content {
                marker: placeholder.clone(),
                parent,
                index,
                root_container: root_container.clone(),
                fragment: fragment.clone(),
            }),
            other => other,
        };

        // A directive may have moved or removed the placeholder.
        let Some(parent) = placeholder.parent() else {
            ctx.warn(
                MARKER_DETACHED,
                format!("Placeholder for value {index} was removed by its directive"),
            );
            continue;
        };

        if let Err(err) = place(value, &placeholder, &parent, ctx, scheduler) {
            ctx.error(
                TREE_OPERATION_FAILED,
                format!("Could not resolve value {index}: {err}"),
            );
        }
    }
}

fn place(
    value: Value,
    placeholder: &NodeRef,
    parent: &NodeRef,
    ctx: &mut RenderContext,
    scheduler: &mut AttachmentScheduler,
) -> vanilla_dom::Result<()> {
    match value {
        Value::Template(template) => {
            let scratch = NodeRef::fragment();
            build_into(&template, &scratch, ctx, scheduler)?;
            parent.replace_child(&scratch, placeholder)
        }
        Value::List(items) => {
            for item in items {
                let node = list_item_node(item, ctx, scheduler)?;
                parent.insert_before(&node, Some(placeholder))?;
            }
            parent.remove_child(placeholder)
        }
        Value::Node(node) => parent.replace_child(&node.deep_clone(), placeholder),
        other => parent.replace_child(&NodeRef::text(other.to_text()), placeholder),
    }
}

/// The node (or fragment) a list item contributes. Nested lists are not
/// expanded; they contribute their text form.
fn list_item_node(
    item: Value,
    ctx: &mut RenderContext,
    scheduler: &mut AttachmentScheduler,
) -> vanilla_dom::Result<NodeRef> {
    match item {
        Value::Template(template) => {
            let scratch = NodeRef::fragment();
            build_into(&template, &scratch, ctx, scheduler)?;
            Ok(scratch)
        }
        Value::Node(node) => Ok(node.deep_clone()),
        other => Ok(NodeRef::text(other.to_text())),
    }
}
