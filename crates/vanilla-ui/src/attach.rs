/*
 * attach.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Deferred attribute-position callbacks.
//!
//! Attribute placeholders are collected from each template's own fragment
//! before its content is resolved, so placeholders that arrive with nested
//! templates can never be confused with the outer template's. Callbacks run
//! only after the whole tree is mounted.

use vanilla_dom::NodeRef;

use crate::context::RenderContext;
use crate::diagnostics::{ATTRIBUTE_MARKER_NOT_FOUND, ATTRIBUTE_VALUE_NOT_DIRECTIVE};
use crate::marker::{self, MarkerPosition};
use crate::template::TemplateResult;
use crate::value::{DirectiveContext, Value};

#[derive(Debug)]
struct PendingAttachment {
    element: NodeRef,
    attribute: String,
    index: usize,
    value: Value,
}

/// Queue of attribute-position values waiting for the tree to be mounted.
#[derive(Debug, Default)]
pub struct AttachmentScheduler {
    pending: Vec<PendingAttachment>,
}

impl AttachmentScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record every attribute placeholder of `template` that appears in
    /// `fragment`. Placeholders that appear nowhere are reported.
    pub fn collect(&mut self, template: &TemplateResult, fragment: &NodeRef, ctx: &mut RenderContext) {
        let expected: Vec<usize> = template
            .markers()
            .iter()
            .filter(|m| m.position == MarkerPosition::Attribute)
            .map(|m| m.index)
            .collect();
        if expected.is_empty() {
            return;
        }

        let mut found = Vec::new();
        for element in fragment.descendants().iter().filter(|n| n.is_element()) {
            for name in element.attribute_names() {
                let Some(index) = marker::parse_attribute_name(&name) else {
                    continue;
                };
                let Some(value) = template.marker_values().get(index) else {
                    tracing::debug!(index, "Attribute placeholder with no matching value");
                    continue;
                };
                found.push(index);
                self.pending.push(PendingAttachment {
                    element: element.clone(),
                    attribute: name,
                    index,
                    value: value.clone(),
                });
            }
        }

        for index in expected {
            if !found.contains(&index) {
                ctx.warn(
                    ATTRIBUTE_MARKER_NOT_FOUND,
                    format!("No element carries the placeholder for value {index}; it was skipped"),
                );
            }
        }
    }

    /// Run the queued callbacks in collection order. Each placeholder
    /// attribute is removed first. `container` is the node the tree was
    /// mounted into; elements no longer inside it are reported and skipped.
    pub fn flush(&mut self, container: &NodeRef, ctx: &mut RenderContext) {
        for pending in std::mem::take(&mut self.pending) {
            let PendingAttachment {
                element,
                attribute,
                index,
                value,
            } = pending;

            if element.remove_attribute(&attribute).is_none() {
                tracing::debug!(index, "Attribute placeholder already consumed");
                continue;
            }
            if !container.contains(&element) {
                ctx.warn(
                    ATTRIBUTE_MARKER_NOT_FOUND,
                    format!("The element for value {index} is no longer mounted; it was skipped"),
                );
                continue;
            }

            match value {
                Value::Directive(directive) => {
                    tracing::trace!(index, "Running attribute directive");
                    directive.call(&DirectiveContext::Attribute {
                        element: element.clone(),
                        node: element,
                    });
                }
                other => ctx.warn(
                    ATTRIBUTE_VALUE_NOT_DIRECTIVE,
                    format!(
                        "Value {index} sits inside a start tag but is a {}, not a directive; it was skipped",
                        other.kind_name()
                    ),
                ),
            }
        }
    }
}
