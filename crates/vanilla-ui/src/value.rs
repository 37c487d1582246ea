/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Interpolated values and their classification.

use std::fmt;
use std::rc::Rc;

use vanilla_dom::NodeRef;

use crate::template::TemplateResult;

/// A value interpolated into a template.
///
/// Primitives (`Null`, `Bool`, `Int`, `Float`, `Str`) are folded straight into
/// the markup. Everything else gets a placeholder and is resolved against the
/// instantiated tree.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Template(TemplateResult),
    List(Vec<Value>),
    Node(NodeRef),
    Directive(Directive),
}

/// How the builder treats a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Fold this text into the surrounding literal.
    Inline(String),
    /// Emit a placeholder and keep the value for resolution.
    Marker,
}

/// Decide whether `value` is inlined as text or needs a placeholder.
pub fn classify(value: &Value) -> Classification {
    if value.needs_marker() {
        Classification::Marker
    } else {
        Classification::Inline(value.to_text())
    }
}

impl Value {
    pub fn needs_marker(&self) -> bool {
        matches!(
            self,
            Value::Template(_) | Value::List(_) | Value::Node(_) | Value::Directive(_)
        )
    }

    pub fn is_primitive(&self) -> bool {
        !self.needs_marker()
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::Template(_) => "template",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Directive(_) => "directive",
        }
    }

    /// String form of the value.
    ///
    /// `Null` is empty, lists join their items with `,`, nodes give their
    /// text content. Templates and directives have no string form.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => number_text(*n),
            Value::Str(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Value::Node(node) => node.text_content(),
            Value::Template(_) | Value::Directive(_) => String::new(),
        }
    }
}

fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_text(n)
    } else {
        n.to_string()
    }
}

/// `1e+21`, `-2.5e-7`: shortest digits, explicit exponent sign.
fn exponent_text(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Context handed to a [`Directive`].
#[derive(Debug, Clone)]
pub enum DirectiveContext {
    /// The directive sits between nodes. Its return value replaces the
    /// placeholder comment `marker`.
    Content {
        marker: NodeRef,
        parent: NodeRef,
        index: usize,
        root_container: NodeRef,
        fragment: NodeRef,
    },
    /// The directive sits inside a start tag. It runs after mounting, once
    /// `element` is attached to the container. The return value is ignored.
    Attribute { element: NodeRef, node: NodeRef },
}

impl DirectiveContext {
    /// The element for attribute-position calls.
    pub fn element(&self) -> Option<&NodeRef> {
        match self {
            DirectiveContext::Attribute { element, .. } => Some(element),
            DirectiveContext::Content { .. } => None,
        }
    }
}

/// A callback value. What it receives depends on where it was interpolated.
#[derive(Clone)]
pub struct Directive(Rc<dyn Fn(&DirectiveContext) -> Value>);

impl Directive {
    pub fn new(callback: impl Fn(&DirectiveContext) -> Value + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// A directive meant for attribute position. `callback` receives the
    /// element once it is mounted. Used in content position it produces
    /// nothing.
    pub fn on_attach(callback: impl Fn(&NodeRef) + 'static) -> Self {
        Self::new(move |ctx| {
            if let Some(element) = ctx.element() {
                callback(element);
            }
            Value::Null
        })
    }

    pub fn call(&self, ctx: &DirectiveContext) -> Value {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Directive(..)")
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<TemplateResult> for Value {
    fn from(template: TemplateResult) -> Self {
        Value::Template(template)
    }
}

impl From<NodeRef> for Value {
    fn from(node: NodeRef) -> Self {
        Value::Node(node)
    }
}

impl From<&NodeRef> for Value {
    fn from(node: &NodeRef) -> Self {
        Value::Node(node.clone())
    }
}

impl From<Directive> for Value {
    fn from(directive: Directive) -> Self {
        Value::Directive(directive)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
