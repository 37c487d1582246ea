/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template construction.
//!
//! [`html`] interleaves literal segments with interpolated values. Primitive
//! values are folded into the markup. Structured values get a placeholder
//! whose form depends on where it lands, as tracked by the [`Scanner`].

use vanilla_dom::{escape_attribute, escape_text};

use crate::diagnostics::{Diagnostic, VALUE_IN_ATTRIBUTE_VALUE};
use crate::marker::{Marker, MarkerPosition};
use crate::scan::{Position, Scanner};
use crate::value::{Classification, Value, classify};

/// An unrendered template: markup with placeholders plus the values that
/// fill them.
#[derive(Debug, Clone)]
pub struct TemplateResult {
    segments: Vec<String>,
    marker_values: Vec<Value>,
    markers: Vec<Marker>,
    markup: String,
    diagnostics: Vec<Diagnostic>,
}

impl TemplateResult {
    /// Literal chunks with primitives folded in as their plain string form.
    /// Escaping only happens in [`TemplateResult::markup`]. There is always
    /// one more segment than there are marker values.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn marker_values(&self) -> &[Value] {
        &self.marker_values
    }

    /// The placeholder emitted for each marker value, in order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Segments interleaved with placeholder tokens.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Problems found while building, reported again on every render.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when no value needed a placeholder.
    pub fn is_static(&self) -> bool {
        self.marker_values.is_empty()
    }
}

/// Build a template from literal `segments` and interpolated `values`.
///
/// `segments` should hold one more entry than `values`. Missing segments are
/// treated as empty and surplus segments are appended to the last one.
///
/// # Example
///
/// ```rust
/// use vanilla_ui::{Value, html};
///
/// let template = html(&["<p>", " of ", "</p>"], vec![Value::Int(3), Value::from("5")]);
/// assert_eq!(template.markup(), "<p>3 of 5</p>");
/// assert!(template.is_static());
/// ```
pub fn html<S: AsRef<str>>(segments: &[S], values: Vec<Value>) -> TemplateResult {
    let literals = align_segments(segments, values.len());
    let mut builder = Builder::default();

    let mut literals = literals.iter();
    if let Some(first) = literals.next() {
        builder.literal(first);
    }
    for (value, literal) in values.into_iter().zip(literals) {
        builder.value(value);
        builder.literal(literal);
    }
    builder.finish()
}

fn align_segments<S: AsRef<str>>(segments: &[S], value_count: usize) -> Vec<String> {
    let expected = value_count + 1;
    let mut literals: Vec<String> = segments.iter().map(|s| s.as_ref().to_string()).collect();
    if literals.len() != expected {
        tracing::debug!(
            segments = literals.len(),
            values = value_count,
            "Segment count does not match value count"
        );
    }
    if literals.len() > expected {
        let surplus: String = literals.drain(expected..).collect();
        literals[expected - 1].push_str(&surplus);
    }
    literals.resize(expected, String::new());
    literals
}

/// Escape `text` for content position. Whitespace-only text is written as
/// character references so normalization cannot collapse it.
fn content_text(text: &str) -> String {
    if !text.is_empty() && text.chars().all(char::is_whitespace) {
        return text.chars().map(|c| format!("&#x{:x};", u32::from(c))).collect();
    }
    escape_text(text)
}

#[derive(Default)]
struct Builder {
    scanner: Scanner,
    current: String,
    segments: Vec<String>,
    markup: String,
    marker_values: Vec<Value>,
    markers: Vec<Marker>,
    diagnostics: Vec<Diagnostic>,
}

impl Builder {
    fn literal(&mut self, text: &str) {
        self.inline(text, text);
    }

    /// Fold a primitive in: `plain` into the segment, `escaped` into the
    /// markup.
    fn inline(&mut self, plain: &str, escaped: &str) {
        self.scanner.feed(escaped);
        self.current.push_str(plain);
        self.markup.push_str(escaped);
    }

    fn value(&mut self, value: Value) {
        let position = self.scanner.position();
        match (classify(&value), position) {
            (Classification::Inline(text), Position::Content) => {
                self.inline(&text, &content_text(&text))
            }
            (Classification::Inline(text), Position::AttributeValue) => {
                self.inline(&text, &escape_attribute(&text))
            }
            (Classification::Inline(text), Position::Attribute | Position::Inert) => {
                self.literal(&text)
            }
            (Classification::Marker, Position::Content) => {
                self.marker(value, MarkerPosition::Content)
            }
            (Classification::Marker, Position::Attribute) => {
                self.marker(value, MarkerPosition::Attribute)
            }
            (Classification::Marker, Position::AttributeValue) => {
                self.diagnostics.push(Diagnostic::warning(
                    VALUE_IN_ATTRIBUTE_VALUE,
                    format!(
                        "A {} cannot be interpolated inside an attribute value; it was left out",
                        value.kind_name()
                    ),
                ));
            }
            (Classification::Marker, Position::Inert) => {
                tracing::debug!(
                    kind = value.kind_name(),
                    "Dropping value interpolated inside a comment or declaration"
                );
            }
        }
    }

    fn marker(&mut self, value: Value, position: MarkerPosition) {
        let marker = Marker {
            position,
            index: self.marker_values.len(),
        };
        self.segments.push(std::mem::take(&mut self.current));

        let token = marker.token();
        self.scanner.feed(&token);
        self.markup.push_str(&token);

        self.marker_values.push(value);
        self.markers.push(marker);
    }

    fn finish(mut self) -> TemplateResult {
        self.segments.push(self.current);
        TemplateResult {
            segments: self.segments,
            marker_values: self.marker_values,
            markers: self.markers,
            markup: self.markup,
            diagnostics: self.diagnostics,
        }
    }
}

/// Build a [`TemplateResult`] from a list of literal segments followed by
/// the interpolated values. Each value goes through [`Value::from`].
///
/// ```rust
/// use vanilla_ui::html;
///
/// let items = vec![html!(["<li>a</li>"]), html!(["<li>b</li>"])];
/// let template = html!(["<ul>", "</ul>"], items);
/// assert_eq!(template.marker_values().len(), 1);
/// ```
#[macro_export]
macro_rules! html {
    ([$($segment:expr),* $(,)?] $(, $value:expr)* $(,)?) => {
        $crate::html(
            &[$($segment),*] as &[&str],
            vec![$($crate::Value::from($value)),*],
        )
    };
}
