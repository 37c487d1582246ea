/*
 * css.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Style-sheet text built with the same literal/value convention as
//! [`crate::html`], but as plain concatenation. No placeholders are involved.

use crate::value::Value;

/// Concatenate `segments` with the text form of `values`.
///
/// ```rust
/// use vanilla_ui::{Value, css};
///
/// let sheet = css(&[":host { gap: ", "px; }"], vec![Value::Int(8)]);
/// assert_eq!(sheet, ":host { gap: 8px; }");
/// ```
pub fn css<S: AsRef<str>>(segments: &[S], values: Vec<Value>) -> String {
    let mut out = String::new();
    let mut values = values.into_iter();
    for segment in segments {
        out.push_str(segment.as_ref());
        if let Some(value) = values.next() {
            out.push_str(&css_text(&value));
        }
    }
    for value in values {
        out.push_str(&css_text(&value));
    }
    out
}

fn css_text(value: &Value) -> String {
    match value {
        Value::List(items) => items.iter().map(css_text).collect(),
        Value::Template(template) => template.markup().to_string(),
        other => other.to_text(),
    }
}

/// Macro form of [`css()`], mirroring [`html!`](crate::html!).
#[macro_export]
macro_rules! css {
    ([$($segment:expr),* $(,)?] $(, $value:expr)* $(,)?) => {
        $crate::css(
            &[$($segment),*] as &[&str],
            vec![$($crate::Value::from($value)),*],
        )
    };
}
