/*
 * normalize.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markup normalization ahead of parsing.
//!
//! Four rewrites, done in one pass driven by the [`Scanner`]:
//!
//! - the markup is trimmed
//! - a `<` that does not open a tag, comment or declaration becomes `&lt;`
//! - whitespace runs in text content that sit between a `>` and the next `<`
//!   are dropped
//! - `<custom-element ... />` becomes `<custom-element ...></custom-element>`
//!   (void elements keep their `/>`)
//!
//! Whitespace inside attribute values, comments and text is never touched.

use vanilla_dom::is_void_element;

use crate::config::RenderConfig;
use crate::scan::{LexState, Scanner, Transition};

/// Normalize with the default configuration.
pub fn normalize(markup: &str) -> String {
    normalize_with(markup, &RenderConfig::default())
}

pub fn normalize_with(markup: &str, config: &RenderConfig) -> String {
    let chars: Vec<char> = markup.trim().chars().collect();
    let mut scanner = Scanner::new();
    let mut out = String::with_capacity(markup.len());

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if config.collapse_whitespace
            && ch.is_whitespace()
            && scanner.state() == LexState::Content
            && out.ends_with('>')
        {
            let run_end = chars[i..]
                .iter()
                .position(|c| !c.is_whitespace())
                .map(|offset| i + offset);
            if let Some(end) = run_end.filter(|&end| chars[end] == '<') {
                i = end;
                continue;
            }
        }

        let before = scanner.state();
        let transition = scanner.step(ch);
        if before == LexState::TagStart
            && matches!(scanner.state(), LexState::Content | LexState::TagStart)
        {
            escape_pending_lt(&mut out);
        }
        out.push(ch);
        if transition == Transition::StartTagClosed {
            expand_self_closing(&mut out, scanner.tag_name());
        }
        i += 1;
    }
    if scanner.state() == LexState::TagStart {
        escape_pending_lt(&mut out);
    }
    out
}

/// Rewrite the trailing `<` of `out`, which turned out to be text.
fn escape_pending_lt(out: &mut String) {
    if out.ends_with('<') {
        out.pop();
        out.push_str("&lt;");
    }
}

fn expand_self_closing(out: &mut String, name: &str) {
    if !out.ends_with("/>") || !is_custom_element_name(name) || is_void_element(name) {
        return;
    }
    out.truncate(out.len() - 2);
    out.push_str("></");
    out.push_str(name);
    out.push('>');
}

fn is_custom_element_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase()) && name.contains('-')
}
