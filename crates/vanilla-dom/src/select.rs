/*
 * select.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A small selector engine for querying into rendered trees.
//!
//! Supported: type selectors (`li`, `*`), `#id`, `.class`, `[attr]`,
//! `[attr=value]` (value optionally quoted), compounds of these
//! (`a.nav[is='ui-a']`) and comma-separated lists. Combinators are not
//! supported; such selectors match nothing.

use crate::node::NodeRef;

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, node: &NodeRef) -> bool {
        let Some(tag) = node.tag_name() else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if node.attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class = node.attribute("class").unwrap_or_default();
            let present: Vec<&str> = class.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }
        self.attributes.iter().all(|(name, value)| {
            match (node.attribute(name), value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => &actual == expected,
            }
        })
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn parse_compound(source: &str) -> Option<Compound> {
    let chars: Vec<char> = source.trim().chars().collect();
    if chars.is_empty() {
        return None;
    }
    let mut compound = Compound::default();
    let mut i = 0usize;

    if chars[0] == '*' {
        i = 1;
    } else if is_ident_char(chars[0]) {
        compound.tag = Some(read_ident(&chars, &mut i).to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                compound.id = Some(read_ident(&chars, &mut i));
            }
            '.' => {
                i += 1;
                compound.classes.push(read_ident(&chars, &mut i));
            }
            '[' => {
                let close = chars[i..].iter().position(|&c| c == ']')? + i;
                let inner: String = chars[i + 1..close].iter().collect();
                let (name, value) = match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(['"', '\'']);
                        (name.trim().to_ascii_lowercase(), Some(value.to_string()))
                    }
                    None => (inner.trim().to_ascii_lowercase(), None),
                };
                if name.is_empty() {
                    return None;
                }
                compound.attributes.push((name, value));
                i = close + 1;
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_selector(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(parse_compound).collect()
}

/// All elements below `root` matching `selector`, in document order.
pub fn select_all(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
    let Some(compounds) = parse_selector(selector) else {
        tracing::debug!(selector, "Unsupported selector");
        return Vec::new();
    };
    root.descendants()
        .into_iter()
        .filter(|node| compounds.iter().any(|c| c.matches(node)))
        .collect()
}

/// The first element below `root` matching `selector`.
pub fn select(root: &NodeRef, selector: &str) -> Option<NodeRef> {
    select_all(root, selector).into_iter().next()
}
