/*
 * marker.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Placeholder tokens.
//!
//! Tokens carry a per-process nonce so they cannot collide with markup an
//! application writes itself. Content placeholders are comments,
//! `<!--vanilla-<nonce>:<index>-->`. Attribute placeholders are bare
//! attribute names, `vanilla-<nonce>-<index>`.

use once_cell::sync::Lazy;

const PREFIX: &str = "vanilla";

static NONCE: Lazy<String> = Lazy::new(|| {
    let mut nonce = uuid::Uuid::new_v4().simple().to_string();
    nonce.truncate(12);
    nonce
});

/// The per-process nonce embedded in every token.
pub fn nonce() -> &'static str {
    NONCE.as_str()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPosition {
    Content,
    Attribute,
}

/// A placeholder recorded by the template builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub position: MarkerPosition,
    /// Index into the template's marker values.
    pub index: usize,
}

impl Marker {
    pub fn content(index: usize) -> Self {
        Self {
            position: MarkerPosition::Content,
            index,
        }
    }

    pub fn attribute(index: usize) -> Self {
        Self {
            position: MarkerPosition::Attribute,
            index,
        }
    }

    /// The markup emitted for this placeholder. Attribute tokens are padded
    /// with spaces so they never fuse with a neighbouring attribute.
    pub fn token(&self) -> String {
        match self.position {
            MarkerPosition::Content => format!("<!--{}-->", content_data(self.index)),
            MarkerPosition::Attribute => format!(" {} ", attribute_name(self.index)),
        }
    }
}

/// Comment text of the content placeholder for `index`.
pub fn content_data(index: usize) -> String {
    format!("{PREFIX}-{}:{index}", nonce())
}

/// Attribute name of the attribute placeholder for `index`.
pub fn attribute_name(index: usize) -> String {
    format!("{PREFIX}-{}-{index}", nonce())
}

/// Index carried by a content placeholder's comment text, if it is one.
pub fn parse_content_data(data: &str) -> Option<usize> {
    parse_index(data, ':')
}

/// Index carried by an attribute placeholder's name, if it is one.
pub fn parse_attribute_name(name: &str) -> Option<usize> {
    parse_index(name, '-')
}

fn parse_index(token: &str, separator: char) -> Option<usize> {
    let rest = token.strip_prefix(PREFIX)?.strip_prefix('-')?;
    let rest = rest.strip_prefix(nonce())?.strip_prefix(separator)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}
