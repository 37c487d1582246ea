/*
 * instantiate.rs
 * Copyright (c) 2025 Posit, PBC
 */

use vanilla_dom::{NodeRef, parse_fragment};

use crate::config::RenderConfig;
use crate::normalize::normalize_with;

/// Normalize `markup`, parse it, and return a fresh detached copy of the
/// resulting fragment.
///
/// Placeholders survive as-is: content placeholders become comment nodes,
/// attribute placeholders become valueless attributes.
pub fn instantiate(markup: &str, config: &RenderConfig) -> NodeRef {
    let normalized = normalize_with(markup, config);
    tracing::trace!(markup = %normalized, "Instantiating template");
    parse_fragment(&normalized).deep_clone()
}
