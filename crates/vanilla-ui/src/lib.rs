/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template builder and render engine.
//!
//! A template is a list of literal segments interleaved with values. The
//! engine turns it into a tree of [`vanilla_dom`] nodes mounted into a
//! container:
//!
//! 1. [`html`] classifies each value. Primitives are folded into the markup;
//!    templates, lists, nodes and directives get a placeholder, either a
//!    comment between nodes or an attribute name inside a start tag.
//! 2. The markup is normalized and parsed into a detached fragment.
//! 3. Content placeholders are replaced by their values, recursively for
//!    nested templates.
//! 4. The fragment is mounted and attribute-position directives run against
//!    their now-mounted elements.
//!
//! Nothing in the pipeline fails. Problems are collected as
//! [`Diagnostic`]s on the [`RenderContext`] and logged through `tracing`.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use vanilla_dom::{NodeRef, inner_html};
//! use vanilla_ui::{Directive, html, render};
//!
//! let clicked = Rc::new(RefCell::new(Vec::new()));
//! let log = clicked.clone();
//! let on_mount = Directive::on_attach(move |el| {
//!     log.borrow_mut().push(el.tag_name().unwrap_or_default());
//! });
//!
//! let items: Vec<_> = ["a", "b"].iter().map(|s| html!(["<li>", "</li>"], *s)).collect();
//! let page = html!(["<ul ", ">", "</ul>"], on_mount, items);
//!
//! let container = NodeRef::element("main");
//! render(page, Some(&container));
//!
//! assert_eq!(inner_html(&container), "<ul><li>a</li><li>b</li></ul>");
//! assert_eq!(*clicked.borrow(), vec!["ul".to_string()]);
//! ```

pub mod attach;
pub mod component;
pub mod config;
pub mod context;
pub mod css;
pub mod diagnostics;
pub mod instantiate;
pub mod marker;
pub mod normalize;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod template;
pub mod value;

pub use attach::AttachmentScheduler;
pub use component::{Component, StateStore, Subscription};
pub use config::{ConfigError, RenderConfig};
pub use context::RenderContext;
pub use css::css;
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind};
pub use instantiate::instantiate;
pub use marker::{Marker, MarkerPosition};
pub use normalize::{normalize, normalize_with};
pub use render::{MountResult, render, render_with};
pub use resolve::{build_into, resolve_content};
pub use scan::{Position, Scanner};
pub use template::{TemplateResult, html};
pub use value::{Classification, Directive, DirectiveContext, Value, classify};
