/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Display-node trees for the vanilla render engine.
//!
//! This crate provides the tree the engine mounts templates into:
//!
//! - [`NodeRef`]: shared node handles with reference identity, DOM-style
//!   mutation (`append_child`, `insert_before`, `replace_child`, ...) and
//!   an explicit [`NodeRef::deep_clone`]
//! - [`parse_fragment`]: a lenient markup parser that never fails
//! - [`outer_html`] / [`inner_html`]: serialization
//! - [`select`] / [`select_all`]: simple selector queries
//!
//! # Example
//!
//! ```rust
//! use vanilla_dom::{NodeRef, inner_html, parse_fragment, select};
//!
//! let container = NodeRef::element("main");
//! let fragment = parse_fragment(r#"<h1 id="title">Hello</h1><p>World</p>"#);
//! container.append_child(&fragment).unwrap();
//!
//! assert_eq!(container.child_count(), 2);
//! assert_eq!(select(&container, "#title").unwrap().text_content(), "Hello");
//! assert_eq!(inner_html(&container), r#"<h1 id="title">Hello</h1><p>World</p>"#);
//! ```

pub mod error;
pub mod node;
pub mod parse;
pub mod select;
pub mod serialize;

pub use error::{DomError, Result};
pub use node::{Attribute, NodeRef, NodeType, VOID_ELEMENTS, is_void_element};
pub use parse::parse_fragment;
pub use select::{select, select_all};
pub use serialize::{escape_attribute, escape_text, inner_html, outer_html};
