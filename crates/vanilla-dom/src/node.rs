/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The display-node tree.
//!
//! A [`NodeRef`] is a cheap, clonable handle to a node. Clones share identity:
//! mutating through one handle is visible through every other, and
//! [`NodeRef::ptr_eq`] tells two handles to the same node apart from two
//! structurally equal nodes. Parents hold their children strongly, children
//! point back at their parent weakly.
//!
//! Fragments follow DocumentFragment semantics: inserting a fragment moves its
//! children (in order) into the target and leaves the fragment empty.

use crate::error::{DomError, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Element kinds that can never have children.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Check whether `name` is one of the [`VOID_ELEMENTS`] (case-insensitive).
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// A single element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Attribute value (empty for valueless attributes).
    pub value: String,
}

/// The kind of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    Fragment,
}

impl NodeType {
    fn label(self) -> &'static str {
        match self {
            NodeType::Element => "Element",
            NodeType::Text => "Text",
            NodeType::Comment => "Comment",
            NodeType::Fragment => "Fragment",
        }
    }
}

#[derive(Debug)]
enum NodeKind {
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
    Fragment,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<NodeRef>,
}

/// Shared handle to a node in a display tree.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<NodeData>>);

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef")
            .field(&crate::serialize::outer_html(self))
            .finish()
    }
}

impl NodeRef {
    fn new(kind: NodeKind) -> Self {
        NodeRef(Rc::new(RefCell::new(NodeData {
            kind,
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    /// Create a detached element. The name is lower-cased.
    pub fn element(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Element {
            name: name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(data.into()))
    }

    /// Create a detached comment node.
    pub fn comment(data: impl Into<String>) -> Self {
        Self::new(NodeKind::Comment(data.into()))
    }

    /// Create an empty fragment.
    pub fn fragment() -> Self {
        Self::new(NodeKind::Fragment)
    }

    pub fn node_type(&self) -> NodeType {
        match self.0.borrow().kind {
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::Fragment => NodeType::Fragment,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    pub fn is_comment(&self) -> bool {
        self.node_type() == NodeType::Comment
    }

    pub fn is_fragment(&self) -> bool {
        self.node_type() == NodeType::Fragment
    }

    /// Elements and fragments can hold children; text and comments cannot.
    pub fn is_container(&self) -> bool {
        matches!(self.node_type(), NodeType::Element | NodeType::Fragment)
    }

    /// The element name, or `None` for non-element nodes.
    pub fn tag_name(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// Character data of a text or comment node.
    pub fn data(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Text(data) | NodeKind::Comment(data) => Some(data.clone()),
            _ => None,
        }
    }

    /// Do both handles refer to the same node?
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.0.borrow().parent.upgrade().map(NodeRef)
    }

    /// Handles to the children, in order.
    pub fn children(&self) -> Vec<NodeRef> {
        self.0.borrow().children.clone()
    }

    pub fn first_child(&self) -> Option<NodeRef> {
        self.0.borrow().children.first().cloned()
    }

    pub fn last_child(&self) -> Option<NodeRef> {
        self.0.borrow().children.last().cloned()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn next_sibling(&self) -> Option<NodeRef> {
        let parent = self.parent()?;
        let index = parent.index_of(self)?;
        parent.0.borrow().children.get(index + 1).cloned()
    }

    fn index_of(&self, child: &NodeRef) -> Option<usize> {
        self.0
            .borrow()
            .children
            .iter()
            .position(|c| c.ptr_eq(child))
    }

    /// Is `other` this node or one of its descendants?
    pub fn contains(&self, other: &NodeRef) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// The topmost ancestor (the node itself when detached).
    pub fn root(&self) -> NodeRef {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// All descendants in document order, excluding the node itself.
    pub fn descendants(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    fn label(&self) -> String {
        match &self.0.borrow().kind {
            NodeKind::Element { name, .. } => name.clone(),
            NodeKind::Text(_) => "#text".to_string(),
            NodeKind::Comment(_) => "#comment".to_string(),
            NodeKind::Fragment => "#fragment".to_string(),
        }
    }

    fn not_a_child(&self) -> DomError {
        DomError::NotAChild {
            parent: self.label(),
        }
    }

    fn ensure_container(&self) -> Result<()> {
        if self.is_container() {
            Ok(())
        } else {
            Err(DomError::NotAContainer {
                kind: self.node_type().label(),
            })
        }
    }

    /// Append `child` as the last child, moving it out of its current parent.
    pub fn append_child(&self, child: &NodeRef) -> Result<()> {
        self.insert_before(child, None)
    }

    /// Insert `node` before `reference`, or at the end when `reference` is `None`.
    ///
    /// A fragment contributes its children instead of itself.
    pub fn insert_before(&self, node: &NodeRef, reference: Option<&NodeRef>) -> Result<()> {
        self.ensure_container()?;
        if let Some(reference) = reference {
            if self.index_of(reference).is_none() {
                return Err(self.not_a_child());
            }
        }
        if node.contains(self) {
            return Err(DomError::HierarchyRequest);
        }
        if node.is_fragment() {
            for child in node.take_children() {
                self.insert_node(&child, reference)?;
            }
            return Ok(());
        }
        self.insert_node(node, reference)
    }

    fn insert_node(&self, node: &NodeRef, reference: Option<&NodeRef>) -> Result<()> {
        // Inserting a node before itself keeps it in place.
        let reference = match reference {
            Some(r) if r.ptr_eq(node) => node.next_sibling(),
            other => other.cloned(),
        };
        node.detach();
        let index = match &reference {
            Some(r) => self.index_of(r).ok_or_else(|| self.not_a_child())?,
            None => self.child_count(),
        };
        self.0.borrow_mut().children.insert(index, node.clone());
        node.0.borrow_mut().parent = Rc::downgrade(&self.0);
        Ok(())
    }

    /// Replace the child `old` with `new`.
    pub fn replace_child(&self, new: &NodeRef, old: &NodeRef) -> Result<()> {
        if self.index_of(old).is_none() {
            return Err(self.not_a_child());
        }
        if new.ptr_eq(old) {
            return Ok(());
        }
        self.insert_before(new, Some(old))?;
        self.remove_child(old)
    }

    /// Remove `child` from this node's children.
    pub fn remove_child(&self, child: &NodeRef) -> Result<()> {
        if self.index_of(child).is_none() {
            return Err(self.not_a_child());
        }
        child.detach();
        Ok(())
    }

    /// Remove this node from its parent, if it has one.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.borrow_mut().children.retain(|c| !c.ptr_eq(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    /// Drop every child.
    pub fn clear_children(&self) {
        self.take_children();
    }

    /// Detach every child and hand them to the caller, in order.
    pub fn take_children(&self) -> Vec<NodeRef> {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in &children {
            child.0.borrow_mut().parent = Weak::new();
        }
        children
    }

    /// Get an attribute value. Names are matched case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .map(|a| a.value.clone()),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set an attribute, keeping its position if it already exists.
    ///
    /// Has no effect on non-element nodes.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        if let NodeKind::Element { attributes, .. } = &mut self.0.borrow_mut().kind {
            let name = name.to_ascii_lowercase();
            let value = value.into();
            match attributes.iter_mut().find(|a| a.name == name) {
                Some(existing) => existing.value = value,
                None => attributes.push(Attribute { name, value }),
            }
        }
    }

    /// Remove an attribute, returning its old value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        match &mut self.0.borrow_mut().kind {
            NodeKind::Element { attributes, .. } => {
                let index = attributes
                    .iter()
                    .position(|a| a.name.eq_ignore_ascii_case(name))?;
                Some(attributes.remove(index).value)
            }
            _ => None,
        }
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        match &self.0.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes.clone(),
            _ => Vec::new(),
        }
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes().into_iter().map(|a| a.name).collect()
    }

    /// Concatenated text of all descendant text nodes (the data itself for
    /// text and comment nodes).
    pub fn text_content(&self) -> String {
        if let Some(data) = self.data() {
            return data;
        }
        self.descendants()
            .iter()
            .filter(|n| n.is_text())
            .filter_map(NodeRef::data)
            .collect()
    }

    /// Replace all children with a single text node (none when `text` is empty).
    /// On text and comment nodes this replaces the data.
    pub fn set_text_content(&self, text: &str) {
        {
            let mut data = self.0.borrow_mut();
            if let NodeKind::Text(d) | NodeKind::Comment(d) = &mut data.kind {
                *d = text.to_string();
                return;
            }
        }
        self.clear_children();
        if !text.is_empty() {
            let node = NodeRef::text(text);
            self.0.borrow_mut().children.push(node.clone());
            node.0.borrow_mut().parent = Rc::downgrade(&self.0);
        }
    }

    /// A detached copy of this node and its whole subtree. The copy shares no
    /// identity with the original.
    pub fn deep_clone(&self) -> NodeRef {
        let kind = match &self.0.borrow().kind {
            NodeKind::Element { name, attributes } => NodeKind::Element {
                name: name.clone(),
                attributes: attributes.clone(),
            },
            NodeKind::Text(data) => NodeKind::Text(data.clone()),
            NodeKind::Comment(data) => NodeKind::Comment(data.clone()),
            NodeKind::Fragment => NodeKind::Fragment,
        };
        let copy = NodeRef::new(kind);
        for child in self.children() {
            let child_copy = child.deep_clone();
            child_copy.0.borrow_mut().parent = Rc::downgrade(&copy.0);
            copy.0.borrow_mut().children.push(child_copy);
        }
        copy
    }
}
