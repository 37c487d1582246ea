/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for tree mutations.

use thiserror::Error;

/// Errors that can occur when mutating a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The reference node is not a child of the node being mutated.
    #[error("Node is not a child of <{parent}>")]
    NotAChild { parent: String },

    /// The insertion would make a node its own ancestor.
    #[error("Cannot insert a node into itself or one of its descendants")]
    HierarchyRequest,

    /// Text and comment nodes cannot hold children.
    #[error("{kind} nodes cannot have children")]
    NotAContainer { kind: &'static str },
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, DomError>;
