/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostics reported while building and rendering templates.
//!
//! The engine never fails a render. Anything that goes wrong along the way is
//! recorded as a [`Diagnostic`] and the offending value is skipped.

use std::fmt;

/// A value that needs a placeholder was written inside a quoted attribute value.
pub const VALUE_IN_ATTRIBUTE_VALUE: &str = "V-1-1";

/// An attribute-position marker has no element to attach to.
pub const ATTRIBUTE_MARKER_NOT_FOUND: &str = "V-1-2";

/// A value in attribute position is not a directive.
pub const ATTRIBUTE_VALUE_NOT_DIRECTIVE: &str = "V-1-3";

/// A content placeholder was removed from the tree before it was resolved.
pub const MARKER_DETACHED: &str = "V-1-4";

/// A tree mutation failed.
pub const TREE_OPERATION_FAILED: &str = "V-1-5";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Warning,
    Error,
}

/// A single problem found during building or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Stable code, one of the `V-*` constants in this module.
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Collector for diagnostics produced during one render call.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if any errors were collected (warnings don't count).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }

    /// Check if a diagnostic with `code` was collected.
    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}
