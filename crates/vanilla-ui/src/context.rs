/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Per-call render context.
//!
//! [`RenderContext`] is threaded through every stage of a render call. It
//! carries the [`RenderConfig`] and collects the diagnostics the stages report.

use crate::config::RenderConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind};

#[derive(Debug, Default)]
pub struct RenderContext {
    pub config: RenderConfig,
    pub diagnostics: DiagnosticCollector,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Record a diagnostic, logging it unless logging is switched off.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.config.log_diagnostics {
            match diagnostic.kind {
                DiagnosticKind::Warning => {
                    tracing::warn!(code = diagnostic.code, "{}", diagnostic.message)
                }
                DiagnosticKind::Error => {
                    tracing::error!(code = diagnostic.code, "{}", diagnostic.message)
                }
            }
        }
        self.diagnostics.add(diagnostic);
    }

    pub fn warn(&mut self, code: &'static str, message: impl Into<String>) {
        self.report(Diagnostic::warning(code, message));
    }

    pub fn error(&mut self, code: &'static str, message: impl Into<String>) {
        self.report(Diagnostic::error(code, message));
    }
}
