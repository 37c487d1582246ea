/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render configuration.

use serde::Deserialize;
use thiserror::Error;

/// Options controlling how templates are instantiated and how problems are
/// reported.
///
/// Every field has a default, so an embedding application can load a partial
/// configuration from its own settings:
///
/// ```rust
/// use vanilla_ui::RenderConfig;
///
/// let config = RenderConfig::from_json(r#"{ "log_diagnostics": false }"#).unwrap();
/// assert!(config.collapse_whitespace);
/// assert!(!config.log_diagnostics);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Drop whitespace runs that sit strictly between `>` and the next `<`.
    pub collapse_whitespace: bool,

    /// Emit every diagnostic through `tracing` as well as collecting it.
    pub log_diagnostics: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            log_diagnostics: true,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Errors that can occur while loading a [`RenderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid render configuration: {0}")]
    Json(#[from] serde_json::Error),
}
