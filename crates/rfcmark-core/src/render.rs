/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render context for pipeline execution.
 */

//! Render context for pipeline execution.
//!
//! The `RenderContext` is the mutable state passed through all transforms.
//! Transforms report non-fatal problems by pushing diagnostics into
//! [`RenderContext::warnings`]; the caller decides how to display them.

use rfcmark_error_reporting::DiagnosticMessage;

/// Options for rendering
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Depth of the table of contents written into `<rfc tocDepth>`.
    /// Zero leaves the attribute out.
    pub toc_depth: usize,
}

/// Context for a single document render operation.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// Render options
    pub options: RenderOptions,

    /// Non-fatal warnings collected during transforms
    pub warnings: Vec<DiagnosticMessage>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a non-fatal warning diagnostic.
    ///
    /// Warnings are collected during transforms and can be displayed
    /// to the user after rendering completes. They don't stop rendering.
    pub fn add_warning(&mut self, warning: DiagnosticMessage) {
        self.warnings.push(warning);
    }

    /// Whether any collected warning carries the given code.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings
            .iter()
            .any(|w| w.code.as_deref() == Some(code))
    }
}
