/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * AST transformation pipeline infrastructure.
 */

//! AST transformation pipeline infrastructure.
//!
//! This module provides the core abstractions for AST transformations:
//!
//! - [`AstTransform`] - The trait implemented by all transformations
//! - [`TransformPipeline`] - Ordered collection of transforms to execute
//!
//! Transforms are run in a flat, ordered sequence (insertion order). Each
//! transform can mutate the document tree and report warnings through the
//! [`RenderContext`].
//!
//! # Example
//!
//! ```rust
//! use rfcmark_ast::Node;
//! use rfcmark_core::transform::{AstTransform, TransformPipeline};
//! use rfcmark_core::{RenderContext, Result};
//!
//! struct DropText;
//!
//! impl AstTransform for DropText {
//!     fn name(&self) -> &str { "drop-text" }
//!
//!     fn transform(&self, ast: &mut Node, _ctx: &mut RenderContext) -> Result<()> {
//!         if let Some(children) = ast.children_mut() {
//!             children.retain(|c| !matches!(c, Node::Text(_)));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut pipeline = TransformPipeline::new();
//! pipeline.push(Box::new(DropText));
//!
//! let mut doc = Node::Document(vec![Node::Text("x".into())]);
//! pipeline.execute(&mut doc, &mut RenderContext::new()).unwrap();
//! assert_eq!(doc, Node::Document(vec![]));
//! ```

use crate::Result;
use crate::render::RenderContext;
use rfcmark_ast::Node;

/// Trait for AST transformations.
///
/// Transforms must be `Send + Sync` so distinct documents can be
/// processed on separate threads.
pub trait AstTransform: Send + Sync {
    /// Human-readable name for this transform.
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &str;

    /// Apply the transformation to the document tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformation fails.
    fn transform(&self, ast: &mut Node, ctx: &mut RenderContext) -> Result<()>;
}

/// A pipeline of AST transforms to execute in order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn AstTransform>>,
}

impl TransformPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    ///
    /// Transforms run in the order they are added.
    pub fn push(&mut self, transform: Box<dyn AstTransform>) {
        self.transforms.push(transform);
    }

    /// Add multiple transforms to the pipeline.
    pub fn extend(&mut self, transforms: impl IntoIterator<Item = Box<dyn AstTransform>>) {
        self.transforms.extend(transforms);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Execution stops on error.
    pub fn execute(&self, ast: &mut Node, ctx: &mut RenderContext) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(ast, ctx)?;
        }

        Ok(())
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
