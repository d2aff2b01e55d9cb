/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * AST transforms for the render pipeline.
 */

//! AST transforms for the render pipeline.
//!
//! - [`BibliographyTransform`] - Resolves citations into bibliography sections
//!
//! These transforms implement [`AstTransform`](crate::transform::AstTransform) and
//! can be added to a [`TransformPipeline`](crate::transform::TransformPipeline).

pub mod bibliography;

pub use bibliography::BibliographyTransform;
