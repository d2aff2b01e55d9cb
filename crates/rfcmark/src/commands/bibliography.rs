/*
 * bibliography.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Bibliography command implementation
 */

//! Bibliography command implementation.
//!
//! Reads a document tree exchanged as JSON, runs the bibliography
//! transform over it and writes the updated tree back out as JSON.
//! Diagnostics collected along the way go to stderr, as text or as one
//! JSON object per line.

use std::fs;

use anyhow::{Context, Result};
use tracing::debug;

use rfcmark_ast::Node;
use rfcmark_core::{BibliographyTransform, RenderContext, TransformPipeline};

/// Arguments for the bibliography command
#[derive(Debug)]
pub struct BibliographyArgs {
    /// Input document tree (JSON)
    pub input: String,
    /// Output file, stdout when absent
    pub output: Option<String>,
    /// Print diagnostics as JSON
    pub json: bool,
}

/// Execute the bibliography command
pub fn execute(args: BibliographyArgs) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input))?;

    let (json, ctx) = resolve(&source)?;
    for line in format_warnings(&ctx, args.json) {
        eprintln!("{}", line);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
            debug!(output = %path, "Wrote document tree");
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Run the pipeline over a JSON document tree.
///
/// Returns the updated tree as pretty-printed JSON together with the
/// context holding any warnings.
pub fn resolve(source: &str) -> Result<(String, RenderContext)> {
    let mut doc: Node = serde_json::from_str(source).context("Invalid document tree")?;

    let mut pipeline = TransformPipeline::new();
    pipeline.push(Box::new(BibliographyTransform::new()));

    let mut ctx = RenderContext::new();
    pipeline.execute(&mut doc, &mut ctx)?;

    let json = serde_json::to_string_pretty(&doc).context("Failed to serialize document tree")?;
    Ok((json, ctx))
}

/// One line per collected warning.
pub fn format_warnings(ctx: &RenderContext, json: bool) -> Vec<String> {
    ctx.warnings
        .iter()
        .map(|w| {
            if json {
                w.to_json().to_string()
            } else {
                w.to_text()
            }
        })
        .collect()
}
