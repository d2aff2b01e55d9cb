/*
 * title.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Title command implementation
 */

//! Title command implementation.

use std::fs;

use anyhow::{Context, Result};

use rfcmark_ast::TitleData;
use rfcmark_core::{RenderContext, RenderOptions, TitleWriter};

/// Arguments for the title command
#[derive(Debug)]
pub struct TitleArgs {
    /// Title block (TOML)
    pub input: String,
    /// Depth of the table of contents, zero to omit
    pub toc_depth: usize,
}

/// Execute the title command
pub fn execute(args: TitleArgs) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input))?;
    println!("{}", render_title(&source, args.toc_depth)?);
    Ok(())
}

fn render_title(source: &str, toc_depth: usize) -> Result<String> {
    let title = TitleData::from_toml(source).context("Invalid title block")?;
    let ctx = RenderContext::new().with_options(RenderOptions { toc_depth });
    Ok(TitleWriter::from_context(&ctx).render(&title)?)
}
