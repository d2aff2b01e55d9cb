/*
 * reference.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Reference command implementation
 */

//! Reference command implementation.
//!
//! Prints the reference block at the start of a file in canonical form.
//! A block that does not decode (every `<referencegroup>` included) is
//! printed as written, with the decode error on stderr.

use std::fs;

use anyhow::{Context, Result};

use rfcmark_core::recognize_reference;
use rfcmark_reference::{decode_reference, encode_reference};

/// Arguments for the reference command
#[derive(Debug)]
pub struct ReferenceArgs {
    /// File starting with a reference block
    pub input: String,
}

/// Execute the reference command
pub fn execute(args: ReferenceArgs) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input))?;
    println!("{}", reformat(&source)?);
    Ok(())
}

fn reformat(source: &str) -> Result<String> {
    let Some(block) = recognize_reference(source.trim_start()) else {
        anyhow::bail!("Input does not start with a <reference> or <referencegroup> block");
    };

    match decode_reference(block) {
        Ok(reference) => Ok(encode_reference(&reference)?),
        Err(err) => {
            tracing::warn!(error = %err, "Keeping reference verbatim");
            eprintln!("{}", err.to_diagnostic().to_text());
            Ok(block.to_string())
        }
    }
}
