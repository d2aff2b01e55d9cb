//! Command implementations for the rfcmark CLI
//!
//! Each command module handles the CLI interface and delegates to
//! rfcmark-core for the actual work.

pub mod bibliography;
pub mod reference;
pub mod title;
