//! Structured diagnostic messages for rfcmark.
//!
//! Diagnostics follow a tidyverse-like layout: a short title, an optional
//! problem statement, a bulleted list of details and a list of hints. Every
//! diagnostic produced by the workspace carries a stable code of the form
//! `R-<subsystem>-<number>`:
//!
//! - `R-1-*`: XML syntax and structure
//! - `R-2-*`: reference record decoding
//! - `R-3-*`: bibliography resolution
//!
//! ```
//! use rfcmark_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Reference kept verbatim")
//!     .with_code("R-3-1")
//!     .problem("The reference block for `RFC2119` could not be decoded")
//!     .add_hint("Check that the block contains a <front> element?")
//!     .build();
//!
//! assert!(warning.to_text().starts_with("Warning [R-3-1]: Reference kept verbatim"));
//! ```

pub mod builder;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
