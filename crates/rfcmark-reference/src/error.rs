//! Error types for reference decoding.

use rfcmark_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use thiserror::Error;

/// Result type alias for rfcmark-reference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or encoding a reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not well-formed XML.
    #[error("{0}")]
    Xml(#[from] rfcmark_xml::Error),

    /// Root element is not `<reference>`.
    #[error("expected <reference> root element, found <{found}>")]
    InvalidRootElement { found: String },

    #[error("missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("missing required element <{element}> in <{parent}>")]
    MissingElement { parent: String, element: String },

    /// Character data where only elements are allowed.
    #[error("unexpected text {text:?} in <{element}>")]
    UnexpectedText { element: String, text: String },
}

impl Error {
    /// Convert this error to a diagnostic with the matching R-2-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            Error::Xml(inner) => inner.to_diagnostic(),
            Error::InvalidRootElement { found } => {
                DiagnosticMessageBuilder::error("Not a Reference")
                    .with_code("R-2-1")
                    .problem(format!("Expected a <reference> element, found <{}>", found))
                    .build()
            }
            Error::MissingAttribute { element, attribute } => {
                DiagnosticMessageBuilder::error("Missing Reference Attribute")
                    .with_code("R-2-2")
                    .problem(format!(
                        "<{}> requires the `{}` attribute",
                        element, attribute
                    ))
                    .build()
            }
            Error::MissingElement { parent, element } => {
                DiagnosticMessageBuilder::error("Missing Reference Element")
                    .with_code("R-2-3")
                    .problem(format!("<{}> must contain a <{}> element", parent, element))
                    .build()
            }
            Error::UnexpectedText { element, text } => {
                DiagnosticMessageBuilder::error("Unexpected Text in Reference")
                    .with_code("R-2-4")
                    .problem(format!("<{}> may only contain elements", element))
                    .add_detail(format!("Found text: {:?}", text.trim()))
                    .build()
            }
        }
    }
}
