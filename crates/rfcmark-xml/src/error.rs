//! Error types for XML parsing.

use rfcmark_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use thiserror::Error;

/// Result type alias for rfcmark-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// XML syntax error reported by quick-xml.
    #[error("XML syntax error: {message}")]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<usize>,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, position: usize },

    /// Mismatched end tag.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag {
        expected: String,
        found: String,
        position: usize,
    },

    /// Closing tag without an open element.
    #[error("Invalid XML structure: {message}")]
    InvalidStructure { message: String },

    /// No root element.
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// More than one root element.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots { position: usize },

    /// Failure while serializing a tree.
    #[error("Failed to write XML: {0}")]
    Write(String),
}

impl Error {
    /// Convert this error to a diagnostic with the matching R-1-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            Error::XmlSyntax { message, position } => {
                let mut builder = DiagnosticMessageBuilder::error("XML Syntax Error")
                    .with_code("R-1-1")
                    .problem(message.clone());
                if let Some(pos) = position {
                    builder = builder.add_info(format!("Error at byte offset {}", pos));
                }
                builder.build()
            }
            Error::UnexpectedEof { expected, position } => {
                DiagnosticMessageBuilder::error("Unexpected End of XML Input")
                    .with_code("R-1-2")
                    .problem(format!(
                        "The XML document ended unexpectedly; expected {}",
                        expected
                    ))
                    .add_info(format!("Unclosed element starts at byte offset {}", position))
                    .build()
            }
            Error::MismatchedEndTag {
                expected,
                found,
                position,
            } => DiagnosticMessageBuilder::error("Mismatched XML End Tag")
                .with_code("R-1-3")
                .problem(format!(
                    "End tag </{}> does not match start tag <{}>",
                    found, expected
                ))
                .add_detail(format!("Expected: </{}>", expected))
                .add_detail(format!("Found: </{}>", found))
                .add_info(format!("Start tag at byte offset {}", position))
                .add_hint("Check that all opening tags have matching closing tags?")
                .build(),
            Error::InvalidStructure { message } => {
                DiagnosticMessageBuilder::error("Invalid XML Structure")
                    .with_code("R-1-4")
                    .problem(message.clone())
                    .build()
            }
            Error::EmptyDocument => DiagnosticMessageBuilder::error("Empty XML Document")
                .with_code("R-1-5")
                .problem("The XML document contains no root element")
                .build(),
            Error::MultipleRoots { position } => {
                DiagnosticMessageBuilder::error("Multiple XML Root Elements")
                    .with_code("R-1-6")
                    .problem("The XML document contains multiple root elements")
                    .add_info(format!("Second root starts at byte offset {}", position))
                    .build()
            }
            Error::Write(message) => DiagnosticMessageBuilder::error("XML Write Error")
                .with_code("R-1-7")
                .problem(message.clone())
                .build(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
