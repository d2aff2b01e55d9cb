//! Error types for rfcmark-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RfcmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] rfcmark_xml::Error),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("{0}")]
    Other(String),
}

impl RfcmarkError {
    /// Create an error from any message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RfcmarkError>;
