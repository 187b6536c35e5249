use std::{fmt, io};

use quick_xml::Error as XmlError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide error type.
///
/// Recoverable resolution conditions (missing files, malformed fragments) are
/// handled inside the resolver and logged rather than surfaced through this
/// type; only structural violations and caller-facing parse/serialize failures
/// propagate as `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum UispecError {
    #[error("Codec error: {0}")]
    Codec(String),
    #[error("File system error: {0}")]
    Io(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)serialization error: {0}")]
    Serialization(String),
    #[error("Structural violation: {0}")]
    Structural(String),
}

impl From<io::Error> for UispecError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => UispecError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => UispecError::PermissionDenied,
            _ => UispecError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<XmlError> for UispecError {
    fn from(x: XmlError) -> Self {
        UispecError::Codec(format!("{x}"))
    }
}

impl From<fmt::Error> for UispecError {
    fn from(x: fmt::Error) -> Self {
        UispecError::Codec(format!("{x}"))
    }
}

impl From<std::string::FromUtf8Error> for UispecError {
    fn from(x: std::string::FromUtf8Error) -> Self {
        UispecError::Serialization(format!("Invalid UTF-8 in generated output: {x}"))
    }
}

impl From<uuid::Error> for UispecError {
    fn from(x: uuid::Error) -> Self {
        UispecError::Serialization(format!("UUID conversion failed: {x}"))
    }
}
