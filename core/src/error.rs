//! Error types for the posts client.
//!
//! # Design
//! Every failure on the network path is a `TransportError`. Its kind keeps
//! "not found" apart from other statuses so the detail screen can show a
//! dedicated state instead of a generic failure.

use thiserror::Error;

/// A failure on the request/response path, tagged with its classification.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind) -> Self {
        Self { kind }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, TransportErrorKind::NotFound)
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            TransportErrorKind::NotFound => Some(404),
            TransportErrorKind::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}

impl From<TransportErrorKind> for TransportError {
    fn from(kind: TransportErrorKind) -> Self {
        Self::new(kind)
    }
}

#[derive(Debug, Error)]
pub enum TransportErrorKind {
    /// The server returned 404, or an empty body where a post was expected.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),
}

/// A submission rejected before any request was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be blank")]
    BlankTitle,
    #[error("content must not be blank")]
    BlankContent,
    #[error("title and content must not be blank")]
    BlankTitleAndContent,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[source] Box<figment::Error>),

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
