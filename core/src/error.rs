//! Error types for request building, sending, and defaults persistence.
//!
//! # Design
//! Every failure is a value. Validation errors are raised before any network
//! activity so the UI can show them verbatim; transport errors are surfaced
//! exactly as the transport reported them.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which half of a client identity was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPart {
    /// A client certificate was given without a key.
    Key,
    /// A client key was given without a certificate.
    Cert,
}

impl MissingPart {
    /// The half that was supplied.
    pub fn other(self) -> MissingPart {
        match self {
            MissingPart::Key => MissingPart::Cert,
            MissingPart::Cert => MissingPart::Key,
        }
    }
}

impl fmt::Display for MissingPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPart::Key => write!(f, "key"),
            MissingPart::Cert => write!(f, "cert"),
        }
    }
}

/// Errors returned by `build` when the field values cannot form a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL must not be empty")]
    EmptyUrl,

    /// A header line did not split into exactly a name and a value on a
    /// single colon. `line` is 1-based.
    #[error("bad syntax for headers on line {line}: expected exactly one ':'")]
    HeaderSyntax { line: usize },

    #[error("URL must start with https:// if configured to verify (got {url:?})")]
    InsecureUrl { url: String },

    #[error("must provide client {} if providing client {}", .0, .0.other())]
    IncompleteClientIdentity(MissingPart),
}

/// Errors raised by a `Transport` while executing a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A trust bundle or client credential file could not be read. `source`
    /// already names the path.
    #[error("credential file unreadable: {source}")]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A credential file was readable but held no usable PEM item.
    #[error("invalid PEM in {}: {reason}", .path.display())]
    InvalidPem { path: PathBuf, reason: String },

    /// The request could not be expressed on the wire (bad header name,
    /// bad method token, unparsable URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network, DNS, or TLS handshake failure.
    #[error(transparent)]
    Http(#[from] ureq::Error),

    /// Failure reported by a caller-supplied transport.
    #[error("{0}")]
    Other(String),
}

/// A defaults document could not be decoded or encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed defaults document: {0}")]
pub struct ParseError(pub String);

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError(err.to_string())
    }
}

/// Errors from loading or saving defaults through a `DocumentStore`.
#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("defaults file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors from the full validate-and-send flow.
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
