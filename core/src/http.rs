//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe an outbound request and a received response as plain
//! data. `build` produces `OutboundRequest` values and `map` consumes
//! `HttpResponse` values without ever touching the network; a `Transport`
//! executes the round-trip in between.
//!
//! All fields use owned types (`String`, `Vec`, `PathBuf`) so values can
//! cross the FFI boundary without lifetime concerns.

use std::fmt;
use std::path::PathBuf;

/// HTTP method for a request.
///
/// The four selector methods get their own variants. Any other token is
/// carried through uppercased in `Other`; the transport decides whether it
/// can be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Other(String),
}

impl HttpMethod {
    /// Normalize user input: case-insensitive, no trimming, no rejection.
    pub fn parse(input: &str) -> Self {
        let upper = input.to_uppercase();
        match upper.as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            _ => HttpMethod::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Other(token) => token,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the server certificate is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyMode {
    /// Verify against the transport's default trust roots.
    Default,
    /// Verify against the certificates in this PEM bundle only. The path is
    /// not checked here; the transport reports unreadable files.
    CaBundle(PathBuf),
    /// Do not verify.
    Disabled,
}

/// Certificate and private key presented for mutual TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Resolved TLS behavior for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    pub verify: VerifyMode,
    pub client_identity: Option<ClientIdentity>,
}

/// An HTTP request described as plain data.
///
/// Built by `build`. The caller hands it to a `Transport` and passes the
/// resulting `HttpResponse` to `map`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    /// In first-seen order; a repeated name keeps its first position and
    /// carries the last value.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub options: TransportOptions,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `OutboundRequest`.
/// `headers` are in the order the transport exposed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
