//! Turns raw field values into an `OutboundRequest`.
//!
//! # Design
//! `build` is pure: no network, no file system. Header text is parsed
//! strictly (exactly one colon per non-empty line), so a header value that
//! itself contains a colon is rejected. TLS paths are resolved but never
//! opened here; the transport reports unreadable files when it sends.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{MissingPart, ValidationError};
use crate::http::{ClientIdentity, HttpMethod, OutboundRequest, TransportOptions, VerifyMode};
use crate::types::{RequestFields, TlsConfig};

const SECURE_SCHEME: &str = "https://";

/// Validate `fields` and `tls` and assemble the request to send.
///
/// Checks run in a fixed order: empty URL, header syntax, URL scheme, client
/// identity. The first failure is returned and no request is produced.
pub fn build(fields: &RequestFields, tls: &TlsConfig) -> Result<OutboundRequest, ValidationError> {
    if fields.url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let headers = parse_headers(&fields.headers)?;
    let verify = resolve_verify(&fields.url, tls)?;
    let client_identity = resolve_client_identity(tls)?;

    let request = OutboundRequest {
        method: HttpMethod::parse(&fields.method),
        url: fields.url.clone(),
        headers,
        body: (!fields.body.is_empty()).then(|| fields.body.clone()),
        options: TransportOptions {
            verify,
            client_identity,
        },
    };
    debug!(
        method = %request.method,
        url = %request.url,
        headers = request.headers.len(),
        has_body = request.body.is_some(),
        "built request"
    );
    Ok(request)
}

/// Parse `Name: Value` lines. Zero-length lines are skipped; every other
/// line must contain exactly one `:`.
pub fn parse_headers(text: &str) -> Result<Vec<(String, String)>, ValidationError> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split(':');
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ValidationError::HeaderSyntax { line: index + 1 });
        };
        let (name, value) = (name.trim(), value.trim());

        match headers.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => headers.push((name.to_string(), value.to_string())),
        }
    }
    Ok(headers)
}

fn resolve_verify(url: &str, tls: &TlsConfig) -> Result<VerifyMode, ValidationError> {
    if !tls.verify {
        warn!(url, "TLS verification disabled");
        return Ok(VerifyMode::Disabled);
    }
    if !url.starts_with(SECURE_SCHEME) {
        return Err(ValidationError::InsecureUrl { url: url.to_string() });
    }
    if tls.ca_cert.is_empty() {
        Ok(VerifyMode::Default)
    } else {
        Ok(VerifyMode::CaBundle(PathBuf::from(&tls.ca_cert)))
    }
}

fn resolve_client_identity(tls: &TlsConfig) -> Result<Option<ClientIdentity>, ValidationError> {
    match (tls.client_cert.is_empty(), tls.client_key.is_empty()) {
        (false, false) => Ok(Some(ClientIdentity {
            cert: PathBuf::from(&tls.client_cert),
            key: PathBuf::from(&tls.client_key),
        })),
        (false, true) => Err(ValidationError::IncompleteClientIdentity(MissingPart::Key)),
        (true, false) => Err(ValidationError::IncompleteClientIdentity(MissingPart::Cert)),
        (true, true) => Ok(None),
    }
}
