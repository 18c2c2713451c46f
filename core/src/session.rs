//! One send, start to finish, against a caller-owned display.
//!
//! # Design
//! The display passes through three states: untouched while validating,
//! cleared while the request is in flight, repopulated once the response has
//! been read in full. A validation failure leaves the previous response
//! visible; a transport failure leaves the display cleared.

use tracing::warn;

use crate::builder::build;
use crate::error::SendError;
use crate::response::{map, ResponseView};
use crate::transport::Transport;
use crate::types::{RequestFields, TlsConfig};

/// Validate, clear `display`, send, and fill `display` from the response.
pub fn send(
    fields: &RequestFields,
    tls: &TlsConfig,
    transport: &impl Transport,
    display: &mut ResponseView,
) -> Result<(), SendError> {
    let request = build(fields, tls)?;

    display.clear();
    let response = transport.send(&request).inspect_err(|e| {
        warn!(error = %e, url = %request.url, "request failed");
    })?;
    *display = map(&response);
    Ok(())
}
