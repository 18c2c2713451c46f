//! Persisted defaults: the request and TLS fields as a JSON document.
//!
//! # Design
//! The document has two required sections, `config` and `request`, whose
//! shapes are `TlsConfig` and `RequestFields`. Decoding is all-or-nothing:
//! callers receive both records or an error, and `apply` only writes into
//! caller state after a full decode. Builder invariants are not checked
//! here; a loaded cert without a key surfaces on the next `build`.
//!
//! Storage is behind `DocumentStore` so the codec never opens files itself.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DefaultsError, ParseError};
use crate::types::{RequestFields, TlsConfig};

/// The on-disk document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsDocument {
    pub config: TlsConfig,
    pub request: RequestFields,
}

/// Serialize the current fields verbatim.
pub fn encode(fields: &RequestFields, tls: &TlsConfig) -> Result<String, ParseError> {
    let document = DefaultsDocument {
        config: tls.clone(),
        request: fields.clone(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a document into fresh field values.
pub fn decode(text: &str) -> Result<(RequestFields, TlsConfig), ParseError> {
    let document: DefaultsDocument = serde_json::from_str(text)?;
    debug!(url = %document.request.url, verify = document.config.verify, "decoded defaults");
    Ok((document.request, document.config))
}

/// Decode `text` and, only if that succeeds, replace `fields` and `tls`.
pub fn apply(text: &str, fields: &mut RequestFields, tls: &mut TlsConfig) -> Result<(), ParseError> {
    let (new_fields, new_tls) = decode(text)?;
    *fields = new_fields;
    *tls = new_tls;
    Ok(())
}

/// Text storage for the defaults document, keyed by path.
pub trait DocumentStore {
    fn read(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// `DocumentStore` over the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs_err::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs_err::write(path, contents)
    }
}

/// Read and decode the document at `path`.
pub fn load_defaults(
    store: &impl DocumentStore,
    path: &Path,
) -> Result<(RequestFields, TlsConfig), DefaultsError> {
    let text = store.read(path)?;
    Ok(decode(&text)?)
}

/// Encode the current fields and write them to `path`.
pub fn save_defaults(
    store: &impl DocumentStore,
    path: &Path,
    fields: &RequestFields,
    tls: &TlsConfig,
) -> Result<(), DefaultsError> {
    let text = encode(fields, tls)?;
    store.write(path, &text)?;
    debug!(path = %path.display(), "saved defaults");
    Ok(())
}
