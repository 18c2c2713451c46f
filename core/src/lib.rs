//! Request-assembly and transport-execution engine for the Posty HTTP client.
//!
//! # Overview
//! Turns raw field values entered in a UI (method, URL, header text, body,
//! TLS settings) into an `OutboundRequest`, and turns an `HttpResponse` back
//! into display strings. Neither step touches the network (host-does-IO
//! pattern): execution goes through the `Transport` trait, so validation
//! failures are observable without side effects.
//!
//! # Design
//! - `build` and `map` are pure functions over value-passed snapshots of the
//!   UI state. The core never holds or mutates UI state on its own.
//! - `defaults` converts the same field set to and from a persisted JSON
//!   document; file access is delegated to a `DocumentStore`.
//! - `session::send` packages the caller-side contract: validate, clear the
//!   display, send, then repopulate.
//! - `UreqTransport` is the shipped transport. Any other HTTP client can be
//!   plugged in by implementing `Transport`.

pub mod builder;
pub mod defaults;
pub mod error;
pub mod http;
pub mod response;
pub mod session;
pub mod transport;
pub mod types;

pub use builder::build;
pub use defaults::{apply, decode, encode, load_defaults, save_defaults, DefaultsDocument, DocumentStore, FsStore};
pub use error::{DefaultsError, MissingPart, ParseError, SendError, TransportError, ValidationError};
pub use http::{ClientIdentity, HttpMethod, HttpResponse, OutboundRequest, TransportOptions, VerifyMode};
pub use response::{map, ResponseView};
pub use session::send;
pub use transport::{Transport, TransportConfig, UreqTransport};
pub use types::{RequestFields, TlsConfig, METHOD_OPTIONS};
