//! Field snapshots handed to the core by the UI.
//!
//! # Design
//! The UI owns the editable state and passes value snapshots into `build`
//! and `encode`. The same records double as the `request` and `config`
//! sections of the persisted defaults document, so their serde shape is the
//! on-disk shape: field names are fixed and every field is required.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Methods offered by the method selector.
pub const METHOD_OPTIONS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// The request as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFields {
    pub method: String,
    pub url: String,
    /// One `Name: Value` pair per line; blank lines are ignored.
    pub headers: String,
    /// Sent verbatim. Empty means no body.
    pub body: String,
}

impl Default for RequestFields {
    fn default() -> Self {
        Self {
            method: METHOD_OPTIONS[0].to_string(),
            url: String::new(),
            headers: String::new(),
            body: String::new(),
        }
    }
}

/// Transport security settings. Empty path strings mean "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(serialize_with = "verify_as_int", deserialize_with = "verify_from_bool_or_int")]
    pub verify: bool,
    pub ca_cert: String,
    pub client_cert: String,
    pub client_key: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify: true,
            ca_cert: String::new(),
            client_cert: String::new(),
            client_key: String::new(),
        }
    }
}

fn verify_as_int<S: Serializer>(verify: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*verify))
}

/// Accept `true`/`false` as well as checkbox-style `0`/`1` (nonzero is true).
fn verify_from_bool_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_form() {
        let fields = RequestFields::default();
        assert_eq!(fields.method, "GET");
        assert!(fields.url.is_empty());

        let tls = TlsConfig::default();
        assert!(tls.verify);
        assert!(tls.ca_cert.is_empty());
    }

    #[test]
    fn verify_serializes_as_integer() {
        let json = serde_json::to_value(TlsConfig::default()).unwrap();
        assert_eq!(json["verify"], 1);
    }

    #[test]
    fn verify_accepts_bool_and_int() {
        let from_bool: TlsConfig = serde_json::from_str(
            r#"{"verify":false,"ca_cert":"","client_cert":"","client_key":""}"#,
        )
        .unwrap();
        assert!(!from_bool.verify);

        let from_int: TlsConfig = serde_json::from_str(
            r#"{"verify":2,"ca_cert":"","client_cert":"","client_key":""}"#,
        )
        .unwrap();
        assert!(from_int.verify);
    }

    #[test]
    fn verify_rejects_strings() {
        let result: Result<TlsConfig, _> = serde_json::from_str(
            r#"{"verify":"yes","ca_cert":"","client_cert":"","client_key":""}"#,
        );
        assert!(result.is_err());
    }
}
