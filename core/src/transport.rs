//! The HTTP client capability the core sends through.
//!
//! # Design
//! `Transport` is the only seam between the core and the network. The
//! shipped `UreqTransport` builds a fresh agent for every send so that the
//! request's `TransportOptions` (trust roots, verification, client identity)
//! apply to exactly that request. Credential files are read at send time,
//! not at build time.

use std::time::Duration;

use serde::Deserialize;

use crate::error::TransportError;
use crate::http::{HttpResponse, OutboundRequest};

/// Executes one request and returns the whole response.
///
/// Non-2xx statuses are responses, not errors. Errors are reserved for
/// requests that produced no response at all. Body bytes that are not UTF-8
/// are replaced with U+FFFD.
pub trait Transport {
    fn send(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Transport limits. Deserializable so a host can load it with the rest of
/// its settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Whole-request timeout in seconds; `None` waits indefinitely.
    #[serde(with = "optional_secs")]
    pub timeout: Option<Duration>,
    /// Largest response body read into memory.
    pub max_body_bytes: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

mod optional_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

pub use self::ureq_transport::UreqTransport;

mod ureq_transport {
    use std::path::Path;
    use std::sync::Arc;

    use tracing::{debug, info};
    use ureq::http;
    use ureq::tls::{parse_pem, Certificate, ClientCert, PemItem, PrivateKey, RootCerts, TlsConfig};

    use super::{Transport, TransportConfig};
    use crate::error::TransportError;
    use crate::http::{ClientIdentity, HttpResponse, OutboundRequest, TransportOptions, VerifyMode};

    /// `Transport` backed by a blocking `ureq` agent.
    #[derive(Debug, Clone, Default)]
    pub struct UreqTransport {
        config: TransportConfig,
    }

    impl UreqTransport {
        pub fn new(config: TransportConfig) -> Self {
            Self { config }
        }

        fn agent(&self, options: &TransportOptions) -> Result<ureq::Agent, TransportError> {
            let tls = tls_config(options)?;
            Ok(ureq::Agent::config_builder()
                .http_status_as_error(false)
                .allow_non_standard_methods(true)
                .timeout_global(self.config.timeout)
                .tls_config(tls)
                .build()
                .new_agent())
        }
    }

    impl Transport for UreqTransport {
        fn send(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
            let agent = self.agent(&request.options)?;

            let mut builder = http::Request::builder()
                .method(request.method.as_str())
                .uri(request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            info!(method = %request.method, url = %request.url, "sending request");
            let response = match &request.body {
                Some(body) => agent.run(invalid_request(builder.body(body.as_bytes()))?),
                None => agent.run(invalid_request(builder.body(()))?),
            };
            let mut response = response?;

            let status = response.status().as_u16();
            // HeaderMap yields repeated names together, at the position the
            // name first appeared.
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
                })
                .collect();
            let bytes = response
                .body_mut()
                .with_config()
                .limit(self.config.max_body_bytes)
                .read_to_vec()?;
            let body = String::from_utf8_lossy(&bytes).into_owned();

            info!(status, "received response");
            Ok(HttpResponse { status, headers, body })
        }
    }

    fn invalid_request<T>(result: Result<T, http::Error>) -> Result<T, TransportError> {
        result.map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }

    fn tls_config(options: &TransportOptions) -> Result<TlsConfig, TransportError> {
        let mut builder = TlsConfig::builder();
        builder = match &options.verify {
            VerifyMode::Default => builder,
            VerifyMode::CaBundle(path) => {
                let roots = read_certificates(path)?;
                debug!(path = %path.display(), count = roots.len(), "using CA bundle");
                builder.root_certs(RootCerts::Specific(Arc::new(roots)))
            }
            VerifyMode::Disabled => builder.disable_verification(true),
        };
        if let Some(identity) = &options.client_identity {
            builder = builder.client_cert(Some(client_cert(identity)?));
        }
        Ok(builder.build())
    }

    fn client_cert(identity: &ClientIdentity) -> Result<ClientCert, TransportError> {
        let chain = read_certificates(&identity.cert)?;
        let pem = read_file(&identity.key)?;
        let key = PrivateKey::from_pem(&pem).map_err(|e| TransportError::InvalidPem {
            path: identity.key.clone(),
            reason: e.to_string(),
        })?;
        Ok(ClientCert::new_with_certs(&chain, key))
    }

    /// Every certificate in a PEM file. Other PEM items are skipped.
    fn read_certificates(path: &Path) -> Result<Vec<Certificate<'static>>, TransportError> {
        let pem = read_file(path)?;
        let mut certs = Vec::new();
        for item in parse_pem(&pem) {
            let item = item.map_err(|e| TransportError::InvalidPem {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            if let PemItem::Certificate(cert) = item {
                certs.push(cert.to_owned());
            }
        }
        if certs.is_empty() {
            return Err(TransportError::InvalidPem {
                path: path.to_path_buf(),
                reason: "no certificates found".to_string(),
            });
        }
        Ok(certs)
    }

    fn read_file(path: &Path) -> Result<Vec<u8>, TransportError> {
        fs_err::read(path).map_err(|source| TransportError::CredentialFile {
            path: path.to_path_buf(),
            source,
        })
    }

    #[cfg(test)]
    mod tests {
        use std::path::PathBuf;

        use super::*;

        #[test]
        fn missing_ca_bundle_is_credential_error() {
            let options = TransportOptions {
                verify: VerifyMode::CaBundle(PathBuf::from("/definitely/not/here.pem")),
                client_identity: None,
            };
            let err = tls_config(&options).err().unwrap();
            assert!(matches!(err, TransportError::CredentialFile { .. }));
            assert!(err.to_string().contains("/definitely/not/here.pem"));
        }

        #[test]
        fn bundle_without_certificates_is_invalid() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("empty.pem");
            std::fs::write(&path, "not a certificate\n").unwrap();
            let err = read_certificates(&path).err().unwrap();
            assert!(matches!(err, TransportError::InvalidPem { .. }));
        }

        #[test]
        fn missing_client_key_file_is_credential_error() {
            let dir = tempfile::tempdir().unwrap();
            let options = TransportOptions {
                verify: VerifyMode::Disabled,
                client_identity: Some(ClientIdentity {
                    cert: dir.path().join("client.pem"),
                    key: dir.path().join("client.key"),
                }),
            };
            let err = tls_config(&options).err().unwrap();
            assert!(matches!(err, TransportError::CredentialFile { .. }));
        }

        fn fixture(name: &str) -> PathBuf {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
        }

        #[test]
        fn ca_bundle_loads_real_certificate() {
            let options = TransportOptions {
                verify: VerifyMode::CaBundle(fixture("client.pem")),
                client_identity: None,
            };
            assert!(tls_config(&options).is_ok());
            assert_eq!(read_certificates(&fixture("client.pem")).unwrap().len(), 1);
        }

        #[test]
        fn client_identity_loads_cert_and_key() {
            let options = TransportOptions {
                verify: VerifyMode::CaBundle(fixture("client.pem")),
                client_identity: Some(ClientIdentity {
                    cert: fixture("client.pem"),
                    key: fixture("client.key"),
                }),
            };
            assert!(tls_config(&options).is_ok());
        }

        #[test]
        fn certificate_is_not_a_private_key() {
            let identity = ClientIdentity {
                cert: fixture("client.pem"),
                key: fixture("client.pem"),
            };
            let err = client_cert(&identity).err().unwrap();
            assert!(matches!(err, TransportError::InvalidPem { .. }));
        }

        #[test]
        fn default_and_disabled_need_no_files() {
            for verify in [VerifyMode::Default, VerifyMode::Disabled] {
                let options = TransportOptions {
                    verify,
                    client_identity: None,
                };
                assert!(tls_config(&options).is_ok());
            }
        }
    }
}
