use std::path::PathBuf;

/// TLS configuration for the client side of the channel.
///
/// When a CA certificate is configured (or the address uses `https://`), the
/// channel is established with TLS. Providing both a client certificate and
/// key additionally enables mutual TLS.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Path to the CA certificate (PEM format).
    /// Used to verify the service certificate.
    pub ca_cert_path: Option<PathBuf>,

    /// Path to the client certificate (PEM format) for mTLS.
    pub cert_path: Option<PathBuf>,

    /// Path to the client private key (PEM format) for mTLS.
    /// Must match the certificate.
    pub key_path: Option<PathBuf>,

    /// Domain name override for certificate validation.
    /// Useful when the service is reached by IP address.
    pub domain_name: Option<String>,
}

impl TlsConfig {
    /// Whether any TLS material is configured at all.
    pub fn wants_tls(&self) -> bool {
        self.ca_cert_path.is_some() || self.cert_path.is_some() || self.key_path.is_some()
    }

    /// Whether a full mTLS identity (certificate + key) is configured.
    pub fn has_identity(&self) -> bool {
        self.cert_path.is_some() && self.key_path.is_some()
    }
}

/// Configuration for a connection to the staging service.
///
/// The service address is always injected explicitly; library code never
/// assumes a fixed endpoint. The `Default` impl exists for the CLI only.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service address, e.g. `http://127.0.0.1:50051` (use `https://` for TLS)
    pub addr: String,
    pub tls: TlsConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: "http://127.0.0.1:50051".to_string(),
            tls: TlsConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls.ca_cert_path = Some(path);
        self
    }

    pub fn with_identity(mut self, cert: PathBuf, key: PathBuf) -> Self {
        self.tls.cert_path = Some(cert);
        self.tls.key_path = Some(key);
        self
    }

    pub fn with_domain_name(mut self, domain: impl Into<String>) -> Self {
        self.tls.domain_name = Some(domain.into());
        self
    }
}
