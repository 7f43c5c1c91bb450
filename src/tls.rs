//! TLS utilities for the client side of the channel.
//!
//! Loads the CA certificate and optional mTLS identity from PEM files and
//! produces a `ClientTlsConfig` for tonic.

use std::path::PathBuf;

use tokio::fs;
use tonic::transport::{Certificate, ClientTlsConfig, Identity};

use crate::config::TlsConfig;

/// Error type for TLS configuration issues.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("CA certificate not found: {0}")]
    CaCertNotFound(PathBuf),

    #[error("Client certificate not found: {0}")]
    CertNotFound(PathBuf),

    #[error("Private key not found: {0}")]
    KeyNotFound(PathBuf),

    #[error("Client certificate and key must be configured together")]
    IncompleteIdentity,

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a client TLS configuration from the configured PEM paths.
///
/// The CA certificate is optional (system roots apply without it); the
/// identity is loaded only when both certificate and key are configured, and
/// configuring exactly one of the pair is an error.
pub async fn client_tls_config(config: &TlsConfig) -> Result<ClientTlsConfig, TlsError> {
    let mut tls = ClientTlsConfig::new();

    if let Some(ref domain) = config.domain_name {
        tls = tls.domain_name(domain.clone());
    }

    if let Some(ref ca_path) = config.ca_cert_path {
        if !ca_path.exists() {
            return Err(TlsError::CaCertNotFound(ca_path.clone()));
        }
        let ca_pem = fs::read(ca_path).await?;
        tls = tls.ca_certificate(Certificate::from_pem(ca_pem));
    }

    match (&config.cert_path, &config.key_path) {
        (Some(cert_path), Some(key_path)) => {
            if !cert_path.exists() {
                return Err(TlsError::CertNotFound(cert_path.clone()));
            }
            if !key_path.exists() {
                return Err(TlsError::KeyNotFound(key_path.clone()));
            }
            let cert_pem = fs::read(cert_path).await?;
            let key_pem = fs::read(key_path).await?;
            tls = tls.identity(Identity::from_pem(cert_pem, key_pem));
        }
        (None, None) => {}
        _ => return Err(TlsError::IncompleteIdentity),
    }

    Ok(tls)
}
