//! Channel establishment for the staging service.
//!
//! The client holds exactly one long-lived channel; both service stubs are
//! created from clones of it.

use tonic::transport::{Channel, Endpoint};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::tls;

/// Open the channel to the configured service address.
///
/// TLS is enabled when the address uses `https://` or any TLS material is
/// configured; otherwise the channel is plaintext.
pub async fn connect(config: &ClientConfig) -> Result<Channel> {
    let endpoint = Endpoint::from_shared(config.addr.clone())?;

    if config.tls.wants_tls() || config.addr.starts_with("https://") {
        let tls_config = tls::client_tls_config(&config.tls).await?;
        tracing::debug!(addr = %config.addr, "Connecting with TLS");
        Ok(endpoint.tls_config(tls_config)?.connect().await?)
    } else {
        tracing::debug!(addr = %config.addr, "Connecting");
        Ok(endpoint.connect().await?)
    }
}
