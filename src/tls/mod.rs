//! Direct certificate inspection.
//!
//! When an HTTPS request fails on certificate verification, the client never
//! exposes the rejected chain. This module opens its own TLS connection with a
//! verifier that accepts anything, takes the leaf certificate the server
//! presents and reads its issuer.
//!
//! Uses `tokio-rustls` for the connection and `x509-parser` for parsing. The
//! TCP connect and the handshake together are bounded by the inspector's timeout.

mod extract;
mod verifier;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::debug;
use rustls::crypto::ring::default_provider;
use rustls::pki_types::ServerName;
use rustls::ClientConfig;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use crate::error_handling::InitializationError;

pub use extract::{issuer_name, IssuerName};
use verifier::AcceptAnyServerCert;

/// Fetches peer certificates without validating them.
#[derive(Clone)]
pub struct CertificateInspector {
    connector: TlsConnector,
    timeout: Duration,
}

impl CertificateInspector {
    /// Creates an inspector that gives up on a peer after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::TlsConfigError` if the crypto provider
    /// does not support the default protocol versions.
    pub fn new(timeout: Duration) -> Result<Self, InitializationError> {
        let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            timeout,
        })
    }

    /// Connects to `host:port` and returns the issuer of the leaf certificate.
    ///
    /// The connect and the handshake share one budget of `timeout`.
    /// `Ok(None)` means the certificate was read but its issuer carries no
    /// readable values.
    ///
    /// # Errors
    ///
    /// Returns an error if the host name is invalid, the connection or
    /// handshake fails or times out, no certificate is presented, or the
    /// certificate cannot be parsed.
    pub async fn fetch_issuer(&self, host: &str, port: u16) -> Result<Option<IssuerName>> {
        tokio::time::timeout(self.timeout, self.read_issuer(host, port))
            .await
            .map_err(|_| {
                anyhow!(
                    "Certificate inspection timeout for {host}:{port} after {}ms",
                    self.timeout.as_millis()
                )
            })?
    }

    async fn read_issuer(&self, host: &str, port: u16) -> Result<Option<IssuerName>> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| anyhow!("Invalid server name {host}: {e}"))?;

        let sock = TcpStream::connect((host, port))
            .await
            .with_context(|| format!("Failed to connect to {host}:{port}"))?;

        let tls_stream = self
            .connector
            .connect(server_name, sock)
            .await
            .with_context(|| format!("TLS handshake failed for {host}:{port}"))?;

        let leaf = tls_stream
            .get_ref()
            .1
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or_else(|| anyhow!("No certificate presented by {host}:{port}"))?;

        let issuer = issuer_name(leaf.as_ref())?;
        debug!("Issuer for {host}:{port}: {issuer:?}");
        Ok(issuer)
    }
}
