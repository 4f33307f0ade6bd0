//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by all probes.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header
/// - Total request timeout (connect + TLS + response headers)
/// - Connect timeout capped at the same budget
/// - Rustls TLS backend with the bundled web PKI roots
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .use_rustls_tls()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(Arc::new(client))
}
