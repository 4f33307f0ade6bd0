//! Error categorization.
//!
//! Maps a failed `reqwest` request onto a [`FailureKind`]. TLS failures are
//! detected by walking the error source chain, since `reqwest` reports them as
//! generic connect errors.

use std::error::Error as StdError;

use super::types::FailureKind;

/// Phrases that only appear in certificate verification failures.
const CERTIFICATE_ERROR_PHRASES: &[&str] = &[
    "invalid peer certificate",
    "certificate verify failed",
    "UnknownIssuer",
    "self signed certificate",
    "self-signed certificate",
];

/// Categorizes a `reqwest::Error` into a [`FailureKind`].
///
/// Timeouts take precedence: a handshake that never completes is a timeout,
/// not a certificate problem. Builder errors mean the request could not even
/// be constructed, which is not a network condition.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if is_tls_failure(error) {
        FailureKind::Tls
    } else if error.is_builder() {
        FailureKind::Fatal
    } else {
        FailureKind::Network
    }
}

/// Returns `true` if any error in the chain is a TLS handshake or certificate failure.
///
/// `std::io::Error` does not expose its payload through `source()`, so the
/// payload is inspected explicitly with `get_ref()`.
pub fn is_tls_failure(error: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(tls) = err.downcast_ref::<rustls::Error>() {
            return is_handshake_failure(tls);
        }
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if let Some(tls) = io
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<rustls::Error>())
            {
                return is_handshake_failure(tls);
            }
        }
        let message = err.to_string();
        if CERTIFICATE_ERROR_PHRASES
            .iter()
            .any(|phrase| message.contains(phrase))
        {
            return true;
        }
        current = err.source();
    }
    false
}

fn is_handshake_failure(error: &rustls::Error) -> bool {
    matches!(
        error,
        rustls::Error::InvalidCertificate(_)
            | rustls::Error::NoCertificatesPresented
            | rustls::Error::UnsupportedNameType
            | rustls::Error::InvalidCertRevocationList(_)
            | rustls::Error::AlertReceived(_)
            | rustls::Error::PeerIncompatible(_)
            | rustls::Error::PeerMisbehaved(_)
    )
}
