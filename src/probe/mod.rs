//! HTTPS probing.
//!
//! A probe sends exactly one GET to a target and reports what happened as an
//! [`Outcome`]. When the request fails on TLS, the certificate the server
//! presents is fetched again over a direct, non-verifying connection so its
//! issuer can be inspected.
//!
//! Probing never fails: every error is folded into the outcome.

mod outcome;
mod target;

use std::error::Error as StdError;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::error_handling::{categorize_reqwest_error, FailureKind};
use crate::tls::{CertificateInspector, IssuerName};

pub use outcome::Outcome;
pub use target::Target;

/// Something that can probe a single target.
///
/// The scheduler only depends on this trait, so it can be driven by synthetic
/// outcomes in tests.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target) -> Outcome;
}

/// Probes targets over HTTPS with a shared client.
pub struct HttpsProber {
    client: Arc<reqwest::Client>,
    inspector: CertificateInspector,
}

impl HttpsProber {
    /// Creates a prober.
    ///
    /// The client carries the request timeout and User-Agent; the inspector
    /// carries its own budget for the certificate fetch.
    pub fn new(client: Arc<reqwest::Client>, inspector: CertificateInspector) -> Self {
        Self { client, inspector }
    }

    /// Reads the issuer of the certificate presented by the target.
    ///
    /// Failures are logged and reported as an unknown issuer.
    async fn inspect_issuer(&self, target: &Target) -> Option<IssuerName> {
        let Some((host, port)) = target.tls_endpoint() else {
            warn!("Cannot inspect certificate of {target}: no host");
            return None;
        };
        match self.inspector.fetch_issuer(&host, port).await {
            Ok(issuer) => issuer,
            Err(e) => {
                warn!("Certificate inspection failed for {host}:{port}: {e:#}");
                None
            }
        }
    }
}

#[async_trait]
impl Prober for HttpsProber {
    async fn probe(&self, target: &Target) -> Outcome {
        let error = match self.client.get(target.url()).send().await {
            Ok(response) => return Outcome::from_status(response.status().as_u16()),
            Err(e) => e,
        };

        let kind = categorize_reqwest_error(&error);
        debug!("Request to {target} failed ({kind}): {error:?}");
        match kind {
            FailureKind::Timeout => Outcome::Timeout,
            FailureKind::Tls => Outcome::TlsFailure {
                error: describe_error(&error),
                issuer: self.inspect_issuer(target).await,
            },
            FailureKind::Network => Outcome::OtherNetworkError {
                error: describe_error(&error),
            },
            FailureKind::Fatal => Outcome::FatalError {
                error: describe_error(&error),
            },
        }
    }
}

/// Renders an error together with its sources, e.g. `a: b: c`.
///
/// `reqwest` keeps the useful part (DNS failure, reset, certificate problem)
/// in the source chain rather than in its own message.
pub(crate) fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut current = error.source();
    while let Some(source) = current {
        let text = source.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        current = source.source();
    }
    message
}
