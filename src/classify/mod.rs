//! Outcome classification.
//!
//! Turns the raw [`Outcome`] of a probe into one output [`Category`] plus the
//! detail line written to that category's destination. Pure: no I/O happens
//! here, so every branch can be exercised with synthetic outcomes.

use strum_macros::EnumIter as EnumIterMacro;

use crate::config::{
    REQUEST_ERROR_FILE, SELF_SIGNED_MARKERS, SSL_OTHER_FILE, SSL_SELF_SIGNED_FILE,
    SSL_UNTRUSTED_CA_FILE, SUCCESSFUL_FILE, UNKNOWN_ISSUER, UNSUCCESSFUL_FILE,
    UNTRUSTED_CA_MARKERS,
};
use crate::probe::{Outcome, Target};
use crate::tls::IssuerName;

/// Output bucket for a probed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Category {
    Successful,
    Unsuccessful,
    SslUntrustedCa,
    SslSelfSigned,
    SslOther,
    RequestError,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Successful => "successful",
            Category::Unsuccessful => "unsuccessful",
            Category::SslUntrustedCa => "ssl_untrusted_ca",
            Category::SslSelfSigned => "ssl_self_signed",
            Category::SslOther => "ssl_other",
            Category::RequestError => "request_error",
        }
    }

    /// File name of this category's destination inside the output directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Category::Successful => SUCCESSFUL_FILE,
            Category::Unsuccessful => UNSUCCESSFUL_FILE,
            Category::SslUntrustedCa => SSL_UNTRUSTED_CA_FILE,
            Category::SslSelfSigned => SSL_SELF_SIGNED_FILE,
            Category::SslOther => SSL_OTHER_FILE,
            Category::RequestError => REQUEST_ERROR_FILE,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Line appended to the category destination.
    pub detail: String,
    /// Human-readable outcome used in the progress log line.
    pub message: String,
    /// Set for outcomes that indicate a defect rather than a network condition.
    pub fatal: bool,
}

/// Buckets a TLS failure by the issuer of the presented certificate.
///
/// Every issuer attribute is checked against the untrusted markers before any
/// is checked against the self-signed markers, so an issuer matching both
/// lists is reported as untrusted. Returns the category together with the
/// issuer value to render: the matching attribute, the issuer's display value
/// when nothing matches, or `unknown` when the issuer could not be read.
pub fn classify_issuer(issuer: Option<&IssuerName>) -> (Category, &str) {
    let Some(issuer) = issuer else {
        return (Category::SslOther, UNKNOWN_ISSUER);
    };
    if let Some(value) = issuer.find_matching(UNTRUSTED_CA_MARKERS) {
        (Category::SslUntrustedCa, value)
    } else if let Some(value) = issuer.find_matching(SELF_SIGNED_MARKERS) {
        (Category::SslSelfSigned, value)
    } else {
        (Category::SslOther, issuer.display())
    }
}

/// Maps a probe outcome to its category and output line.
pub fn classify(target: &Target, outcome: &Outcome) -> Classification {
    let url = target.url();
    match outcome {
        Outcome::Success { .. } => Classification {
            category: Category::Successful,
            detail: url.to_string(),
            message: "HTTPS request successful".to_string(),
            fatal: false,
        },
        Outcome::HttpError { status } => Classification {
            category: Category::Unsuccessful,
            detail: format!("{url} – status code: {status}"),
            message: format!("HTTPS request failed with status code {status}"),
            fatal: false,
        },
        Outcome::Timeout => Classification {
            category: Category::RequestError,
            detail: format!("{url} – Request timed out"),
            message: "Request timed out".to_string(),
            fatal: false,
        },
        Outcome::TlsFailure { issuer, .. } => {
            let (category, issuer) = classify_issuer(issuer.as_ref());
            let message = match category {
                Category::SslUntrustedCa => "Russian affiliated certificate error",
                Category::SslSelfSigned => "Russian self signed certificate error",
                _ => "Other SSL certificate error",
            };
            Classification {
                category,
                detail: format!("{url} – CA: {issuer}"),
                message: format!("{message} – {issuer}"),
                fatal: false,
            }
        }
        Outcome::OtherNetworkError { error } => Classification {
            category: Category::RequestError,
            detail: format!("{url} – error: {error}"),
            message: error.clone(),
            fatal: false,
        },
        Outcome::FatalError { error } => Classification {
            category: Category::RequestError,
            detail: format!("{url} – error: {error}"),
            message: format!("fatal error: {error}"),
            fatal: true,
        },
    }
}
