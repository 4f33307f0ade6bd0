//! Raw probe outcomes.

use crate::tls::IssuerName;

/// What happened when a target was probed. Produced exactly once per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered 200.
    Success { status: u16 },
    /// The server answered with any other final status.
    HttpError { status: u16 },
    /// The connect or read budget ran out.
    Timeout,
    /// TLS handshake or certificate verification failed.
    ///
    /// `issuer` is the issuer of the certificate the server presents, or
    /// `None` when it could not be read.
    TlsFailure {
        error: String,
        issuer: Option<IssuerName>,
    },
    /// DNS failure, connection reset and other network problems.
    OtherNetworkError { error: String },
    /// Not a network condition: malformed request or a defect in the worker.
    FatalError { error: String },
}

impl Outcome {
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            Outcome::Success { status }
        } else {
            Outcome::HttpError { status }
        }
    }
}
