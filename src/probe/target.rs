//! Probe targets.

use url::{Host, Url};

use crate::app::normalize_target;

/// One hostname or URL to probe, normalized to carry a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    url: String,
}

impl Target {
    /// Builds a target from a raw input line.
    ///
    /// Returns `None` for blank or whitespace-only lines, which are never dispatched.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_target(raw).map(|url| Self { url })
    }

    /// Normalized URL, e.g. `https://example.com`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host and port to use for a direct TLS connection.
    ///
    /// The port is the URL's explicit port, or 443 otherwise. Returns `None`
    /// when the target does not parse as a URL with a host.
    pub fn tls_endpoint(&self) -> Option<(String, u16)> {
        let parsed = Url::parse(&self.url).ok()?;
        let host = match parsed.host()? {
            Host::Domain(domain) => domain.to_string(),
            Host::Ipv4(ip) => ip.to_string(),
            Host::Ipv6(ip) => ip.to_string(),
        };
        let port = parsed.port().unwrap_or(443);
        Some((host, port))
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
