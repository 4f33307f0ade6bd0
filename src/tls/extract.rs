//! Certificate extraction utilities.

use anyhow::{Context, Result};
use x509_parser::x509::X509Name;

/// Issuer distinguished name of a certificate, reduced to its attribute values.
///
/// Watchlist markers may sit in any attribute: the state CA names itself in
/// the CN under a ministry O, and regional issuers often only carry a city in
/// L or ST. Matching therefore runs over every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerName {
    attributes: Vec<String>,
    display: String,
}

impl IssuerName {
    /// Builds an issuer from attribute values in DN order.
    ///
    /// `display` is shown when no watchlist matches. Returns `None` when
    /// there are no non-empty values.
    pub fn new(attributes: Vec<String>, display: Option<String>) -> Option<Self> {
        let attributes: Vec<String> = attributes
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        let display = display
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| attributes.last().cloned())?;
        Some(Self {
            attributes,
            display,
        })
    }

    /// Attribute values in DN order, e.g. `RU`, the organisation, the CN.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// The common name if present, otherwise the organisation, otherwise the last value.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// First attribute value containing any of `markers` (case-sensitive).
    pub fn find_matching(&self, markers: &[&str]) -> Option<&str> {
        self.attributes
            .iter()
            .find(|value| markers.iter().any(|marker| value.contains(marker)))
            .map(String::as_str)
    }
}

impl From<&str> for IssuerName {
    /// A single-valued issuer, as reported by synthetic probers.
    fn from(value: &str) -> Self {
        Self {
            attributes: vec![value.to_string()],
            display: value.to_string(),
        }
    }
}

/// Extracts the issuer name of a DER certificate.
///
/// `Ok(None)` means the issuer DN carries no readable string values.
///
/// # Errors
///
/// Returns an error if the certificate is not valid DER X.509.
pub fn issuer_name(der: &[u8]) -> Result<Option<IssuerName>> {
    let (_, cert) =
        x509_parser::parse_x509_certificate(der).context("Failed to parse peer certificate")?;
    Ok(name_values(cert.issuer()))
}

fn name_values(name: &X509Name<'_>) -> Option<IssuerName> {
    let attributes = name
        .iter_attributes()
        .filter_map(|attr| attr.as_str().ok())
        .map(str::to_string)
        .collect();
    let display = name
        .iter_common_name()
        .chain(name.iter_organization())
        .find_map(|attr| attr.as_str().ok())
        .map(str::to_string);
    IssuerName::new(attributes, display)
}
