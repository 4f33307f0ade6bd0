//! Certificate issuer watchlists.
//!
//! Every issuer DN value (C, ST, L, O, CN, ...) is matched against these
//! fragments with a case-sensitive substring test. The untrusted list is
//! always consulted first.

/// Fragments identifying the state-operated root CA that browsers do not trust.
pub const UNTRUSTED_CA_MARKERS: &[&str] = &["Russian Trusted"];

/// Fragments identifying organisations known to serve self-issued certificates.
pub const SELF_SIGNED_MARKERS: &[&str] = &[
    "SberCA",
    "St. Petersburg",
    "VTB Group",
    "Bank GPB",
    "Администрация Партизанского городского округа",
    "Kaliningrad",
    "Sigma-REZERV",
    "Moscow",
    "Stavrolop",
    "Saint Petersburg",
    "Petrozavodsk",
    "Bryansk",
    "sklif",
];
