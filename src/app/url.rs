//! Target normalization utilities.

/// Normalizes one line of the input list into a probe URL.
///
/// Trims surrounding whitespace and adds an `https://` prefix if the line has
/// no scheme of its own. Scheme detection is case-insensitive and accepts any
/// scheme, so `HTTPS://host` and `ftp://host` are kept as written. Returns
/// `None` for blank lines.
///
/// The result is not validated further: a malformed target is still probed
/// and recorded, so that every non-blank input line yields one result.
pub fn normalize_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if has_scheme(trimmed) {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

/// True when `s` starts with `<scheme>://`, the scheme being a letter followed
/// by letters, digits, `+`, `-` or `.`.
fn has_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
