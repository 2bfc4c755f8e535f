//! Hostname allowlist matching on top of the SSRF checks in
//! [`crate::url_guard`].
//!
//! An entry matches its own hostname and any dot-delimited subdomain:
//! `example.com` admits `api.example.com` but never `evil-example.com`.

mod build;

pub use build::build_allowlisted_http_url;

use url::Url;

use crate::error::GuardError;
use crate::url_guard::parse_public_http_url;

/// True if `hostname` equals an entry or is a subdomain of one.
///
/// Comparison is ASCII case-insensitive. Entries are trimmed and empty
/// entries never match.
pub fn is_hostname_allowed<S: AsRef<str>>(hostname: &str, allowlist: &[S]) -> bool {
    let host = hostname.to_ascii_lowercase();
    allowlist.iter().any(|entry| {
        let entry = entry.as_ref().trim().to_ascii_lowercase();
        if entry.is_empty() {
            return false;
        }
        host == entry
            || host
                .strip_suffix(entry.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Runs [`crate::url_guard::validate_url`] and then requires an allowlisted
/// host. Returns `raw` verbatim; path segments like `/a/../b` are left
/// alone since only the network destination is being checked.
pub fn validate_url_with_allowlist<'a, S: AsRef<str>>(
    raw: &'a str,
    allowlist: &[S],
) -> Result<&'a str, GuardError> {
    parse_allowlisted(raw, allowlist)?;
    Ok(raw)
}

pub(crate) fn parse_allowlisted<S: AsRef<str>>(
    raw: &str,
    allowlist: &[S],
) -> Result<Url, GuardError> {
    let parsed = parse_public_http_url(raw)?;
    let host = parsed.host_str().unwrap_or_default();
    if !is_hostname_allowed(host, allowlist) {
        tracing::debug!(url = raw, host, "host not in allow-list");
        return Err(GuardError::NotInAllowlist {
            host: host.to_string(),
        });
    }
    Ok(parsed)
}
