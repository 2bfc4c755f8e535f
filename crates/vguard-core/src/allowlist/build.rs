//! Canonical outbound URL construction.

use crate::error::GuardError;

use super::parse_allowlisted;

/// Checks `raw` against the allowlist and rebuilds it as
/// `scheme://host/path?query` for an outbound fetch.
///
/// Stricter than [`super::validate_url_with_allowlist`]:
/// - userinfo (`user:pass@`) is rejected
/// - any port written in the URL is rejected, including a default port such
///   as `:443` that the parser would otherwise drop silently
/// - the host is lower-cased and the fragment discarded
pub fn build_allowlisted_http_url<S: AsRef<str>>(
    raw: &str,
    allowlist: &[S],
) -> Result<String, GuardError> {
    let parsed = parse_allowlisted(raw, allowlist)?;

    if !parsed.username().is_empty() || parsed.password().is_some() {
        tracing::debug!("credentials in outbound URL rejected");
        return Err(GuardError::CredentialsInUrl);
    }
    if parsed.port().is_some() || authority_has_port(raw) {
        tracing::debug!(url = raw, "explicit port in outbound URL rejected");
        return Err(GuardError::ExplicitPort);
    }

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    let mut out = format!("{}://{}{}", parsed.scheme(), host, parsed.path());
    if let Some(query) = parsed.query() {
        out.push('?');
        out.push_str(query);
    }
    Ok(out)
}

/// True if the authority section of `raw` carries a `:port`, even an empty
/// or default one.
///
/// The authority is located the way the parser finds it for http(s): after
/// `scheme:` and any run of `/` or `\`, with tabs and newlines ignored.
fn authority_has_port(raw: &str) -> bool {
    let cleaned: String = raw
        .trim_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    let Some((_, rest)) = cleaned.split_once(':') else {
        return false;
    };
    let rest = rest.trim_start_matches(['/', '\\']);
    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    let after_host = match host_port.rfind(']') {
        Some(i) => &host_port[i + 1..],
        None => host_port,
    };
    after_host.contains(':')
}
