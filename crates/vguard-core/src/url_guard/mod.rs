//! Scheme restriction and SSRF protection for user-supplied URLs.

mod host;

use std::net::IpAddr;

use url::Url;

use crate::error::GuardError;
use crate::ip_class::is_blocked_destination;

/// Validates that `raw` is an http(s) URL whose host is not internal, and
/// returns it unmodified.
///
/// The host is classified from its literal form only (IP literal or a known
/// local name). Alternative IPv4 spellings such as `http://2130706433/` are
/// caught because the parser canonicalizes them to dotted form first.
///
/// # Examples
///
/// - `validate_url("https://example.com/a.mp4")` → `Ok("https://example.com/a.mp4")`
/// - `validate_url("http://127.0.0.1")` → `Err(SsrfProtection)`
pub fn validate_url(raw: &str) -> Result<&str, GuardError> {
    parse_public_http_url(raw)?;
    Ok(raw)
}

/// Parses `raw` and applies every check of [`validate_url`].
pub(crate) fn parse_public_http_url(raw: &str) -> Result<Url, GuardError> {
    let parsed = Url::parse(raw).map_err(|e| {
        tracing::debug!(url = raw, "URL parse failed: {}", e);
        GuardError::InvalidUrlFormat {
            url: raw.to_string(),
        }
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            tracing::debug!(url = raw, scheme, "non-http(s) scheme rejected");
            return Err(GuardError::InvalidProtocol {
                scheme: scheme.to_string(),
            });
        }
    }

    let host = parsed.host().ok_or_else(|| GuardError::InvalidUrlFormat {
        url: raw.to_string(),
    })?;
    if host::is_blocked_host(&host) {
        tracing::debug!(url = raw, host = %host, "internal host rejected");
        return Err(GuardError::SsrfProtection {
            host: host.to_string(),
        });
    }

    Ok(parsed)
}

/// Applies the destination checks to addresses a caller resolved for `host`.
///
/// [`validate_url`] never resolves DNS. A caller that does resolve before
/// connecting should pass every address here, so a public name pointing at
/// an internal address is still refused.
pub fn check_resolved_addrs(host: &str, addrs: &[IpAddr]) -> Result<(), GuardError> {
    match addrs.iter().find(|ip| is_blocked_destination(**ip)) {
        Some(ip) => {
            tracing::debug!(host, ip = %ip, "host resolved to internal address");
            Err(GuardError::SsrfProtection {
                host: format!("{host} ({ip})"),
            })
        }
        None => Ok(()),
    }
}
