//! Redirect target validation against a single allowed origin.

use url::{ParseError, Url};

use crate::error::GuardError;

/// Validates a redirect `target` and returns the URL to redirect to.
///
/// An accepted absolute target is returned as written, minus surrounding
/// whitespace. If it contains control characters that the parser strips
/// (tab, newline), the parser's serialization is returned instead. A relative
/// target is returned resolved against `allowed_origin`.
///
/// - `//host` (and the backslash spellings browsers treat the same way) is
///   rejected as protocol-relative
/// - an explicit scheme other than http/https is rejected
/// - an absolute target must have exactly the origin (scheme, host, port) of
///   `allowed_origin`
/// - a relative target is resolved against `allowed_origin`
pub fn validate_redirect_url(target: &str, allowed_origin: &str) -> Result<String, GuardError> {
    let trimmed = target.trim_start();
    if trimmed.is_empty() {
        return Err(GuardError::InvalidUrlFormat {
            url: target.to_string(),
        });
    }
    if is_protocol_relative(trimmed) {
        tracing::debug!(redirect = target, "protocol-relative redirect rejected");
        return Err(GuardError::ProtocolRelative {
            target: target.to_string(),
        });
    }

    let base = Url::parse(allowed_origin).map_err(|_| GuardError::InvalidUrlFormat {
        url: allowed_origin.to_string(),
    })?;

    let mut verbatim = None;
    let resolved = match Url::parse(trimmed) {
        Ok(absolute) => {
            if !matches!(absolute.scheme(), "http" | "https") {
                tracing::debug!(redirect = target, scheme = absolute.scheme(), "dangerous redirect scheme");
                return Err(GuardError::DangerousProtocol {
                    scheme: absolute.scheme().to_string(),
                });
            }
            let written = trimmed.trim_end();
            if !written.chars().any(|c| c.is_control()) {
                verbatim = Some(written);
            }
            absolute
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            base.join(trimmed).map_err(|_| GuardError::InvalidUrlFormat {
                url: target.to_string(),
            })?
        }
        Err(_) => {
            return Err(GuardError::InvalidUrlFormat {
                url: target.to_string(),
            })
        }
    };

    // A relative target can still change host once tabs and newlines are
    // stripped by the parser (`/\t/evil.com`), so relative results are checked too.
    if resolved.origin() != base.origin() {
        let expected = base.origin().ascii_serialization();
        let actual = resolved.origin().ascii_serialization();
        tracing::debug!(redirect = target, %expected, %actual, "redirect origin mismatch");
        return Err(GuardError::OriginMismatch { expected, actual });
    }

    Ok(verbatim.map_or_else(|| resolved.to_string(), str::to_string))
}

fn is_protocol_relative(target: &str) -> bool {
    let mut chars = target.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('/' | '\\'), Some('/' | '\\'))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const ORIGIN: &str = "https://openlist.example.com";

    fn kind(target: &str) -> ErrorKind {
        validate_redirect_url(target, ORIGIN).unwrap_err().kind()
    }

    #[test]
    fn rejects_protocol_relative() {
        assert_eq!(kind("//evil.com"), ErrorKind::ProtocolRelative);
        assert_eq!(kind("  //evil.com/x"), ErrorKind::ProtocolRelative);
        assert_eq!(kind("\\\\evil.com"), ErrorKind::ProtocolRelative);
        assert_eq!(kind("/\\evil.com"), ErrorKind::ProtocolRelative);
        let err = validate_redirect_url("//evil.com", ORIGIN).unwrap_err();
        assert!(err.to_string().contains("Protocol-relative"));
    }

    #[test]
    fn rejects_dangerous_schemes() {
        assert_eq!(kind("javascript:alert(1)"), ErrorKind::DangerousProtocol);
        assert_eq!(kind("JavaScript:alert(1)"), ErrorKind::DangerousProtocol);
        assert_eq!(kind("data:text/html,<script>x</script>"), ErrorKind::DangerousProtocol);
        assert_eq!(kind("vbscript:msgbox(1)"), ErrorKind::DangerousProtocol);
        let err = validate_redirect_url("javascript:alert(1)", ORIGIN).unwrap_err();
        assert!(err.to_string().contains("Dangerous protocol"));
    }

    #[test]
    fn rejects_cross_origin() {
        assert_eq!(kind("https://evil.com/file.mp4"), ErrorKind::OriginMismatch);
        assert_eq!(kind("http://openlist.example.com/a"), ErrorKind::OriginMismatch);
        assert_eq!(kind("https://openlist.example.com:8443/a"), ErrorKind::OriginMismatch);
        assert_eq!(kind("https://sub.openlist.example.com/a"), ErrorKind::OriginMismatch);
        let err = validate_redirect_url("https://evil.com/file.mp4", ORIGIN).unwrap_err();
        assert!(err.to_string().contains("origin mismatch"));
    }

    #[test]
    fn accepts_same_origin_absolute_unchanged() {
        let target = "https://openlist.example.com/d/movies/a.mp4?sign=abc";
        assert_eq!(validate_redirect_url(target, ORIGIN).unwrap(), target);
        assert_eq!(
            validate_redirect_url("https://openlist.example.com:443/x", ORIGIN).unwrap(),
            "https://openlist.example.com:443/x"
        );
        assert_eq!(
            validate_redirect_url("https://openlist.example.com", ORIGIN).unwrap(),
            "https://openlist.example.com"
        );
        assert_eq!(
            validate_redirect_url("  https://OpenList.Example.com/A ", ORIGIN).unwrap(),
            "https://OpenList.Example.com/A"
        );
    }

    #[test]
    fn absolute_target_with_control_chars_is_reserialized() {
        assert_eq!(
            validate_redirect_url("https://openlist.example.com/a\nb", ORIGIN).unwrap(),
            "https://openlist.example.com/ab"
        );
    }

    #[test]
    fn relative_targets_resolve_against_origin() {
        assert_eq!(
            validate_redirect_url("/d/file.mp4", ORIGIN).unwrap(),
            "https://openlist.example.com/d/file.mp4"
        );
        assert_eq!(
            validate_redirect_url("file.mp4?x=1", "https://openlist.example.com/").unwrap(),
            "https://openlist.example.com/file.mp4?x=1"
        );
    }

    #[test]
    fn relative_target_smuggling_host_is_caught() {
        assert_eq!(kind("/\t/evil.com/x"), ErrorKind::OriginMismatch);
    }

    #[test]
    fn bad_inputs() {
        assert_eq!(kind(""), ErrorKind::InvalidUrlFormat);
        let err = validate_redirect_url("/x", "not an origin").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrlFormat);
    }
}
