//! Error taxonomy for every validator in this crate.
//!
//! Each rejection maps to exactly one [`GuardError`] variant. Route handlers
//! translate [`GuardError::kind`] into a status code with
//! [`ErrorKind::http_status`] instead of matching on message text.

use thiserror::Error;

/// Rejection raised by a path, URL, allowlist or redirect validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// Empty or otherwise unusable path input.
    #[error("Invalid file path")]
    InvalidPath,
    /// Path escapes its root after normalization.
    #[error("Path traversal detected: {path}")]
    PathTraversal { path: String },
    /// Already-absolute path is not inside any configured root.
    #[error("Path is outside allowed directories: {path}")]
    OutsideAllowedDirectories { path: String },
    #[error("Invalid URL format: {url}")]
    InvalidUrlFormat { url: String },
    #[error("Invalid protocol: {scheme} (only http and https are allowed)")]
    InvalidProtocol { scheme: String },
    /// Host is loopback, private, link-local, unique-local or a metadata endpoint.
    #[error("SSRF protection: requests to {host} are not allowed")]
    SsrfProtection { host: String },
    #[error("Hostname {host} is not in the allow-list")]
    NotInAllowlist { host: String },
    #[error("URLs with embedded credentials are not allowed")]
    CredentialsInUrl,
    #[error("URLs with explicit ports are not allowed")]
    ExplicitPort,
    #[error("Protocol-relative redirect URLs are not allowed: {target}")]
    ProtocolRelative { target: String },
    #[error("Dangerous protocol in redirect URL: {scheme}")]
    DangerousProtocol { scheme: String },
    #[error("Redirect origin mismatch: expected {expected}, got {actual}")]
    OriginMismatch { expected: String, actual: String },
}

/// Data-free tag for a [`GuardError`], stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPath,
    PathTraversal,
    OutsideAllowedDirectories,
    InvalidUrlFormat,
    InvalidProtocol,
    SsrfProtection,
    NotInAllowlist,
    CredentialsInUrl,
    ExplicitPort,
    ProtocolRelative,
    DangerousProtocol,
    OriginMismatch,
}

impl ErrorKind {
    /// Machine-readable code for API responses and logs.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidPath => "INVALID_PATH",
            ErrorKind::PathTraversal => "PATH_TRAVERSAL",
            ErrorKind::OutsideAllowedDirectories => "OUTSIDE_ALLOWED_DIRECTORIES",
            ErrorKind::InvalidUrlFormat => "INVALID_URL_FORMAT",
            ErrorKind::InvalidProtocol => "INVALID_PROTOCOL",
            ErrorKind::SsrfProtection => "SSRF_PROTECTION",
            ErrorKind::NotInAllowlist => "NOT_IN_ALLOWLIST",
            ErrorKind::CredentialsInUrl => "CREDENTIALS_IN_URL",
            ErrorKind::ExplicitPort => "EXPLICIT_PORT",
            ErrorKind::ProtocolRelative => "PROTOCOL_RELATIVE",
            ErrorKind::DangerousProtocol => "DANGEROUS_PROTOCOL",
            ErrorKind::OriginMismatch => "ORIGIN_MISMATCH",
        }
    }

    /// Status a route handler should answer with: 400 for malformed input,
    /// 403 for a policy violation.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::InvalidPath
            | ErrorKind::InvalidUrlFormat
            | ErrorKind::InvalidProtocol
            | ErrorKind::CredentialsInUrl
            | ErrorKind::ExplicitPort => 400,
            ErrorKind::PathTraversal
            | ErrorKind::OutsideAllowedDirectories
            | ErrorKind::SsrfProtection
            | ErrorKind::NotInAllowlist
            | ErrorKind::ProtocolRelative
            | ErrorKind::DangerousProtocol
            | ErrorKind::OriginMismatch => 403,
        }
    }
}

impl GuardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuardError::InvalidPath => ErrorKind::InvalidPath,
            GuardError::PathTraversal { .. } => ErrorKind::PathTraversal,
            GuardError::OutsideAllowedDirectories { .. } => ErrorKind::OutsideAllowedDirectories,
            GuardError::InvalidUrlFormat { .. } => ErrorKind::InvalidUrlFormat,
            GuardError::InvalidProtocol { .. } => ErrorKind::InvalidProtocol,
            GuardError::SsrfProtection { .. } => ErrorKind::SsrfProtection,
            GuardError::NotInAllowlist { .. } => ErrorKind::NotInAllowlist,
            GuardError::CredentialsInUrl => ErrorKind::CredentialsInUrl,
            GuardError::ExplicitPort => ErrorKind::ExplicitPort,
            GuardError::ProtocolRelative { .. } => ErrorKind::ProtocolRelative,
            GuardError::DangerousProtocol { .. } => ErrorKind::DangerousProtocol,
            GuardError::OriginMismatch { .. } => ErrorKind::OriginMismatch,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_legacy_phrases() {
        assert_eq!(GuardError::InvalidPath.to_string(), "Invalid file path");
        let e = GuardError::PathTraversal {
            path: "../etc/passwd".into(),
        };
        assert!(e.to_string().contains("Path traversal detected"));
        let e = GuardError::OutsideAllowedDirectories { path: "/etc".into() };
        assert!(e.to_string().contains("outside allowed directories"));
        let e = GuardError::InvalidUrlFormat { url: "x".into() };
        assert!(e.to_string().contains("Invalid URL format"));
        let e = GuardError::InvalidProtocol { scheme: "ftp".into() };
        assert!(e.to_string().contains("Invalid protocol"));
        let e = GuardError::SsrfProtection {
            host: "127.0.0.1".into(),
        };
        assert!(e.to_string().contains("SSRF protection"));
        let e = GuardError::NotInAllowlist {
            host: "evil.com".into(),
        };
        assert!(e.to_string().contains("allow-list"));
        assert!(GuardError::CredentialsInUrl.to_string().contains("credentials"));
        assert!(GuardError::ExplicitPort.to_string().contains("explicit ports"));
        let e = GuardError::ProtocolRelative {
            target: "//evil.com".into(),
        };
        assert!(e.to_string().contains("Protocol-relative"));
        let e = GuardError::DangerousProtocol {
            scheme: "javascript".into(),
        };
        assert!(e.to_string().contains("Dangerous protocol"));
        let e = GuardError::OriginMismatch {
            expected: "https://a.example".into(),
            actual: "https://b.example".into(),
        };
        assert!(e.to_string().contains("origin mismatch"));
    }

    #[test]
    fn malformed_input_maps_to_400() {
        assert_eq!(GuardError::InvalidPath.http_status(), 400);
        assert_eq!(GuardError::ExplicitPort.http_status(), 400);
        assert_eq!(
            GuardError::InvalidProtocol { scheme: "ftp".into() }.http_status(),
            400
        );
    }

    #[test]
    fn policy_violations_map_to_403() {
        let e = GuardError::PathTraversal { path: "..".into() };
        assert_eq!(e.http_status(), 403);
        let e = GuardError::SsrfProtection {
            host: "10.0.0.1".into(),
        };
        assert_eq!(e.http_status(), 403);
        let e = GuardError::OriginMismatch {
            expected: "a".into(),
            actual: "b".into(),
        };
        assert_eq!(e.http_status(), 403);
    }

    #[test]
    fn kind_codes_are_distinct() {
        let kinds = [
            ErrorKind::InvalidPath,
            ErrorKind::PathTraversal,
            ErrorKind::OutsideAllowedDirectories,
            ErrorKind::InvalidUrlFormat,
            ErrorKind::InvalidProtocol,
            ErrorKind::SsrfProtection,
            ErrorKind::NotInAllowlist,
            ErrorKind::CredentialsInUrl,
            ErrorKind::ExplicitPort,
            ErrorKind::ProtocolRelative,
            ErrorKind::DangerousProtocol,
            ErrorKind::OriginMismatch,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }
}
