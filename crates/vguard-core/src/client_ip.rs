//! Originating client IP resolution with trusted-proxy awareness.
//!
//! `X-Forwarded-For` is honored only when the socket peer is itself a
//! private or loopback address (a reverse proxy on the same host or LAN) and
//! the deployment opted into trusting its proxy. A public peer always wins,
//! so a client connecting directly cannot spoof its address with the header.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::ip_class::is_private_or_loopback;

const FORWARDED_FOR: &str = "x-forwarded-for";
const MAPPED_V4_PREFIX: &str = "::ffff:";
pub const UNKNOWN_CLIENT: &str = "unknown";

/// The request fields client-IP resolution looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIpContext {
    /// Socket peer address as reported by the HTTP server, without port.
    #[serde(default)]
    pub remote_addr: Option<String>,
    /// Request headers; names are matched case-insensitively.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Client IP pre-parsed by the framework, used only when no socket
    /// address is available.
    #[serde(default)]
    pub ip: Option<String>,
    /// Whether the deployment trusts its reverse proxy.
    #[serde(default)]
    pub trust_proxy: bool,
}

impl RequestIpContext {
    pub fn from_peer(peer: SocketAddr, trust_proxy: bool) -> Self {
        Self {
            remote_addr: Some(peer.ip().to_string()),
            trust_proxy,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Resolves the originating client IP for logging and rate limiting.
///
/// Falls back to `req.ip`, then to `"unknown"`, when no socket address is
/// usable.
pub fn get_client_ip(req: &RequestIpContext) -> String {
    let Some(peer) = usable(req.remote_addr.as_deref()) else {
        return usable(req.ip.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());
    };

    if req.trust_proxy && peer_is_private(peer) {
        if let Some(forwarded) = req.header(FORWARDED_FOR).and_then(rightmost_entry) {
            return forwarded.to_string();
        }
    }
    peer.to_string()
}

/// Trims, drops an IPv4-mapped prefix, and rejects empty values.
fn usable(addr: Option<&str>) -> Option<&str> {
    let addr = addr?.trim();
    let addr = match addr.get(..MAPPED_V4_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(MAPPED_V4_PREFIX) => {
            let rest = &addr[MAPPED_V4_PREFIX.len()..];
            // Only strip when what remains is dotted IPv4, so `::ffff:7f00:1` stays intact.
            if rest.contains('.') {
                rest
            } else {
                addr
            }
        }
        _ => addr,
    };
    (!addr.is_empty()).then_some(addr)
}

/// An unparsable peer is treated as public: the header is then never trusted.
fn peer_is_private(peer: &str) -> bool {
    peer.parse::<IpAddr>()
        .map(is_private_or_loopback)
        .unwrap_or(false)
}

/// Right-most non-empty entry of a comma-separated header value.
fn rightmost_entry(value: &str) -> Option<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .next_back()
}
