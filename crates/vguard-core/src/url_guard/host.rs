//! Host classification for outbound fetch targets.

use std::net::IpAddr;

use url::Host;

use crate::ip_class::is_blocked_destination;

/// Hostnames that always refer to the local machine or a metadata service.
const BLOCKED_NAMES: [&str; 3] = ["localhost", "metadata.google.internal", "metadata"];

/// True if `host` must not be fetched from.
///
/// Domain names are compared literally; no DNS lookup happens here.
pub(crate) fn is_blocked_host(host: &Host<&str>) -> bool {
    match host {
        Host::Ipv4(v4) => is_blocked_destination(IpAddr::V4(*v4)),
        Host::Ipv6(v6) => is_blocked_destination(IpAddr::V6(*v6)),
        Host::Domain(name) => is_blocked_name(name),
    }
}

fn is_blocked_name(name: &str) -> bool {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    BLOCKED_NAMES.contains(&name.as_str()) || name.ends_with(".localhost")
}
