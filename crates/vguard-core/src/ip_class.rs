//! Classification of IP addresses as internal (not reachable from the
//! public internet) or public.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Cloud metadata endpoints outside the link-local range.
const METADATA_V4: [Ipv4Addr; 1] = [Ipv4Addr::new(100, 100, 100, 200)];

/// Loopback, RFC1918, link-local or unique-local.
///
/// This is the narrower test used for socket peers: a peer in one of these
/// ranges is assumed to be a reverse proxy on the same host or LAN.
pub fn is_private_or_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_private_or_loopback(IpAddr::V4(v4));
            }
            v6.is_loopback() || is_unique_local(&v6) || is_unicast_link_local(&v6)
        }
    }
}

/// Any address an outbound fetch must never target: everything in
/// [`is_private_or_loopback`] plus unspecified, `0.0.0.0/8`, broadcast and
/// known metadata addresses.
///
/// IPv6 addresses that embed an IPv4 address (mapped `::ffff:a.b.c.d`,
/// compatible `::a.b.c.d`, NAT64 `64:ff9b::/96`) are judged by the embedded
/// address.
pub fn is_blocked_destination(ip: IpAddr) -> bool {
    if is_private_or_loopback(ip) {
        return true;
    }
    match ip {
        IpAddr::V4(v4) => {
            v4.is_unspecified()
                || v4.octets()[0] == 0
                || v4.is_broadcast()
                || METADATA_V4.contains(&v4)
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = embedded_ipv4(&v6) {
                return is_blocked_destination(IpAddr::V4(v4));
            }
            v6.is_unspecified()
        }
    }
}

/// The IPv4 address carried by a mapped, compatible or NAT64 address.
fn embedded_ipv4(ip: &Ipv6Addr) -> Option<Ipv4Addr> {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return Some(v4);
    }
    let seg = ip.segments();
    let compatible = seg[..6] == [0u16; 6];
    let nat64 = seg[..6] == [0x64u16, 0xff9b, 0, 0, 0, 0];
    if compatible || nat64 {
        let [.., hi, lo] = seg;
        return Some(Ipv4Addr::new(
            (hi >> 8) as u8,
            hi as u8,
            (lo >> 8) as u8,
            lo as u8,
        ));
    }
    None
}

/// fc00::/7
fn is_unique_local(ip: &Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xfe00) == 0xfc00
}

/// fe80::/10
fn is_unicast_link_local(ip: &Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xffc0) == 0xfe80
}
