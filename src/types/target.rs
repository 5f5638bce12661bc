//! Resolved scan target types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// IP protocol family of a resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    #[serde(rename = "ipv4")]
    Ipv4,
    #[serde(rename = "ipv6")]
    Ipv6,
}

impl AddressFamily {
    /// Family of the given address.
    pub fn of(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::Ipv4,
            IpAddr::V6(_) => Self::Ipv6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// A host that has been resolved to the single address the scan will probe.
///
/// Created once before scanning starts and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedTarget {
    /// The host as the operator typed it (hostname or IP literal).
    pub host: String,
    /// The address every probe connects to.
    pub address: IpAddr,
    /// Family of `address`.
    pub family: AddressFamily,
}

impl ResolvedTarget {
    /// Create a new resolved target; the family is derived from `address`.
    pub fn new(host: impl Into<String>, address: IpAddr) -> Self {
        Self {
            host: host.into(),
            address,
            family: AddressFamily::of(address),
        }
    }

    pub fn is_ipv6(&self) -> bool {
        self.family == AddressFamily::Ipv6
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.host, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_family_follows_address() {
        let v4 = ResolvedTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(v4.family, AddressFamily::Ipv4);
        assert!(!v4.is_ipv6());

        let v6 = ResolvedTarget::new("::1", IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(v6.family, AddressFamily::Ipv6);
        assert!(v6.is_ipv6());
    }

    #[test]
    fn test_display_includes_host_and_address() {
        let target = ResolvedTarget::new("example.com", "93.184.216.34".parse().unwrap());
        assert_eq!(target.to_string(), "example.com (93.184.216.34)");
    }
}
