//! Host name resolution.
//!
//! Turns the operator's host string into the single address a scan will
//! probe. IP literals are used as-is; anything else goes through DNS using
//! the system resolver configuration (`/etc/resolv.conf`, hosts file).
//! Of the addresses returned, the first one whose family this machine can
//! open a TCP socket for wins.

use crate::error::ResolveError;
use crate::types::{AddressFamily, ResolvedTarget};
use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::IpAddr;
use tracing::{debug, warn};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Source of addresses for a host name.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// All addresses `host` resolves to, in resolver preference order.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError>;

    /// Resolve `host` to the one address the scan will use.
    async fn resolve(&self, host: &str) -> Result<ResolvedTarget, ResolveError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ResolveError::EmptyHost);
        }

        let addresses = match parse_ip_literal(host) {
            Some(ip) => vec![ip],
            None => self.lookup(host).await?,
        };
        debug!(host, ?addresses, "resolved host");

        select_address(host, &addresses, family_supported)
    }
}

/// Resolver backed by the system DNS configuration.
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl SystemResolver {
    /// Build a resolver from the system configuration, falling back to
    /// public defaults if it cannot be read.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            warn!(error = %e, "system resolver configuration unavailable, using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| ResolveError::LookupFailed {
                host: host.to_string(),
                reason: e.to_string(),
            })?;
        Ok(response.iter().collect())
    }
}

/// Parse an IP literal, accepting bracketed IPv6 (`[::1]`).
fn parse_ip_literal(host: &str) -> Option<IpAddr> {
    let unbracketed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    unbracketed.parse().ok()
}

/// Whether the local stack can create TCP sockets of `family`.
pub fn family_supported(family: AddressFamily) -> bool {
    let domain = match family {
        AddressFamily::Ipv4 => Domain::IPV4,
        AddressFamily::Ipv6 => Domain::IPV6,
    };
    Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).is_ok()
}

/// Pick the first address whose family passes `supported`.
///
/// Addresses of unsupported families are skipped, never substituted: if none
/// remain the host is unresolvable for this machine.
pub fn select_address(
    host: &str,
    addresses: &[IpAddr],
    supported: impl Fn(AddressFamily) -> bool,
) -> Result<ResolvedTarget, ResolveError> {
    let first = addresses
        .first()
        .ok_or_else(|| ResolveError::NoAddresses(host.to_string()))?;

    match addresses
        .iter()
        .find(|ip| supported(AddressFamily::of(**ip)))
    {
        Some(ip) => {
            if ip != first {
                warn!(host, skipped = %first, using = %ip, "skipping address of unsupported family");
            }
            Ok(ResolvedTarget::new(host, *ip))
        }
        None => Err(ResolveError::UnsupportedFamily {
            host: host.to_string(),
            family: AddressFamily::of(*first),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    /// Resolver that answers from a fixed table and never touches DNS.
    struct StaticResolver(Vec<(&'static str, Vec<IpAddr>)>);

    #[async_trait]
    impl AddressResolver for StaticResolver {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
            self.0
                .iter()
                .find(|(name, _)| *name == host)
                .map(|(_, addrs)| addrs.clone())
                .ok_or_else(|| ResolveError::LookupFailed {
                    host: host.to_string(),
                    reason: "no such host".to_string(),
                })
        }
    }

    const V4: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    const V6: IpAddr = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));

    #[tokio::test]
    async fn test_ip_literal_skips_lookup() {
        let resolver = StaticResolver(vec![]);
        let target = resolver.resolve("127.0.0.1").await.unwrap();
        assert_eq!(target.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.family, AddressFamily::Ipv4);
        assert_eq!(target.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_hostname_uses_lookup() {
        let resolver = StaticResolver(vec![("scanme.test", vec![V4])]);
        let target = resolver.resolve(" scanme.test ").await.unwrap();
        assert_eq!(target, ResolvedTarget::new("scanme.test", V4));
    }

    #[tokio::test]
    async fn test_unknown_host_fails() {
        let resolver = StaticResolver(vec![]);
        let err = resolver.resolve("nowhere.test").await.unwrap_err();
        assert!(matches!(err, ResolveError::LookupFailed { .. }));
    }

    #[tokio::test]
    async fn test_empty_host_fails() {
        let resolver = StaticResolver(vec![]);
        assert_eq!(resolver.resolve("  ").await, Err(ResolveError::EmptyHost));
    }

    #[tokio::test]
    async fn test_lookup_without_addresses_fails() {
        let resolver = StaticResolver(vec![("empty.test", vec![])]);
        assert_eq!(
            resolver.resolve("empty.test").await,
            Err(ResolveError::NoAddresses("empty.test".to_string()))
        );
    }

    #[test]
    fn test_parse_ip_literal() {
        assert_eq!(parse_ip_literal("::1"), Some(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert_eq!(parse_ip_literal("[::1]"), Some(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert_eq!(parse_ip_literal("example.com"), None);
    }

    #[test]
    fn test_select_first_usable() {
        let target = select_address("dual.test", &[V6, V4], |_| true).unwrap();
        assert_eq!(target.address, V6);

        let target =
            select_address("dual.test", &[V6, V4], |f| f == AddressFamily::Ipv4).unwrap();
        assert_eq!(target.address, V4);
    }

    #[test]
    fn test_select_unsupported_family_fails() {
        let err = select_address("v6only.test", &[V6], |f| f == AddressFamily::Ipv4).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnsupportedFamily {
                host: "v6only.test".to_string(),
                family: AddressFamily::Ipv6,
            }
        );
    }

    #[test]
    fn test_ipv4_is_supported_locally() {
        assert!(family_supported(AddressFamily::Ipv4));
    }
}
