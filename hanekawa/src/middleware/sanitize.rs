use super::{Context, Error, Hook};
use crate::proto::{
    AnnounceRequest, AnnounceResponse, ApiRequest, ApiResponse, ScrapeRequest, ScrapeResponse,
};

use hanekawa_common::types::AddressFamily;
use hanekawa_common::Config;

const IPV6_LEN: usize = 16;

/// Enforces assumptions about requests that frontends may not have checked.
///
/// - `num_want` is capped at `max_numwant`, and zero is replaced with
///   `default_numwant`.
/// - The announcing peer's address must be IPv4 (possibly IPv4-mapped) or
///   IPv6. IPv4 addresses are cut down to four bytes. The address family is
///   recorded on the peer; anything else fails with [`Error::InvalidIp`].
/// - Scrapes are cut down to `max_scrape_infohashes` info hashes.
///
/// Must be the first hook of every chain.
#[derive(Debug, Clone)]
pub struct SanitizationHook {
    max_numwant: u32,
    default_numwant: u32,
    max_scrape_infohashes: u32,
}

impl SanitizationHook {
    /// `default_numwant` is kept within `1..=max_numwant`.
    pub fn new(max_numwant: u32, default_numwant: u32, max_scrape_infohashes: u32) -> Self {
        Self {
            max_numwant,
            default_numwant: default_numwant.clamp(1, max_numwant.max(1)),
            max_scrape_infohashes,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.max_numwant,
            cfg.default_numwant,
            cfg.max_scrape_infohashes,
        )
    }
}

#[async_trait::async_trait]
impl Hook for SanitizationHook {
    async fn handle_announce(
        &self,
        ctx: Context,
        req: &mut AnnounceRequest,
        _resp: &mut AnnounceResponse,
    ) -> Result<Context, Error> {
        if req.num_want > self.max_numwant {
            req.num_want = self.max_numwant;
        }

        if req.num_want == 0 {
            req.num_want = self.default_numwant;
        }

        let ip = &mut req.peer.ip;
        if let Some(octets) = ip.to_ipv4_octets() {
            ip.octets = octets.to_vec();
            ip.family = AddressFamily::Ipv4;
        } else if ip.octets.len() == IPV6_LEN {
            ip.family = AddressFamily::Ipv6;
        } else {
            tracing::debug!(len = ip.octets.len(), "rejecting announce with invalid IP");
            return Err(Error::InvalidIp);
        }

        Ok(ctx)
    }

    async fn handle_scrape(
        &self,
        ctx: Context,
        req: &mut ScrapeRequest,
        _resp: &mut ScrapeResponse,
    ) -> Result<Context, Error> {
        req.info_hashes.truncate(self.max_scrape_infohashes as usize);

        Ok(ctx)
    }

    async fn handle_api(
        &self,
        ctx: Context,
        _req: &mut ApiRequest,
        _resp: &mut ApiResponse,
    ) -> Result<Context, Error> {
        // API callers are trusted.
        Ok(ctx)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::middleware::test_helpers::{announce, info_hash, raw_peer};

    use hanekawa_common::types::{Event, InfoHash};
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn hook() -> SanitizationHook {
        SanitizationHook::new(50, 30, 3)
    }

    async fn sanitize(mut req: AnnounceRequest) -> (Result<Context, Error>, AnnounceRequest) {
        let mut resp = AnnounceResponse::default();
        let result = hook()
            .handle_announce(Context::new(), &mut req, &mut resp)
            .await;
        (result, req)
    }

    fn ipv4_announce(num_want: u32) -> AnnounceRequest {
        AnnounceRequest {
            num_want,
            ..announce(
                info_hash(1),
                raw_peer(1, vec![192, 168, 1, 20]),
                0,
                Event::Started,
            )
        }
    }

    #[tokio::test]
    async fn caps_num_want() {
        let (result, req) = sanitize(ipv4_announce(500)).await;

        assert!(result.is_ok());
        assert_eq!(50, req.num_want);
    }

    #[tokio::test]
    async fn defaults_zero_num_want() {
        let (_, req) = sanitize(ipv4_announce(0)).await;

        assert_eq!(30, req.num_want);
    }

    #[tokio::test]
    async fn keeps_reasonable_num_want() {
        let (_, req) = sanitize(ipv4_announce(12)).await;

        assert_eq!(12, req.num_want);
    }

    #[tokio::test]
    async fn default_stays_within_bounds() {
        for (default, expected) in [(0, 1), (40, 10)] {
            let mut req = ipv4_announce(0);
            SanitizationHook::new(10, default, 3)
                .handle_announce(Context::new(), &mut req, &mut AnnounceResponse::default())
                .await
                .unwrap();

            assert_eq!(expected, req.num_want);
        }
    }

    #[tokio::test]
    async fn tags_ipv4() {
        let (_, req) = sanitize(ipv4_announce(0)).await;

        assert_eq!(vec![192, 168, 1, 20], req.peer.ip.octets);
        assert_eq!(AddressFamily::Ipv4, req.peer.ip.family);
    }

    #[tokio::test]
    async fn shortens_mapped_ipv4() {
        let mapped = Ipv4Addr::new(192, 168, 1, 20).to_ipv6_mapped().octets();
        let req = announce(info_hash(1), raw_peer(1, mapped.to_vec()), 0, Event::Started);

        let (result, req) = sanitize(req).await;

        assert!(result.is_ok());
        assert_eq!(vec![192, 168, 1, 20], req.peer.ip.octets);
        assert_eq!(AddressFamily::Ipv4, req.peer.ip.family);
    }

    #[tokio::test]
    async fn tags_ipv6() {
        let octets = "2001:db8::1".parse::<Ipv6Addr>().unwrap().octets();
        let req = announce(info_hash(1), raw_peer(1, octets.to_vec()), 0, Event::Started);

        let (result, req) = sanitize(req).await;

        assert!(result.is_ok());
        assert_eq!(octets.to_vec(), req.peer.ip.octets);
        assert_eq!(AddressFamily::Ipv6, req.peer.ip.family);
    }

    #[tokio::test]
    async fn rejects_other_lengths() {
        for octets in [vec![], vec![1, 2, 3], vec![0; 8], vec![0; 17]] {
            let req = announce(info_hash(1), raw_peer(1, octets), 0, Event::Started);

            let (result, req) = sanitize(req).await;

            assert_eq!(Err(Error::InvalidIp), result);
            assert_eq!(AddressFamily::Unknown, req.peer.ip.family);
        }
    }

    #[tokio::test]
    async fn truncates_long_scrapes() {
        let info_hashes: Vec<InfoHash> = (1..=5).map(info_hash).collect();
        let mut req = ScrapeRequest {
            info_hashes: info_hashes.clone(),
            address_family: AddressFamily::Ipv4,
        };

        hook()
            .handle_scrape(Context::new(), &mut req, &mut ScrapeResponse::default())
            .await
            .unwrap();

        assert_eq!(&info_hashes[..3], &req.info_hashes[..]);
    }

    #[tokio::test]
    async fn leaves_short_scrapes_alone() {
        let info_hashes: Vec<InfoHash> = (1..=2).map(info_hash).collect();
        let mut req = ScrapeRequest {
            info_hashes: info_hashes.clone(),
            address_family: AddressFamily::Ipv4,
        };

        hook()
            .handle_scrape(Context::new(), &mut req, &mut ScrapeResponse::default())
            .await
            .unwrap();

        assert_eq!(info_hashes, req.info_hashes);
    }

    #[tokio::test]
    async fn does_not_touch_api_requests() {
        let mut req = ApiRequest {
            method: "delete".to_string(),
            info_hashes: vec![info_hash(1)],
        };
        let expected = req.clone();

        hook()
            .handle_api(Context::new(), &mut req, &mut ApiResponse::default())
            .await
            .unwrap();

        assert_eq!(expected, req);
    }
}
