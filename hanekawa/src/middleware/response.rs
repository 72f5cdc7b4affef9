use super::{Context, Error, Hook};
use crate::proto::{
    AnnounceRequest, AnnounceResponse, ApiRequest, ApiResponse, ScrapeRequest, ScrapeResponse,
};

use hanekawa_common::repository::{self, peer::PeerRepository};
use hanekawa_common::types::AddressFamily;

use std::sync::Arc;

/// Fills in responses from the current state of the swarms.
///
/// Runs after [`SwarmInteractionHook`](super::SwarmInteractionHook) so that an
/// announce already counts towards its own response.
#[derive(Clone)]
pub struct ResponseHook {
    repository: Arc<dyn PeerRepository>,
}

impl ResponseHook {
    pub fn new(repository: Arc<dyn PeerRepository>) -> Self {
        Self { repository }
    }

    async fn append_peers(
        &self,
        req: &AnnounceRequest,
        resp: &mut AnnounceResponse,
    ) -> Result<(), Error> {
        let seeding = req.left == 0;
        let result = self
            .repository
            .announce_peers(&req.info_hash, seeding, req.num_want, &req.peer)
            .await;

        let mut peers = match result {
            Ok(peers) => peers,
            Err(repository::Error::ResourceDoesNotExist) => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        // Some clients expect at least their own peer back when they are
        // alone in a swarm.
        if peers.is_empty() {
            peers.push(req.peer.clone());
        }

        match req.peer.address_family() {
            AddressFamily::Ipv4 => resp.ipv4_peers = peers,
            AddressFamily::Ipv6 => resp.ipv6_peers = peers,
            AddressFamily::Unknown => {
                panic!("attempted to append peer that is neither IPv4 nor IPv6")
            }
        }

        Ok(())
    }
}

fn scrape_address_family(ctx: &Context, req: &ScrapeRequest) -> AddressFamily {
    match req.address_family {
        AddressFamily::Unknown if ctx.scrape_is_ipv6 => AddressFamily::Ipv6,
        AddressFamily::Unknown => AddressFamily::Ipv4,
        family => family,
    }
}

#[async_trait::async_trait]
impl Hook for ResponseHook {
    async fn handle_announce(
        &self,
        ctx: Context,
        req: &mut AnnounceRequest,
        resp: &mut AnnounceResponse,
    ) -> Result<Context, Error> {
        if ctx.skip_response {
            return Ok(ctx);
        }

        let stats = self
            .repository
            .scrape_swarm(&req.info_hash, req.peer.address_family())
            .await;
        resp.complete = stats.complete;
        resp.incomplete = stats.incomplete;

        self.append_peers(req, resp).await?;

        Ok(ctx)
    }

    async fn handle_scrape(
        &self,
        ctx: Context,
        req: &mut ScrapeRequest,
        resp: &mut ScrapeResponse,
    ) -> Result<Context, Error> {
        if ctx.skip_response {
            return Ok(ctx);
        }

        let family = scrape_address_family(&ctx, req);
        resp.files.reserve(req.info_hashes.len());

        for info_hash in &req.info_hashes {
            let stats = self.repository.scrape_swarm(info_hash, family).await;
            resp.files.push(stats);
        }

        Ok(ctx)
    }

    async fn handle_api(
        &self,
        ctx: Context,
        _req: &mut ApiRequest,
        _resp: &mut ApiResponse,
    ) -> Result<Context, Error> {
        Ok(ctx)
    }
}
