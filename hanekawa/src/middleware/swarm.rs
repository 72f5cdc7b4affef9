use super::{Context, Error, Hook};
use crate::proto::{
    AnnounceRequest, AnnounceResponse, ApiRequest, ApiResponse, ScrapeRequest, ScrapeResponse,
    API_METHOD_DELETE,
};

use hanekawa_common::repository::{self, peer::PeerRepository};
use hanekawa_common::types::Event;

use std::sync::Arc;

/// Keeps swarm membership in the repository in line with what peers announce.
#[derive(Clone)]
pub struct SwarmInteractionHook {
    repository: Arc<dyn PeerRepository>,
}

impl SwarmInteractionHook {
    pub fn new(repository: Arc<dyn PeerRepository>) -> Self {
        Self { repository }
    }
}

fn allow_missing(result: Result<(), repository::Error>) -> Result<(), repository::Error> {
    match result {
        Err(repository::Error::ResourceDoesNotExist) => Ok(()),
        other => other,
    }
}

#[async_trait::async_trait]
impl Hook for SwarmInteractionHook {
    async fn handle_announce(
        &self,
        ctx: Context,
        req: &mut AnnounceRequest,
        _resp: &mut AnnounceResponse,
    ) -> Result<Context, Error> {
        if ctx.skip_swarm_interaction {
            return Ok(ctx);
        }

        let info_hash = &req.info_hash;
        let peer = &req.peer;

        match req.event {
            Event::Stopped => {
                allow_missing(self.repository.delete_seeder(info_hash, peer).await)?;
                allow_missing(self.repository.delete_leecher(info_hash, peer).await)?;
            }
            Event::Completed => self.repository.graduate_leecher(info_hash, peer).await?,
            // Completed announces have left == 0 too. Peers that were never
            // leeching here skip the graduation lookup and go in directly.
            _ if req.left == 0 => self.repository.put_seeder(info_hash, peer).await?,
            _ => self.repository.put_leecher(info_hash, peer).await?,
        }

        tracing::trace!(%info_hash, event = %req.event, left = req.left, "updated swarm");

        Ok(ctx)
    }

    async fn handle_scrape(
        &self,
        ctx: Context,
        _req: &mut ScrapeRequest,
        _resp: &mut ScrapeResponse,
    ) -> Result<Context, Error> {
        Ok(ctx)
    }

    async fn handle_api(
        &self,
        ctx: Context,
        req: &mut ApiRequest,
        _resp: &mut ApiResponse,
    ) -> Result<Context, Error> {
        if req.method != API_METHOD_DELETE {
            return Ok(ctx);
        }

        for info_hash in &req.info_hashes {
            if let Err(e) = self.repository.delete_info_hash(info_hash).await {
                tracing::warn!(%info_hash, error = %e, "failed to delete swarm");
            }
        }

        Ok(ctx)
    }
}
