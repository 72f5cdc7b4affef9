use super::{Context, Error, Hook, ResponseHook, SanitizationHook, SwarmInteractionHook};
use crate::proto::{
    AnnounceRequest, AnnounceResponse, ApiRequest, ApiResponse, ScrapeRequest, ScrapeResponse,
};

use hanekawa_common::{Config, Services};

use std::sync::Arc;

/// An ordered list of hooks, run one after another for every request.
///
/// The context returned by each hook is what the next one sees. The first
/// error stops the chain and is handed back to the frontend.
#[derive(Clone)]
pub struct Chain {
    hooks: Vec<Arc<dyn Hook>>,
}

impl Chain {
    pub fn new(hooks: Vec<Arc<dyn Hook>>) -> Self {
        Self { hooks }
    }

    /// Sanitization, then swarm interaction, then the response.
    pub fn standard(cfg: &Config, services: &Services) -> Self {
        let repository = services.peer_repository.clone();

        let hooks: Vec<Arc<dyn Hook>> = vec![
            Arc::new(SanitizationHook::from_config(cfg)),
            Arc::new(SwarmInteractionHook::new(repository.clone())),
            Arc::new(ResponseHook::new(repository)),
        ];

        Self::new(hooks)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[async_trait::async_trait]
impl Hook for Chain {
    #[tracing::instrument(level = "debug", skip_all, fields(info_hash = %req.info_hash))]
    async fn handle_announce(
        &self,
        mut ctx: Context,
        req: &mut AnnounceRequest,
        resp: &mut AnnounceResponse,
    ) -> Result<Context, Error> {
        for hook in &self.hooks {
            ctx = hook.handle_announce(ctx, req, resp).await?;
        }

        Ok(ctx)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(info_hashes = req.info_hashes.len()))]
    async fn handle_scrape(
        &self,
        mut ctx: Context,
        req: &mut ScrapeRequest,
        resp: &mut ScrapeResponse,
    ) -> Result<Context, Error> {
        for hook in &self.hooks {
            ctx = hook.handle_scrape(ctx, req, resp).await?;
        }

        Ok(ctx)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(method = %req.method))]
    async fn handle_api(
        &self,
        mut ctx: Context,
        req: &mut ApiRequest,
        resp: &mut ApiResponse,
    ) -> Result<Context, Error> {
        for hook in &self.hooks {
            ctx = hook.handle_api(ctx, req, resp).await?;
        }

        Ok(ctx)
    }
}
