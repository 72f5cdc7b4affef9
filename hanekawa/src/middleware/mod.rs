//! Hooks that run between a frontend decoding a request and encoding the
//! response.
//!
//! Every hook sees the request and response of one operation and may modify
//! both. Hooks run strictly in the order a [`Chain`] was built with, and the
//! first error ends the chain: the frontend must then not send the response.

mod chain;
mod context;
mod response;
mod sanitize;
mod swarm;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use chain::Chain;
pub use context::Context;
pub use response::ResponseHook;
pub use sanitize::SanitizationHook;
pub use swarm::SwarmInteractionHook;

use crate::proto::{
    AnnounceRequest, AnnounceResponse, ApiRequest, ApiResponse, ScrapeRequest, ScrapeResponse,
};

use hanekawa_common::repository;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid IP")]
    InvalidIp,
    #[error(transparent)]
    Storage(#[from] repository::Error),
}

impl Error {
    /// Whether the failure was caused by the client's request, as opposed to
    /// the tracker itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidIp)
    }
}

#[async_trait::async_trait]
pub trait Hook: Send + Sync {
    async fn handle_announce(
        &self,
        ctx: Context,
        req: &mut AnnounceRequest,
        resp: &mut AnnounceResponse,
    ) -> Result<Context, Error>;

    async fn handle_scrape(
        &self,
        ctx: Context,
        req: &mut ScrapeRequest,
        resp: &mut ScrapeResponse,
    ) -> Result<Context, Error>;

    async fn handle_api(
        &self,
        ctx: Context,
        req: &mut ApiRequest,
        resp: &mut ApiResponse,
    ) -> Result<Context, Error>;
}
