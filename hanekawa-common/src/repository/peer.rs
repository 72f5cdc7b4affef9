use crate::types::{AddressFamily, InfoHash, Peer, PeerStatistics};

use super::Error;

/// Swarm membership storage shared by every request.
///
/// Implementations must be safe for any number of concurrent callers. Each
/// call is expected to be atomic for its info hash; nothing spanning several
/// calls is.
#[async_trait::async_trait]
pub trait PeerRepository: Send + Sync {
    async fn put_seeder(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;

    /// Fails with [`Error::ResourceDoesNotExist`] if the peer is not seeding.
    async fn delete_seeder(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;

    async fn put_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;

    /// Fails with [`Error::ResourceDoesNotExist`] if the peer is not leeching.
    async fn delete_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;

    /// Moves a peer from the leechers to the seeders of a swarm.
    async fn graduate_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;

    /// Drops every peer of a swarm, for all address families.
    async fn delete_info_hash(&self, info_hash: &InfoHash) -> Result<(), Error>;

    /// Unknown swarms scrape as all zeroes.
    async fn scrape_swarm(&self, info_hash: &InfoHash, family: AddressFamily) -> PeerStatistics;

    /// Picks up to `num_want` peers of the announcer's address family to hand
    /// back in an announce response, leaving out the announcer itself.
    ///
    /// Fails with [`Error::ResourceDoesNotExist`] for an unknown swarm.
    async fn announce_peers(
        &self,
        info_hash: &InfoHash,
        seeding: bool,
        num_want: u32,
        announcer: &Peer,
    ) -> Result<Vec<Peer>, Error>;
}
