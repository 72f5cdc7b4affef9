use hanekawa_common::{
    repository::{peer::PeerRepository, Error},
    types::{AddressFamily, InfoHash, Peer, PeerStatistics},
};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;

type SwarmKey = (InfoHash, AddressFamily);

#[derive(Debug, Default)]
struct Swarm {
    seeders: HashMap<Peer, OffsetDateTime>,
    leechers: HashMap<Peer, OffsetDateTime>,
    downloaded: u32,
}

impl Swarm {
    fn is_empty(&self) -> bool {
        self.seeders.is_empty() && self.leechers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Seeder,
    Leecher,
}

/// Keeps every swarm in memory, split across a fixed number of locks.
///
/// IPv4 and IPv6 peers of a torrent live in separate swarms: a peer is only
/// ever handed peers it can reach, and scrapes are counted per family.
pub struct MemoryPeerRepository {
    shards: Vec<RwLock<HashMap<SwarmKey, Swarm>>>,
}

impl MemoryPeerRepository {
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect();

        Self { shards }
    }

    fn shard(&self, info_hash: &InfoHash) -> &RwLock<HashMap<SwarmKey, Swarm>> {
        let [a, b, c, d, ..] = info_hash.0;
        let index = u32::from_be_bytes([a, b, c, d]) as usize % self.shards.len();
        &self.shards[index]
    }

    fn put(&self, info_hash: &InfoHash, peer: &Peer, role: Role, now: OffsetDateTime) {
        let mut shard = self.shard(info_hash).write();
        let swarm = shard
            .entry((*info_hash, peer.address_family()))
            .or_default();

        // A peer is either seeding or leeching, never both.
        let (add, remove) = match role {
            Role::Seeder => (&mut swarm.seeders, &mut swarm.leechers),
            Role::Leecher => (&mut swarm.leechers, &mut swarm.seeders),
        };
        remove.remove(peer);
        add.insert(peer.clone(), now);
    }

    fn delete(&self, info_hash: &InfoHash, peer: &Peer, role: Role) -> Result<(), Error> {
        let key = (*info_hash, peer.address_family());
        let mut shard = self.shard(info_hash).write();
        let swarm = shard.get_mut(&key).ok_or(Error::ResourceDoesNotExist)?;

        let removed = match role {
            Role::Seeder => swarm.seeders.remove(peer),
            Role::Leecher => swarm.leechers.remove(peer),
        };

        if swarm.is_empty() {
            shard.remove(&key);
        }

        removed.map(|_| ()).ok_or(Error::ResourceDoesNotExist)
    }

    fn graduate(
        &self,
        info_hash: &InfoHash,
        peer: &Peer,
        now: OffsetDateTime,
    ) -> Result<(), Error> {
        let mut shard = self.shard(info_hash).write();
        let swarm = shard
            .get_mut(&(*info_hash, peer.address_family()))
            .ok_or(Error::ResourceDoesNotExist)?;

        swarm
            .leechers
            .remove(peer)
            .ok_or(Error::ResourceDoesNotExist)?;
        swarm.seeders.insert(peer.clone(), now);
        swarm.downloaded = swarm.downloaded.saturating_add(1);

        Ok(())
    }

    /// Removes every peer that last announced before `cutoff`, returning how
    /// many were removed.
    pub fn collect_garbage(&self, cutoff: OffsetDateTime) -> usize {
        let mut removed = 0;

        for shard in &self.shards {
            let mut shard = shard.write();

            shard.retain(|_, swarm| {
                let before = swarm.seeders.len() + swarm.leechers.len();
                swarm.seeders.retain(|_, seen| *seen >= cutoff);
                swarm.leechers.retain(|_, seen| *seen >= cutoff);
                removed += before - swarm.seeders.len() - swarm.leechers.len();

                !swarm.is_empty()
            });
        }

        removed
    }

    /// Removes every peer that has not announced within `peer_lifetime` of
    /// `now`.
    pub fn expire(&self, now: OffsetDateTime, peer_lifetime: Duration) -> usize {
        let cutoff = time::Duration::try_from(peer_lifetime)
            .ok()
            .and_then(|lifetime| now.checked_sub(lifetime));

        match cutoff {
            Some(cutoff) => self.collect_garbage(cutoff),
            // No peer can be older than the earliest representable date.
            None => 0,
        }
    }

    /// Sweeps out peers that have not announced within `peer_lifetime`, every
    /// `interval`, until `token` is cancelled.
    pub async fn run_gc(
        self: Arc<Self>,
        interval: Duration,
        peer_lifetime: Duration,
        token: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = self.expire(OffsetDateTime::now_utc(), peer_lifetime);
                    log::debug!("garbage collection removed {removed} peers");
                }
            }
        }

        log::info!("garbage collection stopped");
    }
}

#[async_trait::async_trait]
impl PeerRepository for MemoryPeerRepository {
    async fn put_seeder(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error> {
        self.put(info_hash, peer, Role::Seeder, OffsetDateTime::now_utc());
        Ok(())
    }

    async fn delete_seeder(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error> {
        self.delete(info_hash, peer, Role::Seeder)
    }

    async fn put_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error> {
        self.put(info_hash, peer, Role::Leecher, OffsetDateTime::now_utc());
        Ok(())
    }

    async fn delete_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error> {
        self.delete(info_hash, peer, Role::Leecher)
    }

    async fn graduate_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error> {
        self.graduate(info_hash, peer, OffsetDateTime::now_utc())
    }

    async fn delete_info_hash(&self, info_hash: &InfoHash) -> Result<(), Error> {
        let mut shard = self.shard(info_hash).write();

        for family in [AddressFamily::Ipv4, AddressFamily::Ipv6, AddressFamily::Unknown] {
            shard.remove(&(*info_hash, family));
        }

        Ok(())
    }

    async fn scrape_swarm(&self, info_hash: &InfoHash, family: AddressFamily) -> PeerStatistics {
        let shard = self.shard(info_hash).read();

        shard
            .get(&(*info_hash, family))
            .map(|swarm| PeerStatistics {
                complete: swarm.seeders.len() as u32,
                downloaded: swarm.downloaded,
                incomplete: swarm.leechers.len() as u32,
            })
            .unwrap_or_default()
    }

    async fn announce_peers(
        &self,
        info_hash: &InfoHash,
        seeding: bool,
        num_want: u32,
        announcer: &Peer,
    ) -> Result<Vec<Peer>, Error> {
        let shard = self.shard(info_hash).read();
        let swarm = shard
            .get(&(*info_hash, announcer.address_family()))
            .ok_or(Error::ResourceDoesNotExist)?;

        // Seeders have nothing to gain from other seeders.
        let seeders = (!seeding).then(|| swarm.seeders.keys());

        let peers = seeders
            .into_iter()
            .flatten()
            .chain(swarm.leechers.keys())
            .filter(|peer| *peer != announcer)
            .take(num_want as usize)
            .cloned()
            .collect();

        Ok(peers)
    }
}
