use hanekawa_common::{Config, Services};

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod peer;

pub use peer::MemoryPeerRepository;

pub struct Storage {
    pub peer: Arc<MemoryPeerRepository>,
}

impl Storage {
    pub fn start(cfg: &Config) -> Self {
        log::info!("starting in-memory storage with {} shards", cfg.shard_count);

        let peer = Arc::new(MemoryPeerRepository::new(cfg.shard_count));

        Self { peer }
    }

    pub fn services(&self) -> Services {
        Services {
            peer_repository: self.peer.clone(),
        }
    }

    /// Spawns the garbage collector onto the current runtime.
    pub fn spawn_gc(&self, cfg: &Config, token: CancellationToken) -> JoinHandle<()> {
        let interval = Duration::from_secs(cfg.gc_interval);
        let peer_lifetime = Duration::from_secs(cfg.peer_lifetime);

        tokio::spawn(self.peer.clone().run_gc(interval, peer_lifetime, token))
    }
}
