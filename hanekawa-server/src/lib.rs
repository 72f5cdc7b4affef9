pub mod config;
mod logging;

use hanekawa::admin::AdminService;
use hanekawa::middleware::Chain;
use hanekawa_common::Config;
use hanekawa_storage::Storage;

use tokio_util::sync::CancellationToken;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
    #[error("failed to wait for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

/// Everything a frontend needs to serve requests.
pub struct Tracker {
    pub storage: Storage,
    pub chain: Chain,
    pub admin: AdminService,
}

impl Tracker {
    pub fn new(cfg: &Config) -> Self {
        let storage = Storage::start(cfg);
        let chain = Chain::standard(cfg, &storage.services());
        let admin = AdminService::new(cfg, chain.clone());

        Self {
            storage,
            chain,
            admin,
        }
    }
}

pub async fn start() -> Result<(), Error> {
    let _ = dotenvy::dotenv();

    let cfg = config::load_config()?;
    logging::init(&cfg)?;

    let tracker = Tracker::new(&cfg);

    let token = CancellationToken::new();
    let gc = tracker.storage.spawn_gc(&cfg, token.clone());

    tracing::info!(hooks = tracker.chain.len(), "tracker ready");

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    token.cancel();
    if let Err(e) = gc.await {
        tracing::error!(error = %e, "garbage collector did not stop cleanly");
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use hanekawa::middleware::{Context, Hook};
    use hanekawa::proto::{AnnounceRequest, AnnounceResponse, ScrapeRequest, ScrapeResponse};
    use hanekawa_common::types::{AddressFamily, Event, InfoHash, Peer, PeerId, PeerIp};

    use std::net::{IpAddr, Ipv4Addr};

    const HEX: &str = "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0";

    fn config() -> Config {
        Config {
            log_level: "info".to_string(),
            max_numwant: 50,
            default_numwant: 30,
            max_scrape_infohashes: 50,
            peer_lifetime: 1800,
            gc_interval: 180,
            shard_count: 8,
            enable_admin_api: true,
        }
    }

    async fn scrape(tracker: &Tracker, info_hash: InfoHash) -> ScrapeResponse {
        let mut req = ScrapeRequest {
            info_hashes: vec![info_hash],
            address_family: AddressFamily::Ipv4,
        };
        let mut resp = ScrapeResponse::default();

        tracker
            .chain
            .handle_scrape(Context::new(), &mut req, &mut resp)
            .await
            .unwrap();

        resp
    }

    #[tokio::test]
    async fn announce_scrape_and_delete() {
        let tracker = Tracker::new(&config());
        let info_hash = InfoHash::from_hex(HEX).unwrap();
        let mut req = AnnounceRequest {
            info_hash,
            peer: Peer {
                peer_id: PeerId(b"-HK0001-000000000001".to_vec()),
                ip: PeerIp::from(IpAddr::V4(Ipv4Addr::LOCALHOST)),
                port: 5005,
            },
            uploaded: 0,
            downloaded: 0,
            left: 1024,
            event: Event::Started,
            num_want: 0,
        };
        let mut resp = AnnounceResponse::default();

        tracker
            .chain
            .handle_announce(Context::new(), &mut req, &mut resp)
            .await
            .unwrap();

        assert_eq!(1, resp.incomplete);
        assert_eq!(vec![req.peer.clone()], resp.ipv4_peers);
        assert_eq!(1, scrape(&tracker, info_hash).await.files[0].incomplete);

        tracker.admin.delete_info_hashes(&[HEX]).await.unwrap();

        assert_eq!(0, scrape(&tracker, info_hash).await.files[0].incomplete);
    }
}
