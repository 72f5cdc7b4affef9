use crate::proto::AnnounceRequest;

use hanekawa_common::repository::{peer::PeerRepository, Error};
use hanekawa_common::types::{
    AddressFamily, Event, InfoHash, Peer, PeerId, PeerIp, PeerStatistics,
};

mockall::mock! {
    pub Repository {}

    #[async_trait::async_trait]
    impl PeerRepository for Repository {
        async fn put_seeder(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;
        async fn delete_seeder(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;
        async fn put_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;
        async fn delete_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;
        async fn graduate_leecher(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error>;
        async fn delete_info_hash(&self, info_hash: &InfoHash) -> Result<(), Error>;
        async fn scrape_swarm(&self, info_hash: &InfoHash, family: AddressFamily) -> PeerStatistics;
        async fn announce_peers(
            &self,
            info_hash: &InfoHash,
            seeding: bool,
            num_want: u32,
            announcer: &Peer,
        ) -> Result<Vec<Peer>, Error>;
    }
}

pub fn info_hash(n: u8) -> InfoHash {
    InfoHash([n; 20])
}

fn peer_id(n: u8) -> PeerId {
    PeerId(format!("-HK0001-{n:012}").into_bytes())
}

/// An IPv4 peer the way sanitization leaves it.
pub fn ipv4_peer(n: u8) -> Peer {
    Peer {
        peer_id: peer_id(n),
        ip: PeerIp {
            octets: vec![10, 0, 0, n],
            family: AddressFamily::Ipv4,
        },
        port: 6881,
    }
}

/// An IPv6 peer the way sanitization leaves it.
pub fn ipv6_peer(n: u8) -> Peer {
    let mut octets = vec![0x20, 0x01, 0x0d, 0xb8];
    octets.resize(15, 0);
    octets.push(n);

    Peer {
        peer_id: peer_id(n),
        ip: PeerIp {
            octets,
            family: AddressFamily::Ipv6,
        },
        port: 6881,
    }
}

/// A peer straight out of a frontend, before sanitization.
pub fn raw_peer(n: u8, octets: Vec<u8>) -> Peer {
    Peer {
        peer_id: peer_id(n),
        ip: PeerIp::new(octets),
        port: 6881,
    }
}

pub fn announce(info_hash: InfoHash, peer: Peer, left: u64, event: Event) -> AnnounceRequest {
    AnnounceRequest {
        info_hash,
        peer,
        uploaded: 0,
        downloaded: 0,
        left,
        event,
        num_want: 0,
    }
}
