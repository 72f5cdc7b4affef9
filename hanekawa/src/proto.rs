//! Requests and responses as they travel through the middleware chain.
//!
//! Frontends decode the wire format into these types, run them through a
//! [`Chain`](crate::middleware::Chain) and encode whatever the chain leaves in
//! the response.

use hanekawa_common::types::{AddressFamily, Event, InfoHash, Peer, PeerStatistics};

pub const API_METHOD_DELETE: &str = "delete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceRequest {
    pub info_hash: InfoHash,
    pub peer: Peer,
    /// Transfer totals as reported by the client. Frontends decode them, but
    /// none of the standard hooks read them.
    pub uploaded: u64,
    pub downloaded: u64,
    /// Bytes the peer still has to download; zero means it is seeding.
    pub left: u64,
    pub event: Event,
    /// Untrusted until sanitized. Zero means the client did not ask.
    pub num_want: u32,
}

/// Only one of `ipv4_peers` and `ipv6_peers` is ever filled in, matching the
/// address family of the announcing peer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnnounceResponse {
    pub complete: u32,
    pub incomplete: u32,
    pub ipv4_peers: Vec<Peer>,
    pub ipv6_peers: Vec<Peer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub info_hashes: Vec<InfoHash>,
    pub address_family: AddressFamily,
}

/// One entry per info hash of the (sanitized) request, in request order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeResponse {
    pub files: Vec<PeerStatistics>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: String,
    pub info_hashes: Vec<InfoHash>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApiResponse {}
