use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

pub const INFO_HASH_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerId(pub Vec<u8>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash(pub [u8; INFO_HASH_LEN]);

impl InfoHash {
    pub fn from_hex(s: impl AsRef<str>) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0_u8; INFO_HASH_LEN];
        hex::decode_to_slice(s.as_ref(), &mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    Started,
    Completed,
    Stopped,
    /// A regular announce that carries no event.
    Interval,
}

impl Default for Event {
    fn default() -> Self {
        Self::Interval
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
            Self::Interval => "interval",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
    #[default]
    Unknown,
}

/// The raw address of a peer as decoded by a frontend.
///
/// `family` is left as [`AddressFamily::Unknown`] by frontends and is only
/// ever filled in by request sanitization, which also normalizes IPv4
/// addresses to their four byte form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerIp {
    pub octets: Vec<u8>,
    pub family: AddressFamily,
}

impl PeerIp {
    pub fn new(octets: impl Into<Vec<u8>>) -> Self {
        Self {
            octets: octets.into(),
            family: AddressFamily::Unknown,
        }
    }

    /// Returns the IPv4 form of the address, if it has one.
    ///
    /// Both plain four byte addresses and IPv4-mapped IPv6 addresses
    /// (`::ffff:a.b.c.d`) qualify.
    pub fn to_ipv4_octets(&self) -> Option<[u8; 4]> {
        match self.octets.len() {
            4 => self.octets.as_slice().try_into().ok(),
            16 => {
                let octets: [u8; 16] = self.octets.as_slice().try_into().ok()?;
                Ipv6Addr::from(octets).to_ipv4_mapped().map(|ip| ip.octets())
            }
            _ => None,
        }
    }

    pub fn to_ip_addr(&self) -> Option<IpAddr> {
        match self.octets.len() {
            4 => {
                let octets: [u8; 4] = self.octets.as_slice().try_into().ok()?;
                Some(IpAddr::from(octets))
            }
            16 => {
                let octets: [u8; 16] = self.octets.as_slice().try_into().ok()?;
                Some(IpAddr::from(octets))
            }
            _ => None,
        }
    }
}

impl From<IpAddr> for PeerIp {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(ip) => Self::new(ip.octets()),
            IpAddr::V6(ip) => Self::new(ip.octets()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Peer {
    pub peer_id: PeerId,
    pub ip: PeerIp,
    pub port: u16,
}

impl Peer {
    pub fn address_family(&self) -> AddressFamily {
        self.ip.family
    }
}

/// Aggregate counts for one swarm, as reported by a scrape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PeerStatistics {
    pub complete: u32,
    pub downloaded: u32,
    pub incomplete: u32,
}
