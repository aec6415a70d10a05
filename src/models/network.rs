//! IPv4 network (CIDR block) value type and mask arithmetic.
//!
//! [`Network`] is the address + prefix pair used for the parent block, for
//! every derived subnet, and for membership tests against host addresses.

use crate::error::Error;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Maximum prefix length of an IPv4 network (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn check_len(len: u8) -> Result<(), Error> {
    if len > MAX_LENGTH {
        Err(Error::InvalidNetwork(format!(
            "prefix length /{len} is longer than {MAX_LENGTH} bits"
        )))
    } else {
        Ok(())
    }
}

/// IPv4 network in CIDR notation.
///
/// The prefix length is always within `0..=32`; both constructors reject
/// anything longer. The base address is kept as given, use [`Network::lo`]
/// or [`Network::network`] for the aligned network address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Network {
    /// Create a new [`Network`] from a CIDR string (e.g., "10.0.0.0/8").
    pub fn new(addr_cidr: &str) -> Result<Network, Error> {
        let addr_cidr = addr_cidr.trim();
        let (addr, prefix) = addr_cidr
            .split_once('/')
            .ok_or_else(|| Error::InvalidNetwork(format!("missing '/' in {addr_cidr:?}")))?;
        let addr: Ipv4Addr = addr
            .trim()
            .parse()
            .map_err(|_| Error::InvalidNetwork(format!("invalid address {addr:?}")))?;
        let prefix: u8 = prefix
            .trim()
            .parse()
            .map_err(|_| Error::InvalidNetwork(format!("invalid prefix length {prefix:?}")))?;
        Network::from_parts(addr, prefix)
    }

    /// Create a new [`Network`] from an address and a prefix length.
    pub fn from_parts(addr: Ipv4Addr, prefix: u8) -> Result<Network, Error> {
        check_len(prefix)?;
        Ok(Network { addr, prefix })
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn mask(&self) -> u32 {
        // prefix <= 32 is checked on construction
        (((u32::MAX as u64) >> (MAX_LENGTH - self.prefix)) << (MAX_LENGTH - self.prefix)) as u32
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask())
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !self.mask())
    }

    /// Same network with the base address aligned to the prefix.
    pub fn network(&self) -> Network {
        Network {
            addr: self.lo(),
            prefix: self.prefix,
        }
    }

    /// Number of addresses covered, including network and broadcast.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// Membership test for any IP address; IPv6 addresses never match.
    pub fn contains_ip(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.contains(v4),
            IpAddr::V6(_) => false,
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::new(s)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::new(&s).map_err(de::Error::custom)
    }
}
