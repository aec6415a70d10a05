//! Error types for subnet partitioning, host classification and config loading.

use crate::models::Network;

/// Errors raised while building subnets and classifying hosts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Target prefix is wider than the parent or longer than 32 bits.
    #[error("Invalid prefix /{target} for parent network {parent}")]
    InvalidPrefix { parent: Network, target: u8 },

    /// A host address that does not parse as an IP address.
    #[error("Invalid address {address:?} for host {host}")]
    InvalidAddress { host: String, address: String },

    /// An inventory record that could not be turned into a host.
    #[error("Malformed server record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// A CIDR string that does not parse.
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
