//! Domain models for the subnet summary.
//!
//! - [`Network`] - IPv4 network in CIDR notation, used for parent and subnets
//! - [`Host`] - inventory host record

mod host;
mod network;

// Re-export public types
pub use host::Host;
pub use network::{Network, MAX_LENGTH};
