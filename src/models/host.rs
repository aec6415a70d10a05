//! Host record as delivered by the server inventory.

use serde::{Deserialize, Serialize};

/// A named host and its (not yet parsed) IP address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Host name, e.g. `nz42.nordvpn.com`. Not required to be unique.
    pub name: String,
    /// IP address as text; parsed when the host is classified.
    pub address: String,
}

impl Host {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Host {
        Host {
            name: name.into(),
            address: address.into(),
        }
    }
}
