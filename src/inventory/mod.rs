//! Server inventory: the hosts to classify.
//!
//! - [`api`] - Fetching and decoding the server list
//! - [`cache`] - Reusing a saved server list

mod api;
mod cache;

use crate::error::Error;
use crate::models::Host;

// Re-export public functions
pub use api::{fetch_servers, parse_servers};
pub use cache::{cache_file_or_default, default_cache_file, read_host_cache};

/// Hosts decoded from the inventory plus the records that could not be.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub hosts: Vec<Host>,
    /// One [`Error::MalformedRecord`] per rejected server record.
    pub rejected: Vec<Error>,
}

impl Inventory {
    /// Total number of records received.
    pub fn len(&self) -> usize {
        self.hosts.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Host>> for Inventory {
    fn from(hosts: Vec<Host>) -> Self {
        Inventory {
            hosts,
            rejected: Vec::new(),
        }
    }
}
