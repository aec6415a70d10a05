//! Cache file for the server list.
//!
//! Lets repeated runs reuse one API response instead of fetching again.

use super::api::{fetch_servers, parse_servers};
use super::Inventory;
use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Date stamped cache file name in the current directory.
pub fn default_cache_file() -> PathBuf {
    let now = chrono::Local::now();
    PathBuf::from(format!("servers_cache_{}.json", now.format("%Y-%m-%d")))
}

/// Pick the cache file: an explicit path first, else the dated default when enabled.
pub fn cache_file_or_default(cache_file: Option<PathBuf>, use_default: bool) -> Option<PathBuf> {
    cache_file.or_else(|| use_default.then(default_cache_file))
}

/// Load hosts from `cache_file` when it exists, otherwise from the API at `url`.
///
/// # Arguments
/// * `cache_file` - Cache to read or create. `None` always fetches and writes nothing.
/// * `url` - Inventory API URL
///
/// A freshly fetched response is only written to the cache once it decodes.
pub async fn read_host_cache(
    cache_file: Option<&Path>,
    url: &str,
) -> Result<Inventory, Box<dyn Error>> {
    let cache_file = match cache_file {
        Some(file) => file,
        None => return parse_servers(&fetch_servers(url).await?),
    };

    match std::fs::read_to_string(cache_file) {
        Ok(json) => {
            log::info!("Reading from cache file: {}", cache_file.display());
            parse_servers(&json).map_err(|e| -> Box<dyn Error> {
                format!("Error in cache file {}: {e}", cache_file.display()).into()
            })
        }
        Err(e) if e.kind() != ErrorKind::NotFound => {
            Err(format!("Error reading cache file {}: {e}", cache_file.display()).into())
        }
        Err(_) => {
            log::warn!("Cache file not found: {}", cache_file.display());
            let json = fetch_servers(url).await?;
            let inventory = parse_servers(&json)?;
            log::warn!("Writing data to cache file: {}", cache_file.display());
            std::fs::write(cache_file, json).map_err(|e| {
                format!("Error writing cache file {}: {e}", cache_file.display())
            })?;
            Ok(inventory)
        }
    }
}
