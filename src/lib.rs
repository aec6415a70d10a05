// cargo watch -x 'fmt' -x 'run'  // 'run -- --some-arg'

pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::Error;
pub use inventory::Inventory;
pub use processing::Classification;

use processing::{classify, partition};

/// One line per classified host: its subnet on a match, or a miss.
pub fn decision_lines(result: &Classification) -> Vec<String> {
    let mut lines = Vec::new();
    for (subnet, names) in result.matched() {
        lines.extend(
            names
                .iter()
                .map(|name| format!("Host: {name}, Subnet: {subnet}, Status: Match")),
        );
    }
    lines.extend(
        result
            .unmatched()
            .iter()
            .map(|name| format!("Host: {name}, Status: Miss")),
    );
    lines
}

/// Partition the configured network and classify the inventory hosts against it.
///
/// Inventory records that were rejected while decoding are appended to the
/// classification's error list so they are reported next to bad addresses.
pub fn reconcile(config: &Config, inventory: Inventory) -> Result<Classification, Error> {
    log::debug!("Generating new prefix size: {}", config.new_prefix);
    let subnets = partition(config.subnet, config.new_prefix)?;
    log::info!(
        "Generated {} subnets /{} from {}",
        subnets.len(),
        config.new_prefix,
        config.subnet
    );

    let mut result = classify(&subnets, &inventory.hosts);
    for line in decision_lines(&result) {
        log::debug!("{line}");
    }

    result.extend_errors(inventory.rejected);
    log::info!(
        "Classified {} hosts: matched={} unmatched={} errors={}",
        inventory.hosts.len(),
        result.matched_count(),
        result.unmatched().len(),
        result.errors().len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Host, Network};

    fn config(subnet: &str, new_prefix: u8) -> Config {
        Config {
            api_url: "http://localhost/servers".to_string(),
            subnet: Network::new(subnet).unwrap(),
            new_prefix,
        }
    }

    #[test]
    fn test_reconcile_merges_rejected_records() {
        let inventory = Inventory {
            hosts: vec![Host::new("h1", "10.5.3.4"), Host::new("h3", "not-an-ip")],
            rejected: vec![Error::MalformedRecord {
                index: 2,
                reason: "missing hostname".to_string(),
            }],
        };
        let result = reconcile(&config("10.0.0.0/8", 16), inventory).unwrap();
        assert_eq!(result.matched_count(), 1);
        assert_eq!(result.errors().len(), 2);
        assert!(matches!(result.errors()[0], Error::InvalidAddress { .. }));
        assert!(matches!(result.errors()[1], Error::MalformedRecord { .. }));
    }

    #[test]
    fn test_decision_lines_per_host() {
        let inventory = Inventory::from(vec![
            Host::new("h1", "10.5.3.4"),
            Host::new("h2", "192.168.1.1"),
            Host::new("h4", "10.5.9.9"),
        ]);
        let result = reconcile(&config("10.0.0.0/8", 16), inventory).unwrap();
        assert_eq!(
            decision_lines(&result),
            vec![
                "Host: h1, Subnet: 10.5.0.0/16, Status: Match",
                "Host: h4, Subnet: 10.5.0.0/16, Status: Match",
                "Host: h2, Status: Miss",
            ]
        );
    }

    #[test]
    fn test_reconcile_bad_prefix() {
        let err = reconcile(&config("10.0.0.0/16", 8), Inventory::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPrefix { target: 8, .. }));
    }
}
