//! Server inventory API access and decoding.

use super::Inventory;
use crate::error::Error;
use crate::models::Host;
use serde::Deserialize;
use serde_json::Value;

/// One server entry as returned by the inventory API; other fields are ignored.
#[derive(Deserialize, Debug)]
struct ServerRecord {
    hostname: Option<String>,
    #[serde(default)]
    ips: Vec<ServerIp>,
}

#[derive(Deserialize, Debug)]
struct ServerIp {
    ip: IpValue,
}

#[derive(Deserialize, Debug)]
struct IpValue {
    ip: String,
}

impl ServerRecord {
    fn into_host(self, index: usize) -> Result<Host, Error> {
        let name = self.hostname.ok_or_else(|| Error::MalformedRecord {
            index,
            reason: "missing hostname".to_string(),
        })?;
        let address = self
            .ips
            .into_iter()
            .next()
            .map(|ip| ip.ip.ip)
            .ok_or_else(|| Error::MalformedRecord {
                index,
                reason: format!("no ip address for {name}"),
            })?;
        Ok(Host { name, address })
    }
}

/// Fetch the raw server list from the inventory API.
pub async fn fetch_servers(url: &str) -> Result<String, Box<dyn std::error::Error>> {
    log::debug!("Pulling info from {url}");
    let response = reqwest::get(url)
        .await
        .map_err(|e| format!("Error fetching servers from {url}: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Inventory API {url} returned {status}").into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Error reading response body from {url}: {e}"))?;
    log::debug!("Received {} bytes from {url}", body.len());
    Ok(body)
}

/// Decode a JSON array of server records into hosts.
///
/// The payload must be a JSON array. Records that lack a hostname or an IP
/// address, or whose fields have the wrong type, are returned in
/// [`Inventory::rejected`] instead of failing the whole list.
pub fn parse_servers(json: &str) -> Result<Inventory, Box<dyn std::error::Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let records: Vec<Value> = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        format!(
            "Error parsing server list: path={} error={}",
            e.path(),
            e.inner()
        )
    })?;
    log::debug!("Loaded {} servers from API", records.len());

    let mut inventory = Inventory::default();
    for (index, record) in records.into_iter().enumerate() {
        let decoded: Result<ServerRecord, _> = serde_path_to_error::deserialize(record);
        let host = decoded
            .map_err(|e| Error::MalformedRecord {
                index,
                reason: format!("path={} error={}", e.path(), e.inner()),
            })
            .and_then(|record| record.into_host(index));
        match host {
            Ok(host) => inventory.hosts.push(host),
            Err(e) => {
                log::warn!("{e}");
                inventory.rejected.push(e);
            }
        }
    }
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_servers() {
        let json = r#"[
            {"id": 1, "name": "New Zealand #1", "hostname": "nz1.example.com",
             "ips": [{"id": 7, "ip": {"id": 3, "ip": "10.5.3.4", "version": 4}, "type": "entry"}]},
            {"hostname": "nz2.example.com",
             "ips": [{"ip": {"ip": "192.168.1.1"}}, {"ip": {"ip": "10.0.0.1"}}]}
        ]"#;
        let inventory = parse_servers(json).unwrap();
        assert_eq!(
            inventory.hosts,
            vec![
                Host::new("nz1.example.com", "10.5.3.4"),
                Host::new("nz2.example.com", "192.168.1.1"),
            ]
        );
        assert!(inventory.rejected.is_empty());
    }

    #[test]
    fn test_parse_servers_malformed_records() {
        let json = r#"[
            {"hostname": "ok.example.com", "ips": [{"ip": {"ip": "10.0.0.1"}}]},
            {"ips": [{"ip": {"ip": "10.0.0.2"}}]},
            {"hostname": "noip.example.com", "ips": []},
            {"hostname": 42, "ips": []}
        ]"#;
        let inventory = parse_servers(json).unwrap();
        assert_eq!(inventory.hosts.len(), 1);
        assert_eq!(inventory.rejected.len(), 3);
        assert_eq!(
            inventory.rejected[0],
            Error::MalformedRecord {
                index: 1,
                reason: "missing hostname".to_string()
            }
        );
        assert_eq!(
            inventory.rejected[1],
            Error::MalformedRecord {
                index: 2,
                reason: "no ip address for noip.example.com".to_string()
            }
        );
        match &inventory.rejected[2] {
            Error::MalformedRecord { index, reason } => {
                assert_eq!(*index, 3);
                assert!(reason.contains("hostname"), "reason={reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_servers_not_a_list() {
        let err = parse_servers(r#"{"error": "rate limited"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Error parsing server list"));
    }
}
