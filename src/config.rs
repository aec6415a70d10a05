//! Run configuration: inventory URL, parent network and new prefix length.
//!
//! Read from an INI style file with a `[default]` section, e.g.
//!
//! ```text
//! [default]
//! api_url = https://api.nordvpn.com/v1/servers?limit=16384
//! subnet = 10.0.0.0/8
//! new_prefix = 16
//! ```
//!
//! Environment variables `API_URL`, `SUBNET` and `NEW_PREFIX` override the file.

use crate::error::Error;
use crate::models::Network;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Section holding the settings.
pub const SECTION: &str = "default";

static SECTION_REGEX: OnceLock<Regex> = OnceLock::new();
static KEY_VALUE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_section_regex() -> &'static Regex {
    SECTION_REGEX.get_or_init(|| Regex::new(r"^\s*\[([^\]]+)\]\s*$").expect("Invalid Regex"))
}

fn get_key_value_regex() -> &'static Regex {
    KEY_VALUE_REGEX
        .get_or_init(|| Regex::new(r"^\s*([^=:\s][^=:]*?)\s*[=:]\s*(.*?)\s*$").expect("Invalid Regex"))
}

/// Collect `key = value` pairs of one `[section]`; keys are lower-cased.
pub fn parse_ini_section(content: &str, section: &str) -> Option<HashMap<String, String>> {
    let mut current: Option<String> = None;
    let mut values: Option<HashMap<String, String>> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        if let Some(caps) = get_section_regex().captures(line) {
            let name = caps[1].trim().to_string();
            if name == section && values.is_none() {
                values = Some(HashMap::new());
            }
            current = Some(name);
            continue;
        }
        if current.as_deref() != Some(section) {
            continue;
        }
        match get_key_value_regex().captures(line) {
            Some(caps) => {
                if let Some(values) = values.as_mut() {
                    values.insert(caps[1].to_lowercase(), caps[2].to_string());
                }
            }
            None => log::warn!("Ignoring config line without key/value: {line:?}"),
        }
    }
    values
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL of the server inventory API.
    pub api_url: String,
    /// Parent network to partition.
    pub subnet: Network,
    /// Prefix length of the generated subnets.
    pub new_prefix: u8,
}

impl Config {
    /// Build a config from raw text values.
    pub fn from_values(api_url: &str, subnet: &str, new_prefix: &str) -> Result<Config, Error> {
        let subnet = Network::new(subnet)?;
        let new_prefix: u8 = new_prefix
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("new_prefix is not a prefix length: {new_prefix:?}")))?;
        Ok(Config {
            api_url: api_url.trim().to_string(),
            subnet,
            new_prefix,
        })
    }

    /// Build a config from file content, letting `env` override single keys.
    ///
    /// `env` is asked for the upper-case key name (`API_URL`, ...).
    pub fn from_sources<F>(content: Option<&str>, env: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_values = content
            .and_then(|c| parse_ini_section(c, SECTION))
            .unwrap_or_default();

        let lookup = |key: &str| -> Result<String, Error> {
            env(&key.to_uppercase())
                .or_else(|| file_values.get(key).cloned())
                .ok_or_else(|| Error::Config(format!("missing key {key} in [{SECTION}]")))
        };

        Config::from_values(&lookup("api_url")?, &lookup("subnet")?, &lookup("new_prefix")?)
    }

    /// Load the config file at `path`, overridden by environment variables.
    pub fn load(path: &Path) -> Result<Config, Error> {
        Config::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load the config file at `path`, with `env` supplying overrides.
    pub fn load_with_env<F>(path: &Path, env: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        log::debug!("Loading Configuration: {}", path.display());
        let content = match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                log::warn!("Cannot read config file {}: {e}", path.display());
                None
            }
        };
        let config = Config::from_sources(content.as_deref(), env).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{msg} ({})", path.display())),
            other => other,
        })?;
        log::debug!("Loaded subnet: {}", config.subnet);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
# servers to check
[other]
subnet = 1.0.0.0/8

[default]
api_url = https://api.example.com/v1/servers
subnet: 10.0.0.0/8
; comment
New_Prefix = 16
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_ini_section() {
        let values = parse_ini_section(SAMPLE, "default").unwrap();
        assert_eq!(values["api_url"], "https://api.example.com/v1/servers");
        assert_eq!(values["subnet"], "10.0.0.0/8");
        assert_eq!(values["new_prefix"], "16");
        assert_eq!(parse_ini_section(SAMPLE, "other").unwrap()["subnet"], "1.0.0.0/8");
        assert!(parse_ini_section(SAMPLE, "missing").is_none());
    }

    #[test]
    fn test_from_sources() {
        let config = Config::from_sources(Some(SAMPLE), no_env).unwrap();
        assert_eq!(config.api_url, "https://api.example.com/v1/servers");
        assert_eq!(config.subnet, Network::new("10.0.0.0/8").unwrap());
        assert_eq!(config.new_prefix, 16);
    }

    #[test]
    fn test_env_overrides_file() {
        let env = |key: &str| match key {
            "SUBNET" => Some("192.168.0.0/16".to_string()),
            _ => None,
        };
        let config = Config::from_sources(Some(SAMPLE), env).unwrap();
        assert_eq!(config.subnet.to_string(), "192.168.0.0/16");
        assert_eq!(config.new_prefix, 16);
    }

    #[test]
    fn test_missing_key() {
        let err = Config::from_sources(Some("[default]\napi_url = x\n"), no_env).unwrap_err();
        assert_eq!(err, Error::Config("missing key subnet in [default]".to_string()));
        assert!(Config::from_sources(None, no_env).is_err());
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            Config::from_values("x", "10.0.0.0", "16"),
            Err(Error::InvalidNetwork(_))
        ));
        assert!(matches!(
            Config::from_values("x", "10.0.0.0/8", "sixteen"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_values("x", "10.0.0.0/8", "300"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = Config::load_with_env(file.path(), no_env).unwrap();
        assert_eq!(config.api_url, "https://api.example.com/v1/servers");
        assert_eq!(config.subnet.to_string(), "10.0.0.0/8");
        assert_eq!(config.new_prefix, 16);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        let err = Config::load_with_env(&path, no_env).unwrap_err();
        assert_eq!(
            err,
            Error::Config(format!(
                "missing key api_url in [default] ({})",
                path.display()
            ))
        );

        let env = |key: &str| match key {
            "API_URL" => Some("https://api.example.com".to_string()),
            "SUBNET" => Some("10.0.0.0/8".to_string()),
            "NEW_PREFIX" => Some("12".to_string()),
            _ => None,
        };
        assert_eq!(Config::load_with_env(&path, env).unwrap().new_prefix, 12);
    }
}
