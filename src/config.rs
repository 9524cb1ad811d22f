use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_PORT_PREFIX: &str = "faderport";
pub const DEFAULT_CLIENT_NAME: &str = "faderport";

/// Where to find the device, loaded from YAML.
///
/// ```yaml
/// client_name: faderport
/// port_prefix: faderport
/// index: 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client name registered with the MIDI backend.
    pub client_name: String,
    /// Ports whose name starts with this (ignoring case) are FaderPorts.
    pub port_prefix: String,
    /// Which FaderPort to open when several are attached.
    pub index: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            port_prefix: DEFAULT_PORT_PREFIX.to_string(),
            index: 0,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_yaml_str("index: 2\n").unwrap();
        assert_eq!(config.index, 2);
        assert_eq!(config.port_prefix, DEFAULT_PORT_PREFIX);
        assert_eq!(config.client_name, DEFAULT_CLIENT_NAME);
    }

    #[test]
    fn parses_every_field() {
        let config = Config::from_yaml_str(
            "client_name: mixer\nport_prefix: \"FaderPort 8\"\nindex: 1\n",
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                client_name: "mixer".into(),
                port_prefix: "FaderPort 8".into(),
                index: 1,
            }
        );
    }

    #[test]
    fn rejects_bad_types() {
        assert!(matches!(
            Config::from_yaml_str("index: first\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Config::load("/nonexistent/faderport.yml"),
            Err(Error::Io(_))
        ));
    }
}
