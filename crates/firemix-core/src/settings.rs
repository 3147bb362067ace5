//! Output settings
//!
//! Client descriptors and output options as stored in the settings file.
//! Everything is validated at load time, so the output stage never has to
//! deal with an unknown protocol or a client without an address.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogConfig;
use crate::strand::{LayoutError, StrandLayout};

/// Default UDP port of Legacy controllers
pub const DEFAULT_LEGACY_PORT: u16 = 3020;
/// Default UDP port of OPC servers
pub const DEFAULT_OPC_PORT: u16 = 7890;
/// Default bind endpoint of the pub/sub socket
pub const DEFAULT_PUBSUB_ENDPOINT: &str = "tcp://*:3020";
/// Pause after each Legacy strand datagram
pub const DEFAULT_LEGACY_PACKET_DELAY_MS: u64 = 1;

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid strand layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Wire protocol spoken by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Protocol {
    /// Framed per-strand UDP with begin/end markers
    #[default]
    Legacy,
    /// Open Pixel Control over UDP
    #[serde(rename = "OPC", alias = "Opc")]
    Opc,
    /// ZeroMQ PUB socket shared by all subscribers
    #[serde(rename = "ZMQ", alias = "PubSub")]
    PubSub,
}

impl Protocol {
    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Legacy | Protocol::PubSub => DEFAULT_LEGACY_PORT,
            Protocol::Opc => DEFAULT_OPC_PORT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Protocol::Legacy => "Legacy",
            Protocol::Opc => "OPC",
            Protocol::PubSub => "ZMQ",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One LED controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Keep this client at full brightness regardless of the global dimmer
    #[serde(default, rename = "ignore-dimming", alias = "ignore_dimming")]
    pub ignore_dimming: bool,
}

fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Enabled client on the protocol's default port
    pub fn new(host: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            name: None,
            host: host.into(),
            port: protocol.default_port(),
            protocol,
            enabled: true,
            ignore_dimming: false,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ignoring_dimming(mut self, ignore: bool) -> Self {
        self.ignore_dimming = ignore;
        self
    }

    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// `name` if set, else `host:port`
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}:{}", self.host, self.port),
        }
    }

    fn validate(&self, index: usize) -> Result<(), SettingsError> {
        // Pub/sub clients connect to us, so they need no address.
        if self.protocol == Protocol::PubSub {
            return Ok(());
        }
        if self.host.trim().is_empty() {
            return Err(SettingsError::Invalid(format!(
                "client {} ({}) has no host",
                index, self.protocol
            )));
        }
        if self.port == 0 {
            return Err(SettingsError::Invalid(format!(
                "client {} ({}) has no port",
                index,
                self.label()
            )));
        }
        Ok(())
    }
}

/// Byte order of the color triple inside strand packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOrder {
    #[default]
    Rgb,
    /// For strands wired blue-first
    Bgr,
}

/// How the OPC channel byte is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpcChannel {
    /// Id of the last enabled strand plus one
    #[default]
    LastStrand,
    /// Channel 0, addressed to every output of the server
    Broadcast,
}

/// Networking section of the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkingSettings {
    pub clients: Vec<ClientConfig>,
    pub pubsub_endpoint: String,
    /// Open the pub/sub socket at all
    pub use_pubsub: bool,
    /// Send to OPC clients at all
    pub use_opc: bool,
    pub legacy_packet_delay_ms: u64,
    pub color_order: ColorOrder,
    pub opc_channel: OpcChannel,
}

impl Default for NetworkingSettings {
    fn default() -> Self {
        Self {
            clients: Vec::new(),
            pubsub_endpoint: DEFAULT_PUBSUB_ENDPOINT.to_string(),
            use_pubsub: true,
            use_opc: true,
            legacy_packet_delay_ms: DEFAULT_LEGACY_PACKET_DELAY_MS,
            color_order: ColorOrder::Rgb,
            opc_channel: OpcChannel::LastStrand,
        }
    }
}

impl NetworkingSettings {
    pub fn legacy_packet_delay(&self) -> Duration {
        Duration::from_millis(self.legacy_packet_delay_ms)
    }

    pub fn enabled_clients(&self) -> impl Iterator<Item = &ClientConfig> + '_ {
        self.clients.iter().filter(|c| c.enabled)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (index, client) in self.clients.iter().enumerate() {
            client.validate(index)?;
        }
        if self.use_pubsub && self.pubsub_endpoint.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "pub/sub is enabled but pubsub_endpoint is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One strand entry of the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandSettings {
    pub pixels: usize,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LogConfig,
    pub networking: NetworkingSettings,
    pub strands: Vec<StrandSettings>,
}

impl Settings {
    /// Load from disk. `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let settings = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        tracing::debug!(
            "Loaded settings from {:?}: {} clients, {} strands",
            path,
            settings.networking.clients.len(),
            settings.strands.len()
        );

        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.networking.validate()?;
        self.strand_layout().validate()?;
        Ok(())
    }

    /// Strands laid out back to back in file order
    pub fn strand_layout(&self) -> StrandLayout {
        StrandLayout::from_pixel_counts(self.strands.iter().map(|s| (s.pixels, s.enabled)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client: ClientConfig = serde_json::from_str(r#"{"host": "10.0.0.2", "port": 3020}"#)
            .expect("client should parse");

        assert_eq!(client.protocol, Protocol::Legacy);
        assert!(client.enabled);
        assert!(!client.ignore_dimming);
    }

    #[test]
    fn test_protocol_names() {
        let opc: Protocol = serde_json::from_str(r#""OPC""#).unwrap();
        let zmq: Protocol = serde_json::from_str(r#""ZMQ""#).unwrap();
        let pubsub: Protocol = serde_json::from_str(r#""PubSub""#).unwrap();

        assert_eq!(opc, Protocol::Opc);
        assert_eq!(zmq, Protocol::PubSub);
        assert_eq!(pubsub, Protocol::PubSub);
        assert_eq!(serde_json::to_string(&Protocol::Opc).unwrap(), r#""OPC""#);
    }

    #[test]
    fn test_unknown_protocol_rejected() {
        let result: Result<ClientConfig, _> =
            serde_json::from_str(r#"{"host": "a", "port": 1, "protocol": "DMX"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_uses_protocol_port() {
        assert_eq!(ClientConfig::new("a", Protocol::Opc).port, DEFAULT_OPC_PORT);
        assert_eq!(
            ClientConfig::new("a", Protocol::Legacy).port,
            DEFAULT_LEGACY_PORT
        );
    }

    #[test]
    fn test_validate_missing_host() {
        let networking = NetworkingSettings {
            clients: vec![ClientConfig::new("", Protocol::Legacy)],
            ..Default::default()
        };
        assert!(matches!(
            networking.validate(),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_pubsub_client_needs_no_host() {
        let networking = NetworkingSettings {
            clients: vec![ClientConfig::new("", Protocol::PubSub)],
            ..Default::default()
        };
        assert!(networking.validate().is_ok());
    }

    #[test]
    fn test_label() {
        let client = ClientConfig::new("10.0.0.9", Protocol::Opc);
        assert_eq!(client.label(), "10.0.0.9:7890");
        assert_eq!(client.with_name("roof").label(), "roof");
    }
}
