use std::io::Write;

use firemix_core::{ColorOrder, OpcChannel, Protocol, Settings, SettingsError};

const TOML_SETTINGS: &str = r#"
[logging]
level = "debug"

[networking]
pubsub_endpoint = "tcp://*:4020"
legacy_packet_delay_ms = 2
color_order = "bgr"
opc_channel = "broadcast"

[[networking.clients]]
host = "10.0.0.20"
port = 3020
protocol = "Legacy"
ignore-dimming = true

[[networking.clients]]
host = "10.0.0.21"
port = 7890
protocol = "OPC"
enabled = false

[[strands]]
pixels = 160

[[strands]]
pixels = 80
enabled = false
"#;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_toml() {
    let file = write_temp(".toml", TOML_SETTINGS);
    let settings = Settings::load(file.path()).expect("Failed to load TOML settings");

    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.networking.pubsub_endpoint, "tcp://*:4020");
    assert_eq!(settings.networking.legacy_packet_delay_ms, 2);
    assert_eq!(settings.networking.color_order, ColorOrder::Bgr);
    assert_eq!(settings.networking.opc_channel, OpcChannel::Broadcast);

    let clients = &settings.networking.clients;
    assert_eq!(clients.len(), 2);
    assert!(clients[0].ignore_dimming);
    assert_eq!(clients[1].protocol, Protocol::Opc);
    assert!(!clients[1].enabled);
    assert_eq!(settings.networking.enabled_clients().count(), 1);

    let layout = settings.strand_layout();
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.pixel_count(), 240);
    assert_eq!(layout.enabled_count(), 1);
}

#[test]
fn test_load_json() {
    let json = r#"{
        "networking": {
            "clients": [
                {"host": "10.0.0.30", "port": 3020},
                {"host": "", "port": 0, "protocol": "ZMQ"}
            ]
        },
        "strands": [{"pixels": 50}, {"pixels": 50}]
    }"#;
    let file = write_temp(".json", json);
    let settings = Settings::load(file.path()).expect("Failed to load JSON settings");

    assert_eq!(settings.networking.clients[0].protocol, Protocol::Legacy);
    assert_eq!(settings.networking.clients[1].protocol, Protocol::PubSub);
    assert_eq!(settings.networking.legacy_packet_delay_ms, 1);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.strand_layout().pixel_count(), 100);
}

#[test]
fn test_unknown_protocol_rejected() {
    let toml = r#"
[[networking.clients]]
host = "10.0.0.20"
port = 3020
protocol = "ArtNet"
"#;
    let file = write_temp(".toml", toml);
    assert!(matches!(
        Settings::load(file.path()),
        Err(SettingsError::Toml(_))
    ));
}

#[test]
fn test_port_zero_rejected() {
    let json = r#"{"networking": {"clients": [{"host": "10.0.0.1", "port": 0, "protocol": "OPC"}]}}"#;
    assert!(matches!(
        Settings::from_json_str(json),
        Err(SettingsError::Invalid(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Settings::load("/nonexistent/firemix/settings.toml"),
        Err(SettingsError::Io(_))
    ));
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = write_temp(".toml", "");
    let settings = Settings::load(file.path()).expect("Empty TOML should load");
    assert_eq!(settings, Settings::default());
}
