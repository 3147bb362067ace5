//! Firemix Core - Output Domain Model
//!
//! This crate holds the data the output stage consumes from the rest of
//! Firemix:
//! - HLS frame buffer produced by the mixer
//! - Strand extents produced by the scene loader
//! - Client descriptors and output options from the settings file
//! - Logging configuration

#![allow(missing_docs)]

pub mod frame;
pub mod logging;
pub mod settings;
pub mod strand;

// --- Re-exports ---

pub use frame::{HlsFrame, HlsPixel};
pub use logging::LogConfig;
pub use settings::{
    ClientConfig, ColorOrder, NetworkingSettings, OpcChannel, Protocol, Settings, SettingsError,
    StrandSettings, DEFAULT_LEGACY_PACKET_DELAY_MS, DEFAULT_LEGACY_PORT, DEFAULT_OPC_PORT,
    DEFAULT_PUBSUB_ENDPOINT,
};
pub use strand::{LayoutError, StrandExtent, StrandLayout};
