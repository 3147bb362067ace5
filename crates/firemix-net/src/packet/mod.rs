//! Packet construction
//!
//! - [`cache`] - size-keyed buffer reuse
//! - [`list`] - per-frame packet storage
//! - [`builder`] - strand segmentation into Legacy packets

pub mod builder;
pub mod cache;
pub mod list;

pub use builder::{
    fill_payload, legacy_packet_len, write_legacy_header, StrandPackets, LEGACY_HEADER_LEN,
    MAX_PAYLOAD_LEN, STRAND_MARKER,
};
pub use cache::PacketCache;
pub use list::PacketList;
