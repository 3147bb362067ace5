//! Open Pixel Control encoder
//!
//! LEDscape-style servers expect all strands concatenated into one message,
//! so the Legacy packets are re-framed rather than sent individually.

use firemix_core::settings::OpcChannel;

use crate::error::NetError;
use crate::packet::{PacketList, LEGACY_HEADER_LEN, MAX_PAYLOAD_LEN};
use crate::Result;

/// Size of the OPC header
pub const OPC_HEADER_LEN: usize = 4;
/// Channel 0 addresses every output of the server
pub const OPC_BROADCAST_CHANNEL: u8 = 0;
/// Command byte for "set pixel colors"
pub const OPC_SET_PIXEL_COLORS: u8 = 0x00;

/// Channel byte for a frame whose last strand was `last_strand`.
///
/// Channels are 1-based; a frame without strands, or a last strand of 255,
/// goes to the broadcast channel.
pub fn channel_for(last_strand: Option<u8>, mode: OpcChannel) -> u8 {
    match mode {
        OpcChannel::Broadcast => OPC_BROADCAST_CHANNEL,
        OpcChannel::LastStrand => last_strand
            .and_then(|strand| strand.checked_add(1))
            .unwrap_or(OPC_BROADCAST_CHANNEL),
    }
}

/// Reusable OPC frame buffer
#[derive(Debug, Default)]
pub struct OpcEncoder {
    frame: Vec<u8>,
}

impl OpcEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-frame `packets` as a single OPC message
    pub fn encode(&mut self, channel: u8, packets: &PacketList) -> Result<&[u8]> {
        self.frame.clear();
        self.frame
            .extend_from_slice(&[channel, OPC_SET_PIXEL_COLORS, 0, 0]);

        for packet in packets.iter() {
            self.frame
                .extend_from_slice(packet.get(LEGACY_HEADER_LEN..).unwrap_or_default());
        }

        let payload_len = self.frame.len() - OPC_HEADER_LEN;
        let length_field = u16::try_from(payload_len).map_err(|_| NetError::PacketTooLarge {
            len: payload_len,
            max: MAX_PAYLOAD_LEN,
        })?;
        self.frame[2..OPC_HEADER_LEN].copy_from_slice(&length_field.to_be_bytes());

        Ok(&self.frame)
    }
}
