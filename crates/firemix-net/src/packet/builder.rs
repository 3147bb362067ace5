//! Strand segmenter and Legacy packet builder
//!
//! Every enabled strand becomes one Legacy packet:
//!
//! ```text
//! +-----+----------+--------+--------+-------------------+
//! | 'S' | strand   | len lo | len hi | R G B R G B ...   |
//! +-----+----------+--------+--------+-------------------+
//! ```
//!
//! `len` is the payload length (3 bytes per pixel), little-endian. The OPC
//! and pub/sub encoders start from the same packets.

use firemix_core::settings::ColorOrder;
use firemix_core::strand::{StrandExtent, StrandLayout};

use super::{PacketCache, PacketList};
use crate::color::Rgb8;
use crate::error::{NetError, Result};

/// Size of the Legacy strand header
pub const LEGACY_HEADER_LEN: usize = 4;
/// First byte of every Legacy strand packet
pub const STRAND_MARKER: u8 = b'S';
/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Total Legacy packet length for a strand of `pixels` pixels
pub fn legacy_packet_len(pixels: usize) -> usize {
    LEGACY_HEADER_LEN + pixels * 3
}

/// Write `['S', strand, len_lo, len_hi]` into the first four bytes
pub fn write_legacy_header(packet: &mut [u8], strand: u8, payload_len: u16) {
    let [len_lo, len_hi] = payload_len.to_le_bytes();
    packet[..LEGACY_HEADER_LEN].copy_from_slice(&[STRAND_MARKER, strand, len_lo, len_hi]);
}

/// Copy `pixels` into `payload` in the requested byte order.
///
/// `payload` must be exactly `3 * pixels.len()` bytes.
pub fn fill_payload(pixels: &[Rgb8], payload: &mut [u8], order: ColorOrder) {
    for (chunk, &[r, g, b]) in payload.chunks_exact_mut(3).zip(pixels) {
        let bytes = match order {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Bgr => [b, g, r],
        };
        chunk.copy_from_slice(&bytes);
    }
}

/// Per-frame Legacy packets for every enabled strand
#[derive(Debug, Default)]
pub struct StrandPackets {
    primary: PacketList,
    undimmed: PacketList,
    has_undimmed: bool,
    last_strand: Option<u8>,
}

impl StrandPackets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment `primary` (and `undimmed`, if present) into strand packets.
    ///
    /// Disabled strands are skipped and take no slot in the lists.
    pub fn build(
        &mut self,
        layout: &StrandLayout,
        primary: &[Rgb8],
        undimmed: Option<&[Rgb8]>,
        cache: &mut PacketCache,
        order: ColorOrder,
    ) -> Result<()> {
        self.primary.clear();
        self.undimmed.clear();
        self.has_undimmed = undimmed.is_some();
        self.last_strand = None;

        for (strand, extent) in layout.enabled() {
            let strand_id =
                u8::try_from(strand).map_err(|_| NetError::TooManyStrands { strand })?;
            let pixels = strand_pixels(primary, strand, extent)?;

            let payload_len = pixels.len() * 3;
            let length_field = u16::try_from(payload_len).map_err(|_| NetError::PacketTooLarge {
                len: payload_len,
                max: MAX_PAYLOAD_LEN,
            })?;

            let packet = cache.get_or_create(legacy_packet_len(pixels.len()));
            write_legacy_header(packet, strand_id, length_field);
            fill_payload(pixels, &mut packet[LEGACY_HEADER_LEN..], order);
            self.primary.push(packet);

            if let Some(undimmed) = undimmed {
                let pixels = strand_pixels(undimmed, strand, extent)?;
                fill_payload(pixels, &mut packet[LEGACY_HEADER_LEN..], order);
                self.undimmed.push(packet);
            }

            self.last_strand = Some(strand_id);
        }

        tracing::trace!(
            "Built {} strand packets ({} bytes){}",
            self.primary.len(),
            self.primary.total_bytes(),
            if self.has_undimmed { " plus undimmed set" } else { "" }
        );

        Ok(())
    }

    /// Packets from the main RGB buffer
    pub fn primary(&self) -> &PacketList {
        &self.primary
    }

    /// Packets from the undimmed buffer, when one was supplied
    pub fn undimmed(&self) -> Option<&PacketList> {
        self.has_undimmed.then_some(&self.undimmed)
    }

    /// The set a client should receive
    pub fn for_client(&self, ignore_dimming: bool) -> &PacketList {
        match self.undimmed() {
            Some(undimmed) if ignore_dimming => undimmed,
            _ => &self.primary,
        }
    }

    /// Id of the last strand packet built this frame
    pub fn last_strand(&self) -> Option<u8> {
        self.last_strand
    }
}

fn strand_pixels<'a>(rgb: &'a [Rgb8], strand: usize, extent: &StrandExtent) -> Result<&'a [Rgb8]> {
    rgb.get(extent.start..extent.end)
        .ok_or(NetError::StrandOutOfRange {
            strand,
            start: extent.start,
            end: extent.end,
            len: rgb.len(),
        })
}
