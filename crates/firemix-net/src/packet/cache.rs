//! Packet Cache - reusable packet buffers keyed by length
//!
//! Strand lengths are fixed by the installation, so after the first frame
//! every request is a hit and the hot path stops allocating.

use std::collections::HashMap;

/// Size-keyed pool of packet buffers.
///
/// The same length always yields the same buffer. Contents are whatever the
/// previous user left behind; callers overwrite every byte they send.
#[derive(Debug, Default)]
pub struct PacketCache {
    buffers: HashMap<usize, Vec<u8>>,
}

impl PacketCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the buffer for `len` bytes, allocating it on first use
    pub fn get_or_create(&mut self, len: usize) -> &mut [u8] {
        self.buffers
            .entry(len)
            .or_insert_with(|| {
                tracing::trace!("Packet cache miss, allocating {} byte buffer", len);
                vec![0u8; len]
            })
            .as_mut_slice()
    }

    /// Whether a buffer of `len` bytes has been created
    pub fn contains(&self, len: usize) -> bool {
        self.buffers.contains_key(&len)
    }

    /// Number of distinct packet lengths cached
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Drop every buffer
    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}
