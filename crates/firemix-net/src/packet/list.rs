//! Ordered packet list backed by a single byte arena
//!
//! Cleared rather than dropped between frames so its capacity carries over.

use std::ops::Range;

#[derive(Debug, Default, Clone)]
pub struct PacketList {
    bytes: Vec<u8>,
    ranges: Vec<Range<usize>>,
}

impl PacketList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all packets, keeping the allocations
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.ranges.clear();
    }

    /// Append a copy of `packet`
    pub fn push(&mut self, packet: &[u8]) {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(packet);
        self.ranges.push(start..self.bytes.len());
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.ranges
            .get(index)
            .map(|range| &self.bytes[range.clone()])
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.ranges.iter().map(|range| &self.bytes[range.clone()])
    }

    /// Number of packets
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sum of all packet lengths
    pub fn total_bytes(&self) -> usize {
        self.bytes.len()
    }
}
