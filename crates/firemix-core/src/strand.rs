//! Strand geometry
//!
//! A strand is a physically addressable run of pixels. The scene loader
//! assigns every strand a half-open range of the frame buffer; the output
//! stage only ever reads these extents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of one strand inside the frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandExtent {
    /// First pixel (inclusive)
    pub start: usize,
    /// Last pixel (exclusive)
    pub end: usize,
    /// Disabled strands are not sent to any controller
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl StrandExtent {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            enabled: true,
        }
    }

    pub fn disabled(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            enabled: false,
        }
    }

    /// Pixel count. An inverted extent counts as empty.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Layout errors found while validating a scene's strands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("strand {strand} has inverted extent {start}..{end}")]
    Inverted {
        strand: usize,
        start: usize,
        end: usize,
    },

    #[error("strand {strand} overlaps strand {other}")]
    Overlap { strand: usize, other: usize },
}

/// Ordered strand extents, indexed by strand id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandLayout {
    extents: Vec<StrandExtent>,
}

impl StrandLayout {
    pub fn new(extents: Vec<StrandExtent>) -> Self {
        Self { extents }
    }

    /// Lay strands out back to back from `(pixel_count, enabled)` pairs
    pub fn from_pixel_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        let mut offset = 0;
        let extents = counts
            .into_iter()
            .map(|(count, enabled)| {
                let extent = StrandExtent {
                    start: offset,
                    end: offset + count,
                    enabled,
                };
                offset += count;
                extent
            })
            .collect();

        Self { extents }
    }

    pub fn extents(&self) -> &[StrandExtent] {
        &self.extents
    }

    /// Number of configured strands, enabled or not
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Enabled strands with their ids, in strand order
    pub fn enabled(&self) -> impl Iterator<Item = (usize, &StrandExtent)> + '_ {
        self.extents
            .iter()
            .enumerate()
            .filter(|(_, extent)| extent.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    /// Frame length required to cover every strand
    pub fn pixel_count(&self) -> usize {
        self.extents.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Reject inverted or overlapping extents
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (strand, extent) in self.extents.iter().enumerate() {
            if extent.start > extent.end {
                return Err(LayoutError::Inverted {
                    strand,
                    start: extent.start,
                    end: extent.end,
                });
            }
        }

        for (strand, extent) in self.extents.iter().enumerate() {
            if extent.is_empty() {
                continue;
            }
            for (other, candidate) in self.extents.iter().enumerate().skip(strand + 1) {
                if candidate.is_empty() {
                    continue;
                }
                if extent.start < candidate.end && candidate.start < extent.end {
                    return Err(LayoutError::Overlap { strand, other });
                }
            }
        }

        Ok(())
    }
}
