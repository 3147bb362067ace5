//! Frame buffer as produced by the mixer
//!
//! One frame is a flat list of pixels, each stored as `(hue, lightness,
//! saturation)` floats. Values are nominally in `0.0..=1.0`, but presets and
//! transitions are allowed to overshoot; the output stage clamps after color
//! conversion.

use serde::{Deserialize, Serialize};

/// A single pixel in HLS order: `[hue, lightness, saturation]`
pub type HlsPixel = [f32; 3];

/// Index of the hue channel inside an [`HlsPixel`]
pub const HUE: usize = 0;
/// Index of the lightness channel inside an [`HlsPixel`]
pub const LIGHTNESS: usize = 1;
/// Index of the saturation channel inside an [`HlsPixel`]
pub const SATURATION: usize = 2;

/// A fully mixed frame, one HLS triple per pixel across all strands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HlsFrame {
    pixels: Vec<HlsPixel>,
}

impl HlsFrame {
    /// Create a black frame with `len` pixels
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![[0.0; 3]; len],
        }
    }

    /// Wrap an existing pixel buffer
    pub fn from_pixels(pixels: Vec<HlsPixel>) -> Self {
        Self { pixels }
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True if the frame holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[HlsPixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [HlsPixel] {
        &mut self.pixels
    }

    /// Set one pixel. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, hue: f32, lightness: f32, saturation: f32) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = [hue, lightness, saturation];
        }
    }

    /// Set every pixel to the same color
    pub fn fill(&mut self, hue: f32, lightness: f32, saturation: f32) {
        self.pixels.fill([hue, lightness, saturation]);
    }
}
