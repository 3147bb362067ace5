//! Color and dimming pipeline
//!
//! Converts the mixer's HLS floats to 8-bit RGB. The global dimmer scales
//! lightness before conversion. Clients exempt from dimming need a second,
//! undimmed buffer; it is only computed when some client actually asks for it
//! while others still want dimmed output.

use firemix_core::frame::{HlsFrame, HlsPixel};
use palette::{FromColor, Hsl, Srgb};

/// One output pixel
pub type Rgb8 = [u8; 3];

/// Which RGB buffers a frame needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimmingPlan {
    /// Only the dimmed buffer
    Dimmed,
    /// Every client is exempt: the main buffer is left undimmed
    Undimmed,
    /// Dimmed main buffer plus an undimmed secondary buffer
    Both,
}

impl DimmingPlan {
    /// Decide from what the enabled clients want.
    ///
    /// With the dimmer at full the two buffers would be identical, so one is
    /// enough.
    pub fn new(wants_dimmed: bool, wants_undimmed: bool, dimmer: f32) -> Self {
        if !wants_undimmed || effective_dimmer(dimmer) >= 1.0 {
            return DimmingPlan::Dimmed;
        }
        if wants_dimmed {
            DimmingPlan::Both
        } else {
            DimmingPlan::Undimmed
        }
    }
}

/// Clamp to 0..=1, treating NaN as "no dimming"
pub fn effective_dimmer(dimmer: f32) -> f32 {
    if dimmer.is_nan() {
        1.0
    } else {
        dimmer.clamp(0.0, 1.0)
    }
}

/// Convert one HLS pixel to RGB8, scaling lightness by `dimmer` first.
///
/// Channels are truncated toward zero and clamped, so any float input
/// (including NaN and infinities) lands in 0..=255.
pub fn hls_to_rgb8(pixel: HlsPixel, dimmer: f32) -> Rgb8 {
    let [hue, lightness, saturation] = pixel;
    let lightness = if dimmer < 1.0 {
        lightness * dimmer
    } else {
        lightness
    };

    let hsl: Hsl = Hsl::new(hue * 360.0, saturation, lightness);
    let rgb: Srgb = Srgb::from_color(hsl);

    [
        to_channel(rgb.red),
        to_channel(rgb.green),
        to_channel(rgb.blue),
    ]
}

fn to_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    ((value * 255.0) as i32).clamp(0, 255) as u8
}

/// Persistent RGB buffers, resized in place each frame
#[derive(Debug, Default)]
pub struct ColorPipeline {
    primary: Vec<Rgb8>,
    secondary: Vec<Rgb8>,
    has_secondary: bool,
}

impl ColorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `frame` according to `plan`
    pub fn render(&mut self, frame: &HlsFrame, dimmer: f32, plan: DimmingPlan) {
        let dimmer = effective_dimmer(dimmer);
        let primary_dimmer = match plan {
            DimmingPlan::Dimmed | DimmingPlan::Both => dimmer,
            DimmingPlan::Undimmed => 1.0,
        };

        convert_into(&mut self.primary, frame.pixels(), primary_dimmer);

        self.has_secondary = plan == DimmingPlan::Both;
        if self.has_secondary {
            convert_into(&mut self.secondary, frame.pixels(), 1.0);
        }
    }

    /// Main buffer: dimmed unless the plan was [`DimmingPlan::Undimmed`]
    pub fn primary(&self) -> &[Rgb8] {
        &self.primary
    }

    /// Undimmed buffer, present only for [`DimmingPlan::Both`]
    pub fn secondary(&self) -> Option<&[Rgb8]> {
        self.has_secondary.then_some(self.secondary.as_slice())
    }
}

fn convert_into(out: &mut Vec<Rgb8>, pixels: &[HlsPixel], dimmer: f32) {
    out.clear();
    out.extend(pixels.iter().map(|&pixel| hls_to_rgb8(pixel, dimmer)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_black_and_white() {
        assert_eq!(hls_to_rgb8([0.0, 0.0, 0.0], 1.0), [0, 0, 0]);
        assert_eq!(hls_to_rgb8([0.3, 1.0, 0.7], 1.0), [255, 255, 255]);
    }

    #[test]
    fn test_primary_colors() {
        assert_eq!(hls_to_rgb8([0.0, 0.5, 1.0], 1.0), [255, 0, 0]);
        assert_eq!(hls_to_rgb8([2.0 / 3.0, 0.5, 1.0], 1.0), [0, 0, 255]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(hls_to_rgb8([0.0, 4.0, 0.0], 1.0), [255, 255, 255]);
        assert_eq!(hls_to_rgb8([0.0, -2.0, 0.0], 1.0), [0, 0, 0]);
        assert_eq!(hls_to_rgb8([f32::NAN, f32::NAN, f32::NAN], 1.0), [0, 0, 0]);
    }

    #[test]
    fn test_zero_dimmer_is_black() {
        assert_eq!(hls_to_rgb8([0.1, 1.0, 1.0], 0.0), [0, 0, 0]);
    }

    #[test]
    fn test_plan_selection() {
        assert_eq!(DimmingPlan::new(true, false, 0.5), DimmingPlan::Dimmed);
        assert_eq!(DimmingPlan::new(true, true, 0.5), DimmingPlan::Both);
        assert_eq!(DimmingPlan::new(false, true, 0.5), DimmingPlan::Undimmed);
        assert_eq!(DimmingPlan::new(true, true, 1.0), DimmingPlan::Dimmed);
        assert_eq!(DimmingPlan::new(true, true, f32::NAN), DimmingPlan::Dimmed);
    }

    #[test]
    fn test_full_dimmer_buffers_identical() {
        let frame = HlsFrame::from_pixels(vec![[0.1, 0.4, 0.9], [0.7, 0.6, 0.3], [0.0, 1.0, 0.0]]);
        let mut pipeline = ColorPipeline::new();

        pipeline.render(&frame, 1.0, DimmingPlan::Both);

        assert_eq!(pipeline.secondary(), Some(pipeline.primary()));
    }

    #[test]
    fn test_secondary_is_undimmed() {
        let frame = HlsFrame::from_pixels(vec![[0.0, 1.0, 0.0]; 3]);
        let mut pipeline = ColorPipeline::new();

        pipeline.render(&frame, 0.0, DimmingPlan::Both);
        assert_eq!(pipeline.primary(), &[[0, 0, 0]; 3]);
        assert_eq!(pipeline.secondary(), Some(&[[255, 255, 255]; 3][..]));

        pipeline.render(&frame, 0.0, DimmingPlan::Dimmed);
        assert!(pipeline.secondary().is_none());
    }

    #[test]
    fn test_undimmed_plan_skips_dimmer() {
        let frame = HlsFrame::from_pixels(vec![[0.0, 1.0, 0.0]]);
        let mut pipeline = ColorPipeline::new();

        pipeline.render(&frame, 0.2, DimmingPlan::Undimmed);

        assert_eq!(pipeline.primary(), &[[255, 255, 255]]);
        assert!(pipeline.secondary().is_none());
    }

    #[test]
    fn test_buffers_track_frame_length() {
        let mut pipeline = ColorPipeline::new();
        pipeline.render(&HlsFrame::new(8), 1.0, DimmingPlan::Dimmed);
        pipeline.render(&HlsFrame::new(3), 1.0, DimmingPlan::Dimmed);
        assert_eq!(pipeline.primary().len(), 3);
    }

    proptest! {
        #[test]
        fn prop_any_float_converts(
            hue in prop::num::f32::ANY,
            lightness in prop::num::f32::ANY,
            saturation in prop::num::f32::ANY,
            dimmer in prop::num::f32::ANY,
        ) {
            // Must not panic for any input, including NaN and infinities.
            let _ = hls_to_rgb8([hue, lightness, saturation], effective_dimmer(dimmer));
        }

        #[test]
        fn prop_zero_saturation_is_gray(
            hue in 0.0f32..=1.0,
            lightness in 0.0f32..=1.0,
        ) {
            let gray = hls_to_rgb8([hue, lightness, 0.0], 1.0);
            prop_assert_eq!(gray[0], gray[1]);
            prop_assert_eq!(gray[1], gray[2]);
        }

        #[test]
        fn prop_dimmer_zero_is_black(
            hue in 0.0f32..=1.0,
            lightness in 0.0f32..=1.0,
            saturation in 0.0f32..=1.0,
        ) {
            prop_assert_eq!(hls_to_rgb8([hue, lightness, saturation], 0.0), [0, 0, 0]);
        }
    }
}
