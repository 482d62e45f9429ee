//! Hue rotation plus saturation/intensity scaling on cached HSI planes.
//!
//! # Formula
//! For every sample of the original planes:
//! ```text
//!   H' = (H + hue_shift) mod 360
//!   S' = clamp(S × saturation_factor, 0, 255)
//!   I' = clamp(I × intensity_factor, 0, 255)
//! ```
//!
//! ```text
//!   original planes ──→ rotate H ──→ scale S ──→ scale I ──→ inverse ──→ BGR
//! ```
//!
//! Every call starts from the original planes, never from a previous
//! result, so repeated adjustments cannot drift.

use serde::{Deserialize, Serialize};

use crate::color::hsi::{CHANNEL_MAX, hsi_to_bgr, wrap_degrees};
use crate::color::planes::HsiPlanes;
use crate::image::PixelBuffer;

/// Numeric form of the three adjustment parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Hue rotation in degrees. Any finite value; applied modulo 360.
    pub hue_shift: f32,
    /// Saturation multiplier. 1.0 = neutral.
    pub saturation_factor: f32,
    /// Intensity multiplier. 1.0 = neutral.
    pub intensity_factor: f32,
}

impl Adjustment {
    /// No rotation, unit factors.
    pub const IDENTITY: Self = Self {
        hue_shift: 0.0,
        saturation_factor: 1.0,
        intensity_factor: 1.0,
    };

    /// `true` when applying this adjustment cannot change any sample.
    pub fn is_identity(&self) -> bool {
        wrap_degrees(self.hue_shift) == 0.0
            && self.saturation_factor == 1.0
            && self.intensity_factor == 1.0
    }

    /// Adjust a single `[H, S, I]` sample.
    pub fn apply(&self, [h, s, i]: [f32; 3]) -> [f32; 3] {
        [
            wrap_degrees(h + wrap_degrees(self.hue_shift)),
            (s * self.saturation_factor).clamp(0.0, CHANNEL_MAX),
            (i * self.intensity_factor).clamp(0.0, CHANNEL_MAX),
        ]
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Derived planes `H'`, `S'`, `I'` for `adjustment`. The input is untouched.
pub fn adjust_planes(planes: &HsiPlanes, adjustment: Adjustment) -> HsiPlanes {
    planes.map(|sample| adjustment.apply(sample))
}

/// Adjust the original planes and convert straight back to BGR.
///
/// Fuses the adjustment and the inverse transform into one pass, so no
/// intermediate planes are allocated.
pub fn apply_adjustment(planes: &HsiPlanes, adjustment: Adjustment) -> PixelBuffer {
    if adjustment.is_identity() {
        tracing::trace!("identity adjustment, rendering original planes");
    }
    planes.render(|sample| {
        let [h, s, i] = adjustment.apply(sample);
        hsi_to_bgr(h, s, i)
    })
}
