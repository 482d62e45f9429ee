//! Per-pixel BGR ⇄ HSI conversion.
//!
//! Hue is an angle in degrees `[0, 360)`. Saturation and intensity are kept
//! on the same `[0, 255]` scale as the device channels so all three planes
//! stay numerically comparable.
//!
//! # Forward
//! With `r, g, b` normalized to `[0, 1]`:
//! ```text
//!   I = (r + g + b) / 3
//!   S = 1 − 3·min(r, g, b) / (r + g + b + ε)        (S = 0 for black)
//!   θ = acos( ½((r−g) + (r−b)) / (sqrt((r−g)² + (r−b)(g−b)) + ε) )
//!   H = θ          if b ≤ g
//!   H = 360° − θ   if b > g
//! ```
//!
//! # Inverse
//! The closed form depends on which channel is the minimum, so the hue
//! circle is split into three 120° sectors (see [`HueSector`]).

/// Guards the hue and saturation divisions against zero denominators.
pub const EPSILON: f32 = 1e-6;

/// Largest value of the saturation and intensity scales.
pub const CHANNEL_MAX: f32 = 255.0;

/// One of the three 120° hue ranges with its own HSI → RGB closed form.
///
/// Ranges are half-open and partition `[0, 360)`:
///
/// | Sector      | Hue range     | Minimum channel |
/// |-------------|---------------|-----------------|
/// | `RedGreen`  | `[0, 120)`    | blue            |
/// | `GreenBlue` | `[120, 240)`  | red             |
/// | `BlueRed`   | `[240, 360)`  | green           |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueSector {
    RedGreen,
    GreenBlue,
    BlueRed,
}

impl HueSector {
    /// Sector containing `hue` after wrapping it into `[0, 360)`.
    pub fn from_hue(hue: f32) -> Self {
        let hue = wrap_degrees(hue);
        if hue < 120.0 {
            Self::RedGreen
        } else if hue < 240.0 {
            Self::GreenBlue
        } else {
            Self::BlueRed
        }
    }

    /// Start angle of the sector in degrees.
    pub const fn start_degrees(self) -> f32 {
        match self {
            Self::RedGreen => 0.0,
            Self::GreenBlue => 120.0,
            Self::BlueRed => 240.0,
        }
    }

    /// Reconstruct normalized `[r, g, b]` from a hue inside this sector.
    ///
    /// `hue` must already be wrapped; `s` and `i` are in `[0, 1]`.
    fn reconstruct(self, hue: f32, s: f32, i: f32) -> [f32; 3] {
        let local = (hue - self.start_degrees()).to_radians();
        let low = i * (1.0 - s);
        let high = i * (1.0 + s * local.cos() / ((60.0_f32.to_radians() - local).cos() + EPSILON));
        let rest = 3.0 * i - (low + high);

        match self {
            Self::RedGreen => [high, rest, low],
            Self::GreenBlue => [low, high, rest],
            Self::BlueRed => [rest, low, high],
        }
    }
}

/// Wrap an angle into `[0, 360)`. Non-finite input maps to 0.
pub fn wrap_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert one `[B, G, R]` pixel to `[H, S, I]`.
///
/// `H ∈ [0, 360)`, `S ∈ [0, 255]`, `I ∈ [0, 255]`. Never fails: black,
/// white and pure hues are all ordinary inputs.
pub fn bgr_to_hsi(bgr: [u8; 3]) -> [f32; 3] {
    let b = f32::from(bgr[0]) / CHANNEL_MAX;
    let g = f32::from(bgr[1]) / CHANNEL_MAX;
    let r = f32::from(bgr[2]) / CHANNEL_MAX;

    let sum = r + g + b;
    let intensity = sum / 3.0;

    let saturation = if sum == 0.0 {
        0.0
    } else {
        let min = r.min(g).min(b);
        1.0 - 3.0 * min / (sum + EPSILON)
    };

    let num = 0.5 * ((r - g) + (r - b));
    // Algebraically non-negative; floor it so rounding cannot feed sqrt a
    // negative value.
    let den = ((r - g) * (r - g) + (r - b) * (g - b)).max(0.0).sqrt();
    let theta = (num / (den + EPSILON)).clamp(-1.0, 1.0).acos().to_degrees();

    let hue = if b > g { 360.0 - theta } else { theta };

    [
        wrap_degrees(hue),
        saturation.clamp(0.0, 1.0) * CHANNEL_MAX,
        intensity * CHANNEL_MAX,
    ]
}

/// Convert `[H, S, I]` back to a `[B, G, R]` pixel.
///
/// `hue` is taken modulo 360. `saturation` and `intensity` are on the
/// `[0, 255]` scale; results are clamped into range before truncation.
pub fn hsi_to_bgr(hue: f32, saturation: f32, intensity: f32) -> [u8; 3] {
    let s = saturation / CHANNEL_MAX;
    let i = intensity / CHANNEL_MAX;

    // Achromatic pixels are gray at any hue.
    if s <= 0.0 {
        let gray = to_channel(i);
        return [gray, gray, gray];
    }

    let hue = wrap_degrees(hue);
    let [r, g, b] = HueSector::from_hue(hue).reconstruct(hue, s, i);
    [to_channel(b), to_channel(g), to_channel(r)]
}

/// Scale a normalized channel to `[0, 255]`, clamp and truncate.
fn to_channel(v: f32) -> u8 {
    (v * CHANNEL_MAX).clamp(0.0, CHANNEL_MAX) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUE_TOLERANCE: f32 = 0.1;

    fn assert_bgr_close(actual: [u8; 3], expected: [u8; 3], tolerance: u8) {
        for c in 0..3 {
            assert!(
                actual[c].abs_diff(expected[c]) <= tolerance,
                "channel {c}: {actual:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn test_pure_red_forward() {
        let [h, s, i] = bgr_to_hsi([0, 0, 255]);
        assert!(h < HUE_TOLERANCE || h > 360.0 - HUE_TOLERANCE, "hue {h}");
        assert!((s - 255.0).abs() < 1e-3, "saturation {s}");
        assert!((i - 85.0).abs() < 1e-3, "intensity {i}");
    }

    #[test]
    fn test_pure_red_inverse() {
        let [h, s, i] = bgr_to_hsi([0, 0, 255]);
        assert_bgr_close(hsi_to_bgr(h, s, i), [0, 0, 255], 2);
        assert_bgr_close(hsi_to_bgr(0.0, 255.0, 85.0), [0, 0, 255], 2);
    }

    #[test]
    fn test_primaries_land_on_expected_hues() {
        let cases = [([0, 255, 0], 120.0), ([255, 0, 0], 240.0), ([0, 255, 255], 60.0)];
        for (bgr, expected) in cases {
            let [h, s, _] = bgr_to_hsi(bgr);
            assert!((h - expected).abs() < HUE_TOLERANCE, "{bgr:?}: hue {h} vs {expected}");
            assert!((s - 255.0).abs() < 1e-3, "{bgr:?}: saturation {s}");
        }
    }

    #[test]
    fn test_magenta_takes_reflex_angle() {
        // Blue exceeds green, so the arccos result must be mirrored.
        let [h, _, _] = bgr_to_hsi([255, 0, 255]);
        assert!((h - 300.0).abs() < HUE_TOLERANCE, "hue {h}");
    }

    #[test]
    fn test_black_is_unsaturated() {
        let [h, s, i] = bgr_to_hsi([0, 0, 0]);
        assert!(h.is_finite());
        assert_eq!(s, 0.0);
        assert_eq!(i, 0.0);
    }

    #[test]
    fn test_white_and_grays_are_unsaturated() {
        for v in [1u8, 64, 128, 200, 255] {
            let [h, s, i] = bgr_to_hsi([v, v, v]);
            assert!(h.is_finite() && (0.0..360.0).contains(&h));
            // The epsilon guard leaves a sliver of saturation on dark grays.
            assert!(s < 0.05, "gray {v}: saturation {s}");
            assert!((i - f32::from(v)).abs() < 1e-3, "gray {v}: intensity {i}");
        }
    }

    #[test]
    fn test_black_inverse_at_any_hue() {
        for h in [0.0, 90.0, 120.0, 239.9, 359.9, -45.0, 1000.0] {
            assert_eq!(hsi_to_bgr(h, 0.0, 0.0), [0, 0, 0]);
        }
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        for h in [0.0, 45.0, 120.0, 200.0, 240.0, 333.0] {
            for v in [0u8, 1, 85, 127, 254, 255] {
                let [b, g, r] = hsi_to_bgr(h, 0.0, f32::from(v));
                assert!(b == g && g == r, "hue {h}, intensity {v}: {:?}", [b, g, r]);
                assert!(r.abs_diff(v) <= 1, "hue {h}, intensity {v}: got {r}");
            }
        }
    }

    #[test]
    fn test_sector_boundaries_route_once() {
        assert_eq!(HueSector::from_hue(0.0), HueSector::RedGreen);
        assert_eq!(HueSector::from_hue(119.999), HueSector::RedGreen);
        assert_eq!(HueSector::from_hue(120.0), HueSector::GreenBlue);
        assert_eq!(HueSector::from_hue(239.999), HueSector::GreenBlue);
        assert_eq!(HueSector::from_hue(240.0), HueSector::BlueRed);
        assert_eq!(HueSector::from_hue(359.999), HueSector::BlueRed);
        assert_eq!(HueSector::from_hue(360.0), HueSector::RedGreen);
        assert_eq!(HueSector::from_hue(-120.0), HueSector::BlueRed);
    }

    #[test]
    fn test_sector_boundaries_are_continuous() {
        let (s, i) = (0.8, 0.5);
        for boundary in [HueSector::GreenBlue, HueSector::BlueRed] {
            let edge = boundary.start_degrees();
            let before = HueSector::from_hue(edge - 1e-3);
            assert_ne!(before, boundary);
            let left = before.reconstruct(edge - 1e-3, s, i);
            let right = boundary.reconstruct(edge, s, i);
            for c in 0..3 {
                assert!(
                    (left[c] - right[c]).abs() < 1e-3,
                    "discontinuity at {edge}°, channel {c}: {:.6} vs {:.6}",
                    left[c],
                    right[c]
                );
            }
        }
    }

    #[test]
    fn test_reconstruction_preserves_channel_sum() {
        for h in [10.0, 130.0, 250.0] {
            let [r, g, b] = HueSector::from_hue(h).reconstruct(h, 0.6, 0.4);
            assert!((r + g + b - 1.2).abs() < 1e-5, "hue {h}: sum {}", r + g + b);
        }
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(540.0), 180.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_round_trip_sample_colors() {
        let samples = [
            [12, 200, 90],
            [250, 30, 40],
            [0, 128, 255],
            [77, 77, 78],
            [255, 254, 0],
            [10, 0, 5],
        ];
        for bgr in samples {
            let [h, s, i] = bgr_to_hsi(bgr);
            assert_bgr_close(hsi_to_bgr(h, s, i), bgr, 2);
        }
    }
}
