//! End-to-end properties of the HSI engine over whole buffers.
//!
//! Run with: `cargo test -p tinct-core`

use tinct_core::color::hsi::{bgr_to_hsi, hsi_to_bgr};
use tinct_core::{
    Adjustment, AdjustmentParams, GradingSession, HsiPlanes, HueSector, PixelBuffer, Preset,
    adjust_planes, apply_adjustment, forward, inverse,
};

/// Per-channel tolerance for a forward → inverse round trip.
const ROUND_TRIP_TOLERANCE: u8 = 2;

/// Every combination of channel values on a coarse lattice.
fn color_lattice(step: usize) -> PixelBuffer {
    let levels: Vec<u8> = (0..=255).step_by(step).chain(std::iter::once(255)).collect();
    let mut pixels = Vec::new();
    for &b in &levels {
        for &g in &levels {
            for &r in &levels {
                pixels.push([b, g, r]);
            }
        }
    }
    let width = levels.len() as u32;
    let height = (pixels.len() / levels.len()) as u32;
    PixelBuffer::from_pixels(width, height, pixels).expect("lattice shape")
}

fn assert_buffers_close(actual: &PixelBuffer, expected: &PixelBuffer, tolerance: u8) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height())
    );
    for (idx, (a, e)) in actual.pixels().iter().zip(expected.pixels()).enumerate() {
        for c in 0..3 {
            assert!(
                a[c].abs_diff(e[c]) <= tolerance,
                "pixel {idx}, channel {c}: {a:?} vs {e:?}"
            );
        }
    }
}

#[test]
fn test_round_trip_over_color_lattice() {
    let source = color_lattice(15);
    let restored = inverse(&forward(&source));
    assert_buffers_close(&restored, &source, ROUND_TRIP_TOLERANCE);
}

#[test]
fn test_neutral_params_are_identity_up_to_rounding() {
    let source = color_lattice(51);
    let planes = forward(&source);
    let adjustment = AdjustmentParams::default().adjustment();
    assert!(adjustment.is_identity());
    assert_buffers_close(&apply_adjustment(&planes, adjustment), &source, ROUND_TRIP_TOLERANCE);
}

#[test]
fn test_full_turn_renders_same_as_no_shift() {
    let planes = forward(&color_lattice(51));
    let turned = Adjustment {
        hue_shift: 360.0,
        ..Adjustment::IDENTITY
    };
    assert_buffers_close(
        &apply_adjustment(&planes, turned),
        &apply_adjustment(&planes, Adjustment::IDENTITY),
        1,
    );
}

#[test]
fn test_zero_saturation_is_gray_everywhere() {
    let planes = forward(&color_lattice(17));
    let gray = apply_adjustment(&planes, AdjustmentParams::new(180, 0, 100).adjustment());
    for (px, i) in gray.pixels().iter().zip(planes.intensity()) {
        assert!(px[0] == px[1] && px[1] == px[2], "not gray: {px:?}");
        assert!((f32::from(px[0]) - i).abs() <= 1.0, "{px:?} vs intensity {i}");
    }
}

#[test]
fn test_pure_red_scenario() {
    let [h, s, i] = bgr_to_hsi([0, 0, 255]);
    assert!(h < 0.1, "hue {h}");
    assert!((s - 255.0).abs() < 1e-3);
    assert!((i - 85.0).abs() < 1e-3);

    let out = hsi_to_bgr(h, s, i);
    assert!(out[0] <= 2 && out[1] <= 2 && out[2] >= 253, "{out:?}");
}

#[test]
fn test_black_scenario() {
    let [_, s, i] = bgr_to_hsi([0, 0, 0]);
    assert_eq!((s, i), (0.0, 0.0));
    for h in (0..720).step_by(30) {
        assert_eq!(hsi_to_bgr(h as f32, 0.0, 0.0), [0, 0, 0]);
    }
}

#[test]
fn test_inverse_continuous_across_sector_boundaries() {
    for edge in [120.0_f32, 240.0] {
        assert_ne!(HueSector::from_hue(edge - 0.01), HueSector::from_hue(edge));
        for (s, i) in [(255.0, 85.0), (128.0, 128.0), (60.0, 200.0)] {
            let left = hsi_to_bgr(edge - 0.01, s, i);
            let right = hsi_to_bgr(edge, s, i);
            for c in 0..3 {
                assert!(
                    left[c].abs_diff(right[c]) <= 1,
                    "jump at {edge}° (s={s}, i={i}): {left:?} vs {right:?}"
                );
            }
        }
    }
}

#[test]
fn test_adjusted_planes_feed_inverse_consistently() {
    let planes = forward(&color_lattice(51));
    let adjustment = Preset::Cool.params().adjustment();
    let derived: HsiPlanes = adjust_planes(&planes, adjustment);
    assert_eq!(inverse(&derived), apply_adjustment(&planes, adjustment));
}

#[test]
fn test_session_preset_then_neutral_restores_source() {
    let source = color_lattice(51);
    let session = GradingSession::new();
    session.load(source.clone());

    let mut params = AdjustmentParams::default();
    params.apply_preset(Preset::Vintage);
    let vintage = session.adjust(&params).expect("image loaded");
    assert_ne!(vintage, source);

    params = AdjustmentParams::default();
    let restored = session.adjust(&params).expect("image loaded");
    assert_buffers_close(&restored, &source, ROUND_TRIP_TOLERANCE);
}
