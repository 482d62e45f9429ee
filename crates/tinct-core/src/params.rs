//! Slider parameters for the HSI adjustment and their presets.
//!
//! `AdjustmentParams` mirrors the three user-facing controls. Values entered
//! outside a control's range are clamped to the nearest bound, never
//! rejected. The pipeline consumes the numeric [`Adjustment`] derived from
//! them.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::grading::adjust::Adjustment;

/// Slider value at which hue is not rotated.
pub const HUE_CENTER: i32 = 180;

/// Slider value at which saturation/intensity are multiplied by 1.0.
pub const PERCENT_CENTER: i32 = 100;

/// One of the three adjustment controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Hue,
    Saturation,
    Intensity,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Parameter::Hue, Parameter::Saturation, Parameter::Intensity];

    /// Human-readable label for UI and status text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Intensity => "Intensity",
        }
    }

    /// Accepted slider range, inclusive.
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            Self::Hue => 0..=360,
            Self::Saturation | Self::Intensity => 0..=300,
        }
    }

    /// Neutral value restored by a reset.
    pub const fn default_value(self) -> i32 {
        match self {
            Self::Hue => HUE_CENTER,
            Self::Saturation | Self::Intensity => PERCENT_CENTER,
        }
    }

    /// Clamp `value` into this control's range.
    pub fn clamp(self, value: i32) -> i32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current slider positions.
///
/// `hue` is an absolute slider position (180 = no shift);
/// `saturation` and `intensity` are percentages (100 = ×1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Hue slider, `[0, 360]`. Default: 180.
    pub hue: i32,
    /// Saturation percent, `[0, 300]`. Default: 100.
    pub saturation: i32,
    /// Intensity percent, `[0, 300]`. Default: 100.
    pub intensity: i32,
}

impl Default for AdjustmentParams {
    /// Neutral sliders; the image passes through unchanged.
    fn default() -> Self {
        Self {
            hue: HUE_CENTER,
            saturation: PERCENT_CENTER,
            intensity: PERCENT_CENTER,
        }
    }
}

impl AdjustmentParams {
    /// Build from raw slider values, clamping each into range.
    pub fn new(hue: i32, saturation: i32, intensity: i32) -> Self {
        Self {
            hue,
            saturation,
            intensity,
        }
        .clamped()
    }

    /// Copy with every value clamped into its control's range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            hue: Parameter::Hue.clamp(self.hue),
            saturation: Parameter::Saturation.clamp(self.saturation),
            intensity: Parameter::Intensity.clamp(self.intensity),
        }
    }

    pub fn get(&self, parameter: Parameter) -> i32 {
        match parameter {
            Parameter::Hue => self.hue,
            Parameter::Saturation => self.saturation,
            Parameter::Intensity => self.intensity,
        }
    }

    /// Set one control, clamping out-of-range entry. Returns the stored value.
    pub fn set(&mut self, parameter: Parameter, value: i32) -> i32 {
        let clamped = parameter.clamp(value);
        if clamped != value {
            tracing::debug!("{parameter} value {value} clamped to {clamped}");
        }
        match parameter {
            Parameter::Hue => self.hue = clamped,
            Parameter::Saturation => self.saturation = clamped,
            Parameter::Intensity => self.intensity = clamped,
        }
        clamped
    }

    /// Restore one control to its neutral value.
    pub fn reset(&mut self, parameter: Parameter) {
        self.set(parameter, parameter.default_value());
    }

    /// Replace all three values with a preset's in one step.
    pub fn apply_preset(&mut self, preset: Preset) {
        *self = preset.params();
    }

    pub fn is_identity(&self) -> bool {
        self.clamped() == Self::default()
    }

    /// Numeric adjustment for the pipeline. Values are clamped first, so the
    /// hue shift always lies in `[-180, 180]`.
    pub fn adjustment(&self) -> Adjustment {
        let p = self.clamped();
        Adjustment {
            hue_shift: (p.hue - HUE_CENTER) as f32,
            saturation_factor: p.saturation as f32 / PERCENT_CENTER as f32,
            intensity_factor: p.intensity as f32 / PERCENT_CENTER as f32,
        }
    }
}

/// Built-in looks, each a fixed slider triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Hue pulled back 30°, desaturated, slightly brighter.
    Vintage,
    /// Hue pulled back 20°, more saturated.
    Cool,
    /// Hue pushed forward 20°, more saturated, slightly brighter.
    Warm,
    /// No color change, slightly brighter.
    Neutral,
}

impl Preset {
    pub const ALL: &[Preset] = &[Preset::Vintage, Preset::Cool, Preset::Warm, Preset::Neutral];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vintage => "vintage",
            Self::Cool => "cool",
            Self::Warm => "warm",
            Self::Neutral => "neutral",
        }
    }

    pub const fn params(self) -> AdjustmentParams {
        let (hue, saturation, intensity) = match self {
            Self::Vintage => (HUE_CENTER - 30, 80, 110),
            Self::Cool => (HUE_CENTER - 20, 115, 100),
            Self::Warm => (HUE_CENTER + 20, 120, 105),
            Self::Neutral => (HUE_CENTER, 100, 110),
        };
        AdjustmentParams {
            hue,
            saturation,
            intensity,
        }
    }

    /// Look up a built-in preset by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user-defined preset, typically loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPreset {
    pub name: String,
    #[serde(flatten)]
    pub params: AdjustmentParams,
}

/// Parse a JSON array of named presets.
///
/// ```json
/// [{ "name": "dusk", "hue": 150, "saturation": 90, "intensity": 85 }]
/// ```
///
/// Missing fields take their neutral value; out-of-range values are
/// clamped.
pub fn load_presets_json(json: &str) -> CoreResult<Vec<NamedPreset>> {
    let raw: Vec<NamedPreset> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|mut preset| {
            let clamped = preset.params.clamped();
            if clamped != preset.params {
                tracing::warn!("preset '{}' has out-of-range values, clamping", preset.name);
                preset.params = clamped;
            }
            preset
        })
        .collect())
}
