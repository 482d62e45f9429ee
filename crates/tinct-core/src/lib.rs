//! Tinct Core — HSI conversion and adjustment engine.
//!
//! This crate owns the color math: the BGR ⇄ HSI transforms, the cached
//! planes of the loaded image, and the hue/saturation/intensity adjustment
//! that runs on every parameter change. No UI or file I/O.

pub mod color;
pub mod error;
pub mod grading;
pub mod image;
pub mod params;
pub mod session;

// Re-exports for convenience.
pub use crate::image::PixelBuffer;
pub use color::hsi::HueSector;
pub use color::planes::{HsiPlanes, forward, inverse};
pub use error::{CoreError, CoreResult};
pub use grading::adjust::{Adjustment, adjust_planes, apply_adjustment};
pub use params::{AdjustmentParams, NamedPreset, Parameter, Preset, load_presets_json};
pub use session::{GradingSession, LoadedImage};
