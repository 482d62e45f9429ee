//! Per-image session state: the loaded buffer and its cached HSI planes.
//!
//! The forward transform runs once per [`GradingSession::load`]; every
//! [`GradingSession::adjust`] afterwards reads the cached planes. Loading a
//! new image replaces the previous image and planes wholesale.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::color::planes::{HsiPlanes, forward};
use crate::error::{CoreError, CoreResult};
use crate::grading::adjust::apply_adjustment;
use crate::image::PixelBuffer;
use crate::params::AdjustmentParams;

/// A source image together with its original HSI planes.
///
/// Immutable once built; shared between the session and any in-flight
/// adjustments through an `Arc`.
#[derive(Debug)]
pub struct LoadedImage {
    source: PixelBuffer,
    planes: HsiPlanes,
}

impl LoadedImage {
    /// Run the forward transform over `source` and keep both.
    pub fn new(source: PixelBuffer) -> Self {
        let planes = forward(&source);
        Self { source, planes }
    }

    /// The buffer as it was loaded.
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Reference planes computed at load time.
    pub fn planes(&self) -> &HsiPlanes {
        &self.planes
    }

    /// Render the source with `params` applied.
    pub fn adjust(&self, params: &AdjustmentParams) -> PixelBuffer {
        apply_adjustment(&self.planes, params.adjustment())
    }
}

/// Owns the cached planes of the currently loaded image.
///
/// `adjust` takes `&self` and only holds the lock long enough to clone the
/// `Arc`, so adjustments can run concurrently and a concurrent `load` never
/// touches planes an adjustment is reading.
#[derive(Debug, Default)]
pub struct GradingSession {
    current: RwLock<Option<Arc<LoadedImage>>>,
}

impl GradingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `source` and make it the current image, replacing any
    /// previous one. Returns the new snapshot.
    pub fn load(&self, source: PixelBuffer) -> Arc<LoadedImage> {
        tracing::debug!("loading {}x{} image into session", source.width(), source.height());
        let loaded = Arc::new(LoadedImage::new(source));
        let previous = self.current.write().replace(Arc::clone(&loaded));
        if previous.is_some() {
            tracing::debug!("replaced previously loaded image");
        }
        loaded
    }

    /// Drop the current image and its planes.
    pub fn clear(&self) {
        self.current.write().take();
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// The current image, if any. Holding the snapshot keeps it alive even
    /// if another image is loaded meanwhile.
    pub fn snapshot(&self) -> Option<Arc<LoadedImage>> {
        self.current.read().clone()
    }

    /// Render the current image with `params` applied.
    ///
    /// Always starts from the original planes; the same `params` give the
    /// same buffer no matter how many adjustments came before.
    pub fn adjust(&self, params: &AdjustmentParams) -> CoreResult<PixelBuffer> {
        let loaded = self.snapshot().ok_or(CoreError::NoImageLoaded)?;
        tracing::debug!(
            "adjusting: hue={} sat={} int={}",
            params.hue,
            params.saturation,
            params.intensity
        );
        Ok(loaded.adjust(params))
    }
}
