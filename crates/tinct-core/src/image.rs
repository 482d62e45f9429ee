//! Device-color raster handed in and out of the engine.

use std::fmt;

use image::{DynamicImage, RgbImage};

use crate::error::{CoreError, CoreResult};

/// Number of channels in a device-color pixel.
pub const CHANNELS: usize = 3;

/// An immutable 8-bit BGR raster, row-major.
///
/// Dimensions are always positive; every constructor validates the shape
/// before the buffer exists.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// Pixels as `[B, G, R]`.
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Build a buffer from interleaved bytes in B, G, R order.
    ///
    /// `channels` is the channel count the caller decoded; anything other
    /// than 3 is rejected rather than reinterpreted.
    pub fn from_bgr_bytes(width: u32, height: u32, channels: usize, bytes: &[u8]) -> CoreResult<Self> {
        if channels != CHANNELS {
            return Err(CoreError::invalid_buffer(format!(
                "expected {CHANNELS} channels, got {channels}"
            )));
        }
        let count = pixel_count(width, height)?;
        let expected = count
            .checked_mul(CHANNELS)
            .ok_or_else(|| CoreError::invalid_buffer("image dimensions overflow"))?;
        if bytes.len() != expected {
            return Err(CoreError::invalid_buffer(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                bytes.len()
            )));
        }

        let pixels = bytes
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer from already-grouped `[B, G, R]` pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> CoreResult<Self> {
        let count = pixel_count(width, height)?;
        if pixels.len() != count {
            return Err(CoreError::invalid_buffer(format!(
                "expected {count} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Buffer of `width × height` copies of one BGR pixel.
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> CoreResult<Self> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![bgr; count],
        })
    }

    /// Convert a decoded RGB image, swapping into B, G, R order.
    pub fn from_rgb_image(img: &RgbImage) -> CoreResult<Self> {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| [p.0[2], p.0[1], p.0[0]]).collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Convert any decoded image. Alpha is dropped and higher bit depths are
    /// reduced to 8 bits by the `image` crate.
    pub fn from_dynamic_image(img: &DynamicImage) -> CoreResult<Self> {
        Self::from_rgb_image(&img.to_rgb8())
    }

    /// Convert back into an RGB image for encoding or display.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [b, g, r] = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgb([r, g, b])
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width × height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`; zero-sized buffers cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels as `[B, G, R]`, row-major.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Interleaved B, G, R bytes.
    pub fn as_bgr_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Build from pixels produced by the engine itself, whose shape is known
    /// to match `width × height`.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn pixel_count(width: u32, height: u32) -> CoreResult<usize> {
    if width == 0 || height == 0 {
        return Err(CoreError::invalid_buffer(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| CoreError::invalid_buffer("image dimensions overflow"))
}
