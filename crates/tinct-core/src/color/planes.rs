//! Whole-buffer HSI planes and the row-parallel forward/inverse passes.

use rayon::prelude::*;

use crate::color::hsi::{bgr_to_hsi, hsi_to_bgr};
use crate::error::{CoreError, CoreResult};
use crate::image::PixelBuffer;

/// Hue, saturation and intensity planes, index-aligned with a source buffer.
///
/// `h ∈ [0, 360)`, `s ∈ [0, 255]`, `i ∈ [0, 255]`. Planes produced by
/// [`forward`] are the reference "original" values for a loaded image and
/// are never mutated; adjustments always produce new planes or buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct HsiPlanes {
    width: u32,
    height: u32,
    h: Vec<f32>,
    s: Vec<f32>,
    i: Vec<f32>,
}

impl HsiPlanes {
    /// Assemble planes from raw values, checking that every plane matches
    /// `width × height`.
    pub fn new(width: u32, height: u32, h: Vec<f32>, s: Vec<f32>, i: Vec<f32>) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::invalid_buffer(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| CoreError::invalid_buffer("image dimensions overflow"))?;
        for plane in [&h, &s, &i] {
            if plane.len() != expected {
                return Err(CoreError::PlaneMismatch {
                    expected,
                    actual: plane.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            h,
            s,
            i,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples per plane.
    pub fn len(&self) -> usize {
        self.h.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h.is_empty()
    }

    /// Hue plane in degrees.
    pub fn hue(&self) -> &[f32] {
        &self.h
    }

    /// Saturation plane on the `[0, 255]` scale.
    pub fn saturation(&self) -> &[f32] {
        &self.s
    }

    /// Intensity plane on the `[0, 255]` scale.
    pub fn intensity(&self) -> &[f32] {
        &self.i
    }

    /// `[H, S, I]` at pixel `(x, y)`.
    pub fn sample(&self, x: u32, y: u32) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        Some([self.h[idx], self.s[idx], self.i[idx]])
    }

    /// New planes with `f` applied to every `[H, S, I]` sample.
    pub(crate) fn map<F>(&self, f: F) -> Self
    where
        F: Fn([f32; 3]) -> [f32; 3] + Sync,
    {
        let width = self.width as usize;
        let len = self.len();
        let mut h = vec![0.0_f32; len];
        let mut s = vec![0.0_f32; len];
        let mut i = vec![0.0_f32; len];

        h.par_chunks_mut(width)
            .zip(s.par_chunks_mut(width))
            .zip(i.par_chunks_mut(width))
            .enumerate()
            .for_each(|(y, ((h_row, s_row), i_row))| {
                let start = y * width;
                for x in 0..h_row.len() {
                    let idx = start + x;
                    let [nh, ns, ni] = f([self.h[idx], self.s[idx], self.i[idx]]);
                    h_row[x] = nh;
                    s_row[x] = ns;
                    i_row[x] = ni;
                }
            });

        Self {
            width: self.width,
            height: self.height,
            h,
            s,
            i,
        }
    }

    /// Device-color buffer with `f` applied to every `[H, S, I]` sample.
    pub(crate) fn render<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn([f32; 3]) -> [u8; 3] + Sync,
    {
        let width = self.width as usize;
        let mut out = vec![[0u8; 3]; self.len()];

        out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            let start = y * width;
            for (x, px) in row.iter_mut().enumerate() {
                let idx = start + x;
                *px = f([self.h[idx], self.s[idx], self.i[idx]]);
            }
        });

        PixelBuffer::from_parts(self.width, self.height, out)
    }
}

/// Convert a BGR buffer into HSI planes.
///
/// Rows are processed in parallel; each output sample depends only on the
/// same-indexed input pixel.
pub fn forward(buffer: &PixelBuffer) -> HsiPlanes {
    let width = buffer.width() as usize;
    let len = buffer.len();
    let mut h = vec![0.0_f32; len];
    let mut s = vec![0.0_f32; len];
    let mut i = vec![0.0_f32; len];

    h.par_chunks_mut(width)
        .zip(s.par_chunks_mut(width))
        .zip(i.par_chunks_mut(width))
        .zip(buffer.pixels().par_chunks(width))
        .for_each(|(((h_row, s_row), i_row), src_row)| {
            for (x, &bgr) in src_row.iter().enumerate() {
                let [hue, sat, int] = bgr_to_hsi(bgr);
                h_row[x] = hue;
                s_row[x] = sat;
                i_row[x] = int;
            }
        });

    tracing::debug!(
        "forward HSI transform: {}x{} ({} px)",
        buffer.width(),
        buffer.height(),
        len
    );

    HsiPlanes {
        width: buffer.width(),
        height: buffer.height(),
        h,
        s,
        i,
    }
}

/// Convert HSI planes back into a BGR buffer of the same shape.
pub fn inverse(planes: &HsiPlanes) -> PixelBuffer {
    planes.render(|[h, s, i]| hsi_to_bgr(h, s, i))
}
