//! Color space conversion — per-pixel HSI math and whole-buffer planes.

pub mod hsi;
pub mod planes;
