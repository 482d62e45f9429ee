//! Grading tools applied on top of the cached HSI planes.

pub mod adjust;
