//! # Taskmesh Algorithms
//!
//! Voxel and buffer algorithms that sit around surface extraction:
//! selecting segments into an occupancy mask, nearest-neighbor resampling,
//! joining triangle strips into one degenerate strip, and rescaling packed
//! vertex positions.

pub mod mask;
pub mod resample;
pub mod strip;
pub mod scale;

// Re-export commonly used items
pub use mask::*;
pub use resample::*;
pub use strip::*;
pub use scale::*;
