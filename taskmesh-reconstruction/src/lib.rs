//! # Taskmesh Reconstruction
//!
//! Surface extraction from binary occupancy masks.
//!
//! The LOD pipeline only depends on the [`SurfaceExtractor`] trait; the
//! bundled [`MarchingCubes`] is the default implementation.

pub mod marching_cubes;

// Re-export commonly used items
pub use marching_cubes::*;

use taskmesh_core::{Label, TriangleSoup, Volume};

/// Turns an occupancy mask into a triangle soup
///
/// Implementations must be deterministic for a given mask. A mask with no
/// occupied voxels yields an empty soup, which is not an error.
pub trait SurfaceExtractor: Send + Sync {
    /// Extract the boundary surface of the non-zero voxels of `mask`
    fn extract<T: Label>(&self, mask: &Volume<T>) -> TriangleSoup;
}
