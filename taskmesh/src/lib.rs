//! # taskmesh
//!
//! Multi-resolution surface meshes from labeled voxel segmentations.
//!
//! This is the umbrella crate that provides access to every taskmesh crate
//! in one place. Use the individual crates for more granular control over
//! dependencies.
//!
//! ## Features
//!
//! - **Core**: Volumes, segment sets, triangle soups, strips and packed buffers
//! - **Algorithms**: Masking, resampling, strip packing and scaling
//! - **Reconstruction**: Marching cubes surface extraction
//! - **Simplification**: Quadric error edge collapse and stripification
//! - **I/O**: Raw volumes, `.dstrip`, OBJ and binary tri-mesh files
//! - **Pipeline**: The LOD cascade and the [`TaskMesher`](pipeline::TaskMesher) handle
//!
//! ## Quick Start
//!
//! ```rust
//! use taskmesh::prelude::*;
//!
//! let mut volume = Volume::<u16>::filled(Dims::new(8, 8, 8), 0);
//! volume.set(4, 4, 4, 12).unwrap();
//! let segments: SegmentSet<u16> = [12].into_iter().collect();
//!
//! let mesher = TaskMesher::generate(volume, segments, &MesherConfig::default());
//! assert_eq!(mesher.level_count(), 5);
//! assert!(!mesher.raw_mesh().unwrap().is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables `pipeline`
//! - `algorithms`, `io`, `reconstruction`, `simplification`: the single stages
//! - `pipeline`: the full mesher, enables every other feature

// Re-export core functionality
pub use taskmesh_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use taskmesh_algorithms as algorithms;

#[cfg(feature = "io")]
pub use taskmesh_io as io;

#[cfg(feature = "reconstruction")]
pub use taskmesh_reconstruction as reconstruction;

#[cfg(feature = "simplification")]
pub use taskmesh_simplification as simplification;

#[cfg(feature = "pipeline")]
pub use taskmesh_pipeline as pipeline;

/// Convenient imports for common use cases
pub mod prelude {
    pub use taskmesh_core::*;

    #[cfg(feature = "algorithms")]
    pub use taskmesh_algorithms::*;

    #[cfg(feature = "io")]
    pub use taskmesh_io::*;

    #[cfg(feature = "reconstruction")]
    pub use taskmesh_reconstruction::*;

    #[cfg(feature = "simplification")]
    pub use taskmesh_simplification::*;

    #[cfg(feature = "pipeline")]
    pub use taskmesh_pipeline::*;
}
