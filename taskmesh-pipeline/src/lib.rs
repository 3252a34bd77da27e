//! # Taskmesh Pipeline
//!
//! Turns a labeled volume and a set of segment ids into a cascade of packed
//! triangle-strip meshes, one per level of detail.
//!
//! ```no_run
//! use taskmesh_core::{Dims, SegmentSet, Volume};
//! use taskmesh_pipeline::{MesherConfig, TaskMesher};
//!
//! let volume = Volume::<u32>::filled(Dims::new(32, 32, 32), 7);
//! let segments: SegmentSet<u32> = [7].into_iter().collect();
//! let mesher = TaskMesher::generate(volume, segments, &MesherConfig::default());
//! let raw = mesher.raw_mesh().unwrap_or_default();
//! println!("{} bytes at mip 0", raw.len());
//! ```

pub mod config;
pub mod timing;
pub mod lod;
pub mod mesher;

pub use config::*;
pub use timing::*;
pub use lod::*;
pub use mesher::*;
