//! Core data structures and traits for taskmesh
//!
//! This crate provides the fundamental types shared by every stage of the
//! segmentation meshing pipeline: labeled volumes, segment sets, triangle
//! soups, triangle strips and the packed vertex buffers handed to renderers.

pub mod point;
pub mod label;
pub mod volume;
pub mod mesh;
pub mod error;

pub use point::*;
pub use label::*;
pub use volume::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
