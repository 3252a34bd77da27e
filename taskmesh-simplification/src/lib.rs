//! Mesh simplification for the LOD cascade
//!
//! A simplifier is a stateful service: [`MeshSimplifier::prepare`] ingests a
//! triangle soup once, and the returned [`SimplifierState`] is decimated
//! repeatedly, each call continuing from where the previous one stopped.
//! - Quadric error edge collapse
//! - Greedy triangle strip generation

pub mod quadric;
pub mod stripify;

pub use quadric::*;
pub use stripify::*;

use taskmesh_core::{StripSet, TriangleSoup};

/// Builds simplification states from triangle soups
pub trait MeshSimplifier: Send + Sync {
    type State: SimplifierState;

    /// Ingest `soup`, computing per-vertex quadrics and normals
    fn prepare(&self, soup: TriangleSoup) -> Self::State;
}

/// A mesh being decimated in place
pub trait SimplifierState {
    /// Number of live faces
    fn face_count(&self) -> usize;

    /// Collapse edges until at most `target_faces` remain or the cheapest
    /// collapse would exceed `max_error`. Returns the new face count.
    fn optimize(&mut self, target_faces: usize, max_error: f64) -> usize;

    /// Current geometry as independent triangle strips
    fn stripify(&self) -> StripSet;

    /// Current geometry as an indexed face list with vertex normals
    fn face_list(&self) -> TriangleSoup;
}
