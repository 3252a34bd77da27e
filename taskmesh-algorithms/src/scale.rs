//! Per-axis rescaling of packed vertex positions

use taskmesh_core::PackedMeshBuffer;

/// Multiply the position of every record by `factors`, in place
///
/// Normals are left untouched. For non-uniform factors they are no longer
/// exactly perpendicular to the surface; callers that need exact normals
/// must recompute them.
pub fn scale_positions(buffer: &mut PackedMeshBuffer, factors: [f32; 3]) {
    if factors == [1.0; 3] {
        return;
    }
    for record in buffer.records_mut() {
        for (p, f) in record.position.iter_mut().zip(factors) {
            *p *= f;
        }
    }
}

/// Scale factors that map coordinates of a volume with `from` voxel counts
/// onto one with `to` voxel counts, per axis
pub fn mip_scale_factors(from: [usize; 3], to: [usize; 3]) -> [f32; 3] {
    std::array::from_fn(|i| {
        if to[i] == 0 {
            1.0
        } else {
            from[i] as f32 / to[i] as f32
        }
    })
}
