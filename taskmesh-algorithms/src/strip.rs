//! Degenerate-bridged strip packing
//!
//! Joins independent triangle strips into one continuous strip so a mesh can
//! be drawn with a single call. Consecutive strips are bridged by repeating
//! the last vertex of one and the first vertex of the next; the bridging
//! triangles have zero area and are discarded by the rasterizer.

use taskmesh_core::{Error, PackedMeshBuffer, Point3d, Result, StripSet, Vector3d, VertexRecord};

/// Pack a [`StripSet`] into one interleaved buffer
///
/// Empty strips are skipped.
///
/// # Errors
/// Returns an error if the strip ranges or indices point outside the
/// set's tables. See [`pack`].
pub fn pack_strips(strips: &StripSet) -> Result<PackedMeshBuffer> {
    pack(
        &strips.points,
        &strips.normals,
        &strips.indices,
        &strips.strip_starts,
        &strips.strip_lengths,
    )
}

/// Concatenate strips given as (start, length) ranges into `indices`
///
/// Before every strip after the first the packer appends, in order:
/// - a copy of the previous strip's last vertex;
/// - a copy of this strip's first vertex, only if the record count so far
///   is even;
/// - a copy of this strip's first vertex.
///
/// The parity step keeps the winding of every real triangle that follows
/// unchanged. Positions and normals are written in reversed axis order.
///
/// # Arguments
/// * `points` - Vertex positions, volume axis order
/// * `normals` - Vertex normals, index-aligned with `points`
/// * `indices` - Concatenated strip indices
/// * `starts` - Offset of each strip into `indices`
/// * `lengths` - Length of each strip
pub fn pack(
    points: &[Point3d],
    normals: &[Vector3d],
    indices: &[u32],
    starts: &[u32],
    lengths: &[u32],
) -> Result<PackedMeshBuffer> {
    if starts.len() != lengths.len() {
        return Err(Error::DimensionMismatch {
            expected: starts.len(),
            actual: lengths.len(),
        });
    }
    if normals.len() != points.len() {
        return Err(Error::DimensionMismatch {
            expected: points.len(),
            actual: normals.len(),
        });
    }

    let mut ranges = Vec::with_capacity(starts.len());
    for (&start, &len) in starts.iter().zip(lengths) {
        let start = start as usize;
        let end = start + len as usize;
        if end > indices.len() {
            return Err(Error::InvalidData(format!(
                "Strip range {}..{} exceeds index count {}",
                start,
                end,
                indices.len()
            )));
        }
        if start < end {
            ranges.push(&indices[start..end]);
        }
    }

    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= points.len()) {
        return Err(Error::InvalidData(format!(
            "Strip index {} exceeds point count {}",
            bad,
            points.len()
        )));
    }

    let record = |i: u32| VertexRecord::reversed(&points[i as usize], &normals[i as usize]);

    let total: usize = ranges.iter().map(|r| r.len()).sum();
    let mut buffer = PackedMeshBuffer::with_vertex_capacity(total + 3 * ranges.len());

    let mut previous_last: Option<u32> = None;
    for strip in ranges {
        let first = strip[0];
        if let Some(last) = previous_last {
            buffer.push(record(last));
            if buffer.vertex_count() % 2 == 0 {
                buffer.push(record(first));
            }
            buffer.push(record(first));
        }
        for &i in strip {
            buffer.push(record(i));
        }
        previous_last = strip.last().copied();
    }

    Ok(buffer)
}
