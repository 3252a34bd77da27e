//! Occupancy masks from labeled volumes
//!
//! Turns a labeled volume into a 0/1 mask of the selected segments, in
//! place. The outer shell of the volume is always cleared first so that the
//! extracted surface never touches the volume boundary and the hole-filling
//! flood always has a reachable exterior.

use rayon::prelude::*;
use std::collections::VecDeque;
use taskmesh_core::{Dims, Label, SegmentSet, Volume};

/// How enclosed cavities of non-selected labels are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoleMode {
    /// Per-voxel selection; cavities stay open and produce inner surfaces
    #[default]
    Leave,
    /// Flood the exterior from a corner; anything it cannot reach is filled
    Fill,
}

impl HoleMode {
    pub fn from_fill_holes(fill_holes: bool) -> Self {
        if fill_holes {
            HoleMode::Fill
        } else {
            HoleMode::Leave
        }
    }
}

/// Build an occupancy mask of `segments` in place
///
/// After this call every voxel of `volume` is either [`Label::ZERO`] or
/// [`Label::ONE`]. An empty segment set clears the whole volume.
///
/// # Arguments
/// * `volume` - Labeled volume, overwritten with the mask
/// * `segments` - Labels that count as inside
/// * `mode` - Whether enclosed cavities are filled
///
/// # Example
/// ```rust
/// use taskmesh_core::{Dims, SegmentSet, Volume};
/// use taskmesh_algorithms::{build_mask, HoleMode};
///
/// let mut volume = Volume::filled(Dims::new(4, 4, 4), 0u8);
/// volume.set(2, 2, 2, 5).unwrap();
/// let segments: SegmentSet<u8> = [5].into_iter().collect();
///
/// build_mask(&mut volume, &segments, HoleMode::Leave);
/// assert_eq!(volume.count_nonzero(), 1);
/// ```
pub fn build_mask<T: Label>(volume: &mut Volume<T>, segments: &SegmentSet<T>, mode: HoleMode) {
    if segments.is_empty() {
        volume.as_mut_slice().fill(T::ZERO);
        return;
    }
    if volume.is_empty() {
        return;
    }

    clear_shell(volume);

    if !has_interior(volume.dims()) {
        return;
    }

    match mode {
        HoleMode::Leave => select_leave_holes(volume, segments),
        HoleMode::Fill => select_fill_holes(volume, segments),
    }
}

/// Set every voxel on the outer shell of the volume to zero
pub fn clear_shell<T: Label>(volume: &mut Volume<T>) {
    let dims = volume.dims();
    if dims.is_empty() {
        return;
    }

    volume
        .as_mut_slice()
        .par_chunks_mut(dims.slice_len())
        .enumerate()
        .for_each(|(z, slab)| {
            if z == 0 || z + 1 == dims.z {
                slab.fill(T::ZERO);
                return;
            }
            slab[..dims.x].fill(T::ZERO);
            slab[(dims.y - 1) * dims.x..].fill(T::ZERO);
            for row in slab.chunks_mut(dims.x) {
                row[0] = T::ZERO;
                row[dims.x - 1] = T::ZERO;
            }
        });
}

fn has_interior(dims: Dims) -> bool {
    dims.x > 2 && dims.y > 2 && dims.z > 2
}

fn select_leave_holes<T: Label>(volume: &mut Volume<T>, segments: &SegmentSet<T>) {
    let dims = volume.dims();

    volume
        .as_mut_slice()
        .par_chunks_mut(dims.slice_len())
        .enumerate()
        .filter(|(z, _)| *z > 0 && z + 1 < dims.z)
        .for_each(|(_, slab)| {
            for row in slab.chunks_mut(dims.x).skip(1).take(dims.y - 2) {
                for voxel in &mut row[1..dims.x - 1] {
                    *voxel = if segments.contains(*voxel) {
                        T::ONE
                    } else {
                        T::ZERO
                    };
                }
            }
        });
}

fn select_fill_holes<T: Label>(volume: &mut Volume<T>, segments: &SegmentSet<T>) {
    let dims = volume.dims();
    let x_off = 1;
    let y_off = dims.x;
    let z_off = dims.slice_len();

    let data = volume.as_mut_slice();
    let mut seen = vec![false; data.len()];
    let mut queue = VecDeque::new();

    // Voxel 0 is on the shell, so it is exterior.
    seen[0] = true;
    queue.push_back(0usize);

    while let Some(pos) = queue.pop_front() {
        let (x, y, z) = dims.coords(pos);

        if !dims.is_shell(x, y, z) && segments.contains(data[pos]) {
            // Outer hull of the selection; the flood stops here.
            data[pos] = T::ONE;
            continue;
        }

        data[pos] = T::ZERO;

        let mut visit = |next: usize| {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        };
        if x + 1 < dims.x {
            visit(pos + x_off);
        }
        if x > 0 {
            visit(pos - x_off);
        }
        if y + 1 < dims.y {
            visit(pos + y_off);
        }
        if y > 0 {
            visit(pos - y_off);
        }
        if z + 1 < dims.z {
            visit(pos + z_off);
        }
        if z > 0 {
            visit(pos - z_off);
        }
    }

    // Whatever the flood never reached is enclosed by the selection.
    let interior = z_off..(dims.z - 1) * z_off;
    for (voxel, &reached) in data[interior.clone()].iter_mut().zip(&seen[interior]) {
        if !reached {
            *voxel = T::ONE;
        }
    }
}
