//! Nearest-neighbor volume resampling
//!
//! Labels are categorical, so they are never blended: each destination
//! voxel copies exactly one source voxel.

use rayon::prelude::*;
use taskmesh_core::{Dims, Error, Label, Result, Volume};

/// Resample `source` to `to` dimensions by nearest neighbor
///
/// For each destination voxel the source coordinate along axis `i` is
/// `floor(dst[i] * from[i] / to[i])`, clamped into the source extent.
/// Destination voxels are computed independently and in parallel.
///
/// # Errors
/// Returns [`Error::InvalidData`] if either the source or the destination
/// has a zero-length axis.
pub fn resample<T: Label>(source: &Volume<T>, to: Dims) -> Result<Volume<T>> {
    let from = source.dims();
    if from.is_empty() {
        return Err(Error::InvalidData(format!(
            "Cannot resample an empty volume {}",
            from
        )));
    }
    if to.is_empty() {
        return Err(Error::InvalidData(format!(
            "Cannot resample to empty dimensions {}",
            to
        )));
    }

    if from == to {
        return Ok(source.clone());
    }

    let x_map = axis_map(from.x, to.x);
    let y_map = axis_map(from.y, to.y);
    let z_map = axis_map(from.z, to.z);
    let src = source.as_slice();

    let data: Vec<T> = (0..to.len())
        .into_par_iter()
        .map(|idx| {
            let (x, y, z) = to.coords(idx);
            src[from.index(x_map[x], y_map[y], z_map[z])]
        })
        .collect();

    tracing::debug!("Resampled volume {} -> {}", from, to);

    Volume::new(data, to)
}

/// Halve every axis (rounding up), the usual step between mip levels
pub fn downsample_by_two<T: Label>(source: &Volume<T>) -> Result<Volume<T>> {
    let from = source.dims();
    let to = Dims::new(from.x.div_ceil(2), from.y.div_ceil(2), from.z.div_ceil(2));
    resample(source, to)
}

/// Destination coordinate -> source coordinate along one axis
fn axis_map(from: usize, to: usize) -> Vec<usize> {
    let scale = from as f64 / to as f64;
    (0..to)
        .map(|d| ((d as f64 * scale).floor() as usize).min(from - 1))
        .collect()
}
