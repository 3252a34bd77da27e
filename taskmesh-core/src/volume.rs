//! Dense labeled volumes and segment selections

use crate::error::{Error, Result};
use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Extent of a volume along each axis, in voxels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dims {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Number of voxels
    pub const fn len(&self) -> usize {
        self.x * self.y * self.z
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Voxels in one z-slice
    pub const fn slice_len(&self) -> usize {
        self.x * self.y
    }

    /// Linear index of (x, y, z), x varying fastest
    #[inline]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.x * (y + self.y * z)
    }

    /// Inverse of [`Dims::index`]
    #[inline]
    pub const fn coords(&self, idx: usize) -> (usize, usize, usize) {
        (idx % self.x, (idx / self.x) % self.y, idx / (self.x * self.y))
    }

    /// Whether (x, y, z) lies on the outer shell of the volume
    #[inline]
    pub const fn is_shell(&self, x: usize, y: usize, z: usize) -> bool {
        x == 0 || y == 0 || z == 0 || x + 1 == self.x || y + 1 == self.y || z + 1 == self.z
    }

    pub const fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[usize; 3]> for Dims {
    fn from(dims: [usize; 3]) -> Self {
        Self::new(dims[0], dims[1], dims[2])
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// A dense, row-major 3D array of labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume<T: Label> {
    data: Vec<T>,
    dims: Dims,
}

impl<T: Label> Volume<T> {
    /// Wrap `data` as a volume, rejecting buffers whose length does not
    /// match the declared dimensions
    pub fn new(data: Vec<T>, dims: Dims) -> Result<Self> {
        if data.len() != dims.len() {
            return Err(Error::DimensionMismatch {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        Ok(Self { data, dims })
    }

    /// Create a volume with every voxel set to `value`
    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            data: vec![value; dims.len()],
            dims,
        }
    }

    /// Create a volume by evaluating `f(x, y, z)` for every voxel
    pub fn from_fn<F>(dims: Dims, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(dims.len());
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    data.push(f(x, y, z));
                }
            }
        }
        Self { data, dims }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Label at (x, y, z), `None` when out of bounds
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<T> {
        if x < self.dims.x && y < self.dims.y && z < self.dims.z {
            Some(self.data[self.dims.index(x, y, z)])
        } else {
            None
        }
    }

    /// Set the label at (x, y, z)
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) -> Result<()> {
        if x < self.dims.x && y < self.dims.y && z < self.dims.z {
            let idx = self.dims.index(x, y, z);
            self.data[idx] = value;
            Ok(())
        } else {
            Err(Error::InvalidData(format!(
                "Voxel ({}, {}, {}) out of bounds for dimensions {}",
                x, y, z, self.dims
            )))
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of voxels that are not [`Label::ZERO`]
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }
}

/// The set of labels that count as "inside" when masking a volume
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentSet<T: Label> {
    segments: BTreeSet<T>,
}

impl<T: Label> SegmentSet<T> {
    pub fn new() -> Self {
        Self {
            segments: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, segment: T) -> bool {
        self.segments.insert(segment)
    }

    #[inline]
    pub fn contains(&self, label: T) -> bool {
        self.segments.contains(&label)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.segments.iter()
    }
}

impl<T: Label> FromIterator<T> for SegmentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
