//! Owned handle over one meshing run

use crate::config::MesherConfig;
use crate::lod::{LodPipeline, MipCascade};
use crate::timing::TimingCollector;
use taskmesh_core::{Dims, Label, Result, SegmentSet, Volume};
use taskmesh_io::decode_volume;
use taskmesh_reconstruction::SurfaceExtractor;
use taskmesh_simplification::MeshSimplifier;
use tracing::error;

/// The mesh cascade of one segment selection
///
/// The handle owns its levels; dropping it releases them. Byte accessors
/// return `None` only when the requested level does not exist, so a handle
/// whose input failed to load answers `None` everywhere while a run over an
/// empty selection answers zero-length slices.
#[derive(Debug, Clone)]
pub struct TaskMesher<T: Label> {
    dims: Dims,
    segments: SegmentSet<T>,
    cascade: MipCascade,
}

impl<T: Label> TaskMesher<T> {
    /// Mesh `segments` of `volume` with the default extractor and simplifier
    ///
    /// Failures are logged and leave the handle without levels.
    pub fn generate(volume: Volume<T>, segments: SegmentSet<T>, config: &MesherConfig) -> Self {
        let dims = volume.dims();
        Self::try_generate(volume, segments.clone(), config).unwrap_or_else(|e| {
            error!("Meshing failed: {}", e);
            Self::unmeshed(dims, segments)
        })
    }

    /// Fallible form of [`TaskMesher::generate`]
    pub fn try_generate(
        volume: Volume<T>,
        segments: SegmentSet<T>,
        config: &MesherConfig,
    ) -> Result<Self> {
        Self::try_generate_with(&LodPipeline::standard(), volume, segments, config, None)
    }

    /// Mesh with an explicit pipeline, optionally collecting stage timings
    pub fn try_generate_with<E: SurfaceExtractor, S: MeshSimplifier>(
        pipeline: &LodPipeline<E, S>,
        mut volume: Volume<T>,
        segments: SegmentSet<T>,
        config: &MesherConfig,
        timings: Option<&mut dyn TimingCollector>,
    ) -> Result<Self> {
        let dims = volume.dims();
        let cascade = pipeline.generate(&mut volume, &segments, config, timings)?;
        Ok(Self {
            dims,
            segments,
            cascade,
        })
    }

    /// Decode raw little-endian labels and mesh them
    ///
    /// A buffer of the wrong size is logged and yields a handle with no
    /// levels.
    pub fn generate_from_bytes(
        bytes: &[u8],
        dims: Dims,
        segments: SegmentSet<T>,
        config: &MesherConfig,
    ) -> Self {
        match decode_volume::<T>(bytes, dims) {
            Ok(volume) => Self::generate(volume, segments, config),
            Err(e) => {
                error!("Cannot decode {} volume of {}: {}", T::NAME, dims, e);
                Self::unmeshed(dims, segments)
            }
        }
    }

    /// Fallible form of [`TaskMesher::generate_from_bytes`]
    pub fn try_generate_from_bytes(
        bytes: &[u8],
        dims: Dims,
        segments: SegmentSet<T>,
        config: &MesherConfig,
    ) -> Result<Self> {
        let volume = decode_volume::<T>(bytes, dims)?;
        Self::try_generate(volume, segments, config)
    }

    fn unmeshed(dims: Dims, segments: SegmentSet<T>) -> Self {
        Self {
            dims,
            segments,
            cascade: MipCascade::new(),
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn segments(&self) -> &SegmentSet<T> {
        &self.segments
    }

    /// Packed bytes of mip level 0
    pub fn raw_mesh(&self) -> Option<&[u8]> {
        self.cascade.raw_mesh().map(|m| m.as_bytes())
    }

    /// Packed bytes of mip level `1 + lod`
    pub fn simplified_mesh(&self, lod: usize) -> Option<&[u8]> {
        self.cascade.simplified_mesh(lod).map(|m| m.as_bytes())
    }

    /// Number of levels, zero when meshing failed
    pub fn level_count(&self) -> usize {
        self.cascade.len()
    }

    pub fn cascade(&self) -> &MipCascade {
        &self.cascade
    }

    pub fn into_cascade(self) -> MipCascade {
        self.cascade
    }
}
