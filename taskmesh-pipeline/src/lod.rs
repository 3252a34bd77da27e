//! Level-of-detail cascade generation
//!
//! Level 0 is the raw extracted surface. Level 1 removes only near-coplanar
//! geometry. Every later level keeps about an eighth of the previous level's
//! faces, with an error tolerance that grows by a factor of 1024 per level.

use crate::config::MesherConfig;
use crate::timing::{Stage, TimingCollector};
use std::time::Instant;
use taskmesh_algorithms::{build_mask, pack_strips, scale_positions, HoleMode};
use taskmesh_core::{Label, PackedMeshBuffer, Result, SegmentSet, TriangleSoup, Volume};
use taskmesh_reconstruction::{MarchingCubes, SurfaceExtractor};
use taskmesh_simplification::{MeshSimplifier, QuadricSimplifier, SimplifierState};
use tracing::{debug, info, warn};

/// Face-count divisor of the near-lossless step producing level 1
pub const LOSSLESS_TARGET_DIVISOR: usize = 10;
/// Error tolerance of the near-lossless step
pub const LOSSLESS_MAX_ERROR: f64 = 1e-12;
/// Face-count divisor of every cascade step after level 1
pub const CASCADE_TARGET_DIVISOR: usize = 8;
/// Growth factor of the error tolerance between cascade steps
pub const CASCADE_ERROR_BASE: f64 = 1024.0;

/// Error tolerance of cascade step `mip` (1-based): `1024^(mip - 1)`
pub fn cascade_max_error(mip: usize) -> f64 {
    CASCADE_ERROR_BASE.powi(mip as i32 - 1)
}

/// One level of detail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MipLevel {
    /// The level as one degenerate-bridged triangle strip
    pub mesh: PackedMeshBuffer,
    /// Faces of the simplified mesh this level was packed from
    pub face_count: usize,
    /// Indexed faces, kept when [`MesherConfig::retain_face_lists`] is set
    pub faces: Option<TriangleSoup>,
}

impl MipLevel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

/// Ordered levels of detail; index 0 is the raw mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MipCascade {
    levels: Vec<MipLevel>,
}

impl MipCascade {
    /// A cascade with no levels at all
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw level plus `mip_count` simplified levels, all zero-length
    pub fn empty(mip_count: usize) -> Self {
        Self {
            levels: vec![MipLevel::empty(); mip_count + 1],
        }
    }

    pub fn push(&mut self, level: MipLevel) {
        self.levels.push(level);
    }

    pub fn level(&self, mip: usize) -> Option<&MipLevel> {
        self.levels.get(mip)
    }

    /// Level 0
    pub fn raw_mesh(&self) -> Option<&PackedMeshBuffer> {
        self.level(0).map(|l| &l.mesh)
    }

    /// Level `1 + lod`
    pub fn simplified_mesh(&self, lod: usize) -> Option<&PackedMeshBuffer> {
        self.level(lod + 1).map(|l| &l.mesh)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether every level is zero-length
    pub fn has_no_geometry(&self) -> bool {
        self.levels.iter().all(MipLevel::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MipLevel> {
        self.levels.iter()
    }

    /// Scale the positions of every level by (x, y, z) `factors`
    ///
    /// Retained face lists are in volume axis order, so their points are
    /// scaled by the reversed factors.
    pub fn scale(&mut self, factors: [f32; 3]) {
        for level in &mut self.levels {
            scale_positions(&mut level.mesh, factors);
            if let Some(soup) = &mut level.faces {
                for p in &mut soup.points {
                    p.x *= factors[2] as f64;
                    p.y *= factors[1] as f64;
                    p.z *= factors[0] as f64;
                }
            }
        }
    }
}

/// Forwards stage durations to an optional collector and the log
struct StageClock<'a> {
    sink: Option<&'a mut dyn TimingCollector>,
}

impl StageClock<'_> {
    fn time<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        debug!("Stage {} took {:?}", stage, elapsed);
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.record(stage, elapsed);
        }
        result
    }
}

/// Mask, extract and simplify a volume into a [`MipCascade`]
#[derive(Debug, Clone, Default)]
pub struct LodPipeline<E = MarchingCubes, S = QuadricSimplifier> {
    extractor: E,
    simplifier: S,
}

impl LodPipeline {
    /// Marching cubes extraction followed by quadric simplification
    pub fn standard() -> Self {
        Self::default()
    }
}

impl<E: SurfaceExtractor, S: MeshSimplifier> LodPipeline<E, S> {
    pub fn new(extractor: E, simplifier: S) -> Self {
        Self {
            extractor,
            simplifier,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn simplifier(&self) -> &S {
        &self.simplifier
    }

    /// Generate the cascade for `segments` of `volume`
    ///
    /// `volume` is overwritten with the occupancy mask. The cascade always
    /// holds `1 + config.mip_count` levels. An empty segment set or an empty
    /// extracted surface yields zero-length levels, not an error.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid or a level cannot be packed.
    pub fn generate<T: Label>(
        &self,
        volume: &mut Volume<T>,
        segments: &SegmentSet<T>,
        config: &MesherConfig,
        timings: Option<&mut dyn TimingCollector>,
    ) -> Result<MipCascade> {
        config.validate()?;
        let _span =
            tracing::info_span!("lod_pipeline", label = T::NAME, dims = %volume.dims()).entered();

        let mip_count = config.mip_count as usize;
        let mut clock = StageClock { sink: timings };

        if segments.is_empty() {
            info!("No segments selected, producing {} empty levels", mip_count + 1);
            return Ok(MipCascade::empty(mip_count));
        }

        let mode = HoleMode::from_fill_holes(config.fill_holes);
        clock.time(Stage::Mask, || build_mask(volume, segments, mode));

        let soup = clock.time(Stage::Extract, || self.extractor.extract(&*volume));
        debug!(
            "Extracted {} points, {} faces",
            soup.point_count(),
            soup.face_count()
        );
        if soup.face_count() == 0 {
            info!("Extracted surface is empty, producing {} empty levels", mip_count + 1);
            return Ok(MipCascade::empty(mip_count));
        }

        let mut state = clock.time(Stage::Prepare, || self.simplifier.prepare(soup));
        if state.face_count() == 0 {
            info!("No valid faces after preparation, producing {} empty levels", mip_count + 1);
            return Ok(MipCascade::empty(mip_count));
        }

        let mut cascade = MipCascade::new();
        cascade.push(self.pack_level(&state, 0, config, &mut clock)?);

        if mip_count > 0 {
            let target = state.face_count() / LOSSLESS_TARGET_DIVISOR;
            clock.time(Stage::Simplify { mip: 1 }, || {
                state.optimize(target, LOSSLESS_MAX_ERROR)
            });
            cascade.push(self.pack_level(&state, 1, config, &mut clock)?);

            for mip in 1..=3 {
                if mip == mip_count {
                    break;
                }
                let target = state.face_count() / CASCADE_TARGET_DIVISOR;
                let max_error = cascade_max_error(mip);
                clock.time(Stage::Simplify { mip: mip + 1 }, || {
                    state.optimize(target, max_error)
                });
                cascade.push(self.pack_level(&state, mip + 1, config, &mut clock)?);
            }
        }

        if let Some(factors) = config.scale {
            cascade.scale(factors);
        }

        info!(
            "Generated {} levels, face counts {:?}",
            cascade.len(),
            cascade.iter().map(|l| l.face_count).collect::<Vec<_>>()
        );

        Ok(cascade)
    }

    fn pack_level(
        &self,
        state: &S::State,
        mip: usize,
        config: &MesherConfig,
        clock: &mut StageClock<'_>,
    ) -> Result<MipLevel> {
        let mesh = clock.time(Stage::Pack { mip }, || pack_strips(&state.stripify()))?;
        let face_count = state.face_count();
        if mesh.is_empty() {
            warn!("Level {} packed to an empty buffer", mip);
        }
        debug!(
            "Level {}: {} faces, {} strip vertices",
            mip,
            face_count,
            mesh.vertex_count()
        );

        Ok(MipLevel {
            mesh,
            face_count,
            faces: config.retain_face_lists.then(|| state.face_list()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use taskmesh_core::{Dims, Point3d, StripSet, Vector3d};

    /// Records every `optimize` call; the face count drops straight to the
    /// target
    #[derive(Default)]
    struct RecordingSimplifier {
        calls: Arc<Mutex<Vec<(usize, f64)>>>,
    }

    struct RecordingState {
        faces: usize,
        calls: Arc<Mutex<Vec<(usize, f64)>>>,
    }

    impl MeshSimplifier for RecordingSimplifier {
        type State = RecordingState;

        fn prepare(&self, soup: TriangleSoup) -> RecordingState {
            RecordingState {
                faces: soup.face_count(),
                calls: Arc::clone(&self.calls),
            }
        }
    }

    impl SimplifierState for RecordingState {
        fn face_count(&self) -> usize {
            self.faces
        }

        fn optimize(&mut self, target_faces: usize, max_error: f64) -> usize {
            self.calls.lock().unwrap().push((target_faces, max_error));
            self.faces = target_faces.min(self.faces);
            self.faces
        }

        fn stripify(&self) -> StripSet {
            let mut strips = StripSet {
                points: vec![
                    Point3d::origin(),
                    Point3d::new(0.0, 0.0, 1.0),
                    Point3d::new(0.0, 1.0, 0.0),
                ],
                normals: vec![Vector3d::x(); 3],
                ..StripSet::default()
            };
            if self.faces > 0 {
                strips.push_strip(&[0, 1, 2]);
            }
            strips
        }

        fn face_list(&self) -> TriangleSoup {
            TriangleSoup::new()
        }
    }

    /// Emits a fixed soup of `faces` triangles and counts invocations
    #[derive(Default)]
    struct FixedExtractor {
        faces: usize,
        calls: AtomicUsize,
    }

    impl SurfaceExtractor for FixedExtractor {
        fn extract<T: Label>(&self, _mask: &Volume<T>) -> TriangleSoup {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let points = vec![
                Point3d::origin(),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ];
            TriangleSoup::from_points_and_faces(points, vec![[0, 1, 2]; self.faces])
        }
    }

    fn make_volume() -> Volume<u16> {
        Volume::from_fn(Dims::new(6, 6, 6), |x, y, z| {
            if (2..4).contains(&x) && (2..4).contains(&y) && (2..4).contains(&z) {
                3
            } else {
                0
            }
        })
    }

    fn fixed_pipeline(faces: usize) -> LodPipeline<FixedExtractor, RecordingSimplifier> {
        LodPipeline::new(
            FixedExtractor {
                faces,
                ..Default::default()
            },
            RecordingSimplifier::default(),
        )
    }

    #[test]
    fn test_cascade_schedule() {
        let pipeline = fixed_pipeline(100_000);
        let segments: SegmentSet<u16> = [3].into_iter().collect();
        let cascade = pipeline
            .generate(&mut make_volume(), &segments, &MesherConfig::default(), None)
            .unwrap();

        let calls = pipeline.simplifier().calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![(10_000, 1e-12), (1_250, 1.0), (156, 1024.0), (19, 1_048_576.0)]
        );
        let counts: Vec<usize> = cascade.iter().map(|l| l.face_count).collect();
        assert_eq!(counts, vec![100_000, 10_000, 1_250, 156, 19]);
    }

    #[test]
    fn test_mip_count_stops_cascade_early() {
        let segments: SegmentSet<u16> = [3].into_iter().collect();
        for mip_count in 0..=4u8 {
            let pipeline = fixed_pipeline(1000);
            let config = MesherConfig::new().with_mip_count(mip_count);
            let cascade = pipeline.generate(&mut make_volume(), &segments, &config, None).unwrap();
            assert_eq!(cascade.len(), mip_count as usize + 1);
            assert_eq!(pipeline.simplifier().calls.lock().unwrap().len(), mip_count as usize);
        }
    }

    #[test]
    fn test_empty_segments_skip_extraction() {
        let pipeline = fixed_pipeline(10);
        let cascade = pipeline
            .generate(&mut make_volume(), &SegmentSet::new(), &MesherConfig::default(), None)
            .unwrap();
        assert_eq!(pipeline.extractor().calls.load(Ordering::SeqCst), 0);
        assert_eq!(cascade.len(), 5);
        assert!(cascade.has_no_geometry());
    }

    #[test]
    fn test_empty_surface_skips_simplification() {
        let pipeline = fixed_pipeline(0);
        let segments: SegmentSet<u16> = [3].into_iter().collect();
        let config = MesherConfig::new().with_mip_count(2);
        let cascade = pipeline.generate(&mut make_volume(), &segments, &config, None).unwrap();
        assert_eq!(pipeline.extractor().calls.load(Ordering::SeqCst), 1);
        assert!(pipeline.simplifier().calls.lock().unwrap().is_empty());
        assert_eq!(cascade.len(), 3);
        assert!(cascade.has_no_geometry());
    }

    #[test]
    fn test_volume_is_masked_in_place() {
        let pipeline = fixed_pipeline(1);
        let segments: SegmentSet<u16> = [3].into_iter().collect();
        let mut volume = make_volume();
        pipeline
            .generate(&mut volume, &segments, &MesherConfig::default(), None)
            .unwrap();
        assert!(volume.as_slice().iter().all(|&v| v == 0 || v == 1));
        assert_eq!(volume.count_nonzero(), 8);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let pipeline = fixed_pipeline(1);
        let segments: SegmentSet<u16> = [3].into_iter().collect();
        let config = MesherConfig::new().with_mip_count(7);
        assert!(pipeline.generate(&mut make_volume(), &segments, &config, None).is_err());
    }

    #[test]
    fn test_timings_are_reported() {
        let pipeline = fixed_pipeline(64);
        let segments: SegmentSet<u16> = [3].into_iter().collect();
        let mut timings = crate::StageTimings::new();
        let config = MesherConfig::new().with_mip_count(1);
        pipeline
            .generate(&mut make_volume(), &segments, &config, Some(&mut timings))
            .unwrap();

        let stages: Vec<Stage> = timings.iter().map(|t| t.stage).collect();
        assert_eq!(
            stages,
            vec![
                Stage::Mask,
                Stage::Extract,
                Stage::Prepare,
                Stage::Pack { mip: 0 },
                Stage::Simplify { mip: 1 },
                Stage::Pack { mip: 1 },
            ]
        );
    }

    #[test]
    fn test_cascade_accessors() {
        let cascade = MipCascade::empty(2);
        assert_eq!(cascade.len(), 3);
        assert!(cascade.raw_mesh().unwrap().is_empty());
        assert!(cascade.simplified_mesh(1).is_some());
        assert!(cascade.simplified_mesh(2).is_none());
        assert!(MipCascade::new().raw_mesh().is_none());
    }

    #[test]
    fn test_cascade_max_error() {
        assert_eq!(cascade_max_error(1), 1.0);
        assert_eq!(cascade_max_error(2), 1024.0);
        assert_eq!(cascade_max_error(3), 1_048_576.0);
    }
}
