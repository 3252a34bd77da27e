//! End-to-end tests: labeled volume in, packed mesh cascade out

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taskmesh_algorithms::{downsample_by_two, mip_scale_factors};
use taskmesh_core::{Dims, Label, PackedMeshBuffer, SegmentSet, Volume};
use taskmesh_pipeline::{LodPipeline, MesherConfig, MipCascade, Stage, StageTimings, TaskMesher};

fn make_sphere<T: Label>(size: usize, radius: f64, label: u64) -> Volume<T> {
    let c = size as f64 / 2.0;
    let inside = T::try_from_u64(label).unwrap();
    Volume::from_fn(Dims::new(size, size, size), |x, y, z| {
        let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2) + (z as f64 - c).powi(2)).sqrt();
        if d <= radius {
            inside
        } else {
            T::ZERO
        }
    })
}

/// Cube of label 5 spanning 2..10 with an enclosed cavity of label 0 at 4..8
fn make_hollow_cube() -> Volume<u32> {
    let shell = |v: usize| (2..10).contains(&v);
    let cavity = |v: usize| (4..8).contains(&v);
    Volume::from_fn(Dims::new(12, 12, 12), |x, y, z| {
        if cavity(x) && cavity(y) && cavity(z) {
            0
        } else if shell(x) && shell(y) && shell(z) {
            5
        } else {
            0
        }
    })
}

fn segments<T: Label>(ids: &[u64]) -> SegmentSet<T> {
    ids.iter().map(|&id| T::try_from_u64(id).unwrap()).collect()
}

fn run<T: Label>(volume: Volume<T>, ids: &[u64], config: &MesherConfig) -> MipCascade {
    let mut volume = volume;
    LodPipeline::standard()
        .generate(&mut volume, &segments(ids), config, None)
        .unwrap()
}

/// Triangles of the combined strip whose three records differ
fn visible_triangles(buffer: &PackedMeshBuffer) -> usize {
    buffer
        .records()
        .windows(3)
        .filter(|w| {
            let [a, b, c] = [w[0].position, w[1].position, w[2].position];
            a != b && b != c && a != c
        })
        .count()
}

#[test]
fn test_empty_segment_set_gives_empty_cascade() {
    let config = MesherConfig::default();
    let mesher = TaskMesher::generate(make_sphere::<u32>(16, 5.0, 2), SegmentSet::new(), &config);
    assert_eq!(mesher.level_count(), 5);
    assert_eq!(mesher.raw_mesh().unwrap().len(), 0);
    for lod in 0..4 {
        assert_eq!(mesher.simplified_mesh(lod).unwrap().len(), 0);
    }
}

#[test]
fn test_unselected_label_gives_empty_cascade() {
    let cascade = run(make_sphere::<u16>(16, 5.0, 2), &[7], &MesherConfig::default());
    assert_eq!(cascade.len(), 5);
    assert!(cascade.has_no_geometry());
}

#[test]
fn test_single_center_voxel() {
    let mut volume = Volume::<u32>::filled(Dims::new(4, 4, 4), 0);
    volume.set(2, 2, 2, 5).unwrap();
    let config = MesherConfig::default().with_face_lists(true);
    let cascade = run(volume, &[5], &config);

    assert_eq!(cascade.len(), 5);
    let raw = cascade.level(0).unwrap();
    // One isolated voxel closes into an octahedron
    assert_eq!(raw.face_count, 8);
    assert!(!raw.mesh.is_empty());
    assert_eq!(raw.faces.as_ref().unwrap().point_count(), 6);
    for level in cascade.iter() {
        assert!(level.face_count <= 8);
    }
}

#[test]
fn test_face_counts_are_monotone() {
    let cascade = run(make_sphere::<u32>(32, 12.0, 3), &[3], &MesherConfig::default());
    let counts: Vec<usize> = cascade.iter().map(|l| l.face_count).collect();
    assert_eq!(counts.len(), 5);
    assert!(counts[0] > 0);
    for pair in counts.windows(2) {
        assert!(pair[0] >= pair[1], "face counts increased: {:?}", counts);
    }
    assert!(counts[4] < counts[0]);
}

#[test]
fn test_packed_raw_level_draws_every_face() {
    let config = MesherConfig::default().with_mip_count(0);
    let cascade = run(make_sphere::<u8>(20, 7.0, 1), &[1], &config);
    assert_eq!(cascade.len(), 1);
    let raw = cascade.level(0).unwrap();
    assert_eq!(raw.mesh.as_floats().len() % PackedMeshBuffer::FLOATS_PER_VERTEX, 0);
    assert_eq!(visible_triangles(&raw.mesh), raw.face_count);
}

#[test]
fn test_fill_holes_removes_cavity_surface() {
    let leave = run(make_hollow_cube(), &[5], &MesherConfig::default().with_mip_count(0));
    let fill = run(
        make_hollow_cube(),
        &[5],
        &MesherConfig::default().with_mip_count(0).with_fill_holes(true),
    );
    let leave_faces = leave.level(0).unwrap().face_count;
    let fill_faces = fill.level(0).unwrap().face_count;
    assert!(fill_faces > 0);
    assert!(fill_faces < leave_faces);
}

#[test]
fn test_cascade_length_follows_mip_count() {
    for mip_count in 0..=4u8 {
        let config = MesherConfig::default().with_mip_count(mip_count);
        let cascade = run(make_sphere::<u32>(16, 5.0, 4), &[4], &config);
        assert_eq!(cascade.len(), mip_count as usize + 1);
    }
}

#[test]
fn test_scale_changes_positions_only() {
    let config = MesherConfig::default().with_mip_count(1);
    let plain = run(make_sphere::<u32>(16, 5.0, 4), &[4], &config);
    let scaled_config = config.clone().with_scale([2.0, 3.0, 0.5]);
    let scaled = run(make_sphere::<u32>(16, 5.0, 4), &[4], &scaled_config);

    for (a, b) in plain.iter().zip(scaled.iter()) {
        assert_eq!(a.mesh.vertex_count(), b.mesh.vertex_count());
        for (ra, rb) in a.mesh.records().iter().zip(b.mesh.records()) {
            assert_relative_eq!(ra.position[0] * 2.0, rb.position[0]);
            assert_relative_eq!(ra.position[1] * 3.0, rb.position[1]);
            assert_relative_eq!(ra.position[2] * 0.5, rb.position[2]);
            assert_eq!(ra.normal, rb.normal);
        }
    }
}

#[test]
fn test_label_width_does_not_change_result() {
    let config = MesherConfig::default().with_mip_count(2);
    let narrow = run(make_sphere::<u8>(16, 6.0, 200), &[200], &config);
    let wide = run(make_sphere::<u64>(16, 6.0, 200), &[200], &config);
    assert_eq!(narrow, wide);
}

#[test]
fn test_downsampled_mesh_covers_same_extent() {
    let full = make_sphere::<u32>(32, 10.0, 1);
    let half = downsample_by_two(&full).unwrap();
    let factors = mip_scale_factors(full.dims().as_array(), half.dims().as_array());
    assert_eq!(factors, [2.0, 2.0, 2.0]);

    let config = MesherConfig::default().with_mip_count(0);
    let full_mesh = run(full, &[1], &config);
    let half_mesh = run(half, &[1], &config.with_scale(factors));

    let max_x = |c: &MipCascade| {
        c.raw_mesh()
            .unwrap()
            .records()
            .iter()
            .map(|r| r.position[0])
            .fold(f32::MIN, f32::max)
    };
    assert!((max_x(&full_mesh) - max_x(&half_mesh)).abs() <= 2.0);
}

#[test]
fn test_timings_cover_every_level() {
    let mut volume = make_sphere::<u32>(16, 5.0, 4);
    let mut timings = StageTimings::new();
    LodPipeline::standard()
        .generate(&mut volume, &segments(&[4]), &MesherConfig::default(), Some(&mut timings))
        .unwrap();

    for mip in 0..5 {
        assert!(timings.get(Stage::Pack { mip }).is_some());
    }
    for mip in 1..5 {
        assert!(timings.get(Stage::Simplify { mip }).is_some());
    }
    assert!(timings.get(Stage::Mask).is_some());
}

#[test]
fn test_random_volumes_produce_valid_cascades() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..8 {
        let volume = Volume::<u16>::from_fn(Dims::new(10, 9, 8), |_, _, _| rng.gen_range(0..4));
        let ids: Vec<u64> = (0..4).filter(|_| rng.gen_bool(0.5)).collect();
        let fill_holes = rng.gen_bool(0.5);
        let config = MesherConfig::default().with_fill_holes(fill_holes);
        let cascade = run(volume, &ids, &config);

        assert_eq!(cascade.len(), 5);
        let counts: Vec<usize> = cascade.iter().map(|l| l.face_count).collect();
        for pair in counts.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        for level in cascade.iter() {
            assert!(level.mesh.as_floats().iter().all(|f| f.is_finite()));
            if level.face_count == 0 {
                assert!(level.mesh.is_empty());
            }
        }
    }
}
