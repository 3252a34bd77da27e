//! Benchmarks for masking, resampling and strip packing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use taskmesh_algorithms::{build_mask, pack_strips, resample, HoleMode};
use taskmesh_core::{Dims, Point3d, SegmentSet, StripSet, Vector3d, Volume};

/// Concentric spherical shells of alternating labels
fn generate_shell_volume(size: usize) -> Volume<u32> {
    let c = size as f64 / 2.0;
    Volume::from_fn(Dims::new(size, size, size), |x, y, z| {
        let r = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2) + (z as f64 - c).powi(2)).sqrt();
        (r / 3.0) as u32 % 4
    })
}

fn generate_strips(count: u32, len: u32) -> StripSet {
    let total = count * len;
    let mut strips = StripSet {
        points: (0..total).map(|i| Point3d::new(i as f64, 0.0, 1.0)).collect(),
        normals: vec![Vector3d::z(); total as usize],
        ..StripSet::default()
    };
    for s in 0..count {
        let strip: Vec<u32> = (s * len..(s + 1) * len).collect();
        strips.push_strip(&strip);
    }
    strips
}

fn bench_masking(c: &mut Criterion) {
    let segments: SegmentSet<u32> = [1, 3].into_iter().collect();
    let mut group = c.benchmark_group("masking");

    for &size in &[32, 64, 128] {
        let volume = generate_shell_volume(size);
        for mode in [HoleMode::Leave, HoleMode::Fill] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                &volume,
                |b, volume| {
                    b.iter(|| {
                        let mut copy = volume.clone();
                        build_mask(&mut copy, black_box(&segments), mode);
                        black_box(copy);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let volume = generate_shell_volume(128);
    c.bench_function("resample_128_to_64", |b| {
        b.iter(|| black_box(resample(black_box(&volume), Dims::new(64, 64, 64)).unwrap()));
    });
}

fn bench_pack(c: &mut Criterion) {
    let strips = generate_strips(1000, 37);
    c.bench_function("pack_1000_strips", |b| {
        b.iter(|| black_box(pack_strips(black_box(&strips)).unwrap()));
    });
}

criterion_group!(benches, bench_masking, bench_resample, bench_pack);
criterion_main!(benches);
