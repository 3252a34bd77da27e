//! taskmesh - mesh segments of a labeled volume into LOD triangle strips
//!
//! Writes one `<mip>.dstrip` file per level into the output directory.
//! With `--debug` every level is also written as `<mip>.obj` and
//! `<mip>.mesh`, and stage timings are printed and saved as `timings.json`.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use taskmesh_algorithms::{mip_scale_factors, resample};
use taskmesh_core::{Dims, Label, SegmentSet};
use taskmesh_io::{read_volume, write_dstrip, write_mesh};
use taskmesh_pipeline::{LodPipeline, MesherConfig, StageTimings, TaskMesher, TimingCollector};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LabelType {
    U8,
    U16,
    U32,
    U64,
}

#[derive(Parser, Debug)]
#[command(name = "taskmesh")]
#[command(about = "Mesh segments of a labeled volume into LOD triangle strips", long_about = None)]
struct Args {
    /// Raw little-endian label volume, gunzipped when it ends in .gz
    #[arg(long)]
    volume: PathBuf,

    /// Volume size as X,Y,Z
    #[arg(long, value_parser = parse_triple::<usize>)]
    dims: [usize; 3],

    /// Segment ids to mesh, comma separated
    #[arg(long, value_delimiter = ',')]
    segments: Vec<u64>,

    /// Width of one label in the volume file
    #[arg(long, value_enum, default_value_t = LabelType::U32)]
    label_type: LabelType,

    /// Simplified levels after the raw mesh (0-4)
    #[arg(long)]
    mips: Option<u8>,

    /// Seal enclosed cavities
    #[arg(long)]
    fill_holes: bool,

    /// Position scale factors as X,Y,Z
    #[arg(long, value_parser = parse_triple::<f32>)]
    scale: Option<[f32; 3]>,

    /// Resample the volume to X,Y,Z before meshing; positions are scaled
    /// back to the original voxel grid
    #[arg(long, value_parser = parse_triple::<usize>)]
    downsample: Option<[usize; 3]>,

    /// JSON mesher config; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Also write OBJ and tri-mesh files and report stage timings
    #[arg(long)]
    debug: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_triple<T: FromStr>(s: &str) -> std::result::Result<[T; 3], String>
where
    T::Err: std::fmt::Display,
{
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{}'", s));
    };
    let parse = |v: &str| v.parse::<T>().map_err(|e| format!("'{}': {}", v, e));
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(args: &Args) -> Result<MesherConfig> {
    let mut config = match &args.config {
        Some(path) => MesherConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => MesherConfig::default(),
    };
    if let Some(mips) = args.mips {
        config.mip_count = mips;
    }
    if args.fill_holes {
        config.fill_holes = true;
    }
    if args.scale.is_some() {
        config.scale = args.scale;
    }
    if args.debug {
        config.retain_face_lists = true;
    }
    config.validate()?;
    Ok(config)
}

fn parse_segments<T: Label>(ids: &[u64]) -> Result<SegmentSet<T>> {
    ids.iter()
        .map(|&id| {
            T::try_from_u64(id).ok_or_else(|| anyhow!("Segment {} does not fit in {}", id, T::NAME))
        })
        .collect()
}

fn run<T: Label>(args: &Args, mut config: MesherConfig) -> Result<()> {
    let dims = Dims::from(args.dims);
    let segments = parse_segments::<T>(&args.segments)?;

    let mut volume = read_volume::<T, _>(&args.volume, dims)
        .with_context(|| format!("Failed to read {} volume: {}", T::NAME, args.volume.display()))?;
    info!("Loaded {} volume {} from {}", T::NAME, dims, args.volume.display());

    if let Some(target) = args.downsample {
        let target = Dims::from(target);
        volume = resample(&volume, target).context("Failed to resample volume")?;
        let factors = mip_scale_factors(dims.as_array(), target.as_array());
        let user = config.scale.unwrap_or([1.0; 3]);
        config.scale = Some(std::array::from_fn(|i| user[i] * factors[i]));
        info!("Resampled to {}, scale {:?}", target, config.scale);
    }

    let mut timings = StageTimings::new();
    let sink: Option<&mut dyn TimingCollector> = if args.debug { Some(&mut timings) } else { None };
    let pipeline = LodPipeline::standard();
    let mesher = TaskMesher::try_generate_with(&pipeline, volume, segments, &config, sink)
        .context("Meshing failed")?;

    write_levels(&mesher, &args.out, args.debug)?;

    if args.debug {
        println!("{}", timings);
        let json = serde_json::to_string_pretty(&timings)?;
        let path = args.out.join("timings.json");
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
    }

    Ok(())
}

fn write_levels<T: Label>(mesher: &TaskMesher<T>, out: &Path, debug: bool) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output dir: {}", out.display()))?;

    for (mip, level) in mesher.cascade().iter().enumerate() {
        let path = out.join(format!("{}.dstrip", mip));
        write_dstrip(&level.mesh, &path)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        info!(
            "Level {}: {} faces, {} bytes -> {}",
            mip,
            level.face_count,
            level.mesh.byte_len(),
            path.display()
        );

        if !debug {
            continue;
        }
        let Some(faces) = &level.faces else {
            continue;
        };
        for ext in ["obj", "mesh"] {
            let path = out.join(format!("{}.{}", mip, ext));
            if let Err(e) = write_mesh(faces, &path) {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(&args)?;
    match args.label_type {
        LabelType::U8 => run::<u8>(&args, config),
        LabelType::U16 => run::<u16>(&args, config),
        LabelType::U32 => run::<u32>(&args, config),
        LabelType::U64 => run::<u64>(&args, config),
    }
}
