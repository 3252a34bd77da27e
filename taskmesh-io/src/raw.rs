//! Raw labeled volumes
//!
//! A volume file is the bare voxel array: little-endian labels, x varying
//! fastest, no header. Files whose name ends in `.gz` are gzip streams of
//! the same bytes.

use byteorder::{ByteOrder, LittleEndian};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use taskmesh_core::{Dims, Error, Label, Result, Volume};

/// Decode little-endian label bytes into a volume
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] unless `bytes` holds exactly
/// `dims.len()` labels of type `T`.
pub fn decode_volume<T: Label>(bytes: &[u8], dims: Dims) -> Result<Volume<T>> {
    let expected = dims.len() * T::BYTES;
    if bytes.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let data = bytes
        .chunks_exact(T::BYTES)
        .map(|chunk| {
            let value = LittleEndian::read_uint(chunk, T::BYTES);
            T::try_from_u64(value).ok_or_else(|| {
                Error::Decode(format!("Label {} does not fit in {}", value, T::NAME))
            })
        })
        .collect::<Result<Vec<T>>>()?;

    Volume::new(data, dims)
}

/// Encode a volume as little-endian label bytes
pub fn encode_volume<T: Label>(volume: &Volume<T>) -> Vec<u8> {
    let mut bytes = vec![0u8; volume.len() * T::BYTES];
    for (chunk, label) in bytes.chunks_exact_mut(T::BYTES).zip(volume.as_slice()) {
        LittleEndian::write_uint(chunk, label.to_u64(), T::BYTES);
    }
    bytes
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Read the raw bytes of a volume file, gunzipping `.gz` files
pub fn read_volume_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut bytes = Vec::new();

    if is_gzip(path) {
        GzDecoder::new(BufReader::new(file))
            .read_to_end(&mut bytes)
            .map_err(|e| Error::Decode(format!("{}: {}", path.display(), e)))?;
    } else {
        BufReader::new(file).read_to_end(&mut bytes)?;
    }

    tracing::debug!("Read {} volume bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Read a volume file with the given dimensions
pub fn read_volume<T: Label, P: AsRef<Path>>(path: P, dims: Dims) -> Result<Volume<T>> {
    let bytes = read_volume_bytes(path)?;
    decode_volume(&bytes, dims)
}

/// Write a volume file, gzipping when the path ends in `.gz`
pub fn write_volume<T: Label, P: AsRef<Path>>(volume: &Volume<T>, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_volume(volume);
    let writer = BufWriter::new(File::create(path)?);

    if is_gzip(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        encoder.write_all(&bytes)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = writer;
        writer.write_all(&bytes)?;
        writer.flush()?;
    }
    Ok(())
}
