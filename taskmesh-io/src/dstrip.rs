//! `.dstrip` files: one packed mesh buffer as little-endian `f32`

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use taskmesh_core::{Error, PackedMeshBuffer, Result};

/// Serialize a packed buffer to any writer
pub fn write_dstrip_to<W: Write>(buffer: &PackedMeshBuffer, writer: &mut W) -> Result<()> {
    for &value in buffer.as_floats() {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Write a packed buffer to `path`; an empty buffer gives an empty file
pub fn write_dstrip<P: AsRef<Path>>(buffer: &PackedMeshBuffer, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_dstrip_to(buffer, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a packed buffer back
///
/// # Errors
/// Fails if the file does not hold a whole number of vertex records.
pub fn read_dstrip<P: AsRef<Path>>(path: P) -> Result<PackedMeshBuffer> {
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;

    if bytes.len() % 4 != 0 {
        return Err(Error::InvalidData(format!(
            "Strip file length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    let mut floats = vec![0f32; bytes.len() / 4];
    bytes.as_slice().read_f32_into::<LittleEndian>(&mut floats)?;
    PackedMeshBuffer::from_floats(floats)
}
