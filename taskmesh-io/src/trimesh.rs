//! Binary tri-mesh files
//!
//! Layout, all little-endian:
//! - `u64` point count `n`, `u64` face count `m`
//! - `3n` `f32` positions, then `3n` `f32` normals, in (x, y, z) order
//! - `3m` `u16` face indices, last two corners swapped
//!
//! Points and normals are mirrored from the volume axis order the same way
//! [`crate::ObjWriter`] does it, so faces keep facing outward.

use crate::{MeshReader, MeshWriter};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use taskmesh_core::{Error, Point3d, Result, TriangleSoup, Vector3d};

pub struct TriMeshWriter;
pub struct TriMeshReader;

impl TriMeshWriter {
    /// Serialize `soup` to any writer
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if a face index does not fit in `u16`.
    pub fn write_to<W: Write>(soup: &TriangleSoup, writer: &mut W) -> Result<()> {
        if let Some(&index) = soup.faces.iter().flatten().find(|&&i| i > u16::MAX as usize) {
            return Err(Error::InvalidData(format!(
                "Face index {} does not fit in a 16-bit tri-mesh",
                index
            )));
        }

        let computed;
        let normals = match &soup.normals {
            Some(normals) => normals,
            None => {
                computed = soup.compute_vertex_normals();
                &computed
            }
        };

        writer.write_u64::<LittleEndian>(soup.points.len() as u64)?;
        writer.write_u64::<LittleEndian>(soup.faces.len() as u64)?;
        for p in &soup.points {
            for axis in [2, 1, 0] {
                writer.write_f32::<LittleEndian>(p[axis] as f32)?;
            }
        }
        for n in normals {
            for axis in [2, 1, 0] {
                writer.write_f32::<LittleEndian>(n[axis] as f32)?;
            }
        }
        for face in &soup.faces {
            for corner in [face[0], face[2], face[1]] {
                writer.write_u16::<LittleEndian>(corner as u16)?;
            }
        }
        Ok(())
    }
}

impl MeshWriter for TriMeshWriter {
    fn write_mesh<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()> {
        soup.validate()?;
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(soup, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl TriMeshReader {
    /// Parse a tri-mesh back into volume axis order
    pub fn read_from<R: Read>(reader: &mut R) -> Result<TriangleSoup> {
        let n = reader.read_u64::<LittleEndian>()? as usize;
        let m = reader.read_u64::<LittleEndian>()? as usize;

        let read_vec3 = |reader: &mut R| -> Result<[f64; 3]> {
            let mut v = [0f64; 3];
            for axis in [2, 1, 0] {
                v[axis] = reader.read_f32::<LittleEndian>()? as f64;
            }
            Ok(v)
        };

        let mut points = Vec::with_capacity(n.min(1 << 20));
        for _ in 0..n {
            points.push(Point3d::from(read_vec3(reader)?));
        }
        let mut normals = Vec::with_capacity(n.min(1 << 20));
        for _ in 0..n {
            normals.push(Vector3d::from(read_vec3(reader)?));
        }

        let mut faces = Vec::with_capacity(m.min(1 << 20));
        for _ in 0..m {
            let a = reader.read_u16::<LittleEndian>()? as usize;
            let c = reader.read_u16::<LittleEndian>()? as usize;
            let b = reader.read_u16::<LittleEndian>()? as usize;
            faces.push([a, b, c]);
        }

        let soup = TriangleSoup {
            points,
            normals: Some(normals),
            faces,
        };
        soup.validate()?;
        Ok(soup)
    }
}

impl MeshReader for TriMeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }
}
