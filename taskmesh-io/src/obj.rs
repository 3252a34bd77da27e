//! OBJ format support
//!
//! Meshes are written in renderer order (x, y, z), which mirrors the volume
//! axis order used internally; faces swap their last two corners so they
//! keep facing outward after the mirror.

use crate::MeshWriter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use taskmesh_core::{Result, TriangleSoup};

pub struct ObjWriter;

impl ObjWriter {
    /// Write `soup` as OBJ text to any writer
    pub fn write_to<W: Write>(soup: &TriangleSoup, writer: &mut W) -> Result<()> {
        let computed;
        let normals = match &soup.normals {
            Some(normals) => normals,
            None => {
                computed = soup.compute_vertex_normals();
                &computed
            }
        };

        for p in &soup.points {
            writeln!(writer, "v {} {} {}", p[2], p[1], p[0])?;
        }
        for n in normals {
            writeln!(writer, "vn {} {} {}", n[2], n[1], n[0])?;
        }
        for face in &soup.faces {
            let [a, b, c] = face.map(|i| i + 1);
            writeln!(writer, "f {a}//{a} {c}//{c} {b}//{b}")?;
        }
        Ok(())
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()> {
        soup.validate()?;
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(soup, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmesh_core::{Point3d, Vector3d};

    #[test]
    fn test_obj_text() {
        let mut soup = TriangleSoup::from_points_and_faces(
            vec![
                Point3d::new(3.0, 2.0, 1.0),
                Point3d::new(3.0, 2.0, 2.0),
                Point3d::new(3.0, 4.0, 1.0),
            ],
            vec![[0, 1, 2]],
        );
        soup.set_normals(vec![Vector3d::new(1.0, 0.0, 0.0); 3]);

        let mut out = Vec::new();
        ObjWriter::write_to(&soup, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "v 1 2 3");
        assert_eq!(lines[3], "vn 0 0 1");
        assert_eq!(lines[6], "f 1//1 3//3 2//2");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_missing_normals_are_computed() {
        let soup = TriangleSoup::from_points_and_faces(
            vec![Point3d::origin(), Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        );
        let mut out = Vec::new();
        ObjWriter::write_to(&soup, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 3);
    }

    #[test]
    fn test_invalid_soup_rejected() {
        let soup = TriangleSoup::from_points_and_faces(vec![Point3d::origin()], vec![[0, 1, 2]]);
        let path = std::env::temp_dir().join(format!("taskmesh_{}_bad.obj", std::process::id()));
        assert!(ObjWriter::write_mesh(&soup, &path).is_err());
    }
}
