//! I/O for volumes and meshes
//!
//! This crate reads the raw labeled volumes the mesher consumes and writes
//! the artifacts it produces: packed `.dstrip` buffers for renderers, plus
//! OBJ and binary tri-mesh files for debugging and offline tooling.

pub mod raw;
pub mod dstrip;
pub mod obj;
pub mod trimesh;

pub use raw::*;
pub use dstrip::*;
pub use obj::ObjWriter;
pub use trimesh::{TriMeshReader, TriMeshWriter};

use std::path::Path;
use taskmesh_core::{Error, Result, TriangleSoup};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleSoup>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()>;
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => ObjWriter::write_mesh(soup, path),
        Some("mesh") => TriMeshWriter::write_mesh(soup, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("mesh") => TriMeshReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}
