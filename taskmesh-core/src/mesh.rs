//! Mesh data structures exchanged between pipeline stages
//!
//! Coordinates inside [`TriangleSoup`] and [`StripSet`] follow the volume
//! axis order (axis0 = z, axis1 = y, axis2 = x). Packing into a
//! [`PackedMeshBuffer`] reverses them, so renderers receive (x, y, z).

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// An indexed triangle soup with optional per-vertex normals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleSoup {
    pub points: Vec<Point3d>,
    pub normals: Option<Vec<Vector3d>>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleSoup {
    /// Create a new empty soup
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a soup from points and faces
    pub fn from_points_and_faces(points: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            points,
            normals: None,
            faces,
        }
    }

    /// Get the number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the soup has no triangles
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.faces.is_empty()
    }

    /// Set vertex normals; ignored unless there is exactly one per point
    pub fn set_normals(&mut self, normals: Vec<Vector3d>) {
        if normals.len() == self.points.len() {
            self.normals = Some(normals);
        }
    }

    /// Calculate unit face normals from the winding order
    pub fn calculate_face_normals(&self) -> Vec<Vector3d> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.points[face[0]];
                let v1 = self.points[face[1]];
                let v2 = self.points[face[2]];
                (v1 - v0)
                    .cross(&(v2 - v0))
                    .try_normalize(f64::EPSILON)
                    .unwrap_or_else(Vector3d::zeros)
            })
            .collect()
    }

    /// Area-weighted unit vertex normals; isolated points get a zero normal
    pub fn compute_vertex_normals(&self) -> Vec<Vector3d> {
        let mut normals = vec![Vector3d::zeros(); self.points.len()];
        for face in &self.faces {
            let p0 = self.points[face[0]];
            let weighted = (self.points[face[1]] - p0).cross(&(self.points[face[2]] - p0));
            for &i in face {
                normals[i] += weighted;
            }
        }
        for n in &mut normals {
            *n = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3d::zeros);
        }
        normals
    }

    /// Check that every face references an existing point
    pub fn validate(&self) -> Result<()> {
        let n = self.points.len();
        if let Some(face) = self.faces.iter().find(|f| f.iter().any(|&i| i >= n)) {
            return Err(Error::InvalidData(format!(
                "Face {:?} references a point beyond {}",
                face, n
            )));
        }
        if let Some(normals) = &self.normals {
            if normals.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    actual: normals.len(),
                });
            }
        }
        Ok(())
    }
}

/// Independent triangle strips sharing one point/normal table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StripSet {
    pub points: Vec<Point3d>,
    pub normals: Vec<Vector3d>,
    /// Concatenated strip indices into `points`
    pub indices: Vec<u32>,
    /// Offset of each strip into `indices`
    pub strip_starts: Vec<u32>,
    /// Length of each strip in `indices`
    pub strip_lengths: Vec<u32>,
}

impl StripSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strip_count(&self) -> usize {
        self.strip_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append one strip to the set
    pub fn push_strip(&mut self, strip: &[u32]) {
        self.strip_starts.push(self.indices.len() as u32);
        self.strip_lengths.push(strip.len() as u32);
        self.indices.extend_from_slice(strip);
    }

    /// Indices of strip `i`
    pub fn strip(&self, i: usize) -> &[u32] {
        let start = self.strip_starts[i] as usize;
        let len = self.strip_lengths[i] as usize;
        &self.indices[start..start + len]
    }

    /// Number of triangles encoded by the strips (degenerates included)
    pub fn triangle_count(&self) -> usize {
        self.strip_lengths
            .iter()
            .map(|&len| (len as usize).saturating_sub(2))
            .sum()
    }
}

/// Interleaved position/normal floats, six per vertex, drawn as one
/// triangle strip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedMeshBuffer {
    data: Vec<f32>,
}

impl PackedMeshBuffer {
    /// Floats making up one vertex record
    pub const FLOATS_PER_VERTEX: usize = 6;

    /// A zero-length buffer
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap raw floats, rejecting a length that is not a whole number of
    /// vertex records
    pub fn from_floats(data: Vec<f32>) -> Result<Self> {
        if data.len() % Self::FLOATS_PER_VERTEX != 0 {
            return Err(Error::InvalidData(format!(
                "Packed buffer length {} is not a multiple of {}",
                data.len(),
                Self::FLOATS_PER_VERTEX
            )));
        }
        Ok(Self { data })
    }

    pub fn from_records(records: &[VertexRecord]) -> Self {
        Self {
            data: bytemuck::cast_slice(records).to_vec(),
        }
    }

    pub fn with_vertex_capacity(vertices: usize) -> Self {
        Self {
            data: Vec::with_capacity(vertices * Self::FLOATS_PER_VERTEX),
        }
    }

    /// Append one record
    pub fn push(&mut self, record: VertexRecord) {
        self.data.extend_from_slice(&record.position);
        self.data.extend_from_slice(&record.normal);
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.data
    }

    /// Native-endian bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn records(&self) -> &[VertexRecord] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn records_mut(&mut self) -> &mut [VertexRecord] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / Self::FLOATS_PER_VERTEX
    }

    pub fn byte_len(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_floats(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tetrahedron() -> TriangleSoup {
        TriangleSoup::from_points_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.5, 1.0, 0.0),
                Point3d::new(0.5, 0.5, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    #[test]
    fn test_soup_counts() {
        let soup = make_tetrahedron();
        assert_eq!(soup.point_count(), 4);
        assert_eq!(soup.face_count(), 4);
        assert!(!soup.is_empty());
        assert!(TriangleSoup::new().is_empty());
        assert!(soup.validate().is_ok());
    }

    #[test]
    fn test_soup_validation_rejects_bad_index() {
        let mut soup = make_tetrahedron();
        soup.faces.push([0, 1, 9]);
        assert!(soup.validate().is_err());
    }

    #[test]
    fn test_set_normals_requires_matching_length() {
        let mut soup = make_tetrahedron();
        soup.set_normals(vec![Vector3d::z(); 3]);
        assert!(soup.normals.is_none());
        soup.set_normals(vec![Vector3d::z(); 4]);
        assert!(soup.normals.is_some());
    }

    #[test]
    fn test_face_normals_are_unit() {
        let soup = make_tetrahedron();
        for n in soup.calculate_face_normals() {
            approx::assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_vertex_normals_of_flat_fan() {
        let soup = TriangleSoup::from_points_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(1.0, 1.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
                Point3d::new(5.0, 5.0, 5.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        let normals = soup.compute_vertex_normals();
        for n in &normals[..4] {
            approx::assert_relative_eq!(*n, Vector3d::z(), epsilon = 1e-12);
        }
        assert_eq!(normals[4], Vector3d::zeros());
    }

    #[test]
    fn test_strip_set_push() {
        let mut strips = StripSet::new();
        strips.push_strip(&[0, 1, 2, 3]);
        strips.push_strip(&[4, 5, 6]);
        assert_eq!(strips.strip_count(), 2);
        assert_eq!(strips.strip(1), &[4, 5, 6]);
        assert_eq!(strips.strip_starts, vec![0, 4]);
        assert_eq!(strips.triangle_count(), 3);
    }

    #[test]
    fn test_packed_buffer_layout() {
        let mut buffer = PackedMeshBuffer::empty();
        assert!(buffer.is_empty());
        buffer.push(VertexRecord {
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 0.0, 1.0],
        });
        assert_eq!(buffer.vertex_count(), 1);
        assert_eq!(buffer.as_floats(), &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0]);
        assert_eq!(buffer.byte_len(), 24);
        assert_eq!(buffer.as_bytes().len(), 24);
        assert_eq!(buffer.records()[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_packed_buffer_rejects_partial_record() {
        assert!(PackedMeshBuffer::from_floats(vec![0.0; 7]).is_err());
        assert!(PackedMeshBuffer::from_floats(vec![0.0; 12]).is_ok());
    }
}
