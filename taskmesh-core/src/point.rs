//! Point and vector types

use bytemuck::{Pod, Zeroable};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// One vertex of a packed mesh buffer: position followed by normal.
///
/// The layout matches the six floats per vertex the renderers consume.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct VertexRecord {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

unsafe impl Pod for VertexRecord {}
unsafe impl Zeroable for VertexRecord {}

impl VertexRecord {
    /// Build a record from a point and normal given in volume axis order,
    /// reversing both to (axis2, axis1, axis0).
    pub fn reversed(point: &Point3d, normal: &Vector3d) -> Self {
        Self {
            position: [point[2] as f32, point[1] as f32, point[0] as f32],
            normal: [normal[2] as f32, normal[1] as f32, normal[0] as f32],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_six_floats() {
        assert_eq!(std::mem::size_of::<VertexRecord>(), 6 * std::mem::size_of::<f32>());
    }

    #[test]
    fn test_reversed_axis_order() {
        let record = VertexRecord::reversed(
            &Point3d::new(1.0, 2.0, 3.0),
            &Vector3d::new(0.0, 0.6, 0.8),
        );
        assert_eq!(record.position, [3.0, 2.0, 1.0]);
        assert_eq!(record.normal, [0.8, 0.6, 0.0]);
    }
}
