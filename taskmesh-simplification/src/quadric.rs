//! Quadric error edge collapse
//!
//! Implements iterative edge collapse simplification driven by quadric
//! error metrics (QEM). The mesh is kept as a face list plus per-vertex
//! incident face lists, which tolerates the non-manifold configurations
//! marching cubes can produce. Collapses are rejected when they would break
//! the link condition, duplicate a face or fold a face over.
//!
//! A [`QuadricState`] keeps its quadrics between [`SimplifierState::optimize`]
//! calls, so a cascade of increasingly coarse levels accumulates error the
//! same way a single long decimation would.

use crate::{stripify, MeshSimplifier, SimplifierState};
use nalgebra::{Matrix3, Matrix4, Vector4};
use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use taskmesh_core::{Point3d, StripSet, TriangleSoup, Vector3d};

/// Below this |det| the optimal-position system is treated as singular
const MIN_DETERMINANT: f64 = 1e-10;

/// Minimum cosine between a face normal before and after a collapse
const MIN_NORMAL_DOT: f64 = 0.2;

// ============================================================
// Edge Cost for Priority Queue
// ============================================================

#[derive(Debug, Clone)]
struct EdgeCost {
    v1: usize,
    v2: usize,
    /// Vertex versions when the cost was computed
    stamp: (u32, u32),
    position: Point3d,
    cost: f64,
}

impl PartialEq for EdgeCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for EdgeCost {}

impl PartialOrd for EdgeCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeCost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest cost first, ties by edge for a stable order
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| (other.v1, other.v2, other.stamp).cmp(&(self.v1, self.v2, self.stamp)))
    }
}

// ============================================================
// Quadric Simplifier
// ============================================================

/// Quadric error edge collapse simplifier
#[derive(Debug, Clone)]
pub struct QuadricSimplifier {
    /// Never collapse edges touching an open boundary
    pub preserve_boundary: bool,
    /// Extra cost for collapses touching a boundary, when they are allowed
    pub boundary_weight: f64,
}

impl Default for QuadricSimplifier {
    fn default() -> Self {
        Self {
            preserve_boundary: true,
            boundary_weight: 100.0,
        }
    }
}

impl QuadricSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(preserve_boundary: bool, boundary_weight: f64) -> Self {
        Self {
            preserve_boundary,
            boundary_weight,
        }
    }
}

impl MeshSimplifier for QuadricSimplifier {
    type State = QuadricState;

    fn prepare(&self, soup: TriangleSoup) -> QuadricState {
        QuadricState::new(soup, self.preserve_boundary, self.boundary_weight)
    }
}

// ============================================================
// Simplification State
// ============================================================

/// A mesh under decimation together with its quadrics
#[derive(Debug, Clone)]
pub struct QuadricState {
    positions: Vec<Point3d>,
    normals: Vec<Vector3d>,
    quadrics: Vec<Matrix4<f64>>,
    versions: Vec<u32>,
    vertex_alive: Vec<bool>,
    boundary: Vec<bool>,
    /// Incident faces per vertex; may hold dead faces until cleaned
    vertex_faces: Vec<Vec<usize>>,
    faces: Vec<[usize; 3]>,
    face_alive: Vec<bool>,
    active_faces: usize,
    preserve_boundary: bool,
    boundary_weight: f64,
}

impl QuadricState {
    fn new(soup: TriangleSoup, preserve_boundary: bool, boundary_weight: f64) -> Self {
        let nv = soup.points.len();
        let total = soup.faces.len();
        let faces: Vec<[usize; 3]> = soup
            .faces
            .into_iter()
            .filter(|f| {
                f.iter().all(|&i| i < nv) && f[0] != f[1] && f[1] != f[2] && f[0] != f[2]
            })
            .collect();
        if faces.len() < total {
            tracing::debug!("Dropped {} degenerate faces", total - faces.len());
        }

        let mut vertex_faces = vec![Vec::new(); nv];
        let mut edge_use: HashMap<(usize, usize), u32> = HashMap::with_capacity(faces.len() * 2);
        for (fi, face) in faces.iter().enumerate() {
            for k in 0..3 {
                vertex_faces[face[k]].push(fi);
                let (a, b) = (face[k], face[(k + 1) % 3]);
                *edge_use.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        let mut boundary = vec![false; nv];
        for (&(a, b), &count) in &edge_use {
            if count == 1 {
                boundary[a] = true;
                boundary[b] = true;
            }
        }

        let mut state = Self {
            positions: soup.points,
            normals: vec![Vector3d::zeros(); nv],
            quadrics: vec![Matrix4::zeros(); nv],
            versions: vec![0; nv],
            vertex_alive: vec![true; nv],
            boundary,
            vertex_faces,
            face_alive: vec![true; faces.len()],
            active_faces: faces.len(),
            faces,
            preserve_boundary,
            boundary_weight,
        };
        state.initialize_quadrics();
        state.update_normals();
        state
    }

    fn compute_plane(v0: &Point3d, v1: &Point3d, v2: &Point3d) -> Option<Vector4<f64>> {
        let n = (v1 - v0).cross(&(v2 - v0)).try_normalize(f64::EPSILON)?;
        let d = -n.dot(&v0.coords);
        Some(Vector4::new(n.x, n.y, n.z, d))
    }

    fn plane_to_quadric(p: &Vector4<f64>) -> Matrix4<f64> {
        p * p.transpose()
    }

    fn initialize_quadrics(&mut self) {
        for face in &self.faces {
            let [v0, v1, v2] = *face;
            if let Some(plane) =
                Self::compute_plane(&self.positions[v0], &self.positions[v1], &self.positions[v2])
            {
                let q = Self::plane_to_quadric(&plane);
                for v in [v0, v1, v2] {
                    self.quadrics[v] += q;
                }
            }
        }
    }

    /// Recompute area-weighted vertex normals from the live faces
    fn update_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = Vector3d::zeros());
        for (face, _) in self.faces.iter().zip(&self.face_alive).filter(|(_, alive)| **alive) {
            let p0 = self.positions[face[0]];
            let weighted =
                (self.positions[face[1]] - p0).cross(&(self.positions[face[2]] - p0));
            for &v in face {
                self.normals[v] += weighted;
            }
        }
        for n in &mut self.normals {
            *n = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3d::zeros);
        }
    }

    fn live_faces(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.vertex_faces[v]
            .iter()
            .copied()
            .filter(move |&f| self.face_alive[f])
    }

    fn neighbors(&self, v: usize) -> BTreeSet<usize> {
        self.live_faces(v)
            .flat_map(|f| self.faces[f])
            .filter(|&u| u != v)
            .collect()
    }

    /// Check the link condition: common neighbors must equal exactly the
    /// face apices opposite the edge (2 for interior, 1 for boundary).
    fn check_link_condition(&self, v1: usize, v2: usize) -> bool {
        let shared = self.live_faces(v1).filter(|&f| self.faces[f].contains(&v2)).count();
        if shared == 0 || shared > 2 {
            return false;
        }
        let n1 = self.neighbors(v1);
        let n2 = self.neighbors(v2);
        n1.intersection(&n2).count() == shared
    }

    /// Whether merging v2 into v1 would produce a face that already exists
    fn creates_duplicate(&self, v1: usize, v2: usize) -> bool {
        let existing: HashSet<[usize; 3]> = self
            .live_faces(v1)
            .map(|f| sorted(self.faces[f]))
            .collect();
        self.live_faces(v2)
            .filter(|&f| !self.faces[f].contains(&v1))
            .any(|f| {
                let moved = self.faces[f].map(|v| if v == v2 { v1 } else { v });
                existing.contains(&sorted(moved))
            })
    }

    /// Whether moving v1 and v2 to `position` flips or collapses a face
    /// that survives the collapse
    fn causes_fold(&self, v1: usize, v2: usize, position: Point3d) -> bool {
        for (moved, other) in [(v1, v2), (v2, v1)] {
            for f in self.live_faces(moved) {
                let face = self.faces[f];
                if face.contains(&other) {
                    continue;
                }
                let p = |v: usize| if v == moved { position } else { self.positions[v] };
                let after = (p(face[1]) - p(face[0])).cross(&(p(face[2]) - p(face[0])));
                let Some(after) = after.try_normalize(f64::EPSILON) else {
                    return true;
                };
                let q = |v: usize| self.positions[v];
                let before = (q(face[1]) - q(face[0])).cross(&(q(face[2]) - q(face[0])));
                if let Some(before) = before.try_normalize(f64::EPSILON) {
                    if before.dot(&after) < MIN_NORMAL_DOT {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn compute_collapse_cost(&self, v1: usize, v2: usize) -> (Point3d, f64) {
        let q = self.quadrics[v1] + self.quadrics[v2];
        let p1 = self.positions[v1];
        let p2 = self.positions[v2];

        let a: Matrix3<f64> = q.fixed_view::<3, 3>(0, 0).into_owned();
        let optimal = if a.determinant().abs() > MIN_DETERMINANT {
            a.try_inverse().map(|inv| {
                let p = -inv * q.fixed_view::<3, 1>(0, 3);
                Point3d::new(p[0], p[1], p[2])
            })
        } else {
            None
        };

        let midpoint = Point3d::from((p1.coords + p2.coords) * 0.5);
        let mut best = (midpoint, quadric_error(&q, &midpoint));
        for candidate in optimal.into_iter().chain([p1, p2]) {
            let cost = quadric_error(&q, &candidate);
            if cost < best.1 {
                best = (candidate, cost);
            }
        }
        best
    }

    fn edge_candidate(&self, v1: usize, v2: usize) -> Option<EdgeCost> {
        let on_boundary = self.boundary[v1] || self.boundary[v2];
        if self.preserve_boundary && on_boundary {
            return None;
        }
        let (position, mut cost) = self.compute_collapse_cost(v1, v2);
        if on_boundary {
            cost += self.boundary_weight;
        }
        Some(EdgeCost {
            v1,
            v2,
            stamp: (self.versions[v1], self.versions[v2]),
            position,
            cost,
        })
    }

    /// Build the priority queue of every live edge
    fn build_queue(&self) -> PriorityQueue<usize, EdgeCost> {
        let mut queue = PriorityQueue::new();
        let mut seen_edges: HashSet<(usize, usize)> = HashSet::new();
        let mut edge_id = 0usize;

        for (face, _) in self.faces.iter().zip(&self.face_alive).filter(|(_, alive)| **alive) {
            for k in 0..3 {
                let (a, b) = (face[k], face[(k + 1) % 3]);
                if !seen_edges.insert((a.min(b), a.max(b))) {
                    continue;
                }
                if let Some(candidate) = self.edge_candidate(a, b) {
                    queue.push(edge_id, candidate);
                    edge_id += 1;
                }
            }
        }

        queue
    }

    /// Queue the edges around `v` with fresh costs
    fn push_vertex_edges(
        &self,
        v: usize,
        queue: &mut PriorityQueue<usize, EdgeCost>,
        next_id: &mut usize,
    ) {
        for u in self.neighbors(v) {
            if let Some(candidate) = self.edge_candidate(v, u) {
                queue.push(*next_id, candidate);
                *next_id += 1;
            }
        }
    }

    /// Collapse edge (v1, v2), merging v2 into v1 at `position`
    fn collapse_edge(&mut self, v1: usize, v2: usize, position: Point3d) {
        let incident: Vec<usize> = self.live_faces(v2).collect();
        for f in incident {
            if self.faces[f].contains(&v1) {
                self.face_alive[f] = false;
                self.active_faces -= 1;
            } else {
                for slot in &mut self.faces[f] {
                    if *slot == v2 {
                        *slot = v1;
                    }
                }
                self.vertex_faces[v1].push(f);
            }
        }

        let face_alive = &self.face_alive;
        self.vertex_faces[v1].retain(|&f| face_alive[f]);
        self.vertex_faces[v2] = Vec::new();
        self.vertex_alive[v2] = false;

        let v2_quadric = self.quadrics[v2];
        self.quadrics[v1] += v2_quadric;
        self.positions[v1] = position;
        self.boundary[v1] |= self.boundary[v2];

        self.versions[v1] = self.versions[v1].wrapping_add(1);
        self.versions[v2] = self.versions[v2].wrapping_add(1);
    }

    /// Live vertices in first-use order and the faces re-indexed onto them
    fn compact(&self) -> (Vec<usize>, Vec<[usize; 3]>) {
        let mut remap = vec![usize::MAX; self.positions.len()];
        let mut order = Vec::new();
        let mut faces = Vec::with_capacity(self.active_faces);

        for (face, _) in self.faces.iter().zip(&self.face_alive).filter(|(_, alive)| **alive) {
            let mapped = face.map(|v| {
                if remap[v] == usize::MAX {
                    remap[v] = order.len();
                    order.push(v);
                }
                remap[v]
            });
            faces.push(mapped);
        }

        (order, faces)
    }

    /// Number of vertices still referenced by a live face
    pub fn vertex_count(&self) -> usize {
        self.compact().0.len()
    }
}

impl SimplifierState for QuadricState {
    fn face_count(&self) -> usize {
        self.active_faces
    }

    fn optimize(&mut self, target_faces: usize, max_error: f64) -> usize {
        let start_faces = self.active_faces;

        // Each pass works from a fresh queue; a new pass only starts when the
        // previous one made progress, since rejected edges may have become
        // collapsible since.
        while self.active_faces > target_faces {
            let mut queue = self.build_queue();
            let mut next_id = queue.len();
            let mut collapses = 0usize;
            let mut exceeded = false;

            while self.active_faces > target_faces {
                let Some((_, edge_cost)) = queue.pop() else {
                    break;
                };

                // Check error threshold
                if edge_cost.cost > max_error {
                    exceeded = true;
                    break;
                }

                let EdgeCost { v1, v2, stamp, position, .. } = edge_cost;
                if !self.vertex_alive[v1]
                    || !self.vertex_alive[v2]
                    || stamp != (self.versions[v1], self.versions[v2])
                {
                    continue;
                }

                // Check link condition to avoid non-manifold topology
                if !self.check_link_condition(v1, v2)
                    || self.creates_duplicate(v1, v2)
                    || self.causes_fold(v1, v2, position)
                {
                    continue;
                }

                self.collapse_edge(v1, v2, position);
                collapses += 1;
                self.push_vertex_edges(v1, &mut queue, &mut next_id);
            }

            if exceeded || collapses == 0 {
                break;
            }
        }

        self.update_normals();

        tracing::debug!(
            "Optimized {} -> {} faces (target {}, max error {:e})",
            start_faces,
            self.active_faces,
            target_faces,
            max_error
        );

        self.active_faces
    }

    fn stripify(&self) -> StripSet {
        stripify::stripify(&self.face_list())
    }

    fn face_list(&self) -> TriangleSoup {
        let (order, faces) = self.compact();
        let points = order.iter().map(|&v| self.positions[v]).collect();
        let normals = order.iter().map(|&v| self.normals[v]).collect();
        TriangleSoup {
            points,
            normals: Some(normals),
            faces,
        }
    }
}

fn quadric_error(q: &Matrix4<f64>, p: &Point3d) -> f64 {
    let vh = Vector4::new(p.x, p.y, p.z, 1.0);
    (vh.transpose() * q * vh)[0].max(0.0)
}

fn sorted(mut face: [usize; 3]) -> [usize; 3] {
    face.sort_unstable();
    face
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip_triangles;
    use approx::assert_relative_eq;

    fn make_single_triangle() -> TriangleSoup {
        TriangleSoup::from_points_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    fn make_tetrahedron() -> TriangleSoup {
        // Consistently wound: each shared edge appears in opposite directions
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

    fn make_plane_grid(size: usize) -> TriangleSoup {
        let mut points = Vec::new();
        for y in 0..size {
            for x in 0..size {
                points.push(Point3d::new(x as f64, y as f64, 0.0));
            }
        }
        let mut faces = Vec::new();
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let tl = y * size + x;
                let tr = tl + 1;
                let bl = (y + 1) * size + x;
                let br = bl + 1;
                faces.push([tl, bl, tr]);
                faces.push([tr, bl, br]);
            }
        }
        TriangleSoup::from_points_and_faces(points, faces)
    }

    /// Closed, consistently wound box surface: `n x n` quads per side
    fn make_subdivided_cube(n: usize) -> TriangleSoup {
        let mut points = Vec::new();
        let mut faces = Vec::new();
        let mut lookup: HashMap<[i64; 3], usize> = HashMap::new();
        let mut index_of = |p: [i64; 3], points: &mut Vec<Point3d>| {
            *lookup.entry(p).or_insert_with(|| {
                points.push(Point3d::new(p[0] as f64, p[1] as f64, p[2] as f64));
                points.len() - 1
            })
        };

        let n = n as i64;
        // (normal axis, side, u axis, v axis) with u x v pointing outward
        let sides = [
            (0, n, 1, 2),
            (0, 0, 2, 1),
            (1, n, 2, 0),
            (1, 0, 0, 2),
            (2, n, 0, 1),
            (2, 0, 1, 0),
        ];
        for &(axis, level, u, v) in &sides {
            for i in 0..n {
                for j in 0..n {
                    let corner = |du: i64, dv: i64| {
                        let mut p = [0i64; 3];
                        p[axis] = level;
                        p[u] = i + du;
                        p[v] = j + dv;
                        p
                    };
                    let a = index_of(corner(0, 0), &mut points);
                    let b = index_of(corner(1, 0), &mut points);
                    let c = index_of(corner(1, 1), &mut points);
                    let d = index_of(corner(0, 1), &mut points);
                    faces.push([a, b, c]);
                    faces.push([a, c, d]);
                }
            }
        }
        TriangleSoup::from_points_and_faces(points, faces)
    }

    fn assert_closed(soup: &TriangleSoup) {
        let mut directed = HashSet::new();
        for face in &soup.faces {
            for k in 0..3 {
                assert!(directed.insert((face[k], face[(k + 1) % 3])));
            }
        }
        for &(a, b) in &directed {
            assert!(directed.contains(&(b, a)));
        }
    }

    // ---- Construction tests ----

    #[test]
    fn test_creation() {
        let s = QuadricSimplifier::new();
        assert!(s.preserve_boundary);
        let s = QuadricSimplifier::with_params(false, 50.0);
        assert!(!s.preserve_boundary);
        assert_eq!(s.boundary_weight, 50.0);
    }

    #[test]
    fn test_prepare_drops_degenerate_faces() {
        let mut soup = make_tetrahedron();
        soup.faces.push([0, 0, 1]);
        soup.faces.push([0, 1, 7]);
        let state = QuadricSimplifier::new().prepare(soup);
        assert_eq!(state.face_count(), 4);
        assert_eq!(state.vertex_count(), 4);
    }

    #[test]
    fn test_prepare_computes_normals() {
        let state = QuadricSimplifier::new().prepare(make_plane_grid(4));
        let soup = state.face_list();
        for n in soup.normals.as_ref().unwrap() {
            assert_relative_eq!(n.z.abs(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_link_condition_tetrahedron() {
        let state = QuadricSimplifier::new().prepare(make_tetrahedron());
        assert!(state.check_link_condition(0, 1));
        // ...but the collapse would leave two copies of one triangle
        assert!(state.creates_duplicate(0, 1));
    }

    #[test]
    fn test_boundary_detection() {
        let state = QuadricSimplifier::new().prepare(make_single_triangle());
        assert!(state.boundary.iter().all(|&b| b));

        let state = QuadricSimplifier::new().prepare(make_tetrahedron());
        assert!(state.boundary.iter().all(|&b| !b));
    }

    // ---- Simplification tests ----

    #[test]
    fn test_empty_soup() {
        let mut state = QuadricSimplifier::new().prepare(TriangleSoup::new());
        assert_eq!(state.optimize(0, f64::MAX), 0);
        assert!(state.face_list().is_empty());
        assert!(state.stripify().is_empty());
    }

    #[test]
    fn test_target_above_face_count_is_noop() {
        let mut state = QuadricSimplifier::new().prepare(make_tetrahedron());
        assert_eq!(state.optimize(10, f64::MAX), 4);
    }

    #[test]
    fn test_tetrahedron_cannot_collapse() {
        let mut state = QuadricSimplifier::new().prepare(make_tetrahedron());
        assert_eq!(state.optimize(0, f64::MAX), 4);
    }

    #[test]
    fn test_flat_faces_collapse_losslessly() {
        let mut state = QuadricSimplifier::new().prepare(make_subdivided_cube(4));
        let original = state.face_count();
        assert_eq!(original, 6 * 16 * 2);

        let faces = state.optimize(original / 10, 1e-12);
        assert!(faces < original);

        // Coplanar collapses keep every vertex on the cube surface
        let soup = state.face_list();
        assert_closed(&soup);
        for p in &soup.points {
            let on_face = p.iter().any(|&c| c.abs() < 1e-9 || (c - 4.0).abs() < 1e-9);
            assert!(on_face, "{:?} left the surface", p);
        }
    }

    #[test]
    fn test_error_threshold_stops_collapse() {
        // A tight bound still removes coplanar vertices but never a corner
        let mut state = QuadricSimplifier::new().prepare(make_subdivided_cube(3));
        state.optimize(0, 1e-12);
        let soup = state.face_list();
        for corner in [[0.0, 0.0, 0.0], [3.0, 3.0, 3.0], [3.0, 0.0, 3.0]] {
            let corner = Point3d::from(corner);
            assert!(soup.points.iter().any(|p| (p - corner).norm() < 1e-9));
        }
    }

    #[test]
    fn test_repeated_optimize_is_monotone() {
        let mut state = QuadricSimplifier::new().prepare(make_subdivided_cube(6));
        let mut last = state.face_count();
        for (target, error) in [(last / 10, 1e-12), (last / 8, 1.0), (last / 8, 1024.0)] {
            let faces = state.optimize(target, error);
            assert!(faces <= last);
            assert_eq!(faces, state.face_count());
            last = faces;
        }
        assert_closed(&state.face_list());
    }

    #[test]
    fn test_boundary_preservation() {
        let mut state = QuadricSimplifier::new().prepare(make_plane_grid(6));
        assert_eq!(state.face_count(), 50);
        state.optimize(10, f64::MAX);
        let soup = state.face_list();

        // Every original border vertex survives in place
        for i in 0..6 {
            for p in [[i, 0], [i, 5], [0, i], [5, i]] {
                let target = Point3d::new(p[0] as f64, p[1] as f64, 0.0);
                assert!(soup.points.iter().any(|q| (q - target).norm() < 1e-9));
            }
        }
    }

    #[test]
    fn test_planar_grid_simplification() {
        let mut state = QuadricSimplifier::with_params(false, 0.0).prepare(make_plane_grid(6));
        let faces = state.optimize(25, 1e-9);
        assert!(faces < 50);
        assert!(faces > 0);
        // The grid winds clockwise seen from +z
        for n in state.face_list().normals.unwrap() {
            assert_relative_eq!(n.z, -1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_strips_match_face_list() {
        let mut state = QuadricSimplifier::new().prepare(make_subdivided_cube(3));
        state.optimize(20, 1e-12);
        let soup = state.face_list();
        let strips = state.stripify();
        assert_eq!(strips.points, soup.points);
        assert_eq!(strip_triangles(&strips).len(), soup.face_count());
    }
}
