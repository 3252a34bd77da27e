//! Greedy triangle strip generation
//!
//! Triangle `i` of a strip `s` is `(s[i], s[i+1], s[i+2])` for even `i` and
//! `(s[i+1], s[i], s[i+2])` for odd `i`, so every face keeps the winding it
//! had in the face list.

use std::collections::HashMap;
use taskmesh_core::{StripSet, TriangleSoup};

/// Cover every face of `soup` with triangle strips
///
/// Strips share the soup's point table. Normals are taken from the soup
/// when present and computed from the faces otherwise.
pub fn stripify(soup: &TriangleSoup) -> StripSet {
    let faces = &soup.faces;

    let mut edge_faces: HashMap<(usize, usize), Vec<usize>> =
        HashMap::with_capacity(faces.len() * 3);
    for (fi, face) in faces.iter().enumerate() {
        for k in 0..3 {
            edge_faces
                .entry((face[k], face[(k + 1) % 3]))
                .or_default()
                .push(fi);
        }
    }

    // Unused face on the left of the directed edge a -> b, with its third vertex
    let find_next = |a: usize, b: usize, used: &[bool]| -> Option<(usize, usize)> {
        edge_faces
            .get(&(a, b))?
            .iter()
            .copied()
            .filter(|&f| !used[f])
            .find_map(|f| third_vertex(&faces[f], a, b).map(|w| (f, w)))
    };

    let mut strips = StripSet {
        points: soup.points.clone(),
        normals: soup
            .normals
            .clone()
            .unwrap_or_else(|| soup.compute_vertex_normals()),
        ..StripSet::default()
    };

    let mut used = vec![false; faces.len()];
    let mut strip: Vec<usize> = Vec::new();

    for start in 0..faces.len() {
        if used[start] {
            continue;
        }
        used[start] = true;

        // Start on the rotation that can grow, if any
        let face = faces[start];
        let k = (0..3)
            .find(|&k| find_next(face[(k + 2) % 3], face[(k + 1) % 3], &used).is_some())
            .unwrap_or(0);

        strip.clear();
        strip.extend([face[k], face[(k + 1) % 3], face[(k + 2) % 3]]);

        loop {
            let n = strip.len();
            let (a, b) = if (n - 2) % 2 == 0 {
                (strip[n - 2], strip[n - 1])
            } else {
                (strip[n - 1], strip[n - 2])
            };
            match find_next(a, b, &used) {
                Some((f, w)) => {
                    used[f] = true;
                    strip.push(w);
                }
                None => break,
            }
        }

        let indices: Vec<u32> = strip.iter().map(|&v| v as u32).collect();
        strips.push_strip(&indices);
    }

    tracing::trace!(
        "Stripified {} faces into {} strips",
        faces.len(),
        strips.strip_count()
    );

    strips
}

fn third_vertex(face: &[usize; 3], a: usize, b: usize) -> Option<usize> {
    (0..3)
        .find(|&k| face[k] == a && face[(k + 1) % 3] == b)
        .map(|k| face[(k + 2) % 3])
}

/// Expand strips back into oriented triangles, skipping degenerate ones
pub fn strip_triangles(strips: &StripSet) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(strips.triangle_count());
    for s in 0..strips.strip_count() {
        let strip = strips.strip(s);
        for (i, w) in strip.windows(3).enumerate() {
            let tri = if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            };
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                triangles.push(tri.map(|v| v as usize));
            }
        }
    }
    triangles
}
