//! Clip a closed mesh against the half-space `z <= height`.
//!
//! Every face is clipped Sutherland-Hodgman style. A face that straddles the
//! plane leaves exactly one cut segment on the plane, running from the point
//! where its boundary re-enters the half-space to the point where it left.
//! Fanning those segments around any point on the plane closes the surface:
//! the fan triangles of one loop sum to the loop's signed area, so concave
//! waterplanes, several loops and holes all come out right without
//! triangulating the cap polygon itself.

// Mesh indices are u32; truncation would need more than 4B vertices.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3};
use tracing::trace;

use crate::error::{ClipError, ClipResult};

/// Keep the part of `mesh` on or below `height`, capped at the cut.
///
/// Vertices exactly on the plane count as below. Crossing points are shared
/// per input edge, so a welded input gives a welded output. Clipping above
/// the mesh returns an equivalent copy; clipping below it returns an empty
/// mesh.
///
/// The cap is a fan around the mean of the crossing points, oriented +Z.
///
/// # Errors
///
/// - [`ClipError::EmptyMesh`] if the mesh has no vertices or faces
/// - [`ClipError::InvalidIndex`] if a face references a missing vertex
/// - [`ClipError::NonFiniteHeight`] if `height` is NaN or infinite
///
/// # Example
///
/// ```
/// use mesh_clip::clip_below;
/// use mesh_types::{box_mesh, Point3};
///
/// let hull = box_mesh(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
/// assert!(clip_below(&hull, -2.0).unwrap().is_empty());
/// assert_eq!(clip_below(&hull, 2.0).unwrap().face_count(), 12);
/// ```
pub fn clip_below(mesh: &IndexedMesh, height: f64) -> ClipResult<IndexedMesh> {
    if mesh.is_empty() {
        return Err(ClipError::EmptyMesh);
    }
    if !height.is_finite() {
        return Err(ClipError::NonFiniteHeight(height));
    }
    let n = mesh.vertices.len();
    if let Some(face) = mesh
        .faces
        .iter()
        .position(|f| f.iter().any(|&i| i as usize >= n))
    {
        return Err(ClipError::InvalidIndex { face });
    }

    let mut clipper = Clipper::new(mesh, height);
    for &face in &mesh.faces {
        clipper.clip_face(face);
    }
    let clipped = clipper.finish();

    trace!(
        height,
        faces_in = mesh.face_count(),
        faces_out = clipped.face_count(),
        "Clipped mesh"
    );
    Ok(clipped)
}

struct Clipper<'a> {
    source: &'a IndexedMesh,
    height: f64,
    below: Vec<bool>,
    out: IndexedMesh,
    /// Source vertex index -> output index, filled lazily.
    kept: Vec<Option<u32>>,
    /// Undirected source edge -> output index of its crossing point.
    crossings: HashMap<(u32, u32), u32>,
    /// Cut segments as (entry, exit) output indices.
    cut: Vec<(u32, u32)>,
}

impl<'a> Clipper<'a> {
    fn new(source: &'a IndexedMesh, height: f64) -> Self {
        Self {
            source,
            height,
            below: source.vertices.iter().map(|p| p.z <= height).collect(),
            out: IndexedMesh::new(),
            kept: vec![None; source.vertices.len()],
            crossings: HashMap::new(),
            cut: Vec::new(),
        }
    }

    fn keep(&mut self, v: u32) -> u32 {
        if let Some(idx) = self.kept[v as usize] {
            return idx;
        }
        let idx = self.push_vertex(self.source.vertices[v as usize]);
        self.kept[v as usize] = Some(idx);
        idx
    }

    /// Output index of the point where edge `a`-`b` meets the plane.
    fn crossing(&mut self, a: u32, b: u32) -> u32 {
        let key = (a.min(b), a.max(b));
        if let Some(&idx) = self.crossings.get(&key) {
            return idx;
        }

        // Interpolate from the lower endpoint so both faces of an edge agree
        let (lo, hi) = if self.below[a as usize] { (a, b) } else { (b, a) };
        let p = self.source.vertices[lo as usize];
        let q = self.source.vertices[hi as usize];
        let t = (self.height - p.z) / (q.z - p.z);
        let point = Point3::new(t.mul_add(q.x - p.x, p.x), t.mul_add(q.y - p.y, p.y), self.height);

        let idx = self.push_vertex(point);
        self.crossings.insert(key, idx);
        idx
    }

    fn push_vertex(&mut self, p: Point3<f64>) -> u32 {
        self.out.vertices.push(p);
        (self.out.vertices.len() - 1) as u32
    }

    fn push_face(&mut self, face: [u32; 3]) {
        let [a, b, c] = face;
        if a != b && b != c && c != a {
            self.out.faces.push(face);
        }
    }

    fn clip_face(&mut self, face: [u32; 3]) {
        let inside = face.iter().filter(|&&v| self.below[v as usize]).count();
        match inside {
            0 => {}
            3 => {
                let kept = face.map(|v| self.keep(v));
                self.push_face(kept);
            }
            _ => self.clip_straddling(face),
        }
    }

    fn clip_straddling(&mut self, face: [u32; 3]) {
        // At most 4 corners survive clipping a triangle by one plane
        let mut polygon: Vec<u32> = Vec::with_capacity(4);
        let mut entry = None;
        let mut exit = None;

        for k in 0..3 {
            let s = face[k];
            let e = face[(k + 1) % 3];
            match (self.below[s as usize], self.below[e as usize]) {
                (true, true) => polygon.push(self.keep(e)),
                (true, false) => {
                    let x = self.crossing(s, e);
                    polygon.push(x);
                    exit = Some(x);
                }
                (false, true) => {
                    let x = self.crossing(s, e);
                    polygon.push(x);
                    entry = Some(x);
                    polygon.push(self.keep(e));
                }
                (false, false) => {}
            }
        }

        // Convex, so a fan from the first corner covers it
        for i in 1..polygon.len().saturating_sub(1) {
            self.push_face([polygon[0], polygon[i], polygon[i + 1]]);
        }

        if let (Some(entry), Some(exit)) = (entry, exit) {
            self.cut.push((entry, exit));
        }
    }

    fn finish(mut self) -> IndexedMesh {
        if self.cut.is_empty() {
            return self.out;
        }

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        for &(entry, _) in &self.cut {
            let p = self.out.vertices[entry as usize];
            sum_x += p.x;
            sum_y += p.y;
        }
        let count = self.cut.len() as f64;
        let center = self.push_vertex(Point3::new(sum_x / count, sum_y / count, self.height));

        let cut = std::mem::take(&mut self.cut);
        for (entry, exit) in cut {
            self.push_face([center, entry, exit]);
        }
        self.out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hashbrown::HashMap;
    use mesh_types::{Vector3, box_mesh};

    fn signed_volume(mesh: &IndexedMesh) -> f64 {
        mesh.triangles().map(|t| t.signed_tetra_volume()).sum()
    }

    fn centroid(mesh: &IndexedMesh) -> Point3<f64> {
        let mut weighted = Vector3::zeros();
        for t in mesh.triangles() {
            weighted += t.tetra_centroid().coords * t.signed_tetra_volume();
        }
        Point3::from(weighted / signed_volume(mesh))
    }

    /// Every directed edge must be matched by its reverse on a closed surface.
    fn is_closed(mesh: &IndexedMesh) -> bool {
        let mut balance: HashMap<(u32, u32), i32> = HashMap::new();
        for &[a, b, c] in &mesh.faces {
            for (s, e) in [(a, b), (b, c), (c, a)] {
                if s < e {
                    *balance.entry((s, e)).or_default() += 1;
                } else {
                    *balance.entry((e, s)).or_default() -= 1;
                }
            }
        }
        balance.values().all(|&v| v == 0)
    }

    fn cube() -> IndexedMesh {
        box_mesh(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn clip_cube_at_middle() {
        let lower = clip_below(&cube(), 0.0).unwrap();

        assert_relative_eq!(signed_volume(&lower), 4.0, epsilon = 1e-12);
        let c = centroid(&lower);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.z, -0.5, epsilon = 1e-12);
        assert!(is_closed(&lower));
    }

    #[test]
    fn clip_cube_off_center() {
        let lower = clip_below(&cube(), 0.3).unwrap();
        assert_relative_eq!(signed_volume(&lower), 4.0 * 1.3, epsilon = 1e-12);
        assert_relative_eq!(centroid(&lower).z, -0.35, epsilon = 1e-12);
    }

    #[test]
    fn clip_above_and_below_mesh() {
        let all = clip_below(&cube(), 5.0).unwrap();
        assert_relative_eq!(signed_volume(&all), 8.0, epsilon = 1e-12);
        assert_eq!(all.face_count(), 12);

        let none = clip_below(&cube(), -5.0).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn clip_at_vertex_height() {
        // Plane through the top face keeps everything and adds no cap
        let lower = clip_below(&cube(), 1.0).unwrap();
        assert_relative_eq!(signed_volume(&lower), 8.0, epsilon = 1e-12);
        assert_eq!(lower.face_count(), 12);
    }

    #[test]
    fn clip_tilted_cube_through_center() {
        let tilted = cube().rotated_about(Vector3::x(), 30f64.to_radians());
        let lower = clip_below(&tilted, 0.0).unwrap();

        assert_relative_eq!(signed_volume(&lower), 4.0, epsilon = 1e-9);
        assert!(is_closed(&lower));
    }

    #[test]
    fn clip_two_separate_hulls() {
        let mut pair = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let other = box_mesh(Point3::new(3.0, 0.0, 0.0), Point3::new(5.0, 1.0, 2.0));
        let offset = pair.vertices.len() as u32;
        pair.vertices.extend(other.vertices);
        pair.faces
            .extend(other.faces.iter().map(|f| f.map(|i| i + offset)));

        let lower = clip_below(&pair, 0.5).unwrap();
        // 1 x 1 x 0.5 plus 2 x 1 x 0.5
        assert_relative_eq!(signed_volume(&lower), 1.5, epsilon = 1e-12);
        assert!(is_closed(&lower));
    }

    #[test]
    fn clip_tetrahedron_matches_similar_solid() {
        // Apex up: the part above the cut is a scaled copy of the whole
        let tetra = IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(6.0, 0.0, 0.0),
                Point3::new(0.0, 6.0, 0.0),
                Point3::new(1.0, 1.0, 6.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
        );
        let whole = signed_volume(&tetra);
        let lower = clip_below(&tetra, 3.0).unwrap();

        assert_relative_eq!(signed_volume(&lower), whole * (1.0 - 0.125), epsilon = 1e-9);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            clip_below(&IndexedMesh::new(), 0.0),
            Err(ClipError::EmptyMesh)
        ));
        assert!(matches!(
            clip_below(&cube(), f64::NAN),
            Err(ClipError::NonFiniteHeight(_))
        ));

        let broken = IndexedMesh::from_parts(cube().vertices, vec![[0, 1, 2], [0, 1, 99]]);
        assert!(matches!(
            clip_below(&broken, 0.0),
            Err(ClipError::InvalidIndex { face: 1 })
        ));
    }
}
