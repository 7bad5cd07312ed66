//! Incremental Delaunay triangulation in the parameter plane.
//!
//! The triangulation lives in the `uv` coordinates of the mesh vertices. A
//! [`DelaunayBuilder`] seeds the mesh with an enclosing triangle fan, then
//! inserts points one at a time: locate the containing face by a triangle
//! walk, split it one-to-three, and restore the Delaunay property by flipping
//! illegal edges outward from the new vertex (Lawson legalization, driven by
//! an explicit worklist instead of recursion).
//!
//! All faces produced here wind counter-clockwise in the parameter plane, so
//! shared edges are always traversed in opposite directions by their two
//! faces.

use nalgebra::{Point2, Point3};

use crate::error::{MeshError, Result};
use crate::mesh::{EdgeKey, FaceId, HalfEdgeMesh, VertexId};

/// Faces flatter than this signed area are treated as degenerate.
const AREA_EPS: f64 = 1e-12;

/// Relative slack of the in-circle test; cocircular points count as legal.
const IN_CIRCLE_EPS: f64 = 1e-9;

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive for counter-clockwise winding.
#[inline]
pub fn signed_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x)
}

/// Circumcircle of triangle `(a, b, c)` as `(center, radius)`.
///
/// Returns `None` for (near-)collinear points.
pub fn circumcircle(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
) -> Option<(Point2<f64>, f64)> {
    let s2 = signed_area(a, b, c);
    if s2.abs() < AREA_EPS {
        return None;
    }
    // Same 2x2 determinant, once over (|p|^2, y) and once over (x, |p|^2).
    let sq = |p: &Point2<f64>| p.x * p.x + p.y * p.y;
    let s1 = signed_area(&Point2::new(sq(a), a.y), &Point2::new(sq(b), b.y), &Point2::new(sq(c), c.y));
    let s3 = signed_area(&Point2::new(a.x, sq(a)), &Point2::new(b.x, sq(b)), &Point2::new(c.x, sq(c)));
    let center = Point2::new(s1 / (2.0 * s2), s3 / (2.0 * s2));
    let radius = (a - center).norm();
    Some((center, radius))
}

/// Locate the face containing `p` by walking from `start`.
///
/// Each visited face is tested through its three barycentric sub-area ratios
/// (normalized by the face's own signed area, so the test is independent of
/// winding). The first negative ratio crosses to the neighbor opposite that
/// corner; all three ratios non-negative accepts the face, points exactly on
/// an edge included. Returns `None` when the walk leaves the triangulation,
/// hits a degenerate face, or exceeds its step budget.
pub fn locate(mesh: &HalfEdgeMesh, start: FaceId, p: &Point2<f64>) -> Option<FaceId> {
    let max_steps = 4 * mesh.num_faces() + 16;
    let mut steps = 0;
    let mut stack = vec![start];
    while let Some(f) = stack.pop() {
        steps += 1;
        if steps > max_steps {
            return None;
        }
        let verts = mesh.face_triangle(f);
        let [p0, p1, p2] = mesh.face_uvs(f);
        let area = signed_area(&p0, &p1, &p2);
        if area.abs() < AREA_EPS {
            return None;
        }
        let ratios = [
            signed_area(p, &p1, &p2) / area,
            signed_area(&p0, p, &p2) / area,
            signed_area(&p0, &p1, p) / area,
        ];
        match ratios.iter().position(|&r| r < 0.0) {
            None => return Some(f),
            Some(i) => {
                // p lies beyond the edge opposite corner i.
                let a = verts[(i + 1) % 3];
                let b = verts[(i + 2) % 3];
                stack.push(neighbor_across(mesh, f, a, b)?);
            }
        }
    }
    None
}

/// The face on the other side of edge `(a, b)` from `f`.
fn neighbor_across(mesh: &HalfEdgeMesh, f: FaceId, a: VertexId, b: VertexId) -> Option<FaceId> {
    let he = mesh.vertex_halfedge(a, b)?;
    if mesh.face_of(he) == f {
        mesh.opposite(he).map(|o| mesh.face_of(o))
    } else {
        Some(mesh.face_of(he))
    }
}

/// Incremental Delaunay builder.
///
/// The builder owns the id counters: every vertex and face id in a mesh it
/// manages was handed out here, monotonically. It also remembers the most
/// recently created face as the start of the next locate walk.
#[derive(Debug)]
pub struct DelaunayBuilder {
    next_vertex: usize,
    next_face: usize,
    last_face: FaceId,
}

impl DelaunayBuilder {
    /// Seed an empty mesh with three corner vertices fanned around an
    /// interior point.
    ///
    /// The corners are reordered counter-clockwise if needed. Whether the
    /// interior point actually lies inside the corner triangle is the
    /// caller's responsibility. Produces four vertices, six edges, and three
    /// faces.
    pub fn seed(
        mesh: &mut HalfEdgeMesh,
        corners: [Point2<f64>; 3],
        interior: Point2<f64>,
    ) -> Result<Self> {
        let mut corners = corners;
        if signed_area(&corners[0], &corners[1], &corners[2]) < 0.0 {
            corners.swap(1, 2);
        }

        let mut builder = Self {
            next_vertex: 0,
            next_face: 0,
            last_face: FaceId::invalid(),
        };
        let points = [corners[0], corners[1], corners[2], interior];
        let mut ids = [VertexId::invalid(); 4];
        for (i, p) in points.iter().enumerate() {
            ids[i] = builder.add_vertex(mesh, *p)?;
        }
        for i in 0..3 {
            builder.add_face(mesh, [ids[i], ids[(i + 1) % 3], ids[3]])?;
        }
        Ok(builder)
    }

    /// Resume building on an existing mesh.
    ///
    /// `next_vertex` and `next_face` must be past every id already present
    /// (e.g. after loading a mesh from a file); `last_face` seeds the next
    /// locate walk.
    pub fn resume(next_vertex: usize, next_face: usize, last_face: FaceId) -> Self {
        Self {
            next_vertex,
            next_face,
            last_face,
        }
    }

    /// The most recently created face.
    pub fn last_face(&self) -> FaceId {
        self.last_face
    }

    /// Insert a point, restoring the Delaunay property.
    ///
    /// Locates the containing face (starting from the last created face),
    /// splits it one-to-three around the new vertex, and legalizes the three
    /// rim edges of the former face. Fails with
    /// [`MeshError::OutsideTriangulation`] if the point is not inside any
    /// face.
    pub fn insert(&mut self, mesh: &mut HalfEdgeMesh, p: Point2<f64>) -> Result<VertexId> {
        let face = locate(mesh, self.last_face, &p).ok_or(MeshError::OutsideTriangulation {
            x: p.x,
            y: p.y,
        })?;
        let [a, b, c] = mesh.face_triangle(face);
        let pv = self.add_vertex(mesh, p)?;
        self.split_face(mesh, face, pv)?;
        let rim = vec![
            EdgeKey::new(a, b),
            EdgeKey::new(b, c),
            EdgeKey::new(c, a),
        ];
        self.legalize(mesh, pv, rim)?;
        Ok(pv)
    }

    /// Replace face `face` by three faces fanned around `pv`.
    pub fn split_face(&mut self, mesh: &mut HalfEdgeMesh, face: FaceId, pv: VertexId) -> Result<()> {
        let [a, b, c] = mesh.face_triangle(face);
        mesh.delete_face(face)?;
        self.add_face(mesh, [a, b, pv])?;
        self.add_face(mesh, [b, c, pv])?;
        self.add_face(mesh, [c, a, pv])?;
        Ok(())
    }

    /// Legalize edges against the newly inserted vertex `pv`.
    ///
    /// Processes the worklist until empty: an edge is terminal if it has been
    /// flipped away, is on the boundary, or neither incident face has `pv` as
    /// its apex. Otherwise the circumcircle through `pv` and the edge's
    /// endpoints is tested against the far apex; if the apex lies strictly
    /// inside (beyond the cocircularity tolerance) the edge is flipped to the
    /// `pv`-apex diagonal and the two far rim edges are enqueued.
    ///
    /// Returns the number of flips performed; on a mesh that is already
    /// Delaunay around `pv` this is zero.
    pub fn legalize(
        &mut self,
        mesh: &mut HalfEdgeMesh,
        pv: VertexId,
        work: Vec<EdgeKey>,
    ) -> Result<usize> {
        let mut work = work;
        let mut flips = 0;
        while let Some(key) = work.pop() {
            let (he0, he1) = match (mesh.edge_halfedge(key, 0), mesh.edge_halfedge(key, 1)) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            let (he_pv, he_far) = if mesh.target(mesh.next(he0)) == pv {
                (he0, he1)
            } else if mesh.target(mesh.next(he1)) == pv {
                (he1, he0)
            } else {
                continue;
            };
            let s = mesh.source(he_pv);
            let t = mesh.target(he_pv);
            let v2 = mesh.target(mesh.next(he_far));

            let (center, radius) = match circumcircle(
                &mesh.vertex(pv).uv,
                &mesh.vertex(s).uv,
                &mesh.vertex(t).uv,
            ) {
                Some(c) => c,
                None => continue,
            };
            let dist = (mesh.vertex(v2).uv - center).norm();
            if radius - dist <= IN_CIRCLE_EPS * radius.abs().max(1.0) {
                continue;
            }

            // Flip: the quad (pv, s, v2, t) is counter-clockwise, so both
            // replacement faces are too.
            let f_near = mesh.face_of(he_pv);
            let f_far = mesh.face_of(he_far);
            mesh.delete_face(f_near)?;
            mesh.delete_face(f_far)?;
            self.add_face(mesh, [pv, s, v2])?;
            self.add_face(mesh, [pv, v2, t])?;
            flips += 1;

            work.push(EdgeKey::new(s, v2));
            work.push(EdgeKey::new(v2, t));
        }
        Ok(flips)
    }

    fn add_vertex(&mut self, mesh: &mut HalfEdgeMesh, p: Point2<f64>) -> Result<VertexId> {
        let id = VertexId::new(self.next_vertex);
        self.next_vertex += 1;
        let vertex = mesh.create_vertex(id)?;
        vertex.uv = p;
        vertex.point = Point3::new(p.x, p.y, 0.0);
        Ok(id)
    }

    fn add_face(&mut self, mesh: &mut HalfEdgeMesh, verts: [VertexId; 3]) -> Result<FaceId> {
        let id = FaceId::new(self.next_face);
        self.next_face += 1;
        mesh.create_face(id, verts)?;
        self.last_face = id;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::trace_boundary;

    const CORNERS: [Point2<f64>; 3] = [
        Point2::new(0.0, 0.0),
        Point2::new(50.0, 100.0),
        Point2::new(100.0, 0.0),
    ];
    const CENTER: Point2<f64> = Point2::new(50.0, 50.0);

    fn seeded() -> (HalfEdgeMesh, DelaunayBuilder) {
        let mut mesh = HalfEdgeMesh::new();
        let builder = DelaunayBuilder::seed(&mut mesh, CORNERS, CENTER).unwrap();
        (mesh, builder)
    }

    /// Every face must have an empty circumcircle: no vertex of the mesh may
    /// lie strictly inside it.
    fn assert_delaunay(mesh: &HalfEdgeMesh) {
        for f in mesh.face_ids().collect::<Vec<_>>() {
            let [a, b, c] = mesh.face_triangle(f);
            let [pa, pb, pc] = mesh.face_uvs(f);
            let (center, radius) = circumcircle(&pa, &pb, &pc).unwrap();
            for v in mesh.vertex_ids() {
                if v == a || v == b || v == c {
                    continue;
                }
                let dist = (mesh.vertex(v).uv - center).norm();
                assert!(
                    dist >= radius - 1e-9 * radius.max(1.0),
                    "vertex {:?} lies inside the circumcircle of face {:?} ({} < {})",
                    v,
                    f,
                    dist,
                    radius
                );
            }
        }
    }

    #[test]
    fn test_signed_area_winding() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert!(signed_area(&a, &b, &c) > 0.0);
        assert!(signed_area(&a, &c, &b) < 0.0);
        assert_eq!(signed_area(&a, &b, &Point2::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn test_circumcircle() {
        let (center, radius) = circumcircle(
            &Point2::new(0.0, 0.0),
            &Point2::new(100.0, 0.0),
            &Point2::new(50.0, 50.0),
        )
        .unwrap();
        assert!((center.x - 50.0).abs() < 1e-9);
        assert!(center.y.abs() < 1e-9);
        assert!((radius - 50.0).abs() < 1e-9);

        // Collinear points have no circumcircle.
        assert!(circumcircle(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 2.0),
        )
        .is_none());
    }

    #[test]
    fn test_seed_topology() {
        let (mesh, _) = seeded();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 6);
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_halfedges(), 9);
        assert!(mesh.is_valid());

        // Disk topology: V - E + F = 1.
        let euler =
            mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        assert_eq!(euler, 1);

        // All faces wind counter-clockwise in the parameter plane.
        for f in mesh.face_ids() {
            let [a, b, c] = mesh.face_uvs(f);
            assert!(signed_area(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn test_seed_cw_corners_reordered() {
        let mut mesh = HalfEdgeMesh::new();
        let cw = [CORNERS[0], CORNERS[2], CORNERS[1]];
        DelaunayBuilder::seed(&mut mesh, cw, CENTER).unwrap();
        for f in mesh.face_ids() {
            let [a, b, c] = mesh.face_uvs(f);
            assert!(signed_area(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn test_locate_from_any_start() {
        let (mesh, _) = seeded();
        let p = Point2::new(50.3, 0.7);
        let faces: Vec<FaceId> = mesh.face_ids().collect();
        let results: Vec<Option<FaceId>> =
            faces.iter().map(|&f| locate(&mesh, f, &p)).collect();
        let found = results[0];
        assert!(found.is_some());
        for r in &results {
            assert_eq!(*r, found, "locate result depends on the start face");
        }
    }

    #[test]
    fn test_locate_outside() {
        let (mesh, _) = seeded();
        for start in mesh.face_ids() {
            assert_eq!(locate(&mesh, start, &Point2::new(-10.0, -10.0)), None);
            assert_eq!(locate(&mesh, start, &Point2::new(50.0, 200.0)), None);
        }
    }

    #[test]
    fn test_locate_point_on_edge() {
        let (mesh, _) = seeded();
        // On the shared edge between two interior faces.
        let p = Point2::new(50.0, 25.0);
        let f = locate(&mesh, FaceId::new(0), &p);
        assert!(f.is_some());
    }

    #[test]
    fn test_insert_reference_point() {
        let (mut mesh, mut builder) = seeded();
        let pv = builder.insert(&mut mesh, Point2::new(50.3, 0.7)).unwrap();

        assert_eq!(mesh.num_vertices(), 5);
        assert!(mesh.is_valid());
        let euler =
            mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        assert_eq!(euler, 1);
        assert_delaunay(&mesh);

        // The new vertex is interior; the boundary is still the corner triangle.
        assert!(!mesh.is_boundary_vertex(pv));
        let loops = trace_boundary(&mesh).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
    }

    #[test]
    fn test_insert_many_stays_delaunay() {
        let (mut mesh, mut builder) = seeded();
        let points = [
            (50.3, 0.7),
            (30.0, 20.0),
            (70.0, 20.0),
            (50.0, 35.0),
            (45.0, 10.0),
            (60.0, 28.0),
            (38.0, 30.0),
        ];
        for (x, y) in points {
            builder.insert(&mut mesh, Point2::new(x, y)).unwrap();
            assert!(mesh.is_valid());
            assert_delaunay(&mesh);
        }

        assert_eq!(mesh.num_vertices(), 4 + points.len());
        let euler =
            mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        assert_eq!(euler, 1);

        // All faces still wind counter-clockwise.
        for f in mesh.face_ids() {
            let [a, b, c] = mesh.face_uvs(f);
            assert!(signed_area(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn test_insert_outside_fails() {
        let (mut mesh, mut builder) = seeded();
        let err = builder
            .insert(&mut mesh, Point2::new(-5.0, -5.0))
            .unwrap_err();
        assert!(matches!(err, MeshError::OutsideTriangulation { .. }));
        // The failed insert did not touch the mesh.
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 3);
    }

    #[test]
    fn test_legalize_is_idempotent() {
        let (mut mesh, mut builder) = seeded();
        let pv = builder.insert(&mut mesh, Point2::new(50.3, 0.7)).unwrap();

        // Re-running legalization over every edge must not flip anything.
        let all_edges: Vec<EdgeKey> = mesh.edge_keys().collect();
        let flips = builder.legalize(&mut mesh, pv, all_edges).unwrap();
        assert_eq!(flips, 0);
    }

    #[test]
    fn test_legalize_flips_illegal_edge() {
        // Two triangles sharing edge (s, t), with the far apex inside the
        // circumcircle through (pv, s, t): the circle has center (2, -3.75)
        // and radius ~4.25, and the apex at (2, -2.6) is only 1.15 from it.
        let mut mesh = HalfEdgeMesh::new();
        let s = VertexId::new(0);
        let t = VertexId::new(1);
        let pv = VertexId::new(2);
        let apex = VertexId::new(3);
        for (id, x, y) in [
            (s, 0.0, 0.0),
            (t, 4.0, 0.0),
            (pv, 2.0, 0.5),
            (apex, 2.0, -2.6),
        ] {
            let vert = mesh.create_vertex(id).unwrap();
            vert.uv = Point2::new(x, y);
            vert.point = Point3::new(x, y, 0.0);
        }
        mesh.create_face(FaceId::new(0), [s, t, pv]).unwrap();
        mesh.create_face(FaceId::new(1), [t, s, apex]).unwrap();
        assert!(mesh.is_valid());

        let mut builder = DelaunayBuilder::resume(4, 2, FaceId::new(0));
        let flips = builder
            .legalize(&mut mesh, pv, vec![EdgeKey::new(s, t)])
            .unwrap();
        assert_eq!(flips, 1);

        // The shared edge is replaced by the cross edge.
        assert!(mesh.vertex_edge(s, t).is_none());
        assert!(mesh.vertex_edge(pv, apex).is_some());
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_valid());
        for f in mesh.face_ids() {
            let [a, b, c] = mesh.face_uvs(f);
            assert!(signed_area(&a, &b, &c) > 0.0);
        }
        assert_delaunay(&mesh);
    }
}
