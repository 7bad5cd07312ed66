//! Discrete curvature and global invariants.
//!
//! Gauss curvature is computed intrinsically, from edge lengths alone: the
//! law of cosines gives the corner angle at each half-edge's target vertex,
//! and the curvature at a vertex is its angle defect (2π minus the angle sum
//! for interior vertices, π minus it on the boundary). Summed over the mesh
//! the defects satisfy the discrete Gauss-Bonnet theorem: the total is
//! 2π times the Euler characteristic for a closed mesh, and 2π for a disk.
//!
//! # Example
//!
//! ```
//! use trigon::algo::curvature::{euler_characteristic, gauss_curvature};
//! use trigon::mesh::{FaceId, HalfEdgeMesh, VertexId};
//! use nalgebra::Point3;
//!
//! let mut mesh = HalfEdgeMesh::new();
//! for (i, p) in [(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)].iter().enumerate() {
//!     mesh.create_vertex(VertexId::new(i)).unwrap().point = Point3::new(p.0, p.1, 0.0);
//! }
//! mesh.create_face(FaceId::new(0), [VertexId::new(0), VertexId::new(1), VertexId::new(2)])
//!     .unwrap();
//!
//! assert_eq!(euler_characteristic(&mesh), 1);
//! let total = gauss_curvature(&mut mesh);
//! assert!((total - 2.0 * std::f64::consts::PI).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::error::Result;
use crate::mesh::{trace_boundary, HalfEdgeMesh, VertexId};

/// Angle between the triangle sides of length `a` and `b`, opposite the side
/// of length `c`.
///
/// The cosine is clamped to `[-1, 1]` so that degenerate (collinear) side
/// lengths yield 0 or π instead of NaN.
pub fn cosine_law(a: f64, b: f64, c: f64) -> f64 {
    let cos = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
    cos.acos()
}

/// Recompute and store the length of every edge from its endpoint positions.
pub fn compute_edge_lengths(mesh: &mut HalfEdgeMesh) {
    let keys: Vec<_> = mesh.edge_keys().collect();
    for key in keys {
        let length = mesh.edge_length(key);
        mesh.edge_mut(key).length = length;
    }
}

/// Compute the corner angle of every half-edge from the stored edge lengths.
///
/// The angle of a half-edge is the interior angle of its face at the
/// half-edge's target vertex. Call [`compute_edge_lengths`] first if vertex
/// positions have changed.
pub fn compute_corner_angles(mesh: &mut HalfEdgeMesh) {
    let faces: Vec<_> = mesh.face_ids().collect();
    for f in faces {
        let h0 = mesh.face(f).halfedge;
        let h1 = mesh.next(h0);
        let h2 = mesh.next(h1);
        let l0 = mesh.edge(mesh.halfedge(h0).edge).length;
        let l1 = mesh.edge(mesh.halfedge(h1).edge).length;
        let l2 = mesh.edge(mesh.halfedge(h2).edge).length;

        mesh.halfedge_mut(h0).angle = cosine_law(l0, l1, l2);
        mesh.halfedge_mut(h1).angle = cosine_law(l1, l2, l0);
        mesh.halfedge_mut(h2).angle = cosine_law(l2, l0, l1);
    }
}

/// Compute the Gauss curvature (angle defect) of every vertex.
///
/// Refreshes edge lengths and corner angles, stores the defect in each
/// vertex's `curvature` field, and returns the total curvature of the mesh.
/// The defects are computed in parallel across vertices.
pub fn gauss_curvature(mesh: &mut HalfEdgeMesh) -> f64 {
    compute_edge_lengths(mesh);
    compute_corner_angles(mesh);

    let ids: Vec<VertexId> = mesh.vertex_ids().collect();
    let defects: Vec<(VertexId, f64)> = {
        let mesh = &*mesh;
        ids.par_iter()
            .map(|&v| {
                let base = if mesh.is_boundary_vertex(v) { PI } else { 2.0 * PI };
                let angle_sum: f64 = mesh
                    .vertex_in_halfedges(v)
                    .map(|he| mesh.halfedge(he).angle)
                    .sum();
                (v, base - angle_sum)
            })
            .collect()
    };

    let mut total = 0.0;
    for (v, defect) in defects {
        mesh.vertex_mut(v).curvature = defect;
        total += defect;
    }
    total
}

/// Recompute and store the normal and area of every face.
pub fn compute_face_normals(mesh: &mut HalfEdgeMesh) {
    let faces: Vec<_> = mesh.face_ids().collect();
    for f in faces {
        let normal = mesh.face_normal(f);
        let area = mesh.face_area(f);
        let face = mesh.face_mut(f);
        face.normal = normal;
        face.area = area;
    }
}

/// Recompute and store area-weighted vertex normals.
///
/// Face normals and areas are refreshed first.
pub fn compute_vertex_normals(mesh: &mut HalfEdgeMesh) {
    compute_face_normals(mesh);

    let ids: Vec<VertexId> = mesh.vertex_ids().collect();
    let normals: Vec<(VertexId, Vector3<f64>)> = {
        let mesh = &*mesh;
        ids.par_iter()
            .map(|&v| {
                let mut sum = Vector3::zeros();
                for f in mesh.vertex_faces(v) {
                    let face = mesh.face(f);
                    sum += face.area * face.normal;
                }
                let norm = sum.norm();
                if norm > 0.0 {
                    sum /= norm;
                }
                (v, sum)
            })
            .collect()
    };

    for (v, normal) in normals {
        mesh.vertex_mut(v).normal = normal;
    }
}

/// The Euler characteristic V - E + F.
pub fn euler_characteristic(mesh: &HalfEdgeMesh) -> i64 {
    mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64
}

/// The genus of the mesh, from the Euler characteristic and the number of
/// boundary loops: g = (2 - b - χ) / 2.
///
/// Fails if the boundary cannot be traced.
pub fn genus(mesh: &HalfEdgeMesh) -> Result<i64> {
    let boundaries = trace_boundary(mesh)?.len() as i64;
    Ok((2 - boundaries - euler_characteristic(mesh)) / 2)
}
