//! # Trigon
//!
//! A half-edge triangle mesh library with incremental Delaunay triangulation.
//!
//! Trigon provides a half-edge mesh data structure oriented towards planar
//! triangulations and intrinsic geometry: faces are triangles, edges are
//! named by their unordered endpoint pair, and boundary edges carry a single
//! half-edge rather than a ghost twin.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe ids
//! - **Incremental Delaunay triangulation**: locate, split, and legalize in
//!   the parameter plane
//! - **Boundary tracing**: decompose the mesh boundary into closed loops
//! - **Discrete curvature**: Gauss curvature by angle defect, Euler
//!   characteristic, and genus
//! - **Persistence**: the line-oriented `.m` text format for meshes and a
//!   pair format for boundary loops
//!
//! ## Quick Start
//!
//! ```
//! use trigon::prelude::*;
//! use nalgebra::Point2;
//!
//! // Seed a triangulation: a bounding triangle fanned around an interior point.
//! let mut mesh = HalfEdgeMesh::new();
//! let corners = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(50.0, 100.0),
//!     Point2::new(100.0, 0.0),
//! ];
//! let mut builder = DelaunayBuilder::seed(&mut mesh, corners, Point2::new(50.0, 50.0)).unwrap();
//!
//! // Insert interior points; the mesh stays Delaunay throughout.
//! builder.insert(&mut mesh, Point2::new(50.3, 0.7)).unwrap();
//! assert_eq!(mesh.num_vertices(), 5);
//!
//! // Query mesh properties.
//! println!("Vertices: {}", mesh.num_vertices());
//! println!("Faces: {}", mesh.num_faces());
//!
//! // The boundary is still the corner triangle.
//! let loops = trace_boundary(&mesh).unwrap();
//! assert_eq!(loops.len(), 1);
//! assert_eq!(loops[0].len(), 3);
//! ```
//!
//! ## Mesh Traversal
//!
//! The half-edge structure enables efficient traversal of mesh elements:
//!
//! ```
//! use trigon::prelude::*;
//! use nalgebra::Point3;
//!
//! # let mut mesh = HalfEdgeMesh::new();
//! # for (i, (x, y)) in [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)].iter().enumerate() {
//! #     mesh.create_vertex(VertexId::new(i)).unwrap().point = Point3::new(*x, *y, 0.0);
//! # }
//! # mesh.create_face(FaceId::new(0), [VertexId::new(0), VertexId::new(1), VertexId::new(2)])
//! #     .unwrap();
//! // Iterate over neighbors of a vertex
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! // Iterate over faces around a vertex
//! for face in mesh.vertex_faces(v) {
//!     println!("Adjacent face: {:?}", face);
//! }
//!
//! // Get vertices of a face
//! let f = FaceId::new(0);
//! let [v0, v1, v2] = mesh.face_triangle(f);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use trigon::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::delaunay::DelaunayBuilder;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        trace_boundary, Edge, EdgeKey, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, Loop,
        Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::algo::curvature::gauss_curvature;
    use super::prelude::*;
    use nalgebra::Point2;
    use std::f64::consts::PI;

    #[test]
    fn test_triangulate_and_analyze() {
        let mut mesh = HalfEdgeMesh::new();
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(50.0, 100.0),
            Point2::new(100.0, 0.0),
        ];
        let mut builder =
            DelaunayBuilder::seed(&mut mesh, corners, Point2::new(50.0, 50.0)).unwrap();
        for (x, y) in [(50.3, 0.7), (30.0, 20.0), (70.0, 20.0)] {
            builder.insert(&mut mesh, Point2::new(x, y)).unwrap();
        }

        assert_eq!(mesh.num_vertices(), 7);
        assert!(mesh.is_valid());

        // Disk topology throughout: V - E + F = 1 and a single boundary loop.
        let euler =
            mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        assert_eq!(euler, 1);
        let loops = trace_boundary(&mesh).unwrap();
        assert_eq!(loops.len(), 1);

        // Gauss-Bonnet for a flat disk.
        let total = gauss_curvature(&mut mesh);
        assert!((total - 2.0 * PI).abs() < 1e-9);
    }
}
