//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation, the traversal
//! iterators, and the boundary-loop tracer.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], a half-edge (doubly-connected edge
//! list) representation of a triangle mesh with caller-assigned vertex and
//! face ids. Edges are named by their unordered endpoint pair ([`EdgeKey`])
//! and own up to two half-edge slots; a single-occupant edge is on the
//! boundary.
//!
//! # Construction
//!
//! Meshes are built incrementally:
//!
//! ```
//! use trigon::mesh::{FaceId, HalfEdgeMesh, VertexId};
//! use nalgebra::Point3;
//!
//! let mut mesh = HalfEdgeMesh::new();
//! for (i, (x, y)) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)].iter().enumerate() {
//!     let v = mesh.create_vertex(VertexId::new(i)).unwrap();
//!     v.point = Point3::new(*x, *y, 0.0);
//! }
//! mesh.create_face(FaceId::new(0), [VertexId::new(0), VertexId::new(1), VertexId::new(2)])
//!     .unwrap();
//! assert_eq!(mesh.num_edges(), 3);
//! ```

mod boundary;
mod halfedge;
mod index;
mod iterators;

pub use boundary::{trace_boundary, Loop};
pub use halfedge::{Edge, Face, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{EdgeKey, FaceId, HalfEdgeId, VertexId};
pub use iterators::{
    FaceEdgeIter, FaceHalfedgeIter, FaceVertexIter, VertexEdgeIter, VertexFaceIter,
    VertexInHalfedgeIter, VertexOutHalfedgeIter, VertexVertexIter,
};
