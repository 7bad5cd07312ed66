//! Mesh construction and analysis algorithms.
//!
//! - **Delaunay**: incremental Delaunay triangulation of points in the plane
//! - **Curvature**: discrete Gauss curvature, normals, and global invariants

pub mod curvature;
pub mod delaunay;
