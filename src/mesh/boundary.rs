//! Boundary loop tracing.
//!
//! Every boundary edge carries exactly one half-edge (in slot 0), and for
//! counter-clockwise faces those half-edges chain into closed loops: the
//! boundary half-edge leaving a boundary vertex is its most clockwise
//! outgoing half-edge. [`trace_boundary`] partitions the boundary half-edges
//! of a mesh into such loops.

use std::collections::BTreeSet;

use super::halfedge::HalfEdgeMesh;
use super::index::HalfEdgeId;
use crate::error::{MeshError, Result};

/// A closed boundary loop: consecutive boundary half-edges plus total length.
#[derive(Debug, Clone)]
pub struct Loop {
    halfedges: Vec<HalfEdgeId>,
    length: f64,
}

impl Loop {
    pub(crate) fn from_halfedges(mesh: &HalfEdgeMesh, halfedges: Vec<HalfEdgeId>) -> Self {
        let length = halfedges
            .iter()
            .map(|&he| mesh.edge_length(mesh.halfedge(he).edge))
            .sum();
        Self { halfedges, length }
    }

    /// The consecutive half-edges of this loop.
    pub fn halfedges(&self) -> &[HalfEdgeId] {
        &self.halfedges
    }

    /// Number of half-edges in this loop.
    pub fn len(&self) -> usize {
        self.halfedges.len()
    }

    /// Whether the loop is empty.
    pub fn is_empty(&self) -> bool {
        self.halfedges.is_empty()
    }

    /// Total geometric length of the loop.
    pub fn length(&self) -> f64 {
        self.length
    }
}

/// Trace all boundary loops of a mesh.
///
/// Collects the slot-0 half-edge of every boundary edge and repeatedly walks
/// from an arbitrary remaining one to the most clockwise outgoing half-edge
/// of its target until the walk closes. Each boundary half-edge lands in
/// exactly one loop. A walk that leaves the remaining set (a boundary that
/// does not close up, e.g. after non-manifold deletions) fails with
/// [`MeshError::MalformedBoundary`].
///
/// The result is sorted by descending length; ties keep discovery order.
pub fn trace_boundary(mesh: &HalfEdgeMesh) -> Result<Vec<Loop>> {
    let mut remaining: BTreeSet<HalfEdgeId> = mesh
        .edge_keys()
        .filter(|&key| mesh.is_boundary_edge(key))
        .filter_map(|key| mesh.edge_halfedge(key, 0))
        .collect();

    let mut loops = Vec::new();
    while let Some(&start) = remaining.iter().next() {
        let mut halfedges = Vec::new();
        let mut he = start;
        loop {
            let v = mesh.target(he);
            he = mesh.vertex_most_clw_out_halfedge(v);
            if !remaining.remove(&he) {
                return Err(MeshError::MalformedBoundary);
            }
            halfedges.push(he);
            if he == start {
                break;
            }
        }
        loops.push(Loop::from_halfedges(mesh, halfedges));
    }

    loops.sort_by(|a, b| b.length.total_cmp(&a.length));
    Ok(loops)
}
