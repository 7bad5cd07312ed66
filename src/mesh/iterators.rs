//! Traversal iterators over mesh neighborhoods.
//!
//! Vertex-centered iterators walk the outgoing fan from the most clockwise
//! half-edge towards the most counter-clockwise one, so around a boundary
//! vertex they cover the open fan exactly once; around an interior vertex
//! they cycle once from the anchor. [`VertexVertexIter`] and
//! [`VertexEdgeIter`] additionally yield the element across the
//! counter-clockwise boundary, which no outgoing half-edge reaches, so a
//! boundary vertex with `m` faces sees `m + 1` neighbors.

use super::halfedge::HalfEdgeMesh;
use super::index::{EdgeKey, FaceId, HalfEdgeId, VertexId};

/// Iterator over outgoing half-edges of a vertex, clockwise to counter-clockwise.
pub struct VertexOutHalfedgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> VertexOutHalfedgeIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, v: VertexId) -> Self {
        let start = mesh.vertex_most_clw_out_halfedge(v);
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a> Iterator for VertexOutHalfedgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.current;
        match self.mesh.vertex_next_ccw_out_halfedge(self.current) {
            Some(next) if next != self.start => self.current = next,
            _ => self.done = true,
        }
        Some(result)
    }
}

/// Iterator over incoming half-edges of a vertex, clockwise to counter-clockwise.
///
/// Each incoming half-edge is the face-mate (`prev`) of the corresponding
/// outgoing one.
pub struct VertexInHalfedgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    out: VertexOutHalfedgeIter<'a>,
}

impl<'a> Iterator for VertexInHalfedgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.out.next().map(|he| self.mesh.prev(he))
    }
}

/// Iterator over the neighbor vertices of a vertex.
pub struct VertexVertexIter<'a> {
    mesh: &'a HalfEdgeMesh,
    out: VertexOutHalfedgeIter<'a>,
    tail: Option<VertexId>,
}

impl<'a> VertexVertexIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, v: VertexId) -> Self {
        let tail = boundary_tail(mesh, v).map(|he| mesh.source(he));
        Self {
            mesh,
            out: VertexOutHalfedgeIter::new(mesh, v),
            tail,
        }
    }
}

impl<'a> Iterator for VertexVertexIter<'a> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.out.next() {
            Some(he) => Some(self.mesh.target(he)),
            None => self.tail.take(),
        }
    }
}

/// Iterator over the edges incident to a vertex.
pub struct VertexEdgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    out: VertexOutHalfedgeIter<'a>,
    tail: Option<EdgeKey>,
}

impl<'a> VertexEdgeIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, v: VertexId) -> Self {
        let tail = boundary_tail(mesh, v).map(|he| mesh.halfedge(he).edge);
        Self {
            mesh,
            out: VertexOutHalfedgeIter::new(mesh, v),
            tail,
        }
    }
}

impl<'a> Iterator for VertexEdgeIter<'a> {
    type Item = EdgeKey;

    fn next(&mut self) -> Option<Self::Item> {
        match self.out.next() {
            Some(he) => Some(self.mesh.halfedge(he).edge),
            None => self.tail.take(),
        }
    }
}

/// The most counter-clockwise incoming half-edge of a boundary vertex.
///
/// Its edge is not covered by any outgoing half-edge; interior vertices have
/// no such element.
fn boundary_tail(mesh: &HalfEdgeMesh, v: VertexId) -> Option<HalfEdgeId> {
    if !mesh.vertex(v).halfedge.is_valid() || !mesh.is_boundary_vertex(v) {
        return None;
    }
    Some(mesh.vertex_most_ccw_in_halfedge(v))
}

/// Iterator over the faces incident to a vertex.
pub struct VertexFaceIter<'a> {
    mesh: &'a HalfEdgeMesh,
    out: VertexOutHalfedgeIter<'a>,
}

impl<'a> Iterator for VertexFaceIter<'a> {
    type Item = FaceId;

    fn next(&mut self) -> Option<Self::Item> {
        self.out.next().map(|he| self.mesh.face_of(he))
    }
}

/// Iterator over the three half-edges of a face, in winding order.
pub struct FaceHalfedgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> FaceHalfedgeIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, f: FaceId) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a> Iterator for FaceHalfedgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.current;
        self.current = self.mesh.next(self.current);
        if self.current == self.start {
            self.done = true;
        }
        Some(result)
    }
}

/// Iterator over the three vertices of a face, in winding order.
pub struct FaceVertexIter<'a> {
    mesh: &'a HalfEdgeMesh,
    inner: FaceHalfedgeIter<'a>,
}

impl<'a> Iterator for FaceVertexIter<'a> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|he| self.mesh.source(he))
    }
}

/// Iterator over the three edges of a face, in winding order.
pub struct FaceEdgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    inner: FaceHalfedgeIter<'a>,
}

impl<'a> Iterator for FaceEdgeIter<'a> {
    type Item = EdgeKey;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|he| self.mesh.halfedge(he).edge)
    }
}

impl HalfEdgeMesh {
    /// Iterate over the outgoing half-edges of a vertex.
    pub fn vertex_out_halfedges(&self, v: VertexId) -> VertexOutHalfedgeIter<'_> {
        VertexOutHalfedgeIter::new(self, v)
    }

    /// Iterate over the incoming half-edges of a vertex.
    pub fn vertex_in_halfedges(&self, v: VertexId) -> VertexInHalfedgeIter<'_> {
        VertexInHalfedgeIter {
            mesh: self,
            out: VertexOutHalfedgeIter::new(self, v),
        }
    }

    /// Iterate over the neighbor vertices of a vertex.
    pub fn vertex_neighbors(&self, v: VertexId) -> VertexVertexIter<'_> {
        VertexVertexIter::new(self, v)
    }

    /// Iterate over the edges incident to a vertex.
    pub fn vertex_edges(&self, v: VertexId) -> VertexEdgeIter<'_> {
        VertexEdgeIter::new(self, v)
    }

    /// Iterate over the faces incident to a vertex.
    pub fn vertex_faces(&self, v: VertexId) -> VertexFaceIter<'_> {
        VertexFaceIter {
            mesh: self,
            out: VertexOutHalfedgeIter::new(self, v),
        }
    }

    /// Iterate over the half-edges of a face, in winding order.
    pub fn face_halfedges(&self, f: FaceId) -> FaceHalfedgeIter<'_> {
        FaceHalfedgeIter::new(self, f)
    }

    /// Iterate over the vertices of a face, in winding order.
    pub fn face_vertices(&self, f: FaceId) -> FaceVertexIter<'_> {
        FaceVertexIter {
            mesh: self,
            inner: FaceHalfedgeIter::new(self, f),
        }
    }

    /// Iterate over the edges of a face, in winding order.
    pub fn face_edges(&self, f: FaceId) -> FaceEdgeIter<'_> {
        FaceEdgeIter {
            mesh: self,
            inner: FaceHalfedgeIter::new(self, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn f(i: usize) -> FaceId {
        FaceId::new(i)
    }

    /// Fan of three faces around vertex 0, neighbors 1..=4 counter-clockwise.
    fn boundary_fan() -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();
        for i in 0..5 {
            mesh.create_vertex(v(i)).unwrap();
        }
        mesh.create_face(f(0), [v(0), v(1), v(2)]).unwrap();
        mesh.create_face(f(1), [v(0), v(2), v(3)]).unwrap();
        mesh.create_face(f(2), [v(0), v(3), v(4)]).unwrap();
        mesh
    }

    /// Full disk around vertex 0 with ring 1..=4.
    fn interior_disk() -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();
        for i in 0..5 {
            mesh.create_vertex(v(i)).unwrap();
        }
        mesh.create_face(f(0), [v(0), v(1), v(2)]).unwrap();
        mesh.create_face(f(1), [v(0), v(2), v(3)]).unwrap();
        mesh.create_face(f(2), [v(0), v(3), v(4)]).unwrap();
        mesh.create_face(f(3), [v(0), v(4), v(1)]).unwrap();
        mesh
    }

    #[test]
    fn test_out_halfedges_boundary_fan() {
        let mesh = boundary_fan();
        let targets: Vec<_> = mesh
            .vertex_out_halfedges(v(0))
            .map(|he| mesh.target(he))
            .collect();
        // Clockwise extreme first, then counter-clockwise.
        assert_eq!(targets, vec![v(1), v(2), v(3)]);
    }

    #[test]
    fn test_in_halfedges_mirror_out() {
        let mesh = boundary_fan();
        let out: Vec<_> = mesh.vertex_out_halfedges(v(0)).collect();
        let inn: Vec<_> = mesh.vertex_in_halfedges(v(0)).collect();
        assert_eq!(out.len(), inn.len());
        for (o, i) in out.iter().zip(&inn) {
            assert_eq!(mesh.prev(*o), *i);
            assert_eq!(mesh.target(*i), v(0));
        }
    }

    #[test]
    fn test_neighbors_boundary_has_tail() {
        let mesh = boundary_fan();
        // Three faces but four neighbors: the tail vertex 4 sits across the
        // counter-clockwise boundary edge.
        let neighbors: Vec<_> = mesh.vertex_neighbors(v(0)).collect();
        assert_eq!(neighbors, vec![v(1), v(2), v(3), v(4)]);

        let edges: Vec<_> = mesh.vertex_edges(v(0)).collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], EdgeKey::new(v(0), v(4)));
    }

    #[test]
    fn test_neighbors_interior_no_tail() {
        let mesh = interior_disk();
        let neighbors: Vec<_> = mesh.vertex_neighbors(v(0)).collect();
        assert_eq!(neighbors.len(), 4);
        let mut sorted = neighbors.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_vertex_faces() {
        let mesh = boundary_fan();
        let faces: Vec<_> = mesh.vertex_faces(v(0)).collect();
        assert_eq!(faces, vec![f(0), f(1), f(2)]);

        let disk = interior_disk();
        assert_eq!(disk.vertex_faces(v(0)).count(), 4);
        // Ring vertices touch two faces each.
        assert_eq!(disk.vertex_faces(v(1)).count(), 2);
    }

    #[test]
    fn test_face_iterators() {
        let mesh = boundary_fan();
        let verts: Vec<_> = mesh.face_vertices(f(1)).collect();
        assert_eq!(verts, vec![v(0), v(2), v(3)]);

        let hes: Vec<_> = mesh.face_halfedges(f(1)).collect();
        assert_eq!(hes.len(), 3);
        for (i, he) in hes.iter().enumerate() {
            assert_eq!(mesh.source(*he), verts[i]);
            assert_eq!(mesh.target(*he), verts[(i + 1) % 3]);
        }

        let edges: Vec<_> = mesh.face_edges(f(1)).collect();
        assert_eq!(edges[0], EdgeKey::new(v(0), v(2)));
        assert_eq!(edges[1], EdgeKey::new(v(2), v(3)));
        assert_eq!(edges[2], EdgeKey::new(v(3), v(0)));
    }

    #[test]
    fn test_isolated_vertex_iterates_empty() {
        let mut mesh = HalfEdgeMesh::new();
        mesh.create_vertex(v(0)).unwrap();
        assert_eq!(mesh.vertex_out_halfedges(v(0)).count(), 0);
        assert_eq!(mesh.vertex_neighbors(v(0)).count(), 0);
        assert_eq!(mesh.vertex_faces(v(0)).count(), 0);
    }
}
