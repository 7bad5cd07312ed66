//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) representation
//! for triangle meshes. This structure enables O(1) adjacency queries and is
//! the foundation for the traversal, boundary, and triangulation algorithms.
//!
//! # Structure
//!
//! - Each face is a counter-clockwise cycle of three **half-edges**
//! - Each edge owns up to two half-edge slots; the two occupants, when both
//!   present, traverse the edge in opposite directions
//! - An edge with exactly one occupied slot is a **boundary** edge, and the
//!   occupant always sits in slot 0
//! - Each vertex stores one outgoing half-edge
//!
//! There are no half-edges outside faces: a boundary edge simply has an empty
//! second slot, and `opposite` returns `None` across it.
//!
//! # Ids
//!
//! Vertex and face ids are assigned by the caller (the Delaunay builder or a
//! mesh file) and survive for the lifetime of the mesh. Half-edge ids index an
//! internal arena and are recycled after `delete_face`.

use std::collections::BTreeMap;

use nalgebra::{Point2, Point3, Vector3};

use super::index::{EdgeKey, FaceId, HalfEdgeId, VertexId};
use crate::error::{MeshError, Result};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub point: Point3<f64>,

    /// The 2D parameter-plane position (used by the Delaunay builder).
    pub uv: Point2<f64>,

    /// The vertex normal (filled in by the curvature pass).
    pub normal: Vector3<f64>,

    /// Discrete Gauss curvature (angle defect, filled in by the curvature pass).
    pub curvature: f64,

    /// One outgoing half-edge from this vertex.
    pub halfedge: HalfEdgeId,
}

impl Vertex {
    /// Create a new vertex with no geometry and no incident face.
    pub fn new() -> Self {
        Self {
            point: Point3::origin(),
            uv: Point2::origin(),
            normal: Vector3::zeros(),
            curvature: 0.0,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new()
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// The vertex this half-edge points to.
    pub target: VertexId,

    /// The edge this half-edge occupies a slot of.
    pub edge: EdgeKey,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId,

    /// The face this half-edge belongs to.
    pub face: FaceId,

    /// Corner angle at the target vertex (filled in by the curvature pass).
    pub angle: f64,
}

impl HalfEdge {
    /// Create a new uninitialized half-edge.
    pub fn new() -> Self {
        Self {
            target: VertexId::invalid(),
            edge: EdgeKey::new(VertexId::invalid(), VertexId::invalid()),
            next: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            angle: 0.0,
        }
    }
}

impl Default for HalfEdge {
    fn default() -> Self {
        Self::new()
    }
}

/// An edge in the mesh: two half-edge slots plus a length trait.
///
/// Slot 1 empty means the edge is on the boundary. Both slots empty means the
/// edge is detached (its faces were deleted); detached edges stay in the edge
/// map so a later `create_face` can refill them, but they are excluded from
/// counts and iteration.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// The occupying half-edges. Occupants are compacted towards slot 0.
    pub halfedges: [HalfEdgeId; 2],

    /// Edge length (filled in on face creation and by the curvature pass).
    pub length: f64,
}

impl Edge {
    /// Create a new edge with both slots empty.
    pub fn new() -> Self {
        Self {
            halfedges: [HalfEdgeId::invalid(); 2],
            length: 0.0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.iter().filter(|h| h.is_valid()).count()
    }

    /// Whether any slot is occupied.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.halfedges[0].is_valid()
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// One half-edge on the cycle of this face.
    pub halfedge: HalfEdgeId,

    /// Face area (filled in by the curvature pass).
    pub area: f64,

    /// Face normal (filled in by the curvature pass).
    pub normal: Vector3<f64>,
}

impl Face {
    /// Create a new face anchored at the given half-edge.
    pub fn new(halfedge: HalfEdgeId) -> Self {
        Self {
            halfedge,
            area: 0.0,
            normal: Vector3::zeros(),
        }
    }
}

/// A half-edge mesh for triangle meshes with caller-assigned ids.
///
/// Vertices, edges, and faces live in ordered maps so iteration order is
/// deterministic; half-edges live in an arena with a free list.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    pub(crate) vertices: BTreeMap<VertexId, Vertex>,
    pub(crate) edges: BTreeMap<EdgeKey, Edge>,
    pub(crate) faces: BTreeMap<FaceId, Face>,
    pub(crate) halfedges: Vec<HalfEdge>,
    free: Vec<HalfEdgeId>,
}

impl HalfEdgeMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of live edges (detached edges are not counted).
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.values().filter(|e| e.is_live()).count()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of live half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.edges.values().map(|e| e.num_halfedges()).sum()
    }

    /// Check whether a vertex with this id exists.
    #[inline]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Check whether a face with this id exists.
    #[inline]
    pub fn contains_face(&self, id: FaceId) -> bool {
        self.faces.contains_key(&id)
    }

    /// Get a vertex by id.
    ///
    /// # Panics
    /// Panics if no vertex with this id exists.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[&id]
    }

    /// Get a mutable vertex by id.
    ///
    /// # Panics
    /// Panics if no vertex with this id exists.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        match self.vertices.get_mut(&id) {
            Some(v) => v,
            None => panic!("vertex {:?} does not exist", id),
        }
    }

    /// Get a half-edge by id.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[id.index()]
    }

    /// Get a mutable half-edge by id.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        &mut self.halfedges[id.index()]
    }

    /// Get an edge by key.
    ///
    /// # Panics
    /// Panics if no edge with this key exists.
    #[inline]
    pub fn edge(&self, key: EdgeKey) -> &Edge {
        &self.edges[&key]
    }

    /// Get a mutable edge by key.
    ///
    /// # Panics
    /// Panics if no edge with this key exists.
    #[inline]
    pub fn edge_mut(&mut self, key: EdgeKey) -> &mut Edge {
        match self.edges.get_mut(&key) {
            Some(e) => e,
            None => panic!("edge {:?} does not exist", key),
        }
    }

    /// Get a face by id.
    ///
    /// # Panics
    /// Panics if no face with this id exists.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[&id]
    }

    /// Get a mutable face by id.
    ///
    /// # Panics
    /// Panics if no face with this id exists.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        match self.faces.get_mut(&id) {
            Some(f) => f,
            None => panic!("face {:?} does not exist", id),
        }
    }

    // ==================== Topology Queries ====================

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    ///
    /// Faces are strict 3-cycles, so `prev` is `next` applied twice.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.next(self.next(he))
    }

    /// Get the target vertex of a half-edge.
    #[inline]
    pub fn target(&self, he: HalfEdgeId) -> VertexId {
        self.halfedge(he).target
    }

    /// Get the source vertex of a half-edge.
    #[inline]
    pub fn source(&self, he: HalfEdgeId) -> VertexId {
        self.target(self.prev(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId) -> FaceId {
        self.halfedge(he).face
    }

    /// Get the opposite half-edge, the other occupant of the same edge.
    ///
    /// Returns `None` across a boundary edge.
    pub fn opposite(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        let key = self.halfedge(he).edge;
        let edge = self.edges.get(&key)?;
        let [a, b] = edge.halfedges;
        let other = if a == he { b } else { a };
        if other.is_valid() {
            Some(other)
        } else {
            None
        }
    }

    /// Look up the edge between two vertices, if a live one exists.
    pub fn vertex_edge(&self, v0: VertexId, v1: VertexId) -> Option<EdgeKey> {
        let key = EdgeKey::new(v0, v1);
        let edge = self.edges.get(&key)?;
        if edge.is_live() {
            Some(key)
        } else {
            None
        }
    }

    /// Look up the half-edge from `v0` to `v1`, if one exists.
    pub fn vertex_halfedge(&self, v0: VertexId, v1: VertexId) -> Option<HalfEdgeId> {
        let edge = self.edges.get(&EdgeKey::new(v0, v1))?;
        edge.halfedges
            .iter()
            .copied()
            .find(|&h| h.is_valid() && self.target(h) == v1)
    }

    /// Get the half-edge in the given slot of an edge, if occupied.
    pub fn edge_halfedge(&self, key: EdgeKey, slot: usize) -> Option<HalfEdgeId> {
        let edge = self.edges.get(&key)?;
        let he = *edge.halfedges.get(slot)?;
        if he.is_valid() {
            Some(he)
        } else {
            None
        }
    }

    /// Check if an edge is on the boundary (exactly one occupied slot).
    pub fn is_boundary_edge(&self, key: EdgeKey) -> bool {
        match self.edges.get(&key) {
            Some(e) => e.halfedges[0].is_valid() && !e.halfedges[1].is_valid(),
            None => false,
        }
    }

    /// Check if a half-edge is on the boundary (no opposite).
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId) -> bool {
        self.opposite(he).is_none()
    }

    /// Check if a vertex is on the boundary.
    ///
    /// Derived by rotating clockwise around the vertex: hitting a missing
    /// opposite means the fan is open. An isolated vertex counts as boundary.
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return true;
        }
        let mut he = start;
        loop {
            match self.vertex_next_clw_out_halfedge(he) {
                Some(next) if next != start => he = next,
                Some(_) => return false,
                None => return true,
            }
        }
    }

    // ==================== Rotation ====================

    /// Rotate an outgoing half-edge one step clockwise about its source.
    ///
    /// Returns `None` when the half-edge's own edge is on the boundary.
    #[inline]
    pub fn vertex_next_clw_out_halfedge(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.opposite(he).map(|o| self.next(o))
    }

    /// Rotate an outgoing half-edge one step counter-clockwise about its source.
    ///
    /// Returns `None` when the previous edge in the face is on the boundary.
    #[inline]
    pub fn vertex_next_ccw_out_halfedge(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.opposite(self.prev(he))
    }

    /// Rotate an incoming half-edge one step clockwise about its target.
    #[inline]
    pub fn vertex_next_clw_in_halfedge(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.vertex_next_clw_out_halfedge(self.next(he))
            .map(|o| self.prev(o))
    }

    /// Rotate an incoming half-edge one step counter-clockwise about its target.
    #[inline]
    pub fn vertex_next_ccw_in_halfedge(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.vertex_next_ccw_out_halfedge(self.next(he))
            .map(|o| self.prev(o))
    }

    /// Get the most clockwise outgoing half-edge of a vertex.
    ///
    /// For a boundary vertex this is the unique outgoing half-edge whose own
    /// edge is on the boundary. For an interior vertex the fan has no extreme,
    /// and the vertex's anchor half-edge is returned. Invalid for an isolated
    /// vertex.
    pub fn vertex_most_clw_out_halfedge(&self, v: VertexId) -> HalfEdgeId {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return start;
        }
        let mut he = start;
        loop {
            match self.vertex_next_clw_out_halfedge(he) {
                Some(next) if next != start => he = next,
                Some(_) => return start,
                None => return he,
            }
        }
    }

    /// Get the most counter-clockwise outgoing half-edge of a vertex.
    ///
    /// For a boundary vertex this is the outgoing half-edge whose face closes
    /// the fan counter-clockwise. See [`Self::vertex_most_clw_out_halfedge`].
    pub fn vertex_most_ccw_out_halfedge(&self, v: VertexId) -> HalfEdgeId {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return start;
        }
        let mut he = start;
        loop {
            match self.vertex_next_ccw_out_halfedge(he) {
                Some(next) if next != start => he = next,
                Some(_) => return start,
                None => return he,
            }
        }
    }

    /// Get the most clockwise incoming half-edge of a vertex.
    pub fn vertex_most_clw_in_halfedge(&self, v: VertexId) -> HalfEdgeId {
        let out = self.vertex_most_clw_out_halfedge(v);
        if out.is_valid() {
            self.prev(out)
        } else {
            out
        }
    }

    /// Get the most counter-clockwise incoming half-edge of a vertex.
    pub fn vertex_most_ccw_in_halfedge(&self, v: VertexId) -> HalfEdgeId {
        let out = self.vertex_most_ccw_out_halfedge(v);
        if out.is_valid() {
            self.prev(out)
        } else {
            out
        }
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Iterate over all vertices with their ids.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter().map(|(&id, v)| (id, v))
    }

    /// Iterate over all live edge keys in ascending order.
    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges
            .iter()
            .filter(|(_, e)| e.is_live())
            .map(|(&k, _)| k)
    }

    /// Iterate over all live edges with their keys.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> + '_ {
        self.edges
            .iter()
            .filter(|(_, e)| e.is_live())
            .map(|(&k, e)| (k, e))
    }

    /// Iterate over all face ids in ascending order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys().copied()
    }

    /// Iterate over all faces with their ids.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces.iter().map(|(&id, f)| (id, f))
    }

    /// Iterate over all live half-edge ids, in edge order, slot 0 before slot 1.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.edges
            .values()
            .flat_map(|e| e.halfedges)
            .filter(|h| h.is_valid())
    }

    /// Get the three vertices of a face, in winding order.
    pub fn face_triangle(&self, f: FaceId) -> [VertexId; 3] {
        let h0 = self.face(f).halfedge;
        let h1 = self.next(h0);
        let h2 = self.next(h1);
        [self.source(h0), self.source(h1), self.source(h2)]
    }

    /// Get the 3D positions of the three vertices of a face.
    pub fn face_positions(&self, f: FaceId) -> [Point3<f64>; 3] {
        let [v0, v1, v2] = self.face_triangle(f);
        [
            self.vertex(v0).point,
            self.vertex(v1).point,
            self.vertex(v2).point,
        ]
    }

    /// Get the parameter-plane positions of the three vertices of a face.
    pub fn face_uvs(&self, f: FaceId) -> [Point2<f64>; 3] {
        let [v0, v1, v2] = self.face_triangle(f);
        [self.vertex(v0).uv, self.vertex(v1).uv, self.vertex(v2).uv]
    }

    // ==================== Geometry ====================

    /// Compute the length of an edge from its endpoint positions.
    pub fn edge_length(&self, key: EdgeKey) -> f64 {
        let p0 = self.vertex(key.vertex1()).point;
        let p1 = self.vertex(key.vertex2()).point;
        (p1 - p0).norm()
    }

    /// Compute the normal of a face.
    pub fn face_normal(&self, f: FaceId) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        (p1 - p0).cross(&(p2 - p0)).normalize()
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: FaceId) -> f64 {
        let [p0, p1, p2] = self.face_positions(f);
        0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
    }

    /// Compute the centroid of a face.
    pub fn face_centroid(&self, f: FaceId) -> Point3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
    }

    // ==================== Construction ====================

    /// Create a new vertex with the given id.
    ///
    /// Returns a mutable reference so the caller can fill in the geometry.
    pub fn create_vertex(&mut self, id: VertexId) -> Result<&mut Vertex> {
        if self.vertices.contains_key(&id) {
            return Err(MeshError::DuplicateVertexId { id });
        }
        Ok(self.vertices.entry(id).or_default())
    }

    /// Create a new triangular face with the given id over existing vertices.
    ///
    /// The vertex order fixes the winding: half-edges run `v0→v1`, `v1→v2`,
    /// `v2→v0`. Existing edges are reused, the new half-edge taking the empty
    /// slot. All validation happens before anything is allocated, so a failed
    /// call leaves the mesh untouched.
    pub fn create_face(&mut self, id: FaceId, verts: [VertexId; 3]) -> Result<FaceId> {
        if self.faces.contains_key(&id) {
            return Err(MeshError::DuplicateFaceId { id });
        }
        if verts[0] == verts[1] || verts[1] == verts[2] || verts[2] == verts[0] {
            return Err(MeshError::DegenerateFace { face: id });
        }
        for &v in &verts {
            if !self.vertices.contains_key(&v) {
                return Err(MeshError::UnknownVertex { id: v });
            }
        }
        for i in 0..3 {
            let v0 = verts[i];
            let v1 = verts[(i + 1) % 3];
            if let Some(edge) = self.edges.get(&EdgeKey::new(v0, v1)) {
                if edge.num_halfedges() == 2 {
                    return Err(MeshError::NonManifoldEdge { v0, v1 });
                }
                let same_direction = edge
                    .halfedges
                    .iter()
                    .any(|&h| h.is_valid() && self.target(h) == v1);
                if same_direction {
                    return Err(MeshError::OrientationConflict { v0, v1 });
                }
            }
        }

        let lengths = [
            (self.vertex(verts[1]).point - self.vertex(verts[0]).point).norm(),
            (self.vertex(verts[2]).point - self.vertex(verts[1]).point).norm(),
            (self.vertex(verts[0]).point - self.vertex(verts[2]).point).norm(),
        ];

        let hes = [
            self.alloc_halfedge(),
            self.alloc_halfedge(),
            self.alloc_halfedge(),
        ];
        for i in 0..3 {
            let target = verts[(i + 1) % 3];
            let he = &mut self.halfedges[hes[i].index()];
            he.target = target;
            he.edge = EdgeKey::new(verts[i], target);
            he.next = hes[(i + 1) % 3];
            he.face = id;
            he.angle = 0.0;
        }
        for i in 0..3 {
            let key = EdgeKey::new(verts[i], verts[(i + 1) % 3]);
            let edge = self.edges.entry(key).or_default();
            if edge.halfedges[0].is_valid() {
                edge.halfedges[1] = hes[i];
            } else {
                edge.halfedges[0] = hes[i];
            }
            edge.length = lengths[i];
        }
        for i in 0..3 {
            self.vertex_mut(verts[i]).halfedge = hes[i];
        }
        self.faces.insert(id, Face::new(hes[0]));
        Ok(id)
    }

    /// Delete a face, freeing its half-edges.
    ///
    /// Vertices anchored on a dying half-edge are re-anchored onto a surviving
    /// neighbor. Edges keep their surviving half-edge in slot 0; an edge left
    /// with no occupant stays in the edge map as a detached edge.
    pub fn delete_face(&mut self, id: FaceId) -> Result<()> {
        let face = self
            .faces
            .remove(&id)
            .ok_or(MeshError::UnknownFace { id })?;
        let h0 = face.halfedge;
        let h1 = self.next(h0);
        let h2 = self.next(h1);

        // Re-anchor before detaching: the rotations need intact slots.
        for he in [h0, h1, h2] {
            let src = self.source(he);
            if self.vertex(src).halfedge != he {
                continue;
            }
            let replacement = self
                .vertex_next_clw_out_halfedge(he)
                .or_else(|| self.vertex_next_ccw_out_halfedge(he))
                .unwrap_or_else(HalfEdgeId::invalid);
            self.vertex_mut(src).halfedge = replacement;
        }

        for he in [h0, h1, h2] {
            let key = self.halfedge(he).edge;
            if let Some(edge) = self.edges.get_mut(&key) {
                if edge.halfedges[1] == he {
                    edge.halfedges[1] = HalfEdgeId::invalid();
                } else if edge.halfedges[0] == he {
                    edge.halfedges[0] = edge.halfedges[1];
                    edge.halfedges[1] = HalfEdgeId::invalid();
                }
            }
        }

        for he in [h0, h1, h2] {
            self.halfedges[he.index()] = HalfEdge::new();
            self.free.push(he);
        }
        Ok(())
    }

    fn alloc_halfedge(&mut self) -> HalfEdgeId {
        match self.free.pop() {
            Some(id) => id,
            None => {
                let id = HalfEdgeId::new(self.halfedges.len());
                self.halfedges.push(HalfEdge::new());
                id
            }
        }
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        // Faces are 3-cycles whose half-edges point back at them and sit in
        // a slot of their edge.
        for (&fid, face) in &self.faces {
            if !face.halfedge.is_valid() {
                return false;
            }
            let h0 = face.halfedge;
            let h1 = self.next(h0);
            let h2 = self.next(h1);
            if self.next(h2) != h0 {
                return false;
            }
            for he in [h0, h1, h2] {
                let data = self.halfedge(he);
                if data.face != fid {
                    return false;
                }
                match self.edges.get(&data.edge) {
                    Some(edge) if edge.halfedges.contains(&he) => {}
                    _ => return false,
                }
                let key = EdgeKey::new(self.source(he), self.target(he));
                if key != data.edge {
                    return false;
                }
            }
        }

        // Slot pairs are compacted and antiparallel.
        for edge in self.edges.values() {
            let [a, b] = edge.halfedges;
            if b.is_valid() && !a.is_valid() {
                return false;
            }
            if a.is_valid() && b.is_valid() {
                if self.target(a) != self.source(b) || self.target(b) != self.source(a) {
                    return false;
                }
            }
        }

        // Vertex anchors are outgoing.
        for (&vid, v) in &self.vertices {
            if v.halfedge.is_valid() && self.source(v.halfedge) != vid {
                return false;
            }
        }

        true
    }
}
