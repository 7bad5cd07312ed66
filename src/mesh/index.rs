//! Id types for mesh elements.
//!
//! Vertices and faces carry externally assigned ids: the mesh never invents
//! them, and deleting an element does not recycle its id. Half-edge ids index
//! an internal arena and may be reused after a face deletion. All three are
//! distinct newtypes so they cannot be mixed up.
//!
//! Edges have no id of their own; an edge is named by the unordered pair of
//! its endpoint vertices, captured by [`EdgeKey`].

use std::fmt::{self, Debug};

macro_rules! impl_id_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new id from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index < u32::MAX as usize, "id {} too large", index);
                Self(index as u32)
            }

            /// Create an invalid/null id.
            #[inline]
            pub fn invalid() -> Self {
                Self(u32::MAX)
            }

            /// Get the raw id value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Check if this is a valid (non-null) id.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }
    };
}

/// A type-safe vertex id.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe half-edge id (an index into the half-edge arena).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId(u32);

/// A type-safe face id.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

impl_id_type!(VertexId, "V");
impl_id_type!(HalfEdgeId, "HE");
impl_id_type!(FaceId, "F");

/// The unordered pair of vertices naming an edge.
///
/// The pair is normalized on construction, so `EdgeKey::new(a, b)` and
/// `EdgeKey::new(b, a)` compare equal and map to the same edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
    /// Create the key for the edge between `a` and `b`.
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller endpoint.
    #[inline]
    pub fn vertex1(self) -> VertexId {
        self.0
    }

    /// The larger endpoint.
    #[inline]
    pub fn vertex2(self) -> VertexId {
        self.1
    }

    /// Check whether `v` is one of the endpoints.
    #[inline]
    pub fn contains(self, v: VertexId) -> bool {
        self.0 == v || self.1 == v
    }

    /// The endpoint that is not `v`, if `v` is an endpoint.
    #[inline]
    pub fn other(self, v: VertexId) -> Option<VertexId> {
        if self.0 == v {
            Some(self.1)
        } else if self.1 == v {
            Some(self.0)
        } else {
            None
        }
    }
}

impl Debug for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E({}, {})", self.0.index(), self.1.index())
    }
}
