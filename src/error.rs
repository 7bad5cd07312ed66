//! Error types for trigon.
//!
//! This module defines all error types used throughout the library.
//!
//! Structural violations (duplicate ids, bad windings, broken boundaries)
//! are hard errors: the operation that detects them leaves the mesh
//! unchanged. Plain lookup misses are not errors; those functions return
//! `Option` instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::mesh::{FaceId, VertexId};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A vertex with this id already exists.
    #[error("vertex {id:?} already exists")]
    DuplicateVertexId {
        /// The duplicated vertex id.
        id: VertexId,
    },

    /// A face with this id already exists.
    #[error("face {id:?} already exists")]
    DuplicateFaceId {
        /// The duplicated face id.
        id: FaceId,
    },

    /// A face references a vertex that is not in the mesh.
    #[error("vertex {id:?} does not exist")]
    UnknownVertex {
        /// The missing vertex id.
        id: VertexId,
    },

    /// An operation references a face that is not in the mesh.
    #[error("face {id:?} does not exist")]
    UnknownFace {
        /// The missing face id.
        id: FaceId,
    },

    /// A face has repeated vertex ids.
    #[error("face {face:?} is degenerate (has repeated vertices)")]
    DegenerateFace {
        /// The offending face id.
        face: FaceId,
    },

    /// A new face traverses an edge in the same direction as an existing face.
    ///
    /// Two faces sharing an edge must traverse it in opposite directions;
    /// anything else means the winding of the new face is inconsistent with
    /// its neighbor.
    #[error("edge ({v0:?}, {v1:?}) is already traversed in this direction")]
    OrientationConflict {
        /// Source vertex of the conflicting half-edge.
        v0: VertexId,
        /// Target vertex of the conflicting half-edge.
        v1: VertexId,
    },

    /// An edge would gain a third incident face.
    #[error("edge ({v0:?}, {v1:?}) already has two incident faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: VertexId,
        /// Second vertex of the edge.
        v1: VertexId,
    },

    /// The boundary of the mesh does not decompose into closed loops.
    #[error("mesh boundary does not form closed loops")]
    MalformedBoundary,

    /// A point to be inserted lies outside the current triangulation.
    #[error("point ({x}, {y}) lies outside the triangulation")]
    OutsideTriangulation {
        /// Query point x coordinate.
        x: f64,
        /// Query point y coordinate.
        y: f64,
    },

    /// A line of a mesh or loop file could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a mesh or loop from file.
    #[error("failed to load {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving a mesh or loop to file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
