//! Mesh and boundary loop file I/O.
//!
//! Meshes are stored in the line-oriented `.m` text format; boundary loops
//! are stored as vertex id pairs and resolved against their mesh on load.
//!
//! # Usage
//!
//! ```no_run
//! use trigon::io;
//!
//! let mesh = io::load("triangulation.m").unwrap();
//! io::save(&mesh, "copy.m").unwrap();
//! ```

pub mod loops;
pub mod m;

pub use m::{load, save};
