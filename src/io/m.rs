//! `.m` mesh format support.
//!
//! A line-oriented text format: one record per line, starting with a keyword.
//!
//! ```text
//! # comment
//! Vertex 0 0.5 1.0 0.0 {uv=(0.5 1.0)}
//! Face 0 0 1 2
//! ```
//!
//! Vertex records carry the id, the 3D position, and optionally the 2D
//! parameter point in a trailing `{uv=(u v)}` trait. Face records carry the
//! id and three vertex ids in counter-clockwise order. Comment lines and
//! unrecognized keywords are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, HalfEdgeMesh, VertexId};

fn parse_error(line: usize, message: impl Into<String>) -> MeshError {
    MeshError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_float(token: &str, line: usize, what: &str) -> Result<f64> {
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {what} '{token}'")))
}

fn parse_id(token: &str, line: usize, what: &str) -> Result<usize> {
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {what} '{token}'")))
}

/// Parse the `uv=(u v)` trait from the text between a vertex line's braces.
fn parse_uv(body: &str, line: usize) -> Result<Point2<f64>> {
    let inner = body
        .strip_prefix("uv=(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| parse_error(line, format!("malformed vertex trait '{{{body}}}'")))?;
    let mut parts = inner.split_whitespace();
    let u = parts
        .next()
        .ok_or_else(|| parse_error(line, "uv trait is missing coordinates"))?;
    let v = parts
        .next()
        .ok_or_else(|| parse_error(line, "uv trait is missing its second coordinate"))?;
    Ok(Point2::new(
        parse_float(u, line, "uv coordinate")?,
        parse_float(v, line, "uv coordinate")?,
    ))
}

/// Read a mesh from `.m` formatted text.
///
/// Structural violations in the face records (non-manifold edges,
/// inconsistent winding, unknown vertices) surface as the corresponding
/// mesh errors.
pub fn read_from<R: BufRead>(reader: R) -> Result<HalfEdgeMesh> {
    let mut mesh = HalfEdgeMesh::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let number = number + 1;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("Vertex") => {
                let mut next = |what: &str| {
                    tokens
                        .next()
                        .ok_or_else(|| parse_error(number, format!("vertex is missing {what}")))
                };
                let id = parse_id(next("an id")?, number, "vertex id")?;
                let x = parse_float(next("a position")?, number, "coordinate")?;
                let y = parse_float(next("a position")?, number, "coordinate")?;
                let z = parse_float(next("a position")?, number, "coordinate")?;

                let vertex = mesh.create_vertex(VertexId::new(id))?;
                vertex.point = Point3::new(x, y, z);
                vertex.uv = Point2::new(x, y);
                if let Some(open) = text.find('{') {
                    let close = text
                        .rfind('}')
                        .ok_or_else(|| parse_error(number, "unterminated vertex trait"))?;
                    let uv = parse_uv(&text[open + 1..close], number)?;
                    mesh.vertex_mut(VertexId::new(id)).uv = uv;
                }
            }
            Some("Face") => {
                let mut next = |what: &str| {
                    tokens
                        .next()
                        .ok_or_else(|| parse_error(number, format!("face is missing {what}")))
                };
                let id = parse_id(next("an id")?, number, "face id")?;
                let v0 = parse_id(next("a vertex")?, number, "vertex id")?;
                let v1 = parse_id(next("a vertex")?, number, "vertex id")?;
                let v2 = parse_id(next("a vertex")?, number, "vertex id")?;
                mesh.create_face(
                    FaceId::new(id),
                    [VertexId::new(v0), VertexId::new(v1), VertexId::new(v2)],
                )?;
            }
            // Edge and corner records carry only derived traits.
            _ => continue,
        }
    }

    Ok(mesh)
}

/// Write a mesh as `.m` formatted text.
///
/// Vertices come first in ascending id order, then faces, so the output is
/// deterministic and readable back without forward references.
pub fn write_to<W: Write>(mesh: &HalfEdgeMesh, writer: &mut W) -> std::io::Result<()> {
    for id in mesh.vertex_ids() {
        let vertex = mesh.vertex(id);
        let p = vertex.point;
        let uv = vertex.uv;
        writeln!(
            writer,
            "Vertex {} {} {} {} {{uv=({} {})}}",
            id.index(),
            p.x,
            p.y,
            p.z,
            uv.x,
            uv.y
        )?;
    }
    for id in mesh.face_ids() {
        let [v0, v1, v2] = mesh.face_triangle(id);
        writeln!(
            writer,
            "Face {} {} {} {}",
            id.index(),
            v0.index(),
            v1.index(),
            v2.index()
        )?;
    }
    Ok(())
}

/// Load a mesh from a `.m` file.
///
/// # Example
///
/// ```no_run
/// use trigon::io::m;
///
/// let mesh = m::load("triangulation.m").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<HalfEdgeMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_from(BufReader::new(file)).map_err(|e| match e {
        MeshError::Io(e) => MeshError::Io(e),
        other => MeshError::LoadError {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

/// Save a mesh to a `.m` file.
///
/// # Example
///
/// ```no_run
/// use trigon::io::m;
/// use trigon::mesh::HalfEdgeMesh;
///
/// let mesh = HalfEdgeMesh::new();
/// m::save(&mesh, "triangulation.m").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &HalfEdgeMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(mesh, &mut writer).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
