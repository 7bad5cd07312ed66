//! Boundary loop persistence.
//!
//! A loop file is line-oriented: one half-edge per line, written as the
//! source and target vertex ids separated by whitespace, in loop order.
//! Reading resolves each pair against a mesh, so a loop file is only
//! meaningful together with the mesh it was traced from.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, Loop, VertexId};

/// Write a loop as source/target vertex id pairs, one half-edge per line.
pub fn write_loop<W: Write>(
    mesh: &HalfEdgeMesh,
    boundary: &Loop,
    writer: &mut W,
) -> std::io::Result<()> {
    for &he in boundary.halfedges() {
        writeln!(
            writer,
            "{} {}",
            mesh.source(he).index(),
            mesh.target(he).index()
        )?;
    }
    Ok(())
}

/// Read a loop back by resolving each vertex id pair to a half-edge of `mesh`.
pub fn read_loop<R: BufRead>(mesh: &HalfEdgeMesh, reader: R) -> Result<Loop> {
    let mut halfedges: Vec<HalfEdgeId> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let number = number + 1;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let mut tokens = text.split_whitespace();
        let mut next = |what: &str| {
            tokens.next().ok_or_else(|| MeshError::Parse {
                line: number,
                message: format!("missing {what}"),
            })
        };
        let source = parse_id(next("a source vertex id")?, number)?;
        let target = parse_id(next("a target vertex id")?, number)?;

        let he = mesh
            .vertex_halfedge(VertexId::new(source), VertexId::new(target))
            .ok_or_else(|| MeshError::Parse {
                line: number,
                message: format!("no half-edge from vertex {source} to vertex {target}"),
            })?;
        halfedges.push(he);
    }

    Ok(Loop::from_halfedges(mesh, halfedges))
}

fn parse_id(token: &str, line: usize) -> Result<usize> {
    token.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid vertex id '{token}'"),
    })
}

/// Save a loop to a file.
pub fn save<P: AsRef<Path>>(mesh: &HalfEdgeMesh, boundary: &Loop, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_loop(mesh, boundary, &mut writer).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a loop from a file, resolving it against `mesh`.
pub fn load<P: AsRef<Path>>(mesh: &HalfEdgeMesh, path: P) -> Result<Loop> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_loop(mesh, BufReader::new(file)).map_err(|e| match e {
        MeshError::Io(e) => MeshError::Io(e),
        other => MeshError::LoadError {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{trace_boundary, FaceId};
    use nalgebra::Point3;
    use std::io::Cursor;

    fn triangle() -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();
        for (i, (x, y)) in [(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)].iter().enumerate() {
            let v = mesh.create_vertex(VertexId::new(i)).unwrap();
            v.point = Point3::new(*x, *y, 0.0);
        }
        mesh.create_face(
            FaceId::new(0),
            [VertexId::new(0), VertexId::new(1), VertexId::new(2)],
        )
        .unwrap();
        mesh
    }

    #[test]
    fn test_loop_roundtrip() {
        let mesh = triangle();
        let loops = trace_boundary(&mesh).unwrap();
        assert_eq!(loops.len(), 1);

        let mut buffer = Vec::new();
        write_loop(&mesh, &loops[0], &mut buffer).unwrap();

        let read = read_loop(&mesh, Cursor::new(buffer)).unwrap();
        assert_eq!(read.halfedges(), loops[0].halfedges());
        assert!((read.length() - loops[0].length()).abs() < 1e-12);
    }

    #[test]
    fn test_read_loop_unknown_halfedge() {
        let mesh = triangle();
        let err = read_loop(&mesh, Cursor::new("0 9\n")).unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, .. }));
    }
}
