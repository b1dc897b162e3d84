//! Wavefront-style OBJ parsing.
//!
//! Only the records needed for a single textured, lit mesh are understood:
//! `v x y z`, `vt u v`, `vn x y z` and triangular faces `f p/t/n p/t/n p/t/n`
//! with 1-based indices. Every other record (`o`, `g`, `s`, `usemtl`,
//! comments, ...) is skipped.
//!
//! The position index of a face vertex is its identity in the output: the
//! texture coordinate and normal of a face vertex are written to the slot of
//! its position, so a position shared by faces with different texture
//! coordinates or normals keeps whichever face came last in the file.
// TODO: split vertices whose position is reused with different attributes instead of overwriting them

use thiserror::Error;

use crate::data_structures::model::MeshData;

const FLOATS_PER_VERTEX: usize = 8;

#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ObjError {
    pub line: usize,
    pub kind: ObjErrorKind,
}

#[derive(Debug, Error, PartialEq)]
pub enum ObjErrorKind {
    #[error("`{tag}` expects {expected} values but found {found}")]
    WrongTokenCount {
        tag: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("face vertex `{0}` is not of the form p/t/n")]
    MalformedFaceVertex(String),
    #[error("{stream} index {index} is out of range (file has {len})")]
    IndexOutOfRange {
        stream: &'static str,
        index: i64,
        len: usize,
    },
}

struct Face {
    line: usize,
    vertices: [[i64; 3]; 3],
}

/// Parses OBJ text into an interleaved position/texcoord/normal mesh.
///
/// Either the whole file parses or nothing is returned. Texture `v` is
/// flipped (`1 - v`) so images can be uploaded top row first.
pub fn parse_obj(text: &str) -> Result<MeshData, ObjError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let mut tokens = raw.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let rest: Vec<&str> = tokens.collect();
        let err = |kind| ObjError { line, kind };
        match tag {
            "v" => positions.push(parse_floats::<3>("v", &rest).map_err(err)?),
            "vt" => tex_coords.push(parse_floats::<2>("vt", &rest).map_err(err)?),
            "vn" => normals.push(parse_floats::<3>("vn", &rest).map_err(err)?),
            "f" => faces.push(Face {
                line,
                vertices: parse_face(&rest).map_err(err)?,
            }),
            _ => {}
        }
    }

    let mut vertices = vec![0.0f32; positions.len() * FLOATS_PER_VERTEX];
    for (slot, position) in positions.iter().enumerate() {
        vertices[slot * FLOATS_PER_VERTEX..slot * FLOATS_PER_VERTEX + 3].copy_from_slice(position);
    }

    let mut indices = Vec::with_capacity(faces.len() * 3);
    for face in &faces {
        let err = |kind| ObjError {
            line: face.line,
            kind,
        };
        for [p, t, n] in face.vertices {
            let p = resolve("position", p, positions.len()).map_err(err)?;
            let t = resolve("texture coordinate", t, tex_coords.len()).map_err(err)?;
            let n = resolve("normal", n, normals.len()).map_err(err)?;

            let base = p * FLOATS_PER_VERTEX;
            let [u, v] = tex_coords[t];
            vertices[base + 3] = u;
            vertices[base + 4] = 1.0 - v;
            vertices[base + 5..base + 8].copy_from_slice(&normals[n]);
            indices.push(p as u32);
        }
    }

    log::trace!(
        "parsed obj: {} positions, {} faces",
        positions.len(),
        faces.len()
    );
    Ok(MeshData {
        vertices,
        indices,
        layout: MeshData::standard_layout(),
    })
}

fn parse_floats<const N: usize>(tag: &'static str, tokens: &[&str]) -> Result<[f32; N], ObjErrorKind> {
    if tokens.len() != N {
        return Err(ObjErrorKind::WrongTokenCount {
            tag,
            expected: N,
            found: tokens.len(),
        });
    }
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = token
            .parse()
            .map_err(|_| ObjErrorKind::InvalidNumber(token.to_string()))?;
    }
    Ok(values)
}

fn parse_face(tokens: &[&str]) -> Result<[[i64; 3]; 3], ObjErrorKind> {
    if tokens.len() != 3 {
        return Err(ObjErrorKind::WrongTokenCount {
            tag: "f",
            expected: 3,
            found: tokens.len(),
        });
    }
    let mut face = [[0; 3]; 3];
    for (vertex, token) in face.iter_mut().zip(tokens) {
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() != 3 {
            return Err(ObjErrorKind::MalformedFaceVertex(token.to_string()));
        }
        for (index, part) in vertex.iter_mut().zip(&parts) {
            *index = part
                .parse()
                .map_err(|_| ObjErrorKind::MalformedFaceVertex(token.to_string()))?;
        }
    }
    Ok(face)
}

/// 1-based file index to 0-based slot.
fn resolve(stream: &'static str, index: i64, len: usize) -> Result<usize, ObjErrorKind> {
    if index < 1 || index as usize > len {
        return Err(ObjErrorKind::IndexOutOfRange { stream, index, len });
    }
    Ok(index as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_unknown_records_and_blank_lines() {
        let text = "# cube\no thing\n\nv 0 0 0\nv 1 0 0\nv 0 1 0\ns off\nvt 0 0\nvn 0 0 1\nusemtl stone\nf 1/1/1 2/1/1 3/1/1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn flips_texture_v() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.25 0.75\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(&mesh.vertices[3..5], &[0.25, 0.25]);
    }

    #[test]
    fn faces_may_reference_records_declared_later() {
        let text = "v 0 0 0\nf 1/1/1 2/1/1 3/1/1\nv 1 0 0\nv 0 1 0\nvt 0 1\nvn 0 1 0\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(&mesh.vertices[13..16], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn unreferenced_positions_get_zeroed_attributes() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nvt 1 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(&mesh.vertices[24..32], &[5.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_wrong_token_counts() {
        let err = parse_obj("v 1 2\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(
            err.kind,
            ObjErrorKind::WrongTokenCount {
                tag: "v",
                expected: 3,
                found: 2
            }
        );
        let err = parse_obj("v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1 1/1/1 1/1/1\n").unwrap_err();
        assert_eq!(err.line, 4);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_obj("v 0 0 0\nvn 0 x 1\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ObjErrorKind::InvalidNumber("x".to_string()));
    }

    #[test]
    fn rejects_faces_without_all_three_indices() {
        let err = parse_obj("v 0 0 0\nvn 0 0 1\nf 1//1 1//1 1//1\n").unwrap_err();
        assert_eq!(err.kind, ObjErrorKind::MalformedFaceVertex("1//1".to_string()));
        let err = parse_obj("v 0 0 0\nf 1/1 1/1 1/1\n").unwrap_err();
        assert_eq!(err.kind, ObjErrorKind::MalformedFaceVertex("1/1".to_string()));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let text = "v 0 0 0\nv 1 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let err = parse_obj(text).unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(
            err.kind,
            ObjErrorKind::IndexOutOfRange {
                stream: "position",
                index: 3,
                len: 2
            }
        );
        let err = parse_obj("v 0 0 0\nvt 0 0\nvn 0 0 1\nf 0/1/1 1/1/1 1/1/1\n").unwrap_err();
        assert!(matches!(err.kind, ObjErrorKind::IndexOutOfRange { index: 0, .. }));
    }
}
