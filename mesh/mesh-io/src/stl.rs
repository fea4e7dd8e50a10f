//! STL (Stereolithography) loading.
//!
//! Supports both ASCII and binary STL. Files are triangle soups; the loader
//! welds vertices with identical coordinates so that neighbouring faces share
//! indices, which the half-space clip relies on to share crossing points.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored, winding is authoritative)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Load a mesh from an STL file, detecting ASCII vs binary.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid STL, or holds
/// no triangles.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let hull = load_stl("input/buoy.stl").unwrap();
/// println!("Loaded {} faces", hull.face_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes)?;

    let soup = parse_stl(&bytes)?;
    if soup.is_empty() {
        return Err(IoError::NoFaces {
            path: path.to_path_buf(),
        });
    }

    let mesh = weld_exact(&soup);
    debug!(
        path = %path.display(),
        faces = mesh.face_count(),
        vertices = mesh.vertex_count(),
        "Loaded STL"
    );
    Ok(mesh)
}

/// Parse STL bytes into an unwelded triangle soup.
pub(crate) fn parse_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if bytes.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    if looks_like_ascii(bytes) {
        parse_ascii(BufReader::new(bytes))
    } else {
        parse_binary(bytes)
    }
}

/// ASCII files start with "solid" and carry no NUL bytes in the header area.
///
/// Some binary exporters also write "solid" into the header, so a binary
/// file whose size matches its declared face count wins.
fn looks_like_ascii(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(HEADER_SIZE)];
    if !String::from_utf8_lossy(head).trim_start().starts_with("solid") || head.contains(&0) {
        return false;
    }
    binary_face_count(bytes)
        .is_none_or(|count| bytes.len() != HEADER_SIZE + 4 + count as usize * TRIANGLE_SIZE)
}

fn binary_face_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: `available` only narrows when it is below the u32 face count
fn parse_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let face_count = binary_face_count(bytes)
        .ok_or_else(|| IoError::invalid_content("binary STL shorter than its header"))?;

    let body = &bytes[HEADER_SIZE + 4..];
    let available = body.len() / TRIANGLE_SIZE;

    if available < face_count as usize {
        return Err(IoError::Truncated {
            expected: face_count,
            got: available as u32,
        });
    }

    let mut mesh = IndexedMesh::with_capacity(face_count as usize * 3, face_count as usize);
    for chunk in body.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        // Skip the 12-byte normal
        push_triangle(
            &mut mesh,
            [
                read_point(&chunk[12..24]),
                read_point(&chunk[24..36]),
                read_point(&chunk[36..48]),
            ],
        );
    }

    Ok(mesh)
}

/// Read a point from 12 bytes (3 little-endian f32s).
fn read_point(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

fn parse_ascii<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_loop = false;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" => {
                if !in_loop {
                    return Err(IoError::invalid_content("vertex outside an outer loop"));
                }
                let coords = parts
                    .map(str::parse::<f64>)
                    .collect::<Result<Vec<_>, _>>()?;
                let [x, y, z] = coords[..] else {
                    return Err(IoError::invalid_content(format!(
                        "vertex needs 3 coordinates, got {}",
                        coords.len()
                    )));
                };
                corners.push(Point3::new(x, y, z));
            }
            "endloop" => {
                in_loop = false;
                let [a, b, c] = corners[..] else {
                    return Err(IoError::invalid_content(format!(
                        "facet has {} vertices, expected 3",
                        corners.len()
                    )));
                };
                push_triangle(&mut mesh, [a, b, c]);
            }
            "endsolid" => break,
            // solid, facet, endfacet
            _ => {}
        }
    }

    Ok(mesh)
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
fn push_triangle(mesh: &mut IndexedMesh, corners: [Point3<f64>; 3]) {
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend(corners);
    mesh.faces.push([base, base + 1, base + 2]);
}

/// Merge vertices whose coordinates are bit-identical.
///
/// `-0.0` and `0.0` are treated as the same coordinate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn weld_exact(mesh: &IndexedMesh) -> IndexedMesh {
    let key = |p: &Point3<f64>| {
        // Adding 0.0 folds -0.0 into +0.0
        [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()]
    };

    let mut lookup: HashMap<[u64; 3], u32> = HashMap::with_capacity(mesh.vertices.len());
    let mut vertices = Vec::with_capacity(mesh.vertices.len() / 2);
    let remap: Vec<u32> = mesh
        .vertices
        .iter()
        .map(|p| {
            *lookup.entry(key(p)).or_insert_with(|| {
                vertices.push(*p);
                (vertices.len() - 1) as u32
            })
        })
        .collect();

    let faces = mesh
        .faces
        .iter()
        .map(|f| [remap[f[0] as usize], remap[f[1] as usize], remap[f[2] as usize]])
        .collect();

    IndexedMesh::from_parts(vertices, faces)
}
