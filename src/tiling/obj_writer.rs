use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PixelTilerError, Result};
use crate::transform::flip_v;
use crate::types::TileMesh;

/// Write a tile mesh as a Wavefront OBJ file.
pub fn write_obj(mesh: &TileMesh, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        PixelTilerError::Output(format!("Failed to create {}: {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);
    write_obj_to(mesh, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Serialize a tile mesh into any writer.
///
/// Layout: a tile comment, `v` lines (4 per pixel), `vt` lines (4 per pixel,
/// v coordinate flipped to OBJ's bottom-left origin), then one quad `f` line
/// per visible pixel with 1-based `v/vt` index pairs.
pub fn write_obj_to<W: Write>(mesh: &TileMesh, out: &mut W) -> Result<()> {
    writeln!(out, "# Tile {},{}", mesh.tile_x, mesh.tile_y)?;

    for pos in mesh.positions.chunks_exact(3) {
        writeln!(out, "v {} {} {}", pos[0], pos[1], pos[2])?;
    }

    for uv in mesh.uvs.chunks_exact(2) {
        writeln!(out, "vt {} {}", uv[0], flip_v(uv[1]))?;
    }

    for face in &mesh.faces {
        writeln!(
            out,
            "f {0}/{0} {1}/{1} {2}/{2} {3}/{3}",
            face[0] + 1,
            face[1] + 1,
            face[2] + 1,
            face[3] + 1
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel_mesh() -> TileMesh {
        TileMesh {
            tile_x: 2,
            tile_y: 5,
            positions: vec![
                0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            ],
            uvs: vec![0.5, 0.25, 0.5, 0.25, 0.5, 0.25, 0.5, 0.25],
            faces: vec![[0, 1, 2, 3]],
        }
    }

    #[test]
    fn obj_layout_for_single_quad() {
        let mut buf = Vec::new();
        write_obj_to(&one_pixel_mesh(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Tile 2,5");
        assert_eq!(lines[1], "v 0 1 0");
        assert_eq!(lines[2], "v 1 1 0");
        assert_eq!(lines[3], "v 1 0 0");
        assert_eq!(lines[4], "v 0 0 0");
        // Stored v = 0.25 flips to 0.75
        assert_eq!(lines[5], "vt 0.5 0.75");
        assert_eq!(lines[8], "vt 0.5 0.75");
        assert_eq!(lines[9], "f 1/1 2/2 3/3 4/4");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn orphaned_vertices_are_written_without_faces() {
        // Two pixels, second invisible: 8 vertices, 8 UVs, one face
        let mesh = TileMesh {
            positions: vec![0.0; 24],
            uvs: vec![0.5; 16],
            faces: vec![[0, 1, 2, 3]],
            ..Default::default()
        };

        let mut buf = Vec::new();
        write_obj_to(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 1);
    }

    #[test]
    fn face_indices_are_one_based() {
        let mesh = TileMesh {
            positions: vec![0.0; 24],
            uvs: vec![0.0; 16],
            faces: vec![[4, 5, 6, 7]],
            ..Default::default()
        };

        let mut buf = Vec::new();
        write_obj_to(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("f 5/5 6/6 7/7 8/8"));
    }

    #[test]
    fn writes_to_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pixel_mesh_2_5.obj");

        write_obj(&one_pixel_mesh(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Tile 2,5\n"));
    }
}
