/// Geometry buffers for one image tile.
///
/// All buffers are flat vectors in emission order: every source pixel
/// contributes 4 vertices and 4 UV entries, visible pixels additionally
/// contribute one quad face. Invisible pixels keep their vertex/UV slots so
/// index bookkeeping stays a plain multiple of four per pixel; the unused
/// data is simply never referenced by a face.
#[derive(Debug, Clone, Default)]
pub struct TileMesh {
    /// Tile column in the tile grid.
    pub tile_x: u32,
    /// Tile row in the tile grid.
    pub tile_y: u32,
    /// Interleaved positions: [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Interleaved UVs: [u, v, u, v, ...]
    pub uvs: Vec<f64>,
    /// Quad faces as 0-based indices into the vertex/UV buffers
    /// (positions and UVs share indices).
    pub faces: Vec<[u32; 4]>,
}

impl TileMesh {
    pub fn with_capacity(tile_x: u32, tile_y: u32, pixels: usize) -> Self {
        Self {
            tile_x,
            tile_y,
            positions: Vec::with_capacity(pixels * 12),
            uvs: Vec::with_capacity(pixels * 8),
            faces: Vec::with_capacity(pixels),
        }
    }

    /// Number of vertices (positions / 3).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of UV entries (uvs / 2).
    pub fn uv_count(&self) -> usize {
        self.uvs.len() / 2
    }

    /// Number of quad faces (2 triangles each).
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles the quads expand to.
    pub fn triangle_count(&self) -> usize {
        self.faces.len() * 2
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh() {
        let mesh = TileMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.uv_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn single_pixel_quad() {
        let mesh = TileMesh {
            tile_x: 0,
            tile_y: 0,
            positions: vec![
                0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            ],
            uvs: vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
            faces: vec![[0, 1, 2, 3]],
        };

        assert!(!mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.uv_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn orphaned_vertices_allowed() {
        // Two pixels worth of vertices, only one face: the second pixel was
        // invisible and left its slots unreferenced.
        let mesh = TileMesh {
            positions: vec![0.0; 24],
            uvs: vec![0.0; 16],
            faces: vec![[0, 1, 2, 3]],
            ..Default::default()
        };

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.uv_count(), 8);
        assert_eq!(mesh.face_count(), 1);
    }
}
