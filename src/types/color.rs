use std::collections::HashMap;

/// RGBA color identity used for deduplication and atlas lookup.
///
/// Alpha participates in identity: partial-transparency variants of the same
/// RGB are distinct keys. Alpha = 0 means fully invisible and never enters
/// the atlas.
pub type ColorKey = [u8; 4];

/// Whether a pixel of this color contributes anything visible.
pub fn is_visible(color: ColorKey) -> bool {
    color[3] > 0
}

/// Mapping from color key to the normalized center of its atlas cell.
///
/// Both coordinates live in `[0, 1)` with the raster convention (v grows
/// downward); the OBJ writer flips v on the way out.
#[derive(Debug, Clone, Default)]
pub struct UvMap {
    map: HashMap<ColorKey, [f64; 2]>,
}

impl UvMap {
    pub fn insert(&mut self, color: ColorKey, uv: [f64; 2]) {
        self.map.insert(color, uv);
    }

    /// UV center for a color, if it was packed into the atlas.
    pub fn get(&self, color: ColorKey) -> Option<[f64; 2]> {
        self.map.get(&color).copied()
    }

    /// UV center for a color, falling back to the origin cell.
    ///
    /// Colors absent from the map (fully transparent pixels, colors dropped
    /// by atlas truncation) resolve to `(0, 0)` rather than failing.
    pub fn uv(&self, color: ColorKey) -> [f64; 2] {
        self.get(color).unwrap_or([0.0, 0.0])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
