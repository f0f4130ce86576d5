//! Raster-to-mesh coordinate conversion.
//!
//! Source images use a top-left origin with Y growing downward; the emitted
//! meshes use Y growing upward, one unit per pixel, Z = 0.

/// Convert a raster row coordinate to mesh space: mesh-Y = height - raster-Y.
///
/// Row 0 (top of the image) maps to the top edge of the mesh at `height`;
/// row `height` (one past the bottom) maps to 0.
pub fn raster_to_mesh_y(y: u32, height: u32) -> f32 {
    height as f32 - y as f32
}

/// Flip a stored v coordinate to the OBJ bottom-left texture origin.
pub fn flip_v(v: f64) -> f64 {
    1.0 - v
}

/// Corner positions of the unit quad covering pixel `(x, y)`.
///
/// Order: top-left, top-right, bottom-right, bottom-left in mesh space,
/// matching the face winding the OBJ writer emits.
pub fn pixel_quad_corners(x: u32, y: u32, height: u32) -> [[f32; 3]; 4] {
    let x0 = x as f32;
    let x1 = (x + 1) as f32;
    let y_top = raster_to_mesh_y(y, height);
    let y_bottom = y_top - 1.0;

    [
        [x0, y_top, 0.0],
        [x1, y_top, 0.0],
        [x1, y_bottom, 0.0],
        [x0, y_bottom, 0.0],
    ]
}
