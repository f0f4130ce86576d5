pub mod color;
pub mod mesh;

pub use color::{ColorKey, UvMap, is_visible};
pub use mesh::TileMesh;
