pub mod cube;

pub use cube::{generate_cube_triangles, rotation_about_diagonal};
