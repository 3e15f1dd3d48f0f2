#![forbid(unsafe_code)]

pub mod foundation;
pub mod geometry;
pub mod raster;
pub mod render;
pub mod threading;

pub use foundation::core::{
    Color, DEFAULT_DEPTH, Frame, MAX_DEPTH, Triangle, Vec2, Vec3, Vec4, deg_to_rad,
};
pub use foundation::error::{RenderError, RenderResult};
pub use geometry::{generate_cube_triangles, rotation_about_diagonal};
pub use raster::framebuffer::FrameBuffer;
pub use raster::projection::{Fov, Projector};
pub use render::facade::Render;
pub use render::options::{DrawConfig, DrawOptions, PixelShader, PixelShaderInput, RasterizerKind};
pub use render::settings::RenderSettings;
pub use threading::pixel_lock::PixelLock;
pub use threading::pool::WorkerPool;
