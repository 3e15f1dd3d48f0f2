use serde::{Deserialize, Serialize};

use crate::foundation::core::{Triangle, Vec2, Vec4};
use crate::foundation::error::{RenderError, RenderResult};

/// Perspective frustum: camera-to-near-plane distance, near-plane extent, far distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fov {
    pub near_distance: f32,
    pub near_plane: Vec2,
    pub far_distance: f32,
}

/// Near distance of the default frustum.
pub const DEFAULT_NEAR_DISTANCE: f32 = 8.0;
/// Width of the default near plane; its height follows the buffer aspect.
pub const DEFAULT_PLANE_WIDTH: f32 = 40.0;
/// Far distance of the default frustum.
pub const DEFAULT_FAR_DISTANCE: f32 = 10.0;

/// The default frustum for a square buffer.
impl Default for Fov {
    fn default() -> Self {
        Self {
            near_distance: DEFAULT_NEAR_DISTANCE,
            near_plane: Vec2::splat(DEFAULT_PLANE_WIDTH),
            far_distance: DEFAULT_FAR_DISTANCE,
        }
    }
}

impl Fov {
    pub fn new(near_distance: f32, near_plane: Vec2, far_distance: f32) -> RenderResult<Self> {
        let fov = Self {
            near_distance,
            near_plane,
            far_distance,
        };
        fov.validate()?;
        Ok(fov)
    }

    /// Near plane `plane_width` wide, with its height following `aspect` (width / height).
    pub fn with_aspect(
        near_distance: f32,
        plane_width: f32,
        aspect: f32,
        far_distance: f32,
    ) -> RenderResult<Self> {
        Self::new(
            near_distance,
            Vec2::new(plane_width, plane_width / aspect),
            far_distance,
        )
    }

    /// The default frustum with its near-plane height following `aspect`.
    pub fn default_for_aspect(aspect: f32) -> RenderResult<Self> {
        Self::with_aspect(
            DEFAULT_NEAR_DISTANCE,
            DEFAULT_PLANE_WIDTH,
            aspect,
            DEFAULT_FAR_DISTANCE,
        )
    }

    pub fn validate(&self) -> RenderResult<()> {
        if !(self.near_distance.is_finite() && self.near_distance > 0.0) {
            return Err(RenderError::validation("fov near_distance must be > 0"));
        }
        if !(self.far_distance.is_finite() && self.far_distance > self.near_distance) {
            return Err(RenderError::validation(
                "fov far_distance must be > near_distance",
            ));
        }
        if !(self.near_plane.is_finite() && self.near_plane.x > 0.0 && self.near_plane.y > 0.0) {
            return Err(RenderError::validation(
                "fov near_plane extents must be > 0",
            ));
        }
        Ok(())
    }

    /// Maps a view-space `z` to normalized depth; `far_distance` lands on 1.0.
    pub fn normalized_depth(&self, z: f32) -> f32 {
        z / self.far_distance
    }
}

/// View space to screen space for one buffer size and frustum.
///
/// Output vectors carry screen `x`, screen `y`, normalized depth, and `w = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    pub fov: Fov,
    pub width: u32,
    pub height: u32,
    /// Reject points whose projection falls outside the near-plane extent.
    pub clip_near_plane: bool,
}

impl Projector {
    pub fn new(fov: Fov, width: u32, height: u32, clip_near_plane: bool) -> Self {
        Self {
            fov,
            width,
            height,
            clip_near_plane,
        }
    }

    /// `None` for points on or behind the camera plane, and for points outside the near-plane
    /// extent when clipping is on.
    pub fn project(&self, point: Vec4) -> Option<Vec4> {
        if !(point.z > 0.0) {
            return None;
        }

        let scale = self.fov.near_distance / point.z;
        let mut x = point.x * scale;
        let mut y = point.y * scale;

        if self.clip_near_plane
            && (x.abs() > self.fov.near_plane.x / 2.0 || y.abs() > self.fov.near_plane.y / 2.0)
        {
            return None;
        }

        let depth = self.fov.normalized_depth(point.z);

        let (w, h) = (self.width as f32, self.height as f32);
        x *= w / self.fov.near_plane.x;
        y *= h / self.fov.near_plane.y;
        x += w / 2.0;
        y += h / 2.0;

        Some(Vec4::new(x, y, depth, 0.0))
    }

    /// All-or-nothing: one rejected vertex drops the whole triangle (no clipping/splitting).
    pub fn project_triangle(&self, triangle: &Triangle) -> Option<Triangle> {
        Some([
            self.project(triangle[0])?,
            self.project(triangle[1])?,
            self.project(triangle[2])?,
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/projection.rs"]
mod tests;
