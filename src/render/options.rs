use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Vec2, Vec3};
use crate::foundation::error::{RenderError, RenderResult};
use crate::raster::projection::Fov;

/// Read-only view handed to a [`PixelShader`] for each written pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelShaderInput {
    /// Resolved draw color before shading.
    pub color: u32,
    /// Unit face normal; zero for degenerate triangles.
    pub normal: Vec3,
    pub projected_pixel: Vec2,
    pub width: u32,
    pub height: u32,
}

/// Per-pixel color override. Runs on pool workers for submitted draws.
pub type PixelShader = Arc<dyn Fn(PixelShaderInput) -> u32 + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterizerKind {
    Barycentric,
    #[default]
    #[serde(alias = "scanline")]
    ScanlineLike,
}

/// Options for a single draw call.
///
/// Unset `color` and `fov` fall back to the owning [`crate::Render`]'s defaults. The `with_*`
/// methods return modified copies; the shader is shared, not cloned.
#[derive(Clone)]
pub struct DrawOptions {
    pub pixel_shader: Option<PixelShader>,
    pub color: Option<u32>,
    pub fov: Option<Fov>,
    pub wireframe: bool,
    pub rasterizer: RasterizerKind,
    /// Drop triangles with a vertex projecting outside the near-plane extent.
    pub near_plane_clip: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            pixel_shader: None,
            color: None,
            fov: None,
            wireframe: false,
            rasterizer: RasterizerKind::default(),
            near_plane_clip: true,
        }
    }
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixel_shader<F>(&self, shader: F) -> Self
    where
        F: Fn(PixelShaderInput) -> u32 + Send + Sync + 'static,
    {
        self.with_shared_shader(Arc::new(shader))
    }

    pub fn with_shared_shader(&self, shader: PixelShader) -> Self {
        Self {
            pixel_shader: Some(shader),
            ..self.clone()
        }
    }

    pub fn without_pixel_shader(&self) -> Self {
        Self {
            pixel_shader: None,
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: u32) -> Self {
        Self {
            color: Some(color),
            ..self.clone()
        }
    }

    pub fn with_fov(&self, fov: Fov) -> Self {
        Self {
            fov: Some(fov),
            ..self.clone()
        }
    }

    pub fn with_wireframe(&self, wireframe: bool) -> Self {
        Self {
            wireframe,
            ..self.clone()
        }
    }

    pub fn with_rasterizer(&self, rasterizer: RasterizerKind) -> Self {
        Self {
            rasterizer,
            ..self.clone()
        }
    }

    pub fn with_near_plane_clip(&self, near_plane_clip: bool) -> Self {
        Self {
            near_plane_clip,
            ..self.clone()
        }
    }
}

impl fmt::Debug for DrawOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawOptions")
            .field("pixel_shader", &self.pixel_shader.as_ref().map(|_| "<fn>"))
            .field("color", &self.color)
            .field("fov", &self.fov)
            .field("wireframe", &self.wireframe)
            .field("rasterizer", &self.rasterizer)
            .field("near_plane_clip", &self.near_plane_clip)
            .finish()
    }
}

fn default_near_plane_clip() -> bool {
    true
}

/// Serializable subset of [`DrawOptions`]; shaders cannot be expressed in JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<Fov>,
    #[serde(default)]
    pub wireframe: bool,
    #[serde(default)]
    pub rasterizer: RasterizerKind,
    #[serde(default = "default_near_plane_clip")]
    pub near_plane_clip: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            color: None,
            fov: None,
            wireframe: false,
            rasterizer: RasterizerKind::default(),
            near_plane_clip: true,
        }
    }
}

impl DrawConfig {
    pub fn from_json_str(s: &str) -> RenderResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| RenderError::serde(e.to_string()))?;
        if let Some(fov) = &cfg.fov {
            fov.validate()?;
        }
        Ok(cfg)
    }

    pub fn into_options(self) -> DrawOptions {
        DrawOptions {
            pixel_shader: None,
            color: self.color,
            fov: self.fov,
            wireframe: self.wireframe,
            rasterizer: self.rasterizer,
            near_plane_clip: self.near_plane_clip,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/options.rs"]
mod tests;
