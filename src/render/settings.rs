use crate::foundation::core::Color;
use crate::foundation::error::{RenderError, RenderResult};
use crate::raster::projection::Fov;

/// Construction-time knobs for [`crate::Render`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Framebuffers in the swap rotation; at least 2.
    pub buffer_count: usize,
    /// Worker threads; `None` uses [`crate::WorkerPool::default_thread_count`].
    pub threads: Option<usize>,
    /// Color buffers are reset to on clear and swap.
    pub clear_color: u32,
    /// Draw color when [`crate::DrawOptions::color`] is unset.
    pub default_color: u32,
    /// Frustum when [`crate::DrawOptions::fov`] is unset; `None` derives one from the aspect ratio.
    pub default_fov: Option<Fov>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            buffer_count: 2,
            threads: None,
            clear_color: Color::OPAQUE_WHITE,
            default_color: Color::OPAQUE_BLACK,
            default_fov: None,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> RenderResult<()> {
        if self.buffer_count < 2 {
            return Err(RenderError::validation(format!(
                "buffer_count must be >= 2, got {}",
                self.buffer_count
            )));
        }
        if self.threads == Some(0) {
            return Err(RenderError::validation("threads must be > 0"));
        }
        if let Some(fov) = &self.default_fov {
            fov.validate()?;
        }
        Ok(())
    }

    /// `near_distance` 8, a near plane 40 units wide with height following `aspect`, far 10.
    pub fn aspect_fov(aspect: f32) -> RenderResult<Fov> {
        Fov::default_for_aspect(aspect)
    }
}
