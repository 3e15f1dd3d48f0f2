//! The renderer facade: a ring of framebuffers, one worker pool, draw defaults.
//!
//! Draw calls always target the active buffer. [`Render::swap_buffer`] hands the active buffer
//! to the pool for a background clear, rotates to the next buffer and does not return until
//! that buffer is clear and the pool is idle.

use std::sync::Arc;

use crate::foundation::core::{Frame, Triangle, Vec4};
use crate::foundation::error::{RenderError, RenderResult};
use crate::raster::framebuffer::FrameBuffer;
use crate::raster::projection::{Fov, Projector};
use crate::raster::triangle::{Paint, face_normal, rasterize};
use crate::render::options::{DrawOptions, PixelShader, RasterizerKind};
use crate::render::settings::RenderSettings;
use crate::threading::pool::WorkerPool;

/// Only packed 32-bit pixels are supported.
pub const SUPPORTED_COLOR_BYTES: u32 = 4;

pub struct Render {
    // Declared first so it drops (and drains) before the buffers.
    pool: WorkerPool,
    buffers: Vec<Arc<FrameBuffer>>,
    active: usize,
    width: u32,
    height: u32,
    color_bytes: u32,
    clear_color: u32,
    default_color: u32,
    default_fov: Fov,
}

impl Render {
    pub fn new(width: u32, height: u32, color_bytes: u32) -> RenderResult<Self> {
        Self::with_settings(width, height, color_bytes, RenderSettings::default())
    }

    #[tracing::instrument(skip(settings))]
    pub fn with_settings(
        width: u32,
        height: u32,
        color_bytes: u32,
        settings: RenderSettings,
    ) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::validation(format!(
                "buffer size must be non-zero, got {width}x{height}"
            )));
        }
        if color_bytes != SUPPORTED_COLOR_BYTES {
            return Err(RenderError::validation(format!(
                "unsupported color bytes per pixel: {color_bytes} (only {SUPPORTED_COLOR_BYTES})"
            )));
        }
        settings.validate()?;

        let aspect = width as f32 / height as f32;
        let default_fov = match settings.default_fov {
            Some(fov) => fov,
            None => RenderSettings::aspect_fov(aspect)?,
        };

        let pool = match settings.threads {
            Some(n) => WorkerPool::with_threads(n)?,
            None => WorkerPool::new()?,
        };

        let buffers = (0..settings.buffer_count)
            .map(|_| Arc::new(FrameBuffer::new(width, height, settings.clear_color)))
            .collect();

        tracing::debug!(
            width,
            height,
            buffers = settings.buffer_count,
            threads = pool.threads(),
            "renderer ready"
        );

        Ok(Self {
            pool,
            buffers,
            active: 0,
            width,
            height,
            color_bytes,
            clear_color: settings.clear_color,
            default_color: settings.default_color,
            default_fov,
        })
    }

    /// Projects and rasterizes one triangle into the active buffer on the calling thread.
    ///
    /// Fails with [`RenderError::UsageFault`] unless `vertices` holds exactly three points.
    /// Triangles with a vertex rejected by projection are skipped without error.
    pub fn draw_triangle(&self, vertices: &[Vec4], options: &DrawOptions) -> RenderResult<()> {
        let job = self.prepare(vertices, options)?;
        job.run(&self.buffers[self.active]);
        Ok(())
    }

    /// Like [`Render::draw_triangle`], but rasterizes on a pool worker.
    ///
    /// Vertex count is checked before dispatch. Blocks while every worker is busy. Call
    /// [`Render::join`] (or [`Render::swap_buffer`]) to wait for completion.
    pub fn submit_triangle(&self, vertices: &[Vec4], options: DrawOptions) -> RenderResult<()> {
        let job = self.prepare(vertices, &options)?;
        let target = Arc::clone(&self.buffers[self.active]);
        self.pool.add(move || job.run(&target));
        Ok(())
    }

    /// Waits for every submitted draw. Reports the first job panic since the last join.
    pub fn join(&self) -> RenderResult<()> {
        self.pool.join()
    }

    fn prepare(&self, vertices: &[Vec4], options: &DrawOptions) -> RenderResult<DrawJob> {
        let triangle: Triangle = vertices
            .try_into()
            .map_err(|_| RenderError::usage(3, vertices.len()))?;
        Ok(DrawJob {
            triangle,
            projector: Projector::new(
                options.fov.unwrap_or(self.default_fov),
                self.width,
                self.height,
                options.near_plane_clip,
            ),
            color: options.color.unwrap_or(self.default_color),
            shader: options.pixel_shader.clone(),
            kind: options.rasterizer,
            wireframe: options.wireframe,
        })
    }

    /// Synchronous clear of the active buffer.
    ///
    /// Submitted draws are drained first so none of them lands after the clear. A panic in
    /// one of them is returned and the buffer is left as is.
    #[tracing::instrument(skip(self), fields(buffer = self.active))]
    pub fn clear(&self, color: u32) -> RenderResult<()> {
        self.pool.join()?;
        self.buffers[self.active].clear(color);
        Ok(())
    }

    /// [`Render::clear`] with the configured clear color (opaque white unless overridden).
    pub fn clear_default(&self) -> RenderResult<()> {
        self.clear(self.clear_color)
    }

    /// Rotates to the next buffer, clearing the vacated one in the background.
    ///
    /// Submitted draws are drained first so none of them lands in the vacated buffer after its
    /// clear. If one of them panicked, the error is returned and no swap happens.
    #[tracing::instrument(skip(self), fields(from = self.active))]
    pub fn swap_buffer(&mut self) -> RenderResult<()> {
        self.pool.join()?;

        let vacated = Arc::clone(&self.buffers[self.active]);
        vacated.mark_dirty();
        let color = self.clear_color;
        self.pool.add(move || vacated.clear(color));

        self.active = (self.active + 1) % self.buffers.len();
        let next = &self.buffers[self.active];
        while !next.is_cleared() {
            std::hint::spin_loop();
        }
        self.pool.join()?;

        tracing::debug!(active = self.active, "buffers swapped");
        Ok(())
    }

    /// Packed color plane of the active buffer, row-major, `width * 4` bytes per row.
    ///
    /// Valid until the next call that takes `&mut self` or drops the renderer. Reading through
    /// it while submitted draws are in flight observes a partially drawn frame.
    pub fn get_buffer(&self) -> *const u32 {
        self.buffers[self.active].as_ptr()
    }

    pub fn snapshot(&self) -> Frame {
        self.buffers[self.active].snapshot()
    }

    pub fn active_buffer(&self) -> &FrameBuffer {
        &self.buffers[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Calls `f(x, y)` for every pixel, column by column.
    pub fn for_each_pixel<F>(&self, mut f: F)
    where
        F: FnMut(u32, u32),
    {
        for x in 0..self.width {
            for y in 0..self.height {
                f(x, y);
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_bytes(&self) -> u32 {
        self.color_bytes
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn default_fov(&self) -> Fov {
        self.default_fov
    }

    pub fn default_color(&self) -> u32 {
        self.default_color
    }

    pub fn clear_color(&self) -> u32 {
        self.clear_color
    }

    pub fn threads(&self) -> usize {
        self.pool.threads()
    }
}

impl std::fmt::Debug for Render {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Render")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("buffers", &self.buffers.len())
            .field("active", &self.active)
            .field("threads", &self.pool.threads())
            .finish_non_exhaustive()
    }
}

/// Everything one triangle needs, owned so it can move onto a worker.
struct DrawJob {
    triangle: Triangle,
    projector: Projector,
    color: u32,
    shader: Option<PixelShader>,
    kind: RasterizerKind,
    wireframe: bool,
}

impl DrawJob {
    fn run(&self, target: &FrameBuffer) {
        let Some(projected) = self.projector.project_triangle(&self.triangle) else {
            tracing::trace!(triangle = ?self.triangle, "triangle rejected by projection");
            return;
        };
        let paint = Paint::shaded(
            self.color,
            face_normal(&self.triangle),
            self.shader.as_ref(),
        );
        rasterize(target, &projected, &paint, self.kind, self.wireframe);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/facade.rs"]
mod tests;
