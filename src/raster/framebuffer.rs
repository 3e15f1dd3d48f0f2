//! Color + depth planes with per-pixel locking.
//!
//! Planes are stored as atomics so any number of pool workers can hold `&FrameBuffer` at
//! once. Each pixel's color/depth pair only changes while its [`PixelLock`] is held.
//!
//! Depth test: a write commits when `depth <= stored`. Among equal depths the last writer
//! wins, so the result for ties depends on submission order.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::foundation::core::{Frame, MAX_DEPTH};
use crate::threading::pixel_lock::PixelLock;

pub struct FrameBuffer {
    width: u32,
    height: u32,
    color: Vec<AtomicU32>,
    /// `f32` bit patterns.
    depth: Vec<AtomicU32>,
    locks: Vec<PixelLock>,
    cleared: AtomicBool,
}

impl FrameBuffer {
    /// Allocates a buffer already cleared to `clear_color`.
    pub fn new(width: u32, height: u32, clear_color: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            color: (0..len).map(|_| AtomicU32::new(clear_color)).collect(),
            depth: (0..len).map(|_| AtomicU32::new(MAX_DEPTH.to_bits())).collect(),
            locks: (0..len).map(|_| PixelLock::new()).collect(),
            cleared: AtomicBool::new(true),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.color.len()
    }

    /// Row stride of the color plane in bytes.
    pub fn stride_bytes(&self) -> usize {
        self.width as usize * std::mem::size_of::<u32>()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y)
            .map(|idx| self.color[idx].load(Ordering::Relaxed))
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y)
            .map(|idx| f32::from_bits(self.depth[idx].load(Ordering::Relaxed)))
    }

    /// True when no write has landed since the last completed clear.
    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::Acquire)
    }

    pub(crate) fn mark_dirty(&self) {
        if self.cleared.load(Ordering::Relaxed) {
            self.cleared.store(false, Ordering::Release);
        }
    }

    /// Resets every pixel to `color` at [`MAX_DEPTH`], then raises the cleared flag.
    ///
    /// Writers must be quiescent; `Render::clear` joins its pool before calling this.
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn clear(&self, color: u32) {
        let far = MAX_DEPTH.to_bits();
        for ((c, d), lock) in self.color.iter().zip(&self.depth).zip(&self.locks) {
            lock.with_lock(|| {
                c.store(color, Ordering::Relaxed);
                d.store(far, Ordering::Relaxed);
            });
        }
        self.cleared.store(true, Ordering::Release);
    }

    /// Depth-tested write of one pixel at screen position `(x, y)`.
    ///
    /// Positions outside `[0, width) x [0, height)` are dropped. Returns whether the write
    /// was committed.
    #[inline]
    pub fn write_pixel(&self, x: f32, y: f32, depth: f32, color: u32) -> bool {
        if !(x >= 0.0 && y >= 0.0) || depth.is_nan() {
            return false;
        }
        if x >= self.width as f32 || y >= self.height as f32 {
            return false;
        }
        let Some(idx) = self.index(x as u32, y as u32) else {
            return false;
        };

        // Unlocked pre-check; only strictly farther writes are skipped so ties still land.
        if depth > f32::from_bits(self.depth[idx].load(Ordering::Relaxed)) {
            return false;
        }

        // Dirty before the pixel is released.
        self.locks[idx].with_lock(|| {
            let current = f32::from_bits(self.depth[idx].load(Ordering::Relaxed));
            if depth <= current {
                self.color[idx].store(color, Ordering::Relaxed);
                self.depth[idx].store(depth.to_bits(), Ordering::Relaxed);
                self.mark_dirty();
                true
            } else {
                false
            }
        })
    }

    pub fn snapshot(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            pixels: self
                .color
                .iter()
                .map(|c| c.load(Ordering::Relaxed))
                .collect(),
        }
    }

    /// Start of the packed color plane, row-major with [`FrameBuffer::stride_bytes`] stride.
    ///
    /// `AtomicU32` shares `u32`'s in-memory representation, so a display collaborator can
    /// blit straight from this pointer while no draw or clear is running.
    pub fn as_ptr(&self) -> *const u32 {
        self.color.as_ptr().cast::<u32>()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cleared", &self.is_cleared())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/framebuffer.rs"]
mod tests;
