//! Per-pixel spin lock.
//!
//! A framebuffer allocates one of these per pixel, so it has to stay a single byte with no
//! OS involvement. Critical sections are a handful of loads and stores.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct PixelLock {
    locked: AtomicBool,
}

impl PixelLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Acquire the lock
    #[inline]
    pub fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
    }

    /// Try to acquire the lock (non-blocking)
    #[inline]
    pub fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Release the lock
    #[inline]
    pub fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// Runs `f` while holding the lock. The lock is released even if `f` unwinds.
    #[inline]
    pub fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        self.lock();
        let _guard = Unlock(self);
        f()
    }
}

struct Unlock<'a>(&'a PixelLock);

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        self.0.unlock();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/threading/pixel_lock.rs"]
mod tests;
