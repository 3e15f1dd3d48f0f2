//! DDA line walker.
//!
//! Steps along the dominant axis by exactly one pixel per iteration and samples every
//! column (or row) at its pixel centre, interpolating the other coordinates (including
//! depth) there. The segment is first clipped to the buffer rectangle so off-screen
//! endpoints never cost iterations.

use crate::foundation::core::{Vec2, Vec4};

/// Walks from `p0` to `p1` in screen space, calling `plot` with each sample position.
///
/// `plot` receives `(x, y, depth, 0)`, visiting pixels in order from `p0` toward `p1`.
/// The dominant coordinate of every sample is a pixel centre; the set of pixels touched
/// does not depend on which endpoint comes first. Minor coordinates may fall slightly
/// outside the buffer; the framebuffer's bounds check drops them.
pub fn draw_line<F>(p0: Vec4, p1: Vec4, width: u32, height: u32, mut plot: F)
where
    F: FnMut(Vec4),
{
    if !(p0.is_finite() && p1.is_finite()) || width == 0 || height == 0 {
        return;
    }

    let d = p1 - p0;
    let x_major = d.x.abs() >= d.y.abs();
    let major = |p: Vec4| if x_major { p.x } else { p.y };

    // Walk the canonical low-to-high segment, report in caller order.
    let forward = major(p0) <= major(p1);
    let (a, b) = if forward { (p0, p1) } else { (p1, p0) };

    let max = Vec2::new(width as f32, height as f32);
    let Some((start, end)) = clip_segment(a, b, Vec2::ZERO, max) else {
        return;
    };

    let delta = end - start;
    if delta.x.abs().max(delta.y.abs()) < 1.0 {
        plot(start);
        return;
    }

    let (from, to) = (major(start), major(end));
    let limit = (if x_major { width } else { height }) as f32 - 1.0;
    let first = from.floor().max(0.0);
    let last = to.floor().min(limit);
    if !(first <= last) {
        return;
    }
    let first = first as u32;
    let last = last as u32;

    let sample = |k: u32| {
        let centre = k as f32 + 0.5;
        let t = ((centre - from) / (to - from)).clamp(0.0, 1.0);
        let mut p = start + delta * t;
        if x_major {
            p.x = centre;
        } else {
            p.y = centre;
        }
        p
    };

    if forward {
        (first..=last).for_each(|k| plot(sample(k)));
    } else {
        (first..=last).rev().for_each(|k| plot(sample(k)));
    }
}

/// Liang-Barsky clip of the segment's xy against `[min, max]`; z follows the same parameter.
fn clip_segment(p0: Vec4, p1: Vec4, min: Vec2, max: Vec2) -> Option<(Vec4, Vec4)> {
    let d = p1 - p0;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-d.x, p0.x - min.x),
        (d.x, max.x - p0.x),
        (-d.y, p0.y - min.y),
        (d.y, max.y - p0.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let start = if t0 > 0.0 { p0 + d * t0 } else { p0 };
    let end = if t1 < 1.0 { p0 + d * t1 } else { p1 };
    Some((start, end))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/line.rs"]
mod tests;
