//! Triangle fills over an already projected triangle.
//!
//! Both fill algorithms finish by stroking the three outline edges with the same line
//! primitive wireframe mode uses, so a filled triangle always covers its own wireframe.

use crate::foundation::core::{Triangle, Vec3, Vec4};
use crate::raster::framebuffer::FrameBuffer;
use crate::raster::line::draw_line;
use crate::render::options::{PixelShader, PixelShaderInput, RasterizerKind};

/// Barycentric grids never go finer than this many steps per edge.
const MAX_PARAM_STEPS: u32 = 8192;

/// Color resolution for one triangle: flat color, optionally overridden per pixel.
#[derive(Clone, Copy)]
pub struct Paint<'a> {
    pub color: u32,
    pub normal: Vec3,
    pub shader: Option<&'a PixelShader>,
}

impl<'a> Paint<'a> {
    pub fn flat(color: u32) -> Self {
        Self {
            color,
            normal: Vec3::ZERO,
            shader: None,
        }
    }

    pub fn shaded(color: u32, normal: Vec3, shader: Option<&'a PixelShader>) -> Self {
        Self {
            color,
            normal,
            shader,
        }
    }

    #[inline]
    fn resolve(&self, p: Vec4, width: u32, height: u32) -> u32 {
        match self.shader {
            Some(shader) => shader(PixelShaderInput {
                color: self.color,
                normal: self.normal,
                projected_pixel: p.truncate().truncate(),
                width,
                height,
            }),
            None => self.color,
        }
    }
}

/// Flat face normal from view-space vertices; zero for degenerate triangles.
pub fn face_normal(view: &Triangle) -> Vec3 {
    let e1 = (view[1] - view[0]).truncate();
    let e2 = (view[2] - view[0]).truncate();
    e1.cross(e2).normalize_or_zero()
}

/// Dispatches one projected triangle to the selected algorithm.
pub fn rasterize(
    fb: &FrameBuffer,
    projected: &Triangle,
    paint: &Paint<'_>,
    kind: RasterizerKind,
    wireframe: bool,
) {
    if wireframe {
        draw_wireframe(fb, projected, paint.color);
        return;
    }
    match kind {
        RasterizerKind::Barycentric => fill_barycentric(fb, projected, paint),
        RasterizerKind::ScanlineLike => fill_scanline(fb, projected, paint),
    }
}

/// Three edges in flat `color`; no shader.
pub fn draw_wireframe(fb: &FrameBuffer, tri: &Triangle, color: u32) {
    stroke_outline(fb, tri, &Paint::flat(color));
}

#[inline]
fn plot(fb: &FrameBuffer, p: Vec4, paint: &Paint<'_>) {
    let color = paint.resolve(p, fb.width(), fb.height());
    fb.write_pixel(p.x, p.y, p.z, color);
}

fn line(fb: &FrameBuffer, a: Vec4, b: Vec4, paint: &Paint<'_>) {
    draw_line(a, b, fb.width(), fb.height(), |p| plot(fb, p, paint));
}

fn stroke_outline(fb: &FrameBuffer, tri: &Triangle, paint: &Paint<'_>) {
    line(fb, tri[0], tri[1], paint);
    line(fb, tri[1], tri[2], paint);
    line(fb, tri[2], tri[0], paint);
}

fn all_finite(tri: &Triangle) -> bool {
    tri.iter().all(|v| v.is_finite())
}

fn misses_buffer(fb: &FrameBuffer, tri: &Triangle) -> bool {
    let min_x = tri[0].x.min(tri[1].x).min(tri[2].x);
    let max_x = tri[0].x.max(tri[1].x).max(tri[2].x);
    let min_y = tri[0].y.min(tri[1].y).min(tri[2].y);
    let max_y = tri[0].y.max(tri[1].y).max(tri[2].y);
    max_x < 0.0 || max_y < 0.0 || min_x >= fb.width() as f32 || min_y >= fb.height() as f32
}

/// Samples the `(u, v)` parameter grid with at most half a pixel between neighbouring
/// samples along every edge direction.
pub fn fill_barycentric(fb: &FrameBuffer, tri: &Triangle, paint: &Paint<'_>) {
    if !all_finite(tri) || misses_buffer(fb, tri) {
        return;
    }

    let v0 = tri[0];
    let d01 = tri[1] - v0;
    let d02 = tri[2] - v0;
    let longest = [d01, d02, tri[2] - tri[1]]
        .iter()
        .map(|d| d.truncate().truncate().length())
        .fold(0.0f32, f32::max);

    if longest == 0.0 {
        plot(fb, v0, paint);
        return;
    }

    // step = 1 / n <= 0.5 / longest edge
    let n = ((longest * 2.0).ceil() as u32).clamp(1, MAX_PARAM_STEPS);
    let inv = 1.0 / n as f32;
    for i in 0..=n {
        let u = i as f32 * inv;
        for j in 0..=(n - i) {
            let v = j as f32 * inv;
            plot(fb, v0 + d01 * u + d02 * v, paint);
        }
    }

    stroke_outline(fb, tri, paint);
}

/// Splits at the middle vertex into flat-based halves and fills each row by row.
pub fn fill_scanline(fb: &FrameBuffer, tri: &Triangle, paint: &Paint<'_>) {
    if !all_finite(tri) || misses_buffer(fb, tri) {
        return;
    }

    let mut sorted = *tri;
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
    let [bottom, middle, top] = sorted;

    if top.y == middle.y {
        fill_flat(fb, middle, top, bottom, paint);
    } else if bottom.y == middle.y {
        fill_flat(fb, middle, bottom, top, paint);
    } else {
        let t = (middle.y - bottom.y) / (top.y - bottom.y);
        let mut other = bottom.lerp(top, t);
        other.y = middle.y;
        fill_flat(fb, middle, other, top, paint);
        fill_flat(fb, middle, other, bottom, paint);
    }

    stroke_outline(fb, tri, paint);
}

/// Fills the triangle with horizontal base `b0`-`b1`, one span per pixel row whose centre
/// lies between the base and `apex`.
///
/// A half shorter than half a pixel draws only its base; the caller's outline stroke
/// covers the two slanted edges.
fn fill_flat(fb: &FrameBuffer, b0: Vec4, b1: Vec4, apex: Vec4, paint: &Paint<'_>) {
    let dy = apex.y - b0.y;
    if dy.abs() < 0.5 {
        line(fb, b0, b1, paint);
        return;
    }

    let (y_lo, y_hi) = (b0.y.min(apex.y), b0.y.max(apex.y));
    let first = (y_lo - 0.5).ceil().max(0.0);
    let last = (y_hi - 0.5).floor().min(fb.height() as f32 - 1.0);
    if !(first <= last) {
        return;
    }

    for row in first as u32..=last as u32 {
        let centre = row as f32 + 0.5;
        let t = ((centre - b0.y) / dy).clamp(0.0, 1.0);
        let mut left = b0 + (apex - b0) * t;
        let mut right = b1 + (apex - b1) * t;
        left.y = centre;
        right.y = centre;
        line(fb, left, right, paint);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/triangle.rs"]
mod tests;
