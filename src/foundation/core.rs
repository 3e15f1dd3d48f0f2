pub use glam::{Vec2, Vec3, Vec4};

/// Depth written for geometry sitting on the camera plane.
pub const DEFAULT_DEPTH: f32 = 0.0;
/// Normalized depth of the far plane; cleared pixels hold this value.
pub const MAX_DEPTH: f32 = 1.0;

/// Exactly three homogeneous vertices.
pub type Triangle = [Vec4; 3];

pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

/// Packed `0xAARRGGBB` color helpers.
pub struct Color;

impl Color {
    pub const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;
    pub const OPAQUE_BLACK: u32 = 0xFF00_0000;

    pub fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
        (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> u32 {
        Self::pack(r, g, b, 0xFF)
    }

    /// Unpacks to straight `[r, g, b, a]`.
    pub fn to_rgba8(color: u32) -> [u8; 4] {
        [
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
            (color >> 24) as u8,
        ]
    }

    /// Multiplies the rgb channels by `factor` (clamped to `0..=1`), alpha untouched.
    pub fn scale_rgb(color: u32, factor: f32) -> u32 {
        let f = factor.clamp(0.0, 1.0);
        let [r, g, b, a] = Self::to_rgba8(color);
        let s = |c: u8| (f32::from(c) * f).round() as u8;
        Self::pack(s(r), s(g), s(b), a)
    }
}

/// Owned copy of one framebuffer's color plane, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Straight RGBA8 bytes, ready for `image::save_buffer`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &px in &self.pixels {
            out.extend_from_slice(&Color::to_rgba8(px));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
