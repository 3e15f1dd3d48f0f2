//! Example geometry: the axis-aligned cube spanning `[-1, 1]` on every axis.

use glam::{Mat4, Vec3};

use crate::foundation::core::{Triangle, Vec4};

/// Corner signs walked around a face, as `(walk0, walk1)`.
const FACE_WALK: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// `(walk0, walk1, fixed)` axis triples, one per face pair.
const FACE_AXES: [(usize, usize, usize); 3] = [(0, 1, 2), (0, 2, 1), (1, 2, 0)];

/// 12 triangles, two per face, each face split along the diagonal from its first corner.
///
/// Vertices carry `w = 1`. The mesh is closed: every edge is shared by exactly two triangles.
pub fn generate_cube_triangles() -> Vec<Triangle> {
    let mut out = Vec::with_capacity(12);
    for (walk0, walk1, fixed) in FACE_AXES {
        for side in [-1.0f32, 1.0] {
            let corners = FACE_WALK.map(|(a, b)| {
                let mut v = Vec4::W;
                v[walk0] = a;
                v[walk1] = b;
                v[fixed] = side;
                v
            });
            out.push([corners[0], corners[1], corners[2]]);
            out.push([corners[0], corners[2], corners[3]]);
        }
    }
    out
}

/// Rotation by `angle` radians about the normalized `(1, 1, 1)` axis.
pub fn rotation_about_diagonal(angle: f32) -> Mat4 {
    Mat4::from_axis_angle(Vec3::ONE.normalize(), angle)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cube.rs"]
mod tests;
