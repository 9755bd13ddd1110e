//! Quad geometry: texture coordinates, corner placement and emission order.

use crate::coords::{Color, Rect, Vec2};
use crate::device::Vertex2d;

use super::UvMode;

/// Corner indices emitted for one quad (two counter-clockwise triangles).
pub const QUAD_EMIT_ORDER: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Per-quad parameters of [`super::BatchEngine::batch_quad`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadParams {
    /// Texel region of the bound texture. `None` selects the whole texture.
    pub source: Option<Rect>,
    pub position: Vec2,
    /// Radians, clockwise in a Y-down space.
    pub rotation: f32,
    /// Multiplies the source size.
    pub scale: Vec2,
    /// Pivot in normalized quad space; `(0.5, 0.5)` is the center.
    pub origin: Vec2,
    pub uv_mode: UvMode,
    /// `None` draws opaque white.
    pub color: Option<Color>,
}

impl Default for QuadParams {
    fn default() -> Self {
        Self {
            source: None,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
            uv_mode: UvMode::NORMAL,
            color: None,
        }
    }
}

/// Texture coordinates of the four corners (top-left, top-right,
/// bottom-right, bottom-left of the destination quad).
pub fn quad_uvs(source: Rect, texture_size: (u32, u32), mode: UvMode) -> [Vec2; 4] {
    let tw = texture_size.0 as f32;
    let th = texture_size.1 as f32;

    let x = source.x as f32;
    let y = source.y as f32;
    let w = source.width as f32;
    let h = source.height as f32;

    let mut uvs = if mode.contains(UvMode::ROTATED_CW90) {
        [
            Vec2::new((x + h) / tw, y / th),
            Vec2::new((x + h) / tw, (y + w) / th),
            Vec2::new(x / tw, (y + w) / th),
            Vec2::new(x / tw, y / th),
        ]
    } else {
        [
            Vec2::new(x / tw, y / th),
            Vec2::new((x + w) / tw, y / th),
            Vec2::new((x + w) / tw, (y + h) / th),
            Vec2::new(x / tw, (y + h) / th),
        ]
    };

    if mode.contains(UvMode::FLIP_HORIZONTAL) {
        uvs.swap(0, 1);
        uvs.swap(2, 3);
    }
    if mode.contains(UvMode::FLIP_VERTICAL) {
        uvs.swap(0, 3);
        uvs.swap(1, 2);
    }

    uvs
}

/// Corner positions of a `size` quad pivoting on `origin`, rotated by
/// `rotation` and moved to `position`.
pub fn quad_corners(position: Vec2, size: Vec2, origin: Vec2, rotation: f32) -> [Vec2; 4] {
    let (sin, cos) = rotation.sin_cos();

    let left = -origin.x * size.x;
    let top = -origin.y * size.y;
    let right = (1.0 - origin.x) * size.x;
    let bottom = (1.0 - origin.y) * size.y;

    [
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(right, bottom),
        Vec2::new(left, bottom),
    ]
    .map(|corner| corner.rotate(sin, cos) + position)
}

/// Expands four corners into the six vertices of two triangles.
pub fn quad_vertices(corners: [Vec2; 4], uvs: [Vec2; 4], color: Color) -> [Vertex2d; 6] {
    QUAD_EMIT_ORDER.map(|i| Vertex2d::new(corners[i], uvs[i], color))
}
