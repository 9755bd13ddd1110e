/// Axis-aligned rectangle in integer pixels.
///
/// Used for viewports, scissor rectangles, texture source regions and
/// readback regions. Width/height are expected to be non-negative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Mirrors the rectangle vertically inside a surface of `surface_height`.
    ///
    /// Converts between top-left and bottom-left origins.
    #[inline]
    pub const fn flip_y(self, surface_height: i32) -> Self {
        Self::new(self.x, surface_height - self.y - self.height, self.width, self.height)
    }

    /// Clamps to `[0, width) x [0, height)` and returns `(x, y, w, h)`.
    ///
    /// Returns `None` if nothing of the rectangle is left.
    pub fn clamp_to(self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let w = width as i64;
        let h = height as i64;

        let x0 = (self.x as i64).clamp(0, w);
        let y0 = (self.y as i64).clamp(0, h);
        let x1 = (self.right() as i64).clamp(0, w);
        let y1 = (self.bottom() as i64).clamp(0, h);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}
