use core::ops::Mul;

/// Clip-space depth convention of a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DepthRange {
    /// OpenGL: `z` in `[-1, 1]`.
    NegativeOneToOne,
    /// wgpu / Vulkan / Metal / D3D: `z` in `[0, 1]`.
    ZeroToOne,
}

/// 4x4 matrix, column-major (`m[column * 4 + row]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    #[inline]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self(m)
    }

    #[inline]
    pub const fn to_cols_array(self) -> [f32; 16] {
        self.0
    }

    /// Translation by `(x, y, 0)`.
    pub fn from_translation(x: f32, y: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.0[12] = x;
        m.0[13] = y;
        m
    }

    /// Off-center orthographic projection.
    ///
    /// `bottom`/`top` may be swapped by the caller to flip the Y axis.
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        depth: DepthRange,
    ) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fn_ = 1.0 / (far - near);

        let mut m = [0.0f32; 16];
        m[0] = 2.0 * rl;
        m[5] = 2.0 * tb;
        m[12] = -(right + left) * rl;
        m[13] = -(top + bottom) * tb;
        m[15] = 1.0;

        match depth {
            DepthRange::NegativeOneToOne => {
                m[10] = -2.0 * fn_;
                m[14] = -(far + near) * fn_;
            }
            DepthRange::ZeroToOne => {
                m[10] = -fn_;
                m[14] = -near * fn_;
            }
        }

        Self(m)
    }

    /// Transforms a point `(x, y, 0, 1)` and returns clip-space `(x, y, z, w)`.
    pub fn transform_point(&self, x: f32, y: f32) -> [f32; 4] {
        let m = &self.0;
        [
            m[0] * x + m[4] * y + m[12],
            m[1] * x + m[5] * y + m[13],
            m[2] * x + m[6] * y + m[14],
            m[3] * x + m[7] * y + m[15],
        ]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// `self * rhs`: `rhs` is applied first.
    fn mul(self, rhs: Mat4) -> Mat4 {
        let a = &self.0;
        let b = &rhs.0;
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
            }
        }
        Mat4(out)
    }
}
