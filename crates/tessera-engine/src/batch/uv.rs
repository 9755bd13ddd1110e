bitflags::bitflags! {
    /// Texture coordinate transforms applied to a batched quad.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct UvMode: u32 {
        /// Source region is stored rotated 90° clockwise (texture packer layout).
        const ROTATED_CW90 = 1 << 1;
        const FLIP_HORIZONTAL = 1 << 2;
        const FLIP_VERTICAL = 1 << 3;
    }
}

impl UvMode {
    pub const NORMAL: UvMode = UvMode::empty();
}
