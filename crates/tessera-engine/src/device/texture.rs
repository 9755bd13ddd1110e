use crate::backend::{TextureFilter, TextureId};

slotmap::new_key_type! {
    /// Handle to a texture owned by a [`super::GraphicsDevice`].
    pub struct TextureHandle;
}

/// How a texture may be used.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TextureKind {
    /// Sampled only.
    #[default]
    Normal,
    /// Sampled, and bindable as a framebuffer.
    RenderTarget,
}

/// Texture metadata tracked by the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Texture {
    pub(super) id: TextureId,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) filter: TextureFilter,
    pub(super) kind: TextureKind,
}

impl Texture {
    /// Backend identifier used for parameter binding.
    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    #[inline]
    pub fn kind(&self) -> TextureKind {
        self.kind
    }
}
