//! Graphics device: cached GPU state and resource ownership.
//!
//! This module is responsible for:
//! - deduplicating blend, clear-color and scissor transitions
//! - render-target binding and viewport bookkeeping
//! - texture, shader program and vertex buffer lifetimes

mod blend;
mod graphics_device;
mod texture;
mod vertex;

pub use blend::BlendMode;
pub use graphics_device::GraphicsDevice;
pub use texture::{Texture, TextureHandle, TextureKind};
pub use vertex::{Vertex2d, VertexBuffer};

slotmap::new_key_type! {
    /// Handle to a shader program owned by a [`GraphicsDevice`].
    pub struct ProgramHandle;
}
