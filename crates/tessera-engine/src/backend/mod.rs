//! GPU backend abstraction.
//!
//! The device and batching layers never talk to a graphics API directly.
//! Everything goes through [`GpuBackend`], a small immediate-mode contract:
//! state setters, resource create/destroy pairs and a non-indexed draw call.
//!
//! Implementations:
//! - [`gpu::WgpuBackend`]: wgpu device + window surface.
//! - [`RecordingBackend`]: headless; records every call as a [`GpuCommand`].

pub mod gpu;
mod recording;
mod types;

use anyhow::Result;

use crate::coords::{Color, DepthRange, Rect};
use crate::shader::{Location, ParameterValue, ShaderInterface};

pub use recording::{GpuCommand, RecordingBackend};
pub use types::{
    AdapterInfo, BlendComponent, BlendFactor, BlendOperation, BlendState, BufferId, BufferUsage,
    FrameStatus, FramebufferOrigin, PrimitiveTopology, ProgramId, TextureDesc, TextureFilter,
    TextureId, VertexFormat, VertexStream,
};

/// Immediate-mode GPU contract consumed by [`crate::device::GraphicsDevice`].
///
/// State set through this trait persists until changed, like a classic
/// graphics context. Identifiers are only meaningful to the backend that
/// issued them.
pub trait GpuBackend {
    // ── conventions ───────────────────────────────────────────────────────

    fn adapter_info(&self) -> AdapterInfo;

    fn framebuffer_origin(&self) -> FramebufferOrigin;

    fn depth_range(&self) -> DepthRange;

    /// Size of the default (on-screen) framebuffer in pixels.
    fn drawable_size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    // ── frame ─────────────────────────────────────────────────────────────

    fn begin_frame(&mut self) -> FrameStatus;

    fn end_frame(&mut self);

    // ── fixed-function state ──────────────────────────────────────────────

    fn set_blend_state(&mut self, state: BlendState);

    fn set_viewport(&mut self, viewport: Rect);

    /// `None` disables scissoring. Rectangles are in framebuffer space.
    fn set_scissor(&mut self, scissor: Option<Rect>);

    fn set_clear_color(&mut self, color: Color);

    /// Clears the whole bound framebuffer to the current clear color.
    fn clear(&mut self);

    /// `None` binds the default framebuffer.
    fn bind_framebuffer(&mut self, target: Option<TextureId>);

    // ── textures ──────────────────────────────────────────────────────────

    /// `pixels`, when given, is tightly packed RGBA8 covering the whole texture.
    fn create_texture(&mut self, desc: &TextureDesc, pixels: Option<&[u8]>) -> Result<TextureId>;

    fn write_texture(&mut self, texture: TextureId, region: Rect, pixels: &[u8]);

    fn set_texture_filter(&mut self, texture: TextureId, filter: TextureFilter);

    fn destroy_texture(&mut self, texture: TextureId);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&mut self, source: &str, interface: &ShaderInterface) -> Result<ProgramId>;

    fn destroy_program(&mut self, program: ProgramId);

    fn use_program(&mut self, program: ProgramId);

    /// Writes a non-texture uniform of the program in use.
    fn set_uniform(&mut self, location: Location, value: &ParameterValue);

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId);

    /// Points a texture binding of the program in use at a texture unit.
    fn set_sampler_unit(&mut self, location: Location, unit: u32);

    // ── vertex buffers ────────────────────────────────────────────────────

    fn create_vertex_buffer(&mut self, usage: BufferUsage, size: u64) -> Result<BufferId>;

    fn destroy_vertex_buffer(&mut self, buffer: BufferId);

    /// Overwrites the prefix of `buffer` with `data`.
    fn write_vertices(&mut self, buffer: BufferId, data: &[u8]);

    fn bind_vertex_streams(&mut self, buffer: BufferId, stride: u32, streams: &[VertexStream]);

    fn draw(
        &mut self,
        buffer: BufferId,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    );

    // ── readback ──────────────────────────────────────────────────────────

    /// Reads RGBA8 pixels of the bound framebuffer, rows in framebuffer order.
    fn read_pixels(&mut self, region: Rect) -> Result<Vec<u8>>;
}
