use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use crate::backend::{BufferId, BufferUsage, GpuBackend, VertexFormat, VertexStream};
use crate::coords::{Color, Vec2};

use super::{GraphicsDevice, ProgramHandle};

/// Batched vertex: position, texture coordinate, straight RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex2d {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Vertex2d {
    pub const STRIDE: u32 = std::mem::size_of::<Vertex2d>() as u32;

    /// Attribute name, byte offset and format, matched against program inputs.
    pub const STREAMS: [(&'static str, u32, VertexFormat); 3] = [
        ("position", 0, VertexFormat::Float32x2),
        ("texcoord", 8, VertexFormat::Float32x2),
        ("color", 16, VertexFormat::Float32x4),
    ];

    #[inline]
    pub const fn new(position: Vec2, uv: Vec2, color: Color) -> Self {
        Self {
            x: position.x,
            y: position.y,
            u: uv.x,
            v: uv.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }

    #[inline]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub const fn uv(&self) -> Vec2 {
        Vec2::new(self.u, self.v)
    }
}

/// Fixed-capacity GPU vertex buffer.
///
/// Never resized; uploads overwrite a prefix.
#[derive(Debug)]
pub struct VertexBuffer {
    id: BufferId,
    usage: BufferUsage,
    capacity: u32,
}

impl VertexBuffer {
    pub fn create<B: GpuBackend>(
        device: &mut GraphicsDevice<B>,
        usage: BufferUsage,
        max_vertices: u32,
    ) -> Result<Self> {
        assert!(max_vertices > 0, "vertex buffer capacity must be positive");

        let size = max_vertices as u64 * Vertex2d::STRIDE as u64;
        let id = device
            .backend_mut()
            .create_vertex_buffer(usage, size)
            .with_context(|| format!("failed to create vertex buffer for {max_vertices} vertices"))?;

        Ok(Self {
            id,
            usage,
            capacity: max_vertices,
        })
    }

    pub fn destroy<B: GpuBackend>(self, device: &mut GraphicsDevice<B>) {
        device.backend_mut().destroy_vertex_buffer(self.id);
    }

    #[inline]
    pub fn id(&self) -> BufferId {
        self.id
    }

    #[inline]
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Uploads `vertices` and binds the streams `program` consumes.
    ///
    /// Attributes the program does not declare are not bound.
    pub fn set_vertex_data<B: GpuBackend>(
        &self,
        device: &mut GraphicsDevice<B>,
        program: ProgramHandle,
        vertices: &[Vertex2d],
    ) {
        assert!(
            vertices.len() <= self.capacity as usize,
            "{} vertices exceed buffer capacity {}",
            vertices.len(),
            self.capacity
        );

        let Some(shader) = device.shader_program(program) else {
            log::warn!("set_vertex_data: stale shader program handle");
            return;
        };

        let streams: Vec<VertexStream> = Vertex2d::STREAMS
            .iter()
            .filter_map(|&(name, offset, format)| {
                let location = shader.parameters().attribute_location(name)?;
                Some(VertexStream {
                    location: location.0,
                    offset,
                    format,
                })
            })
            .collect();

        let backend = device.backend_mut();
        backend.write_vertices(self.id, bytemuck::cast_slice(vertices));
        backend.bind_vertex_streams(self.id, Vertex2d::STRIDE, &streams);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_32_bytes() {
        assert_eq!(Vertex2d::STRIDE, 32);
        assert_eq!(std::mem::offset_of!(Vertex2d, u), 8);
        assert_eq!(std::mem::offset_of!(Vertex2d, r), 16);
    }
}
