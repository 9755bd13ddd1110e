use std::collections::HashMap;

use crate::backend::{TextureDesc, TextureFilter, VertexStream};

use super::pipeline::PipelineKey;

/// Format of every texture the backend creates.
pub(crate) const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub(crate) struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
    pub render_target: bool,
}

impl GpuTexture {
    pub fn create(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        desc: &TextureDesc,
        pixels: Option<&[u8]>,
    ) -> Self {
        let mut usage = wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST;
        if desc.render_target {
            usage |= wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(if desc.render_target {
                "tessera render target"
            } else {
                "tessera texture"
            }),
            size: wgpu::Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage,
            view_formats: &[],
        });

        if let Some(pixels) = pixels {
            let len = desc.width as usize * desc.height as usize * 4;
            write_region(queue, &texture, (0, 0), (desc.width, desc.height), &pixels[..len]);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, desc.filter);

        Self {
            texture,
            view,
            sampler,
            width: desc.width,
            height: desc.height,
            render_target: desc.render_target,
        }
    }

    /// Opaque white 1x1 texture bound when a program samples a unit with nothing on it.
    pub fn fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let desc = TextureDesc {
            width: 1,
            height: 1,
            filter: TextureFilter::Point,
            render_target: false,
        };
        Self::create(device, queue, &desc, Some(&[255; 4]))
    }
}

/// Uploads tightly packed RGBA8 rows at `origin`.
pub(crate) fn write_region(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    origin: (u32, u32),
    size: (u32, u32),
    pixels: &[u8],
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: origin.0,
                y: origin.1,
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(size.0 * 4),
            rows_per_image: Some(size.1),
        },
        wgpu::Extent3d {
            width: size.0,
            height: size.1,
            depth_or_array_layers: 1,
        },
    );
}

/// Clamp-to-edge sampler without mipmaps.
pub(crate) fn create_sampler(device: &wgpu::Device, filter: TextureFilter) -> wgpu::Sampler {
    let mode = match filter {
        TextureFilter::Linear => wgpu::FilterMode::Linear,
        TextureFilter::Point => wgpu::FilterMode::Nearest,
    };

    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("tessera sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: mode,
        min_filter: mode,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

/// A compiled program: module, group-0 layout and per-binding uniform storage.
pub(crate) struct GpuProgram {
    pub module: wgpu::ShaderModule,
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub pipeline_layout: wgpu::PipelineLayout,

    /// Binding → uniform buffer.
    pub uniforms: HashMap<u32, wgpu::Buffer>,
    /// Bindings of `texture_2d` resources.
    pub textures: Vec<u32>,
    /// Bindings of sampler resources.
    pub samplers: Vec<u32>,
    /// Vertex input locations the program consumes.
    pub attributes: Vec<u32>,

    /// Texture binding → texture unit.
    pub sampler_units: HashMap<u32, u32>,

    pub pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

pub(crate) struct GpuBuffer {
    pub buffer: wgpu::Buffer,
    pub size: u64,
    pub stride: u32,
    pub streams: Vec<VertexStream>,
}
