use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::backend::{
    AdapterInfo, BlendState, BufferId, BufferUsage, FrameStatus, FramebufferOrigin, GpuBackend,
    PrimitiveTopology, ProgramId, TextureDesc, TextureFilter, TextureId, VertexStream,
};
use crate::coords::{Color, DepthRange, Rect};
use crate::device::BlendMode;
use crate::shader::{Location, ParameterValue, ShaderInterface};

use super::frame::GpuFrame;
use super::pipeline::{PipelineKey, PipelineSource, create_pipeline};
use super::readback;
use super::resources::{
    GpuBuffer, GpuProgram, GpuTexture, TEXTURE_FORMAT, create_sampler, write_region,
};
use super::{Gpu, GpuInit};

/// [`GpuBackend`] on top of wgpu and a window surface.
///
/// Emulates a classic immediate-mode context: state set through the trait is
/// latched and baked into a cached pipeline at draw time. Every clear and draw
/// is recorded and submitted on its own so uniform writes between draws are
/// observed in order.
pub struct WgpuBackend {
    gpu: Gpu,
    frame: Option<GpuFrame>,
    next_id: u32,

    textures: HashMap<TextureId, GpuTexture>,
    programs: HashMap<ProgramId, GpuProgram>,
    buffers: HashMap<BufferId, GpuBuffer>,
    fallback: GpuTexture,

    blend: BlendState,
    viewport: Rect,
    scissor: Option<Rect>,
    clear_color: wgpu::Color,
    target: Option<TextureId>,
    program: Option<ProgramId>,
    /// Texture unit → texture.
    units: HashMap<u32, TextureId>,
}

impl WgpuBackend {
    pub fn new(gpu: Gpu) -> Self {
        let fallback = GpuTexture::fallback(gpu.device(), gpu.queue());
        let size = gpu.size();

        Self {
            gpu,
            frame: None,
            next_id: 1,
            textures: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            fallback,
            blend: BlendMode::PremultipliedAlpha.state(),
            viewport: Rect::from_size(size.width, size.height),
            scissor: None,
            clear_color: wgpu::Color::BLACK,
            target: None,
            program: None,
            units: HashMap::new(),
        }
    }

    /// Creates the GPU context for `window` and wraps it.
    pub fn for_window(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        let gpu = pollster::block_on(Gpu::new(window, size, init))
            .context("GPU initialization failed")?;
        Ok(Self::new(gpu))
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// View, format and size of the framebuffer draws currently land in.
    fn target_view(&self) -> Option<(&wgpu::TextureView, wgpu::TextureFormat, (u32, u32))> {
        match self.target {
            Some(id) => self
                .textures
                .get(&id)
                .map(|t| (&t.view, TEXTURE_FORMAT, (t.width, t.height))),
            None => self.frame.as_ref().map(|f| {
                let texture = &f.surface_texture.texture;
                (
                    &f.view,
                    self.gpu.surface_format(),
                    (texture.width(), texture.height()),
                )
            }),
        }
    }

    /// Texture bound to the unit a program's texture binding points at.
    fn texture_for_binding(&self, program: &GpuProgram, binding: u32) -> &GpuTexture {
        let texture = program
            .sampler_units
            .get(&binding)
            .and_then(|unit| self.units.get(unit))
            .and_then(|id| {
                if self.target == Some(*id) {
                    log::warn!("render target {id:?} is sampled while bound; using a blank texture");
                    return None;
                }
                self.textures.get(id)
            });
        texture.unwrap_or(&self.fallback)
    }

    fn create_bind_group(&self, program: &GpuProgram) -> wgpu::BindGroup {
        let mut entries: Vec<wgpu::BindGroupEntry<'_>> = Vec::new();

        for (&binding, buffer) in &program.uniforms {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: buffer.as_entire_binding(),
            });
        }

        for &binding in &program.textures {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(
                    &self.texture_for_binding(program, binding).view,
                ),
            });
        }

        // A sampler follows its texture: `@binding(n)` texture, `@binding(n + 1)` sampler.
        for &binding in &program.samplers {
            let sampler = match binding.checked_sub(1) {
                Some(texture) if program.textures.contains(&texture) => {
                    &self.texture_for_binding(program, texture).sampler
                }
                _ => &self.fallback.sampler,
            };
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::Sampler(sampler),
            });
        }

        self.gpu
            .device()
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("tessera bind group"),
                layout: &program.bind_group_layout,
                entries: &entries,
            })
    }
}

impl GpuBackend for WgpuBackend {
    fn adapter_info(&self) -> AdapterInfo {
        let info = self.gpu.adapter_info();
        AdapterInfo {
            name: info.name,
            backend: format!("{:?}", info.backend),
            driver: info.driver,
            driver_info: info.driver_info,
        }
    }

    fn framebuffer_origin(&self) -> FramebufferOrigin {
        FramebufferOrigin::TopLeft
    }

    fn depth_range(&self) -> DepthRange {
        DepthRange::ZeroToOne
    }

    fn drawable_size(&self) -> (u32, u32) {
        let size = self.gpu.size();
        (size.width, size.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(PhysicalSize::new(width, height));
    }

    // ── frame ─────────────────────────────────────────────────────────────

    fn begin_frame(&mut self) -> FrameStatus {
        if self.frame.is_some() {
            log::warn!("begin_frame called while a frame is in flight");
            return FrameStatus::Ready;
        }

        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return FrameStatus::Skip;
        }

        match self.gpu.acquire() {
            Ok(frame) => {
                self.frame = Some(frame);
                FrameStatus::Ready
            }
            Err(err) => {
                log::debug!("surface error: {err}");
                self.gpu.handle_surface_error(err).into()
            }
        }
    }

    fn end_frame(&mut self) {
        let Some(GpuFrame {
            surface_texture,
            view,
        }) = self.frame.take()
        else {
            log::warn!("end_frame called without a frame in flight");
            return;
        };

        drop(view);
        surface_texture.present();
    }

    // ── fixed-function state ──────────────────────────────────────────────

    fn set_blend_state(&mut self, state: BlendState) {
        self.blend = state;
    }

    fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    fn set_scissor(&mut self, scissor: Option<Rect>) {
        self.scissor = scissor;
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        };
    }

    fn clear(&mut self) {
        let Some((view, _, _)) = self.target_view() else {
            log::warn!("clear outside of a frame");
            return;
        };

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessera clear encoder"),
            });

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessera clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.gpu.queue().submit(Some(encoder.finish()));
    }

    fn bind_framebuffer(&mut self, target: Option<TextureId>) {
        if let Some(id) = target {
            match self.textures.get(&id) {
                Some(t) if t.render_target => {}
                Some(_) => {
                    log::warn!("texture {id:?} is not a render target");
                    return;
                }
                None => {
                    log::warn!("bind_framebuffer: unknown texture {id:?}");
                    return;
                }
            }
        }
        self.target = target;
    }

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&mut self, desc: &TextureDesc, pixels: Option<&[u8]>) -> Result<TextureId> {
        let limit = self.gpu.device().limits().max_texture_dimension_2d;
        ensure!(
            desc.width <= limit && desc.height <= limit,
            "{}x{} exceeds the maximum texture size {limit}",
            desc.width,
            desc.height
        );
        if let Some(pixels) = pixels {
            let expected = desc.width as usize * desc.height as usize * 4;
            ensure!(
                pixels.len() >= expected,
                "pixel data too short: {} < {expected}",
                pixels.len()
            );
        }

        let texture = GpuTexture::create(self.gpu.device(), self.gpu.queue(), desc, pixels);
        let id = TextureId(self.next());
        self.textures.insert(id, texture);
        Ok(id)
    }

    fn write_texture(&mut self, id: TextureId, region: Rect, pixels: &[u8]) {
        let Some(texture) = self.textures.get(&id) else {
            log::warn!("write_texture: unknown texture {id:?}");
            return;
        };
        if region.is_empty() {
            return;
        }
        write_region(
            self.gpu.queue(),
            &texture.texture,
            (region.x as u32, region.y as u32),
            (region.width as u32, region.height as u32),
            pixels,
        );
    }

    fn set_texture_filter(&mut self, id: TextureId, filter: TextureFilter) {
        let Some(texture) = self.textures.get_mut(&id) else {
            log::warn!("set_texture_filter: unknown texture {id:?}");
            return;
        };
        texture.sampler = create_sampler(self.gpu.device(), filter);
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_none() {
            return;
        }
        if self.target == Some(id) {
            self.target = None;
        }
        self.units.retain(|_, t| *t != id);
    }

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&mut self, source: &str, interface: &ShaderInterface) -> Result<ProgramId> {
        ensure!(
            !interface.vertex_entry.is_empty() && !interface.fragment_entry.is_empty(),
            "program interface is missing an entry point"
        );

        let device = self.gpu.device();
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera program"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let visibility = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let mut layout_entries = Vec::new();
        let mut uniforms = HashMap::new();
        let mut textures = Vec::new();

        for parameter in &interface.parameters {
            let binding = parameter.location.0;

            if parameter.kind.is_texture() {
                layout_entries.push(wgpu::BindGroupLayoutEntry {
                    binding,
                    visibility,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                });
                textures.push(binding);
                continue;
            }

            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });

            let size = parameter.kind.uniform_size().next_multiple_of(16);
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(parameter.name.as_str()),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            uniforms.insert(binding, buffer);
        }

        let samplers: Vec<u32> = interface.samplers.iter().map(|l| l.0).collect();
        for &binding in &samplers {
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera program bgl"),
            entries: &layout_entries,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera program layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let program = GpuProgram {
            module,
            vertex_entry: interface.vertex_entry.clone(),
            fragment_entry: interface.fragment_entry.clone(),
            bind_group_layout,
            pipeline_layout,
            uniforms,
            textures,
            samplers,
            attributes: interface.attributes.iter().map(|a| a.location.0).collect(),
            sampler_units: HashMap::new(),
            pipelines: HashMap::new(),
        };

        let id = ProgramId(self.next());
        self.programs.insert(id, program);
        Ok(id)
    }

    fn destroy_program(&mut self, id: ProgramId) {
        self.programs.remove(&id);
        if self.program == Some(id) {
            self.program = None;
        }
    }

    fn use_program(&mut self, id: ProgramId) {
        if !self.programs.contains_key(&id) {
            log::warn!("use_program: unknown program {id:?}");
            return;
        }
        self.program = Some(id);
    }

    fn set_uniform(&mut self, location: Location, value: &ParameterValue) {
        let Some(program) = self.program.and_then(|id| self.programs.get(&id)) else {
            log::warn!("set_uniform without a program in use");
            return;
        };
        let Some(buffer) = program.uniforms.get(&location.0) else {
            log::warn!("program has no uniform at binding {}", location.0);
            return;
        };
        self.gpu
            .queue()
            .write_buffer(buffer, 0, &value.uniform_bytes());
    }

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId) {
        self.units.insert(unit, texture);
    }

    fn set_sampler_unit(&mut self, location: Location, unit: u32) {
        let Some(program) = self.program.and_then(|id| self.programs.get_mut(&id)) else {
            log::warn!("set_sampler_unit without a program in use");
            return;
        };
        program.sampler_units.insert(location.0, unit);
    }

    // ── vertex buffers ────────────────────────────────────────────────────

    fn create_vertex_buffer(&mut self, usage: BufferUsage, size: u64) -> Result<BufferId> {
        ensure!(size > 0, "vertex buffer size must be positive");
        let limit = self.gpu.device().limits().max_buffer_size;
        ensure!(size <= limit, "vertex buffer of {size} bytes exceeds the limit {limit}");

        let buffer = self.gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some(match usage {
                BufferUsage::Static => "tessera static vertices",
                BufferUsage::Dynamic => "tessera dynamic vertices",
            }),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let id = BufferId(self.next());
        self.buffers.insert(
            id,
            GpuBuffer {
                buffer,
                size,
                stride: 0,
                streams: Vec::new(),
            },
        );
        Ok(id)
    }

    fn destroy_vertex_buffer(&mut self, id: BufferId) {
        self.buffers.remove(&id);
    }

    fn write_vertices(&mut self, id: BufferId, data: &[u8]) {
        let Some(buffer) = self.buffers.get(&id) else {
            log::warn!("write_vertices: unknown buffer {id:?}");
            return;
        };
        if data.len() as u64 > buffer.size {
            log::error!(
                "vertex upload of {} bytes exceeds buffer size {}",
                data.len(),
                buffer.size
            );
            return;
        }
        if data.is_empty() {
            return;
        }
        self.gpu.queue().write_buffer(&buffer.buffer, 0, data);
    }

    fn bind_vertex_streams(&mut self, id: BufferId, stride: u32, streams: &[VertexStream]) {
        let Some(buffer) = self.buffers.get_mut(&id) else {
            log::warn!("bind_vertex_streams: unknown buffer {id:?}");
            return;
        };
        buffer.stride = stride;
        buffer.streams = streams.to_vec();
    }

    fn draw(
        &mut self,
        buffer: BufferId,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) {
        if vertex_count == 0 {
            return;
        }
        let Some(program_id) = self.program else {
            log::warn!("draw without a program in use");
            return;
        };
        let Some((_, format, extent)) = self.target_view() else {
            log::warn!("draw outside of a frame");
            return;
        };
        let Some(vb) = self.buffers.get(&buffer) else {
            log::warn!("draw: unknown buffer {buffer:?}");
            return;
        };
        if vb.stride == 0 {
            log::warn!("draw: no vertex streams bound to {buffer:?}");
            return;
        }
        if (first_vertex as u64 + vertex_count as u64) * vb.stride as u64 > vb.size {
            log::error!("draw of {vertex_count} vertices overruns {buffer:?}");
            return;
        }

        let Some(viewport) = self.viewport.clamp_to(extent.0, extent.1) else {
            return;
        };
        let scissor = match self.scissor {
            Some(rect) => match rect.clamp_to(extent.0, extent.1) {
                Some(s) => Some(s),
                None => return,
            },
            None => None,
        };

        let key = PipelineKey {
            blend: self.blend,
            format,
            topology,
            stride: vb.stride,
            streams: vb.streams.clone(),
        };

        {
            let Some(program) = self.programs.get_mut(&program_id) else {
                return;
            };
            if let Some(missing) = program
                .attributes
                .iter()
                .find(|loc| !key.streams.iter().any(|s| s.location == **loc))
            {
                log::error!("draw: program input @location({missing}) has no vertex stream");
                return;
            }
            if !program.pipelines.contains_key(&key) {
                let source = PipelineSource {
                    module: &program.module,
                    layout: &program.pipeline_layout,
                    vertex_entry: &program.vertex_entry,
                    fragment_entry: &program.fragment_entry,
                };
                let pipeline = create_pipeline(self.gpu.device(), &source, &key);
                program.pipelines.insert(key.clone(), pipeline);
            }
        }

        let program = &self.programs[&program_id];
        let pipeline = &program.pipelines[&key];
        let bind_group = self.create_bind_group(program);
        let vb = &self.buffers[&buffer];
        let Some((view, _, _)) = self.target_view() else {
            return;
        };

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessera draw encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessera draw"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let (vx, vy, vw, vh) = viewport;
            rpass.set_viewport(vx as f32, vy as f32, vw as f32, vh as f32, 0.0, 1.0);
            if let Some((sx, sy, sw, sh)) = scissor {
                rpass.set_scissor_rect(sx, sy, sw, sh);
            }

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &bind_group, &[]);
            rpass.set_vertex_buffer(0, vb.buffer.slice(..));
            rpass.draw(first_vertex..first_vertex + vertex_count, 0..1);
        }

        self.gpu.queue().submit(Some(encoder.finish()));
    }

    // ── readback ──────────────────────────────────────────────────────────

    fn read_pixels(&mut self, region: Rect) -> Result<Vec<u8>> {
        let (texture, format) = match self.target {
            Some(id) => {
                let t = self
                    .textures
                    .get(&id)
                    .context("bound render target no longer exists")?;
                (&t.texture, TEXTURE_FORMAT)
            }
            None => {
                let frame = self.frame.as_ref().context("read_pixels outside of a frame")?;
                ensure!(self.gpu.surface_readable(), "surface does not support readback");
                (&frame.surface_texture.texture, self.gpu.surface_format())
            }
        };

        ensure!(
            region.x >= 0
                && region.y >= 0
                && region.right() as u32 <= texture.width()
                && region.bottom() as u32 <= texture.height(),
            "region {region:?} lies outside the {}x{} framebuffer",
            texture.width(),
            texture.height()
        );

        readback::read_rgba(
            self.gpu.device(),
            self.gpu.queue(),
            texture,
            format,
            (region.x as u32, region.y as u32),
            (region.width as u32, region.height as u32),
        )
    }
}
