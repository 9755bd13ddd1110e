use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};

use crate::coords::{Color, DepthRange, Rect};
use crate::shader::{Location, ParameterValue, ShaderInterface};

use super::{
    AdapterInfo, BlendState, BufferId, BufferUsage, FrameStatus, FramebufferOrigin, GpuBackend,
    PrimitiveTopology, ProgramId, TextureDesc, TextureFilter, TextureId, VertexStream,
};

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    BeginFrame,
    EndFrame,
    Resize { width: u32, height: u32 },
    SetBlendState(BlendState),
    SetViewport(Rect),
    SetScissor(Option<Rect>),
    SetClearColor(Color),
    Clear,
    BindFramebuffer(Option<TextureId>),
    CreateTexture { id: TextureId, desc: TextureDesc },
    WriteTexture { id: TextureId, region: Rect, len: usize },
    SetTextureFilter { id: TextureId, filter: TextureFilter },
    DestroyTexture(TextureId),
    CreateProgram(ProgramId),
    DestroyProgram(ProgramId),
    UseProgram(ProgramId),
    SetUniform { location: Location, value: ParameterValue },
    BindTextureUnit { unit: u32, texture: TextureId },
    SetSamplerUnit { location: Location, unit: u32 },
    CreateVertexBuffer { id: BufferId, usage: BufferUsage, size: u64 },
    DestroyVertexBuffer(BufferId),
    WriteVertices { buffer: BufferId, data: Vec<u8> },
    BindVertexStreams { buffer: BufferId, stride: u32, streams: Vec<VertexStream> },
    Draw { buffer: BufferId, topology: PrimitiveTopology, first_vertex: u32, vertex_count: u32 },
    ReadPixels(Rect),
}

/// Headless backend that records every call.
///
/// Defaults to OpenGL conventions (bottom-left framebuffer origin, `[-1, 1]`
/// clip depth) and a 1280x720 drawable.
#[derive(Debug)]
pub struct RecordingBackend {
    commands: Vec<GpuCommand>,
    next_id: u32,
    origin: FramebufferOrigin,
    depth: DepthRange,
    size: (u32, u32),

    textures: HashMap<TextureId, TextureDesc>,
    programs: HashSet<ProgramId>,
    buffers: HashMap<BufferId, u64>,

    fail_next_program: bool,
    fail_next_buffer: bool,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            next_id: 1,
            origin: FramebufferOrigin::BottomLeft,
            depth: DepthRange::NegativeOneToOne,
            size: (width, height),
            textures: HashMap::new(),
            programs: HashSet::new(),
            buffers: HashMap::new(),
            fail_next_program: false,
            fail_next_buffer: false,
        }
    }

    pub fn with_origin(mut self, origin: FramebufferOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_depth_range(mut self, depth: DepthRange) -> Self {
        self.depth = depth;
        self
    }

    /// Makes the next `create_program` call fail.
    pub fn fail_next_program(&mut self) {
        self.fail_next_program = true;
    }

    /// Makes the next `create_vertex_buffer` call fail.
    pub fn fail_next_buffer(&mut self) {
        self.fail_next_buffer = true;
    }

    pub fn commands(&self) -> &[GpuCommand] {
        &self.commands
    }

    /// Returns and forgets the recorded commands.
    pub fn take_commands(&mut self) -> Vec<GpuCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of live resources (textures, programs, vertex buffers).
    pub fn live_resources(&self) -> usize {
        self.textures.len() + self.programs.len() + self.buffers.len()
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GpuBackend for RecordingBackend {
    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: "recording".to_string(),
            backend: "none".to_string(),
            ..Default::default()
        }
    }

    fn framebuffer_origin(&self) -> FramebufferOrigin {
        self.origin
    }

    fn depth_range(&self) -> DepthRange {
        self.depth
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.commands.push(GpuCommand::Resize { width, height });
    }

    fn begin_frame(&mut self) -> FrameStatus {
        self.commands.push(GpuCommand::BeginFrame);
        FrameStatus::Ready
    }

    fn end_frame(&mut self) {
        self.commands.push(GpuCommand::EndFrame);
    }

    fn set_blend_state(&mut self, state: BlendState) {
        self.commands.push(GpuCommand::SetBlendState(state));
    }

    fn set_viewport(&mut self, viewport: Rect) {
        self.commands.push(GpuCommand::SetViewport(viewport));
    }

    fn set_scissor(&mut self, scissor: Option<Rect>) {
        self.commands.push(GpuCommand::SetScissor(scissor));
    }

    fn set_clear_color(&mut self, color: Color) {
        self.commands.push(GpuCommand::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.commands.push(GpuCommand::Clear);
    }

    fn bind_framebuffer(&mut self, target: Option<TextureId>) {
        self.commands.push(GpuCommand::BindFramebuffer(target));
    }

    fn create_texture(&mut self, desc: &TextureDesc, pixels: Option<&[u8]>) -> Result<TextureId> {
        if let Some(pixels) = pixels {
            let expected = desc.width as usize * desc.height as usize * 4;
            if pixels.len() < expected {
                bail!("pixel data too short: {} < {expected}", pixels.len());
            }
        }
        let id = TextureId(self.next());
        self.textures.insert(id, *desc);
        self.commands.push(GpuCommand::CreateTexture { id, desc: *desc });
        Ok(id)
    }

    fn write_texture(&mut self, id: TextureId, region: Rect, pixels: &[u8]) {
        self.commands.push(GpuCommand::WriteTexture {
            id,
            region,
            len: pixels.len(),
        });
    }

    fn set_texture_filter(&mut self, id: TextureId, filter: TextureFilter) {
        if let Some(desc) = self.textures.get_mut(&id) {
            desc.filter = filter;
        }
        self.commands.push(GpuCommand::SetTextureFilter { id, filter });
    }

    fn destroy_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
        self.commands.push(GpuCommand::DestroyTexture(id));
    }

    fn create_program(&mut self, _source: &str, _interface: &ShaderInterface) -> Result<ProgramId> {
        if std::mem::take(&mut self.fail_next_program) {
            bail!("program creation failed (requested)");
        }
        let id = ProgramId(self.next());
        self.programs.insert(id);
        self.commands.push(GpuCommand::CreateProgram(id));
        Ok(id)
    }

    fn destroy_program(&mut self, id: ProgramId) {
        self.programs.remove(&id);
        self.commands.push(GpuCommand::DestroyProgram(id));
    }

    fn use_program(&mut self, id: ProgramId) {
        self.commands.push(GpuCommand::UseProgram(id));
    }

    fn set_uniform(&mut self, location: Location, value: &ParameterValue) {
        self.commands.push(GpuCommand::SetUniform {
            location,
            value: *value,
        });
    }

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId) {
        self.commands.push(GpuCommand::BindTextureUnit { unit, texture });
    }

    fn set_sampler_unit(&mut self, location: Location, unit: u32) {
        self.commands.push(GpuCommand::SetSamplerUnit { location, unit });
    }

    fn create_vertex_buffer(&mut self, usage: BufferUsage, size: u64) -> Result<BufferId> {
        if std::mem::take(&mut self.fail_next_buffer) {
            bail!("vertex buffer creation failed (requested)");
        }
        let id = BufferId(self.next());
        self.buffers.insert(id, size);
        self.commands.push(GpuCommand::CreateVertexBuffer { id, usage, size });
        Ok(id)
    }

    fn destroy_vertex_buffer(&mut self, id: BufferId) {
        self.buffers.remove(&id);
        self.commands.push(GpuCommand::DestroyVertexBuffer(id));
    }

    fn write_vertices(&mut self, buffer: BufferId, data: &[u8]) {
        self.commands.push(GpuCommand::WriteVertices {
            buffer,
            data: data.to_vec(),
        });
    }

    fn bind_vertex_streams(&mut self, buffer: BufferId, stride: u32, streams: &[VertexStream]) {
        self.commands.push(GpuCommand::BindVertexStreams {
            buffer,
            stride,
            streams: streams.to_vec(),
        });
    }

    fn draw(
        &mut self,
        buffer: BufferId,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) {
        self.commands.push(GpuCommand::Draw {
            buffer,
            topology,
            first_vertex,
            vertex_count,
        });
    }

    fn read_pixels(&mut self, region: Rect) -> Result<Vec<u8>> {
        self.commands.push(GpuCommand::ReadPixels(region));
        let len = region.width.max(0) as usize * region.height.max(0) as usize * 4;
        Ok(vec![0; len])
    }
}
