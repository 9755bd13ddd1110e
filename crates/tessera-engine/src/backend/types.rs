/// Opaque backend texture identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Opaque backend program identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProgramId(pub u32);

/// Opaque backend vertex buffer identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

/// Where row 0 of a framebuffer lives.
///
/// Decides whether scissor rectangles and offscreen projections need a
/// vertical flip.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FramebufferOrigin {
    /// OpenGL convention.
    BottomLeft,
    /// wgpu / Vulkan / Metal / D3D convention.
    TopLeft,
}

/// Adapter description, logged when a device is created.
#[derive(Debug, Clone, Default)]
pub struct AdapterInfo {
    pub name: String,
    pub backend: String,
    pub driver: String,
    pub driver_info: String,
}

/// Outcome of acquiring the next on-screen frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// A drawable is available until `end_frame`.
    Ready,
    /// Transient failure (timeout, surface reconfigured); skip this frame.
    Skip,
    /// Unrecoverable (commonly out of memory).
    Fatal,
}

/// Primitive assembly mode for non-indexed draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveTopology {
    Triangles,
    TriangleStrip,
    Lines,
    LineStrip,
    Points,
}

impl PrimitiveTopology {
    /// Number of vertices consumed by `primitives` primitives; `None` on overflow.
    #[inline]
    pub const fn vertex_count(self, primitives: u32) -> Option<u32> {
        match self {
            PrimitiveTopology::Triangles => primitives.checked_mul(3),
            PrimitiveTopology::TriangleStrip => primitives.checked_add(2),
            PrimitiveTopology::Lines => primitives.checked_mul(2),
            PrimitiveTopology::LineStrip => primitives.checked_add(1),
            PrimitiveTopology::Points => Some(primitives),
        }
    }
}

/// Texture sampling filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TextureFilter {
    #[default]
    Linear,
    Point,
}

/// Creation parameters for an RGBA8 texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub filter: TextureFilter,
    /// Texture can be bound as a framebuffer.
    pub render_target: bool,
}

/// Update frequency hint for vertex buffers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BufferUsage {
    Static,
    #[default]
    Dynamic,
}

/// Component layout of one vertex attribute stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexFormat {
    Float32x2,
    Float32x4,
}

impl VertexFormat {
    #[inline]
    pub const fn size(self) -> u32 {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// One attribute stream bound to a shader input location.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexStream {
    pub location: u32,
    pub offset: u32,
    pub format: VertexFormat,
}

// ── blend ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendOperation {
    Add,
}

/// `result = src * src_factor (op) dst * dst_factor` for one channel group.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BlendComponent {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub operation: BlendOperation,
}

impl BlendComponent {
    #[inline]
    pub const fn add(src_factor: BlendFactor, dst_factor: BlendFactor) -> Self {
        Self {
            src_factor,
            dst_factor,
            operation: BlendOperation::Add,
        }
    }
}

/// Separate color and alpha blend equations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BlendState {
    pub color: BlendComponent,
    pub alpha: BlendComponent,
}
