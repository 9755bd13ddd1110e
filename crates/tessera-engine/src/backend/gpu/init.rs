/// Vertical synchronization preference, resolved against the present modes
/// the surface supports.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VerticalSync {
    /// Late frames tear instead of waiting (`FifoRelaxed`), else plain vsync.
    #[default]
    Adaptive,
    /// Always wait for vertical blank (`Fifo`).
    Enabled,
    /// Present immediately (`Immediate`, else `Mailbox`, else `Fifo`).
    Disabled,
}

/// Initialization parameters for the wgpu backend.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: batched colors are written to the framebuffer as given.
    pub prefer_srgb: bool,

    pub vertical_sync: VerticalSync,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface. A hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            vertical_sync: VerticalSync::Adaptive,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
