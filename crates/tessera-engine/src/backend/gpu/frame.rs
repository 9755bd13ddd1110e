/// The acquired swapchain image of the frame in flight.
///
/// Holding the surface texture prevents acquisition of subsequent frames;
/// it is presented and dropped by `end_frame`.
pub(crate) struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}
