use winit::window::Window;

use crate::backend::gpu::WgpuBackend;
use crate::device::GraphicsDevice;
use crate::time::FrameTime;

/// The device type the runtime hands to applications.
pub type Device = GraphicsDevice<WgpuBackend>;

/// Per-frame context passed to [`super::App::on_frame`].
///
/// The frame is already acquired; draws land on screen unless a render
/// target is bound.
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub device: &'a mut Device,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    /// Drawable size in physical pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.device.drawable_size()
    }
}
