use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::{Device, FrameCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`crate::window::Runtime`].
///
/// Resources created on the device in `init` should be released in `on_exit`;
/// the device is dropped right after it returns.
pub trait App {
    /// Called once the window and device exist, before the first frame.
    fn init(&mut self, device: &mut Device) -> Result<()> {
        let _ = device;
        Ok(())
    }

    /// Called for window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per acquired frame. The frame is presented on return.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called once before the device is dropped.
    fn on_exit(&mut self, device: &mut Device) {
        let _ = device;
    }
}
