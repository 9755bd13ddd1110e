//! Contract between the runtime loop and applications.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{Device, FrameCtx};
