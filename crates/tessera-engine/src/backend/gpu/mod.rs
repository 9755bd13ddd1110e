//! wgpu implementation of [`GpuBackend`](super::GpuBackend).
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring and presenting frames
//! - translating latched immediate-mode state into cached render pipelines

mod context;
mod error;
mod frame;
mod init;
mod pipeline;
mod readback;
mod resources;
mod surface;
mod wgpu_backend;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use init::{GpuInit, VerticalSync};
pub use wgpu_backend::WgpuBackend;
