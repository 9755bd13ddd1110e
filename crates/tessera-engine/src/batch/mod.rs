//! Immediate-mode 2D batching.
//!
//! [`BatchEngine`] collects textured quads and raw triangles into a fixed
//! scratch buffer and turns them into as few draw calls as possible.
//!
//! Coordinates are pixels with a top-left origin and Y pointing down,
//! for on-screen and offscreen targets alike.

mod default_program;
mod engine;
mod quad;
mod scratch;
mod uv;

pub use default_program::DEFAULT_PROGRAM_WGSL;
pub use engine::BatchEngine;
pub use quad::{QUAD_EMIT_ORDER, QuadParams, quad_corners, quad_uvs, quad_vertices};
pub use scratch::VertexScratch;
pub use uv::UvMode;
