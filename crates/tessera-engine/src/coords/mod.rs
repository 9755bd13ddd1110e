//! Coordinate and geometry types shared by the device and the batcher.
//!
//! Canonical CPU space:
//! - Physical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Clip-space conversion happens once per flush through an orthographic
//! [`Mat4`] built from the device viewport.

mod color;
mod mat4;
mod rect;
mod vec2;

pub use color::Color;
pub use mat4::{DepthRange, Mat4};
pub use rect::Rect;
pub use vec2::Vec2;
