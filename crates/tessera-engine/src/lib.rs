//! Tessera engine crate.
//!
//! A small immediate-mode 2D renderer: a stateful graphics device over a GPU
//! backend, reflected shader parameters, and a quad batcher on top.

pub mod backend;
pub mod batch;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod shader;
pub mod time;
pub mod window;
