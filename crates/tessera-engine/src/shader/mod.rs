//! Shader programs and named parameter binding.
//!
//! Programs are WGSL. At creation the interface is reflected once into a
//! [`ParameterTable`]; afterwards parameters are staged by name with typed
//! setters and applied to the GPU in one pass.

mod error;
mod parameter;
mod program;
mod reflect;
mod table;

pub use error::ParameterError;
pub use parameter::{Location, ParameterDescriptor, ParameterKind, ParameterValue};
pub use program::ShaderProgram;
pub use reflect::{ShaderInterface, reflect_wgsl};
pub use table::ParameterTable;
