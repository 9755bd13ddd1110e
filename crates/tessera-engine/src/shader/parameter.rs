use crate::backend::TextureId;
use crate::coords::Mat4;

/// Binding location of an attribute (`@location`) or a parameter (`@binding`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Location(pub u32);

/// Declared type of a shader input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParameterKind {
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Int2,
    Int3,
    Int4,
    Matrix4,
    Texture2D,
}

impl ParameterKind {
    /// Byte size of the value inside a uniform buffer.
    ///
    /// Textures are not stored in uniform buffers and report 0.
    pub const fn uniform_size(self) -> u64 {
        match self {
            ParameterKind::Float | ParameterKind::Int => 4,
            ParameterKind::Float2 | ParameterKind::Int2 => 8,
            ParameterKind::Float3 | ParameterKind::Int3 => 12,
            ParameterKind::Float4 | ParameterKind::Int4 => 16,
            ParameterKind::Matrix4 => 64,
            ParameterKind::Texture2D => 0,
        }
    }

    pub const fn is_texture(self) -> bool {
        matches!(self, ParameterKind::Texture2D)
    }
}

/// Staged value of a shader parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Int(i32),
    Int2([i32; 2]),
    Int3([i32; 3]),
    Int4([i32; 4]),
    Matrix4(Mat4),
    /// Texture bound to texture unit `slot`.
    Texture2D { texture: TextureId, slot: u32 },
}

impl ParameterValue {
    pub const fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::Float2(_) => ParameterKind::Float2,
            ParameterValue::Float3(_) => ParameterKind::Float3,
            ParameterValue::Float4(_) => ParameterKind::Float4,
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::Int2(_) => ParameterKind::Int2,
            ParameterValue::Int3(_) => ParameterKind::Int3,
            ParameterValue::Int4(_) => ParameterKind::Int4,
            ParameterValue::Matrix4(_) => ParameterKind::Matrix4,
            ParameterValue::Texture2D { .. } => ParameterKind::Texture2D,
        }
    }

    /// Little-endian uniform bytes. Empty for textures.
    pub fn uniform_bytes(&self) -> Vec<u8> {
        match self {
            ParameterValue::Float(v) => bytemuck::bytes_of(v).to_vec(),
            ParameterValue::Float2(v) => bytemuck::cast_slice(v).to_vec(),
            ParameterValue::Float3(v) => bytemuck::cast_slice(v).to_vec(),
            ParameterValue::Float4(v) => bytemuck::cast_slice(v).to_vec(),
            ParameterValue::Int(v) => bytemuck::bytes_of(v).to_vec(),
            ParameterValue::Int2(v) => bytemuck::cast_slice(v).to_vec(),
            ParameterValue::Int3(v) => bytemuck::cast_slice(v).to_vec(),
            ParameterValue::Int4(v) => bytemuck::cast_slice(v).to_vec(),
            ParameterValue::Matrix4(m) => bytemuck::cast_slice(&m.0).to_vec(),
            ParameterValue::Texture2D { .. } => Vec::new(),
        }
    }
}

/// Reflected attribute or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: Location,
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, location: u32, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            location: Location(location),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_bytes_match_declared_size() {
        let values = [
            ParameterValue::Float(1.0),
            ParameterValue::Float3([1.0, 2.0, 3.0]),
            ParameterValue::Int4([1, 2, 3, 4]),
            ParameterValue::Matrix4(Mat4::IDENTITY),
        ];
        for v in values {
            assert_eq!(v.uniform_bytes().len() as u64, v.kind().uniform_size());
        }
    }

    #[test]
    fn textures_have_no_uniform_bytes() {
        let v = ParameterValue::Texture2D {
            texture: TextureId(3),
            slot: 0,
        };
        assert!(v.uniform_bytes().is_empty());
        assert!(v.kind().is_texture());
    }
}
