use std::collections::BTreeMap;

use crate::backend::{GpuBackend, TextureId};
use crate::coords::Mat4;

use super::{Location, ParameterDescriptor, ParameterError, ParameterKind, ParameterValue};

/// Per-program cache of reflected inputs and staged parameter values.
///
/// Descriptors are fixed at construction. Values are staged by the typed
/// setters and pushed to the GPU by [`ParameterTable::apply`].
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    attributes: Vec<ParameterDescriptor>,
    attribute_index: BTreeMap<String, usize>,

    parameters: Vec<ParameterDescriptor>,
    parameter_index: BTreeMap<String, usize>,
    staged: Vec<Option<ParameterValue>>,
}

impl ParameterTable {
    pub fn new(attributes: Vec<ParameterDescriptor>, parameters: Vec<ParameterDescriptor>) -> Self {
        let attribute_index = index_by_name(&attributes);
        let parameter_index = index_by_name(&parameters);
        let staged = vec![None; parameters.len()];

        Self {
            attributes,
            attribute_index,
            parameters,
            parameter_index,
            staged,
        }
    }

    pub fn attributes(&self) -> &[ParameterDescriptor] {
        &self.attributes
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    // ── lookup ────────────────────────────────────────────────────────────

    /// `None` means the program does not consume this attribute.
    pub fn attribute_location(&self, name: &str) -> Option<Location> {
        self.attribute(name).map(|d| d.location)
    }

    pub fn attribute_kind(&self, name: &str) -> Option<ParameterKind> {
        self.attribute(name).map(|d| d.kind)
    }

    /// `None` means the program does not declare this parameter.
    pub fn parameter_location(&self, name: &str) -> Option<Location> {
        self.parameter(name).map(|d| d.location)
    }

    pub fn parameter_kind(&self, name: &str) -> Option<ParameterKind> {
        self.parameter(name).map(|d| d.kind)
    }

    /// Currently staged value, if any.
    pub fn staged_value(&self, name: &str) -> Option<&ParameterValue> {
        let index = *self.parameter_index.get(name)?;
        self.staged[index].as_ref()
    }

    fn attribute(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.attribute_index.get(name).map(|&i| &self.attributes[i])
    }

    fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameter_index.get(name).map(|&i| &self.parameters[i])
    }

    // ── staging ───────────────────────────────────────────────────────────

    /// Stages `value` after checking it against the declared kind.
    pub fn set(&mut self, name: &str, value: ParameterValue) -> Result<(), ParameterError> {
        let Some(&index) = self.parameter_index.get(name) else {
            return Err(ParameterError::UnknownParameter(name.to_string()));
        };

        let declared = self.parameters[index].kind;
        let provided = value.kind();
        if declared != provided {
            return Err(ParameterError::KindMismatch {
                name: name.to_string(),
                declared,
                provided,
            });
        }

        self.staged[index] = Some(value);
        Ok(())
    }

    pub fn set_float(&mut self, name: &str, v: f32) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Float(v))
    }

    pub fn set_float2(&mut self, name: &str, v: [f32; 2]) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Float2(v))
    }

    pub fn set_float3(&mut self, name: &str, v: [f32; 3]) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Float3(v))
    }

    pub fn set_float4(&mut self, name: &str, v: [f32; 4]) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Float4(v))
    }

    pub fn set_int(&mut self, name: &str, v: i32) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Int(v))
    }

    pub fn set_int2(&mut self, name: &str, v: [i32; 2]) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Int2(v))
    }

    pub fn set_int3(&mut self, name: &str, v: [i32; 3]) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Int3(v))
    }

    pub fn set_int4(&mut self, name: &str, v: [i32; 4]) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Int4(v))
    }

    pub fn set_matrix4(&mut self, name: &str, m: Mat4) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Matrix4(m))
    }

    pub fn set_texture_2d(
        &mut self,
        name: &str,
        texture: TextureId,
        slot: u32,
    ) -> Result<(), ParameterError> {
        self.set(name, ParameterValue::Texture2D { texture, slot })
    }

    /// Drops the staged value; the descriptor stays.
    pub fn clear_parameter(&mut self, name: &str) {
        if let Some(&index) = self.parameter_index.get(name) {
            self.staged[index] = None;
        }
    }

    // ── apply ─────────────────────────────────────────────────────────────

    /// Pushes every staged value to the program currently in use.
    ///
    /// Textures activate their unit first, then point the sampler binding at
    /// that unit.
    pub fn apply<B: GpuBackend + ?Sized>(&self, backend: &mut B) {
        for (descriptor, value) in self.parameters.iter().zip(&self.staged) {
            let Some(value) = value else { continue };

            match *value {
                ParameterValue::Texture2D { texture, slot } => {
                    backend.bind_texture_unit(slot, texture);
                    backend.set_sampler_unit(descriptor.location, slot);
                }
                _ => backend.set_uniform(descriptor.location, value),
            }
        }
    }
}

fn index_by_name(descriptors: &[ParameterDescriptor]) -> BTreeMap<String, usize> {
    descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| (d.name.clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GpuCommand, RecordingBackend};

    fn table() -> ParameterTable {
        ParameterTable::new(
            vec![
                ParameterDescriptor::new("position", 0, ParameterKind::Float2),
                ParameterDescriptor::new("color", 2, ParameterKind::Float4),
            ],
            vec![
                ParameterDescriptor::new("ProjectionMatrix", 0, ParameterKind::Matrix4),
                ParameterDescriptor::new("TextureSampler", 1, ParameterKind::Texture2D),
                ParameterDescriptor::new("Tint", 3, ParameterKind::Float3),
                ParameterDescriptor::new("Frame", 4, ParameterKind::Int),
            ],
        )
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[test]
    fn locations_are_cached() {
        let t = table();
        assert_eq!(t.attribute_location("color"), Some(Location(2)));
        assert_eq!(t.parameter_location("Tint"), Some(Location(3)));
    }

    #[test]
    fn missing_names_are_not_present() {
        let t = table();
        assert_eq!(t.attribute_location("texcoord"), None);
        assert_eq!(t.parameter_location("Time"), None);
        assert_eq!(t.parameter_kind("Time"), None);
    }

    // ── staging ───────────────────────────────────────────────────────────

    #[test]
    fn unknown_name_is_rejected() {
        let mut t = table();
        let err = t.set_float("Time", 1.0).unwrap_err();
        assert_eq!(err, ParameterError::UnknownParameter("Time".to_string()));
    }

    #[test]
    fn kind_mismatch_is_rejected_without_mutation() {
        let mut t = table();
        t.set_float3("Tint", [1.0, 0.5, 0.25]).unwrap();

        let err = t.set_float4("Tint", [0.0; 4]).unwrap_err();
        assert!(matches!(err, ParameterError::KindMismatch { .. }));
        assert_eq!(t.staged_value("Tint"), Some(&ParameterValue::Float3([1.0, 0.5, 0.25])));
    }

    #[test]
    fn float3_keeps_every_component() {
        let mut t = table();
        t.set_float3("Tint", [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(t.staged_value("Tint"), Some(&ParameterValue::Float3([1.0, 2.0, 3.0])));
    }

    #[test]
    fn clear_parameter_unstages_value() {
        let mut t = table();
        t.set_int("Frame", 7).unwrap();
        t.clear_parameter("Frame");
        assert_eq!(t.staged_value("Frame"), None);
        assert_eq!(t.parameter_location("Frame"), Some(Location(4)));
    }

    // ── apply ─────────────────────────────────────────────────────────────

    #[test]
    fn apply_skips_unstaged_entries() {
        let t = table();
        let mut backend = RecordingBackend::default();
        t.apply(&mut backend);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn apply_binds_texture_unit_before_sampler() {
        let mut t = table();
        t.set_matrix4("ProjectionMatrix", Mat4::IDENTITY).unwrap();
        t.set_texture_2d("TextureSampler", TextureId(9), 0).unwrap();

        let mut backend = RecordingBackend::default();
        t.apply(&mut backend);

        assert_eq!(
            backend.commands(),
            &[
                GpuCommand::SetUniform {
                    location: Location(0),
                    value: ParameterValue::Matrix4(Mat4::IDENTITY),
                },
                GpuCommand::BindTextureUnit {
                    unit: 0,
                    texture: TextureId(9),
                },
                GpuCommand::SetSamplerUnit {
                    location: Location(1),
                    unit: 0,
                },
            ]
        );
    }
}
