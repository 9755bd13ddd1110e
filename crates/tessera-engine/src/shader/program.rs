use anyhow::{Context, Result};

use crate::backend::{GpuBackend, ProgramId};

use super::{ParameterKind, ParameterTable, reflect_wgsl};

/// Inputs the batcher feeds by name, with the kinds it feeds them as.
const EXPECTED_ATTRIBUTES: [(&str, &[ParameterKind]); 3] = [
    ("position", &[ParameterKind::Float2, ParameterKind::Float4]),
    ("color", &[ParameterKind::Float4]),
    ("texcoord", &[ParameterKind::Float2]),
];

const EXPECTED_PARAMETERS: [(&str, &[ParameterKind]); 2] = [
    ("ProjectionMatrix", &[ParameterKind::Matrix4]),
    ("TextureSampler", &[ParameterKind::Texture2D]),
];

/// A compiled program plus its parameter table.
#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramId,
    parameters: ParameterTable,
}

impl ShaderProgram {
    /// Reflects `source`, then compiles it on `backend`.
    ///
    /// Nothing is left allocated on the backend when this fails.
    pub fn create<B: GpuBackend + ?Sized>(backend: &mut B, source: &str) -> Result<Self> {
        let interface = reflect_wgsl(source).context("shader reflection failed")?;
        let id = backend
            .create_program(source, &interface)
            .context("backend rejected shader program")?;

        let parameters = ParameterTable::new(interface.attributes, interface.parameters);
        warn_on_unexpected_kinds(&parameters);

        log::debug!(
            "shader program {:?}: {} attribute(s), {} parameter(s)",
            id,
            parameters.attributes().len(),
            parameters.parameters().len()
        );

        Ok(Self { id, parameters })
    }

    pub fn destroy<B: GpuBackend + ?Sized>(self, backend: &mut B) {
        backend.destroy_program(self.id);
    }

    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    #[inline]
    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    #[inline]
    pub fn parameters_mut(&mut self) -> &mut ParameterTable {
        &mut self.parameters
    }
}

fn warn_on_unexpected_kinds(table: &ParameterTable) {
    for (name, allowed) in EXPECTED_ATTRIBUTES {
        if let Some(kind) = table.attribute_kind(name)
            && !allowed.contains(&kind)
        {
            log::warn!("shader program has an invalid type for attribute `{name}`: {kind:?}");
        }
    }

    for (name, allowed) in EXPECTED_PARAMETERS {
        if let Some(kind) = table.parameter_kind(name)
            && !allowed.contains(&kind)
        {
            log::warn!("shader program has an invalid type for parameter `{name}`: {kind:?}");
        }
    }
}
