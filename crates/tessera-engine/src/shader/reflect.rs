//! WGSL interface reflection.
//!
//! Parses and validates a module with `naga`, then enumerates:
//! - group 0 uniform bindings (scalars, vectors, `mat4x4<f32>`)
//! - group 0 `texture_2d<f32>` bindings (reported as `Texture2D` parameters)
//! - group 0 sampler bindings (companions of the textures)
//! - `@location` inputs of the vertex entry point (attributes)

use anyhow::{Context, Result, anyhow, bail};
use naga::{
    AddressSpace, Binding, ImageClass, ImageDimension, Module, ScalarKind, ShaderStage, TypeInner,
    VectorSize,
};

use super::{Location, ParameterDescriptor, ParameterKind};

/// Everything a backend and a [`super::ParameterTable`] need from a program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderInterface {
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub attributes: Vec<ParameterDescriptor>,
    pub parameters: Vec<ParameterDescriptor>,
    pub samplers: Vec<Location>,
}

/// Parses, validates and reflects a WGSL program.
pub fn reflect_wgsl(source: &str) -> Result<ShaderInterface> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow!("WGSL parse error: {e}"))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| anyhow!("WGSL validation error: {e}"))?;

    reflect_module(&module)
}

fn reflect_module(module: &Module) -> Result<ShaderInterface> {
    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == ShaderStage::Vertex)
        .context("program has no @vertex entry point")?;
    let fragment = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == ShaderStage::Fragment)
        .context("program has no @fragment entry point")?;

    let mut interface = ShaderInterface {
        vertex_entry: vertex.name.clone(),
        fragment_entry: fragment.name.clone(),
        ..Default::default()
    };

    for (_, global) in module.global_variables.iter() {
        let Some(binding) = &global.binding else { continue };
        let name = global.name.clone().unwrap_or_default();

        if binding.group != 0 {
            bail!("`{name}` uses bind group {}; only group 0 is supported", binding.group);
        }

        let inner = &module.types[global.ty].inner;
        match global.space {
            AddressSpace::Uniform => {
                let kind = value_kind(inner)
                    .with_context(|| format!("uniform `{name}` has an unsupported type"))?;
                interface
                    .parameters
                    .push(ParameterDescriptor::new(name, binding.binding, kind));
            }
            AddressSpace::Handle => match inner {
                TypeInner::Image {
                    dim: ImageDimension::D2,
                    arrayed: false,
                    class: ImageClass::Sampled { kind: ScalarKind::Float, multi: false },
                } => {
                    interface.parameters.push(ParameterDescriptor::new(
                        name,
                        binding.binding,
                        ParameterKind::Texture2D,
                    ));
                }
                TypeInner::Sampler { comparison: false } => {
                    interface.samplers.push(Location(binding.binding));
                }
                _ => bail!("resource `{name}` has an unsupported type"),
            },
            other => bail!("`{name}` uses unsupported address space {other:?}"),
        }
    }

    for arg in &vertex.function.arguments {
        match &arg.binding {
            Some(Binding::Location { location, .. }) => {
                let name = arg.name.clone().unwrap_or_default();
                push_attribute(module, &mut interface, name, *location, arg.ty)?;
            }
            Some(Binding::BuiltIn(_)) => {}
            None => {
                let TypeInner::Struct { members, .. } = &module.types[arg.ty].inner else {
                    continue;
                };
                for member in members {
                    if let Some(Binding::Location { location, .. }) = &member.binding {
                        let name = member.name.clone().unwrap_or_default();
                        push_attribute(module, &mut interface, name, *location, member.ty)?;
                    }
                }
            }
        }
    }

    interface.attributes.sort_by_key(|a| a.location);
    interface.parameters.sort_by_key(|p| p.location);
    interface.samplers.sort();

    Ok(interface)
}

fn push_attribute(
    module: &Module,
    interface: &mut ShaderInterface,
    name: String,
    location: u32,
    ty: naga::Handle<naga::Type>,
) -> Result<()> {
    let kind = value_kind(&module.types[ty].inner)
        .with_context(|| format!("vertex input `{name}` has an unsupported type"))?;
    interface
        .attributes
        .push(ParameterDescriptor::new(name, location, kind));
    Ok(())
}

fn value_kind(inner: &TypeInner) -> Option<ParameterKind> {
    match *inner {
        TypeInner::Scalar(s) if s.width == 4 => match s.kind {
            ScalarKind::Float => Some(ParameterKind::Float),
            ScalarKind::Sint => Some(ParameterKind::Int),
            _ => None,
        },
        TypeInner::Vector { size, scalar } if scalar.width == 4 => match (scalar.kind, size) {
            (ScalarKind::Float, VectorSize::Bi) => Some(ParameterKind::Float2),
            (ScalarKind::Float, VectorSize::Tri) => Some(ParameterKind::Float3),
            (ScalarKind::Float, VectorSize::Quad) => Some(ParameterKind::Float4),
            (ScalarKind::Sint, VectorSize::Bi) => Some(ParameterKind::Int2),
            (ScalarKind::Sint, VectorSize::Tri) => Some(ParameterKind::Int3),
            (ScalarKind::Sint, VectorSize::Quad) => Some(ParameterKind::Int4),
            _ => None,
        },
        TypeInner::Matrix {
            columns: VectorSize::Quad,
            rows: VectorSize::Quad,
            scalar,
        } if scalar.kind == ScalarKind::Float && scalar.width == 4 => Some(ParameterKind::Matrix4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINTED: &str = r#"
        struct VsOut {
            @builtin(position) pos: vec4<f32>,
        };

        struct VsIn {
            @location(0) position: vec2<f32>,
            @location(3) weight: f32,
        };

        @group(0) @binding(0) var<uniform> ProjectionMatrix: mat4x4<f32>;
        @group(0) @binding(4) var<uniform> Tint: vec3<f32>;
        @group(0) @binding(5) var<uniform> Frame: i32;

        @vertex
        fn main_vs(input: VsIn) -> VsOut {
            var out: VsOut;
            out.pos = ProjectionMatrix * vec4<f32>(input.position * input.weight, 0.0, 1.0);
            return out;
        }

        @fragment
        fn main_fs() -> @location(0) vec4<f32> {
            return vec4<f32>(Tint, f32(Frame));
        }
    "#;

    #[test]
    fn reflects_struct_inputs_and_uniforms() {
        let i = reflect_wgsl(TINTED).unwrap();

        assert_eq!(i.vertex_entry, "main_vs");
        assert_eq!(i.fragment_entry, "main_fs");
        assert_eq!(
            i.attributes,
            vec![
                ParameterDescriptor::new("position", 0, ParameterKind::Float2),
                ParameterDescriptor::new("weight", 3, ParameterKind::Float),
            ]
        );
        assert_eq!(
            i.parameters,
            vec![
                ParameterDescriptor::new("ProjectionMatrix", 0, ParameterKind::Matrix4),
                ParameterDescriptor::new("Tint", 4, ParameterKind::Float3),
                ParameterDescriptor::new("Frame", 5, ParameterKind::Int),
            ]
        );
        assert!(i.samplers.is_empty());
    }

    #[test]
    fn invalid_source_is_a_creation_failure() {
        assert!(reflect_wgsl("fn broken( {").is_err());
    }

    #[test]
    fn non_zero_group_is_rejected() {
        let src = r#"
            @group(1) @binding(0) var<uniform> Offset: vec2<f32>;

            @vertex
            fn vs(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p + Offset, 0.0, 1.0);
            }

            @fragment
            fn fs() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0);
            }
        "#;
        let err = reflect_wgsl(src).unwrap_err();
        assert!(format!("{err:#}").contains("group 1"));
    }

    #[test]
    fn missing_fragment_stage_is_rejected() {
        let src = r#"
            @vertex
            fn vs(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 0.0, 1.0);
            }
        "#;
        assert!(reflect_wgsl(src).is_err());
    }
}
