/// WGSL source of the built-in batch program.
///
/// Declares `ProjectionMatrix` (binding 0), `TextureSampler` (binding 1, with
/// its sampler at binding 2) and the `position`/`texcoord`/`color` inputs
/// matching [`crate::device::Vertex2d`].
pub const DEFAULT_PROGRAM_WGSL: &str = include_str!("shaders/default.wgsl");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{Location, ParameterDescriptor, ParameterKind, reflect_wgsl};

    #[test]
    fn default_program_interface() {
        let i = reflect_wgsl(DEFAULT_PROGRAM_WGSL).unwrap();

        assert_eq!(i.vertex_entry, "vs_main");
        assert_eq!(i.fragment_entry, "fs_main");
        assert_eq!(
            i.attributes,
            vec![
                ParameterDescriptor::new("position", 0, ParameterKind::Float2),
                ParameterDescriptor::new("texcoord", 1, ParameterKind::Float2),
                ParameterDescriptor::new("color", 2, ParameterKind::Float4),
            ]
        );
        assert_eq!(
            i.parameters,
            vec![
                ParameterDescriptor::new("ProjectionMatrix", 0, ParameterKind::Matrix4),
                ParameterDescriptor::new("TextureSampler", 1, ParameterKind::Texture2D),
            ]
        );
        assert_eq!(i.samplers, vec![Location(2)]);
    }
}
