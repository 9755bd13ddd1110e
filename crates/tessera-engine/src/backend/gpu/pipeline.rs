//! Backend-neutral state → wgpu descriptors, and render pipeline creation.

use crate::backend::{
    BlendComponent, BlendFactor, BlendOperation, BlendState, PrimitiveTopology, VertexFormat,
    VertexStream,
};

/// Everything a render pipeline bakes in besides the program itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PipelineKey {
    pub blend: BlendState,
    pub format: wgpu::TextureFormat,
    pub topology: PrimitiveTopology,
    pub stride: u32,
    pub streams: Vec<VertexStream>,
}

/// Shader stages and layout shared by every pipeline of a program.
pub(crate) struct PipelineSource<'a> {
    pub module: &'a wgpu::ShaderModule,
    pub layout: &'a wgpu::PipelineLayout,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
}

pub(crate) fn create_pipeline(
    device: &wgpu::Device,
    source: &PipelineSource<'_>,
    key: &PipelineKey,
) -> wgpu::RenderPipeline {
    let attributes: Vec<wgpu::VertexAttribute> = key
        .streams
        .iter()
        .map(|s| wgpu::VertexAttribute {
            format: vertex_format(s.format),
            offset: s.offset as u64,
            shader_location: s.location,
        })
        .collect();

    let buffers = [wgpu::VertexBufferLayout {
        array_stride: key.stride as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &attributes,
    }];

    log::debug!(
        "creating pipeline: {:?} {:?} stride {} ({} attribute(s))",
        key.format,
        key.topology,
        key.stride,
        attributes.len()
    );

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tessera batch pipeline"),
        layout: Some(source.layout),

        vertex: wgpu::VertexState {
            module: source.module,
            entry_point: Some(source.vertex_entry),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: source.module,
            entry_point: Some(source.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: key.format,
                blend: Some(blend_state(key.blend)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: topology(key.topology),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

pub(crate) fn blend_state(state: BlendState) -> wgpu::BlendState {
    wgpu::BlendState {
        color: blend_component(state.color),
        alpha: blend_component(state.alpha),
    }
}

fn blend_component(c: BlendComponent) -> wgpu::BlendComponent {
    wgpu::BlendComponent {
        src_factor: blend_factor(c.src_factor),
        dst_factor: blend_factor(c.dst_factor),
        operation: match c.operation {
            BlendOperation::Add => wgpu::BlendOperation::Add,
        },
    }
}

fn blend_factor(f: BlendFactor) -> wgpu::BlendFactor {
    match f {
        BlendFactor::Zero => wgpu::BlendFactor::Zero,
        BlendFactor::One => wgpu::BlendFactor::One,
        BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
    }
}

pub(crate) fn topology(t: PrimitiveTopology) -> wgpu::PrimitiveTopology {
    match t {
        PrimitiveTopology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        PrimitiveTopology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        PrimitiveTopology::Lines => wgpu::PrimitiveTopology::LineList,
        PrimitiveTopology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        PrimitiveTopology::Points => wgpu::PrimitiveTopology::PointList,
    }
}

fn vertex_format(f: VertexFormat) -> wgpu::VertexFormat {
    match f {
        VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplied_blend_maps_to_wgpu_preset() {
        let state = BlendState {
            color: BlendComponent::add(BlendFactor::One, BlendFactor::OneMinusSrcAlpha),
            alpha: BlendComponent::add(BlendFactor::One, BlendFactor::Zero),
        };
        let wgpu_state = blend_state(state);
        assert_eq!(
            wgpu_state.color,
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING.color
        );
        assert_eq!(wgpu_state.alpha, wgpu::BlendComponent::REPLACE);
    }

    #[test]
    fn strips_keep_their_topology() {
        assert_eq!(
            topology(PrimitiveTopology::LineStrip),
            wgpu::PrimitiveTopology::LineStrip
        );
        assert_eq!(
            topology(PrimitiveTopology::Triangles),
            wgpu::PrimitiveTopology::TriangleList
        );
    }
}
