use anyhow::{Context, Result};

use crate::backend::{BufferUsage, FramebufferOrigin, GpuBackend, PrimitiveTopology, TextureId};
use crate::coords::{Color, Mat4, Rect, Vec2};
use crate::device::{BlendMode, GraphicsDevice, ProgramHandle, TextureHandle, Vertex2d, VertexBuffer};

use super::quad::{quad_corners, quad_uvs, quad_vertices};
use super::{DEFAULT_PROGRAM_WGSL, QuadParams, VertexScratch};

const TEXTURE_SAMPLER: &str = "TextureSampler";
const PROJECTION_MATRIX: &str = "ProjectionMatrix";

/// Orthographic depth planes of the batch projection.
const Z_NEAR: f32 = -1.0;
const Z_FAR: f32 = 1000.0;

/// State captured by `begin`, dropped by `end`.
#[derive(Debug, Copy, Clone)]
struct OpenBatch {
    blend_mode: BlendMode,
    texture: Option<BoundTexture>,
    program: ProgramHandle,
    transform: Mat4,
}

#[derive(Debug, Copy, Clone)]
struct BoundTexture {
    id: TextureId,
    width: u32,
    height: u32,
}

/// Accumulates textured quads and triangles and submits them in as few
/// draw calls as the scratch capacity allows.
///
/// Usage per batch: `begin` → any number of `batch_*` calls → `end`.
/// A draw is issued when the scratch buffer fills up, on `flush`, and on `end`.
pub struct BatchEngine {
    default_program: ProgramHandle,
    vertex_buffer: VertexBuffer,
    scratch: VertexScratch,
    batch: Option<OpenBatch>,
}

impl BatchEngine {
    /// Creates an engine able to hold `max_triangles` triangles between draws.
    ///
    /// Owns its default program and vertex buffer; release them with
    /// [`BatchEngine::destroy`].
    pub fn new<B: GpuBackend>(device: &mut GraphicsDevice<B>, max_triangles: u32) -> Result<Self> {
        assert!(max_triangles > 0, "max_triangles must be positive");
        let max_vertices = max_triangles * 3;

        let default_program = device
            .create_shader_program(DEFAULT_PROGRAM_WGSL)
            .context("failed to create default batch program")?;

        let vertex_buffer = match VertexBuffer::create(device, BufferUsage::Dynamic, max_vertices) {
            Ok(vb) => vb,
            Err(e) => {
                device.destroy_shader_program(default_program);
                return Err(e.context("failed to create batch vertex buffer"));
            }
        };

        log::debug!("batch engine created ({max_triangles} triangles per draw)");

        Ok(Self {
            default_program,
            vertex_buffer,
            scratch: VertexScratch::with_capacity(max_vertices as usize),
            batch: None,
        })
    }

    pub fn destroy<B: GpuBackend>(self, device: &mut GraphicsDevice<B>) {
        if self.batch.is_some() {
            log::warn!("batch engine destroyed with an open batch; pending vertices dropped");
        }
        self.vertex_buffer.destroy(device);
        device.destroy_shader_program(self.default_program);
    }

    /// The built-in program used when `begin` receives none.
    #[inline]
    pub fn default_program(&self) -> ProgramHandle {
        self.default_program
    }

    #[inline]
    pub fn is_batch_active(&self) -> bool {
        self.batch.is_some()
    }

    /// Vertices waiting for the next draw.
    #[inline]
    pub fn pending_vertices(&self) -> usize {
        self.scratch.len()
    }

    // ── sequencing ────────────────────────────────────────────────────────

    /// Opens a batch. At least one of `texture` and `program` is required.
    ///
    /// `transform` is applied to every vertex before the projection.
    pub fn begin<B: GpuBackend>(
        &mut self,
        device: &GraphicsDevice<B>,
        blend_mode: BlendMode,
        texture: Option<TextureHandle>,
        program: Option<ProgramHandle>,
        transform: Mat4,
    ) {
        if self.batch.is_some() {
            log::warn!("begin called on an already open batch");
            return;
        }

        assert!(
            texture.is_some() || program.is_some(),
            "a batch needs a texture or a shader program"
        );

        let texture = match texture {
            Some(handle) => {
                let Some(t) = device.texture(handle) else {
                    log::warn!("begin: stale texture handle");
                    return;
                };
                Some(BoundTexture {
                    id: t.id(),
                    width: t.width(),
                    height: t.height(),
                })
            }
            None => None,
        };

        let program = program.unwrap_or(self.default_program);
        if device.shader_program(program).is_none() {
            log::warn!("begin: stale shader program handle");
            return;
        }

        self.scratch.clear();
        self.batch = Some(OpenBatch {
            blend_mode,
            texture,
            program,
            transform,
        });
    }

    /// Submits pending vertices and closes the batch.
    pub fn end<B: GpuBackend>(&mut self, device: &mut GraphicsDevice<B>) {
        if self.batch.is_none() {
            log::warn!("end called without an open batch");
            return;
        }
        self.flush(device);
        self.batch = None;
    }

    /// Submits pending vertices; the batch stays open.
    pub fn flush<B: GpuBackend>(&mut self, device: &mut GraphicsDevice<B>) {
        let Some(batch) = self.batch else { return };
        if self.scratch.len() < 3 {
            return;
        }

        let projection = batch_projection(device) * batch.transform;

        device.set_blend_mode(batch.blend_mode);
        device.apply_shader_program(batch.program);

        if let Some(program) = device.shader_program_mut(batch.program) {
            let parameters = program.parameters_mut();

            if let Some(texture) = batch.texture
                && parameters.parameter_location(TEXTURE_SAMPLER).is_some()
                && let Err(e) = parameters.set_texture_2d(TEXTURE_SAMPLER, texture.id, 0)
            {
                log::warn!("batch flush: {e}");
            }

            if parameters.parameter_location(PROJECTION_MATRIX).is_some()
                && let Err(e) = parameters.set_matrix4(PROJECTION_MATRIX, projection)
            {
                log::warn!("batch flush: {e}");
            }
        }

        device.apply_parameters(batch.program);

        self.vertex_buffer
            .set_vertex_data(device, batch.program, self.scratch.as_slice());

        let triangles = (self.scratch.len() / 3) as u32;
        device.draw_primitives(&self.vertex_buffer, PrimitiveTopology::Triangles, 0, triangles);

        log::trace!("batch flush: {triangles} triangle(s)");
        self.scratch.clear();
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Appends a textured quad cut from the bound texture.
    pub fn batch_quad<B: GpuBackend>(&mut self, device: &mut GraphicsDevice<B>, params: &QuadParams) {
        let Some(batch) = self.batch else {
            log::warn!("batch_quad called without an open batch");
            return;
        };
        let Some(texture) = batch.texture else {
            panic!("batch_quad requires a batch with a bound texture");
        };

        let source = params
            .source
            .unwrap_or_else(|| Rect::from_size(texture.width, texture.height));
        let size = params
            .scale
            .scale(Vec2::new(source.width as f32, source.height as f32));

        let uvs = quad_uvs(source, (texture.width, texture.height), params.uv_mode);
        let corners = quad_corners(params.position, size, params.origin, params.rotation);

        let vertices = quad_vertices(corners, uvs, params.color.unwrap_or(Color::WHITE));
        self.push_triangles(device, &vertices);
    }

    /// Appends an axis-aligned quad from explicit corner positions and texture
    /// coordinates (`*0` top-left, `*1` bottom-right).
    pub fn batch_quad_uv<B: GpuBackend>(
        &mut self,
        device: &mut GraphicsDevice<B>,
        uv0: Vec2,
        uv1: Vec2,
        xy0: Vec2,
        xy1: Vec2,
        color: Option<Color>,
    ) {
        if self.batch.is_none() {
            log::warn!("batch_quad_uv called without an open batch");
            return;
        }

        let corners = [xy0, Vec2::new(xy1.x, xy0.y), xy1, Vec2::new(xy0.x, xy1.y)];
        let uvs = [uv0, Vec2::new(uv1.x, uv0.y), uv1, Vec2::new(uv0.x, uv1.y)];

        let vertices = quad_vertices(corners, uvs, color.unwrap_or(Color::WHITE));
        self.push_triangles(device, &vertices);
    }

    /// Appends whole triangles, flushing whenever the next one does not fit.
    pub fn batch_triangles<B: GpuBackend>(
        &mut self,
        device: &mut GraphicsDevice<B>,
        vertices: &[Vertex2d],
    ) {
        assert!(
            !vertices.is_empty() && vertices.len() % 3 == 0,
            "batch_triangles needs a positive multiple of 3 vertices, got {}",
            vertices.len()
        );

        if self.batch.is_none() {
            log::warn!("batch_triangles called without an open batch");
            return;
        }

        self.push_triangles(device, vertices);
    }

    /// Quads go through here too, so a one-triangle scratch still takes them.
    fn push_triangles<B: GpuBackend>(
        &mut self,
        device: &mut GraphicsDevice<B>,
        vertices: &[Vertex2d],
    ) {
        for triangle in vertices.chunks_exact(3) {
            if self.scratch.remaining() < 3 {
                self.flush(device);
            }
            for &v in triangle {
                self.scratch.push(v);
            }
        }
    }
}

/// Orthographic projection over the effective viewport, Y down.
///
/// Offscreen targets on a bottom-left origin backend get the Y axis flipped
/// so their contents sample upright when drawn back to the screen.
fn batch_projection<B: GpuBackend>(device: &GraphicsDevice<B>) -> Mat4 {
    let viewport = device.effective_viewport();
    let left = viewport.x as f32;
    let right = viewport.right() as f32;
    let top = viewport.y as f32;
    let bottom = viewport.bottom() as f32;

    let flip = device.is_using_render_target()
        && device.framebuffer_origin() == FramebufferOrigin::BottomLeft;

    if flip {
        Mat4::orthographic(left, right, top, bottom, Z_NEAR, Z_FAR, device.depth_range())
    } else {
        Mat4::orthographic(left, right, bottom, top, Z_NEAR, Z_FAR, device.depth_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GpuCommand, RecordingBackend, TextureFilter};
    use crate::device::TextureKind;
    use crate::shader::{Location, ParameterValue};

    use super::super::UvMode;

    fn device() -> GraphicsDevice<RecordingBackend> {
        GraphicsDevice::new(RecordingBackend::new(800, 600))
    }

    fn texture(d: &mut GraphicsDevice<RecordingBackend>, w: u32, h: u32) -> TextureHandle {
        d.create_texture(w, h, None, TextureFilter::Linear, TextureKind::Normal)
            .unwrap()
    }

    fn draws(commands: &[GpuCommand]) -> Vec<u32> {
        commands
            .iter()
            .filter_map(|c| match c {
                GpuCommand::Draw { vertex_count, .. } => Some(*vertex_count),
                _ => None,
            })
            .collect()
    }

    fn uploaded_vertices(commands: &[GpuCommand]) -> Vec<Vertex2d> {
        commands
            .iter()
            .filter_map(|c| match c {
                GpuCommand::WriteVertices { data, .. } => Some(data),
                _ => None,
            })
            .flat_map(|data| data.chunks_exact(32).map(bytemuck::pod_read_unaligned::<Vertex2d>))
            .collect()
    }

    fn projection(commands: &[GpuCommand]) -> Mat4 {
        commands
            .iter()
            .find_map(|c| match c {
                GpuCommand::SetUniform {
                    location: Location(0),
                    value: ParameterValue::Matrix4(m),
                } => Some(*m),
                _ => None,
            })
            .unwrap()
    }

    fn triangle() -> [Vertex2d; 3] {
        [
            Vertex2d::new(Vec2::new(0.0, 0.0), Vec2::ZERO, Color::WHITE),
            Vertex2d::new(Vec2::new(1.0, 0.0), Vec2::ZERO, Color::WHITE),
            Vertex2d::new(Vec2::new(0.0, 1.0), Vec2::ZERO, Color::WHITE),
        ]
    }

    // ── creation ──────────────────────────────────────────────────────────

    #[test]
    fn failed_buffer_creation_releases_program() {
        let mut d = device();
        d.backend_mut().fail_next_buffer();
        assert!(BatchEngine::new(&mut d, 16).is_err());
        assert_eq!(d.backend().live_resources(), 0);
    }

    #[test]
    fn failed_program_creation_allocates_nothing() {
        let mut d = device();
        d.backend_mut().fail_next_program();
        assert!(BatchEngine::new(&mut d, 16).is_err());
        assert_eq!(d.backend().live_resources(), 0);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut d = device();
        let engine = BatchEngine::new(&mut d, 16).unwrap();
        assert_eq!(d.backend().live_resources(), 2);
        engine.destroy(&mut d);
        assert_eq!(d.backend().live_resources(), 0);
    }

    // ── sequencing ────────────────────────────────────────────────────────

    #[test]
    fn calls_without_begin_are_ignored() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        d.backend_mut().clear_commands();

        e.batch_quad(&mut d, &QuadParams::default());
        e.batch_quad_uv(&mut d, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE, None);
        e.batch_triangles(&mut d, &triangle());
        e.flush(&mut d);
        e.end(&mut d);

        assert!(d.backend().commands().is_empty());
        assert!(!e.is_batch_active());
    }

    #[test]
    fn flush_below_one_triangle_does_nothing() {
        let mut d = device();
        let t = texture(&mut d, 8, 8);
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.flush(&mut d);
        e.end(&mut d);

        assert!(d.backend().commands().is_empty());
    }

    #[test]
    fn nested_begin_keeps_first_batch() {
        let mut d = device();
        let first = texture(&mut d, 8, 8);
        let second = texture(&mut d, 16, 16);
        let first_id = d.texture(first).unwrap().id();
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Additive, Some(first), None, Mat4::IDENTITY);
        e.begin(&d, BlendMode::None, Some(second), None, Mat4::IDENTITY);
        assert!(e.is_batch_active());

        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let commands = d.backend().commands();
        assert!(commands.contains(&GpuCommand::SetBlendState(BlendMode::Additive.state())));
        assert!(commands.contains(&GpuCommand::BindTextureUnit {
            unit: 0,
            texture: first_id,
        }));
        // Default size comes from the first texture.
        let v = uploaded_vertices(commands);
        assert_eq!(v[2].position(), Vec2::new(8.0, 8.0));
    }

    #[test]
    #[should_panic(expected = "texture or a shader program")]
    fn begin_without_texture_or_program_panics() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        e.begin(&d, BlendMode::Alpha, None, None, Mat4::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "bound texture")]
    fn quad_without_texture_panics() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        let program = e.default_program();
        e.begin(&d, BlendMode::Alpha, None, Some(program), Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
    }

    #[test]
    #[should_panic(expected = "multiple of 3")]
    fn partial_triangle_panics() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        let program = e.default_program();
        e.begin(&d, BlendMode::Alpha, None, Some(program), Mat4::IDENTITY);
        e.batch_triangles(&mut d, &triangle()[..2]);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn full_texture_quad_corners() {
        let mut d = device();
        let t = texture(&mut d, 10, 10);
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let v = uploaded_vertices(d.backend().commands());
        let positions: Vec<Vec2> = v.iter().map(Vertex2d::position).collect();
        assert_eq!(
            positions,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ]
        );
        assert_eq!(v[0].uv(), Vec2::new(0.0, 0.0));
        assert_eq!(v[2].uv(), Vec2::new(1.0, 1.0));
        assert!(v.iter().all(|v| (v.r, v.g, v.b, v.a) == (1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn source_rect_and_scale_size_the_quad() {
        let mut d = device();
        let t = texture(&mut d, 64, 64);
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(
            &mut d,
            &QuadParams {
                source: Some(Rect::new(0, 0, 16, 8)),
                position: Vec2::new(100.0, 100.0),
                scale: Vec2::splat(2.0),
                origin: Vec2::splat(0.5),
                uv_mode: UvMode::FLIP_HORIZONTAL,
                ..Default::default()
            },
        );
        e.end(&mut d);

        let v = uploaded_vertices(d.backend().commands());
        assert_eq!(v[0].position(), Vec2::new(84.0, 92.0));
        assert_eq!(v[2].position(), Vec2::new(116.0, 108.0));
        assert_eq!(v[0].uv(), Vec2::new(0.25, 0.0));
        assert_eq!(v[1].uv(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn quad_uv_uses_axis_aligned_corners() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 16).unwrap();
        let program = e.default_program();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::None, None, Some(program), Mat4::IDENTITY);
        e.batch_quad_uv(
            &mut d,
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(10.0, 20.0),
            Vec2::new(30.0, 40.0),
            Some(Color::BLACK),
        );
        e.end(&mut d);

        let v = uploaded_vertices(d.backend().commands());
        assert_eq!(v.len(), 6);
        assert_eq!(v[1].position(), Vec2::new(30.0, 20.0));
        assert_eq!(v[1].uv(), Vec2::new(1.0, 1.0));
        assert_eq!(v[5].position(), Vec2::new(10.0, 40.0));
        assert_eq!(v[5].uv(), Vec2::new(0.0, 0.0));
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn two_triangle_capacity_draws_each_quad() {
        let mut d = device();
        let t = texture(&mut d, 4, 4);
        let mut e = BatchEngine::new(&mut d, 2).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        for i in 0..3 {
            e.batch_quad(
                &mut d,
                &QuadParams {
                    position: Vec2::new(i as f32 * 10.0, 0.0),
                    ..Default::default()
                },
            );
        }
        assert_eq!(e.pending_vertices(), 6);
        e.end(&mut d);

        assert_eq!(draws(d.backend().commands()), vec![6, 6, 6]);
    }

    #[test]
    fn one_triangle_capacity_splits_quads() {
        let mut d = device();
        let t = texture(&mut d, 10, 10);
        let mut e = BatchEngine::new(&mut d, 1).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
        assert_eq!(draws(d.backend().commands()), vec![3]);
        assert_eq!(e.pending_vertices(), 3);

        e.batch_quad_uv(&mut d, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE, None);
        e.end(&mut d);

        assert_eq!(draws(d.backend().commands()), vec![3, 3, 3, 3]);
        let uploaded = uploaded_vertices(d.backend().commands());
        assert_eq!(uploaded.len(), 12);
        assert_eq!((uploaded[0].x, uploaded[0].y), (uploaded[3].x, uploaded[3].y));
        assert_eq!((uploaded[2].x, uploaded[2].y), (uploaded[4].x, uploaded[4].y));
    }

    #[test]
    fn draw_count_is_ceiling_of_triangles_over_capacity() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 3).unwrap();
        let program = e.default_program();
        d.backend_mut().clear_commands();

        let tris: Vec<Vertex2d> = (0..7).flat_map(|_| triangle()).collect();

        e.begin(&d, BlendMode::Alpha, None, Some(program), Mat4::IDENTITY);
        e.batch_triangles(&mut d, &tris);
        e.end(&mut d);

        let counts = draws(d.backend().commands());
        assert_eq!(counts.len(), 3);
        assert!(counts.iter().all(|&n| n <= 9));
        assert_eq!(counts.iter().sum::<u32>(), 21);
    }

    #[test]
    fn texture_sampler_is_skipped_without_texture() {
        let mut d = device();
        let mut e = BatchEngine::new(&mut d, 4).unwrap();
        let program = e.default_program();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, None, Some(program), Mat4::IDENTITY);
        e.batch_triangles(&mut d, &triangle());
        e.end(&mut d);

        let commands = d.backend().commands();
        assert!(!commands.iter().any(|c| matches!(c, GpuCommand::BindTextureUnit { .. })));
        assert_eq!(draws(commands), vec![3]);
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn on_screen_projection_is_y_down() {
        let mut d = device();
        let t = texture(&mut d, 4, 4);
        let mut e = BatchEngine::new(&mut d, 4).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let p = projection(d.backend().commands());
        let top_left = p.transform_point(0.0, 0.0);
        assert!((top_left[0] + 1.0).abs() < 1e-6);
        assert!((top_left[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn oversized_viewport_projection_crops() {
        let mut d = device();
        let t = texture(&mut d, 4, 4);
        let mut e = BatchEngine::new(&mut d, 4).unwrap();
        d.set_viewport(Rect::new(0, 0, 1600, 600));
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let p = projection(d.backend().commands());
        let right_edge = p.transform_point(800.0, 0.0);
        assert!((right_edge[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn offscreen_projection_flips_on_bottom_left_backend() {
        let mut d = device();
        let t = texture(&mut d, 4, 4);
        let rt = d
            .create_texture(64, 32, None, TextureFilter::Linear, TextureKind::RenderTarget)
            .unwrap();
        let mut e = BatchEngine::new(&mut d, 4).unwrap();
        d.bind_render_target(rt, true);
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let p = projection(d.backend().commands());
        assert!((p.transform_point(0.0, 0.0)[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn offscreen_projection_is_unflipped_on_top_left_backend() {
        let backend = RecordingBackend::new(800, 600).with_origin(FramebufferOrigin::TopLeft);
        let mut d = GraphicsDevice::new(backend);
        let t = texture(&mut d, 4, 4);
        let rt = d
            .create_texture(64, 32, None, TextureFilter::Linear, TextureKind::RenderTarget)
            .unwrap();
        let mut e = BatchEngine::new(&mut d, 4).unwrap();
        d.bind_render_target(rt, true);
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::IDENTITY);
        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let p = projection(d.backend().commands());
        assert!((p.transform_point(0.0, 0.0)[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn transform_is_applied_before_projection() {
        let mut d = device();
        let t = texture(&mut d, 4, 4);
        let mut e = BatchEngine::new(&mut d, 4).unwrap();
        d.backend_mut().clear_commands();

        e.begin(&d, BlendMode::Alpha, Some(t), None, Mat4::from_translation(400.0, 300.0));
        e.batch_quad(&mut d, &QuadParams::default());
        e.end(&mut d);

        let center = projection(d.backend().commands()).transform_point(0.0, 0.0);
        assert!(center[0].abs() < 1e-6);
        assert!(center[1].abs() < 1e-6);
    }
}
