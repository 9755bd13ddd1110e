use std::path::Path;

use anyhow::{Context, Result, ensure};
use slotmap::SlotMap;

use crate::backend::{
    FrameStatus, FramebufferOrigin, GpuBackend, PrimitiveTopology, TextureDesc, TextureFilter,
};
use crate::coords::{Color, DepthRange, Rect};
use crate::shader::ShaderProgram;

use super::{BlendMode, ProgramHandle, Texture, TextureHandle, TextureKind, VertexBuffer};

/// GPU state cache and resource owner.
///
/// Tracks blend mode, viewport, scissor, clear color and the bound render
/// target so redundant transitions never reach the backend. Textures and
/// shader programs are owned here and addressed by handle.
pub struct GraphicsDevice<B: GpuBackend> {
    backend: B,

    /// `None` until the first transition.
    blend_mode: Option<BlendMode>,
    viewport: Rect,
    /// Rectangle handed to the backend (already flipped if needed).
    scissor: Option<Rect>,
    /// `None` until the first clear.
    clear_color: Option<Color>,
    render_target: Option<TextureHandle>,

    textures: SlotMap<TextureHandle, Texture>,
    programs: SlotMap<ProgramHandle, ShaderProgram>,
}

impl<B: GpuBackend> GraphicsDevice<B> {
    /// Wraps `backend`, applies premultiplied blending and a full-drawable viewport.
    pub fn new(backend: B) -> Self {
        let info = backend.adapter_info();
        log::info!("graphics device: {} ({})", info.name, info.backend);
        if !info.driver.is_empty() {
            log::info!("  driver: {} {}", info.driver, info.driver_info);
        }

        let (width, height) = backend.drawable_size();

        let mut device = Self {
            backend,
            blend_mode: None,
            viewport: Rect::default(),
            scissor: None,
            clear_color: None,
            render_target: None,
            textures: SlotMap::with_key(),
            programs: SlotMap::with_key(),
        };

        device.set_blend_mode(BlendMode::PremultipliedAlpha);
        device.set_viewport(Rect::from_size(width, height));
        device
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn framebuffer_origin(&self) -> FramebufferOrigin {
        self.backend.framebuffer_origin()
    }

    #[inline]
    pub fn depth_range(&self) -> DepthRange {
        self.backend.depth_range()
    }

    /// Size of the on-screen framebuffer in pixels.
    #[inline]
    pub fn drawable_size(&self) -> (u32, u32) {
        self.backend.drawable_size()
    }

    /// Follows a window resize. The viewport tracks the drawable when on-screen.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
        if self.render_target.is_none() && width > 0 && height > 0 {
            self.set_viewport(Rect::from_size(width, height));
        }
    }

    // ── frame ─────────────────────────────────────────────────────────────

    pub fn begin_frame(&mut self) -> FrameStatus {
        self.backend.begin_frame()
    }

    pub fn end_frame(&mut self) {
        if self.render_target.is_some() {
            log::warn!("end_frame called with a render target still bound");
        }
        self.backend.end_frame();
    }

    // ── blend ─────────────────────────────────────────────────────────────

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        if self.blend_mode == Some(mode) {
            return;
        }
        self.backend.set_blend_state(mode.state());
        self.blend_mode = Some(mode);
    }

    #[inline]
    pub fn blend_mode(&self) -> Option<BlendMode> {
        self.blend_mode
    }

    // ── viewport / scissor ────────────────────────────────────────────────

    /// The backend receives the part of `viewport` inside the bound framebuffer.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.apply_viewport();
    }

    #[inline]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Viewport clipped to the bound framebuffer, as handed to the backend.
    ///
    /// Projections are built over this rectangle so an oversized viewport
    /// crops instead of squashing. Falls back to the requested viewport when
    /// nothing of it is inside.
    pub fn effective_viewport(&self) -> Rect {
        let (width, height) = self.framebuffer_size();
        match self.viewport.clamp_to(width, height) {
            Some((x, y, w, h)) => Rect::new(x as i32, y as i32, w as i32, h as i32),
            None => self.viewport,
        }
    }

    fn apply_viewport(&mut self) {
        let applied = self.effective_viewport();
        self.backend.set_viewport(applied);
    }

    /// Size of whatever draws currently land in.
    fn framebuffer_size(&self) -> (u32, u32) {
        self.render_target
            .and_then(|handle| self.textures.get(handle))
            .map(|t| (t.width, t.height))
            .unwrap_or_else(|| self.drawable_size())
    }

    /// Enables scissoring. `rect` is top-left origin.
    ///
    /// On-screen bottom-left framebuffers get the rectangle mirrored inside
    /// the viewport; offscreen targets receive it unmodified.
    pub fn enable_scissor_rectangle(&mut self, rect: Rect) {
        let applied = if self.render_target.is_none()
            && self.framebuffer_origin() == FramebufferOrigin::BottomLeft
        {
            rect.flip_y(self.viewport.height)
        } else {
            rect
        };

        self.scissor = Some(applied);
        self.backend.set_scissor(Some(applied));
    }

    pub fn disable_scissor_rectangle(&mut self) {
        self.scissor = None;
        self.backend.set_scissor(None);
    }

    #[inline]
    pub fn is_scissor_enabled(&self) -> bool {
        self.scissor.is_some()
    }

    // ── clear / readback ──────────────────────────────────────────────────

    /// Clears the whole bound target, ignoring the scissor rectangle.
    pub fn clear_screen(&mut self, color: Color) {
        if self.scissor.is_some() {
            self.backend.set_scissor(None);
        }

        if self.clear_color != Some(color) {
            self.backend.set_clear_color(color);
            self.clear_color = Some(color);
        }

        self.backend.clear();

        if let Some(scissor) = self.scissor {
            self.backend.set_scissor(Some(scissor));
        }
    }

    /// Synchronous RGBA8 readback of the bound target.
    pub fn read_pixels(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>> {
        let region = Rect::new(x as i32, y as i32, width as i32, height as i32);
        self.backend
            .read_pixels(region)
            .with_context(|| format!("failed to read {width}x{height} pixels at ({x}, {y})"))
    }

    // ── render targets ────────────────────────────────────────────────────

    /// Redirects rendering into `target`, optionally matching the viewport to it.
    pub fn bind_render_target(&mut self, target: TextureHandle, set_viewport: bool) {
        let Some(texture) = self.textures.get(target).copied() else {
            log::warn!("bind_render_target: stale texture handle");
            return;
        };
        if texture.kind != TextureKind::RenderTarget {
            log::warn!("bind_render_target: texture {:?} is not a render target", texture.id);
            return;
        }

        self.backend.bind_framebuffer(Some(texture.id));
        self.render_target = Some(target);

        if set_viewport {
            self.set_viewport(Rect::from_size(texture.width, texture.height));
        } else {
            self.apply_viewport();
        }
    }

    /// Returns to the on-screen framebuffer, optionally resetting the viewport.
    pub fn unbind_render_target(&mut self, reset_viewport: bool) {
        self.backend.bind_framebuffer(None);
        self.render_target = None;

        if reset_viewport {
            let (width, height) = self.drawable_size();
            self.set_viewport(Rect::from_size(width, height));
        } else {
            self.apply_viewport();
        }
    }

    #[inline]
    pub fn is_using_render_target(&self) -> bool {
        self.render_target.is_some()
    }

    #[inline]
    pub fn render_target(&self) -> Option<TextureHandle> {
        self.render_target
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Creates an RGBA8 texture. `pixels`, when given, covers the whole texture.
    pub fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
        filter: TextureFilter,
        kind: TextureKind,
    ) -> Result<TextureHandle> {
        ensure!(width > 0 && height > 0, "texture size must be positive, got {width}x{height}");
        if let Some(pixels) = pixels {
            let expected = width as usize * height as usize * 4;
            ensure!(
                pixels.len() >= expected,
                "pixel data holds {} bytes, {width}x{height} RGBA needs {expected}",
                pixels.len()
            );
        }

        let desc = TextureDesc {
            width,
            height,
            filter,
            render_target: kind == TextureKind::RenderTarget,
        };
        let id = self
            .backend
            .create_texture(&desc, pixels)
            .with_context(|| format!("failed to create {width}x{height} {kind:?} texture"))?;

        log::debug!("texture {id:?} created ({width}x{height}, {kind:?}, {filter:?})");

        Ok(self.textures.insert(Texture {
            id,
            width,
            height,
            filter,
            kind,
        }))
    }

    /// Decodes an encoded image (PNG) and uploads it as RGBA8.
    pub fn create_texture_from_bytes(
        &mut self,
        bytes: &[u8],
        filter: TextureFilter,
        kind: TextureKind,
    ) -> Result<TextureHandle> {
        let image = image::load_from_memory(bytes)
            .context("failed to decode image")?
            .to_rgba8();
        let (width, height) = image.dimensions();
        self.create_texture(width, height, Some(image.as_raw()), filter, kind)
    }

    pub fn create_texture_from_file(
        &mut self,
        path: impl AsRef<Path>,
        filter: TextureFilter,
        kind: TextureKind,
    ) -> Result<TextureHandle> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        self.create_texture_from_bytes(&bytes, filter, kind)
            .with_context(|| format!("failed to load texture {}", path.display()))
    }

    #[inline]
    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle)
    }

    /// Overwrites a region with tightly packed RGBA8 pixels.
    pub fn set_texture_data(&mut self, handle: TextureHandle, region: Rect, pixels: &[u8]) {
        let Some(texture) = self.textures.get(handle) else {
            log::warn!("set_texture_data: stale texture handle");
            return;
        };

        assert!(region.x >= 0 && region.y >= 0, "texture region must not be negative");
        assert!(
            region.right() as u32 <= texture.width && region.bottom() as u32 <= texture.height,
            "texture region {region:?} exceeds {}x{}",
            texture.width,
            texture.height
        );
        assert_eq!(
            pixels.len(),
            region.width as usize * region.height as usize * 4,
            "pixel data does not match region size"
        );

        self.backend.write_texture(texture.id, region, pixels);
    }

    pub fn texture_filter(&self, handle: TextureHandle) -> Option<TextureFilter> {
        self.textures.get(handle).map(|t| t.filter)
    }

    pub fn set_texture_filter(&mut self, handle: TextureHandle, filter: TextureFilter) {
        let Some(texture) = self.textures.get_mut(handle) else {
            log::warn!("set_texture_filter: stale texture handle");
            return;
        };
        texture.filter = filter;
        self.backend.set_texture_filter(texture.id, filter);
    }

    pub fn destroy_texture(&mut self, handle: TextureHandle) {
        let Some(texture) = self.textures.remove(handle) else {
            log::warn!("destroy_texture: stale texture handle");
            return;
        };

        if self.render_target == Some(handle) {
            log::warn!("destroying the bound render target; returning to the screen");
            self.unbind_render_target(true);
        }

        self.backend.destroy_texture(texture.id);
        log::debug!("texture {:?} destroyed", texture.id);
    }

    // ── shader programs ───────────────────────────────────────────────────

    pub fn create_shader_program(&mut self, source: &str) -> Result<ProgramHandle> {
        let program = ShaderProgram::create(&mut self.backend, source)?;
        Ok(self.programs.insert(program))
    }

    #[inline]
    pub fn shader_program(&self, handle: ProgramHandle) -> Option<&ShaderProgram> {
        self.programs.get(handle)
    }

    #[inline]
    pub fn shader_program_mut(&mut self, handle: ProgramHandle) -> Option<&mut ShaderProgram> {
        self.programs.get_mut(handle)
    }

    /// Makes `handle` the program used by subsequent draws.
    pub fn apply_shader_program(&mut self, handle: ProgramHandle) {
        let Some(program) = self.programs.get(handle) else {
            log::warn!("apply_shader_program: stale shader program handle");
            return;
        };
        self.backend.use_program(program.id());
    }

    /// Pushes the staged parameters of `handle` to the GPU.
    pub fn apply_parameters(&mut self, handle: ProgramHandle) {
        let Some(program) = self.programs.get(handle) else {
            log::warn!("apply_parameters: stale shader program handle");
            return;
        };
        program.parameters().apply(&mut self.backend);
    }

    pub fn destroy_shader_program(&mut self, handle: ProgramHandle) {
        match self.programs.remove(handle) {
            Some(program) => program.destroy(&mut self.backend),
            None => log::warn!("destroy_shader_program: stale shader program handle"),
        }
    }

    // ── draw ──────────────────────────────────────────────────────────────

    /// Issues a non-indexed draw of `primitive_count` primitives.
    pub fn draw_primitives(
        &mut self,
        buffer: &VertexBuffer,
        topology: PrimitiveTopology,
        first_vertex: u32,
        primitive_count: u32,
    ) {
        let Some(vertex_count) = topology.vertex_count(primitive_count) else {
            log::error!("draw of {primitive_count} {topology:?} primitives overflows the vertex count");
            return;
        };
        let fits = first_vertex
            .checked_add(vertex_count)
            .is_some_and(|end| end <= buffer.capacity());
        if !fits {
            log::error!(
                "draw of {vertex_count} vertices from {first_vertex} overruns buffer capacity {}",
                buffer.capacity()
            );
            return;
        }
        self.backend
            .draw(buffer.id(), topology, first_vertex, vertex_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BufferUsage, GpuCommand, RecordingBackend, TextureId};

    fn device() -> GraphicsDevice<RecordingBackend> {
        let mut d = GraphicsDevice::new(RecordingBackend::new(800, 600));
        d.backend_mut().clear_commands();
        d
    }

    fn top_left_device() -> GraphicsDevice<RecordingBackend> {
        let backend = RecordingBackend::new(800, 600).with_origin(FramebufferOrigin::TopLeft);
        let mut d = GraphicsDevice::new(backend);
        d.backend_mut().clear_commands();
        d
    }

    fn render_target(d: &mut GraphicsDevice<RecordingBackend>) -> TextureHandle {
        let t = d
            .create_texture(256, 128, None, TextureFilter::Linear, TextureKind::RenderTarget)
            .unwrap();
        d.backend_mut().clear_commands();
        t
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_applies_premultiplied_blend_and_full_viewport() {
        let d = GraphicsDevice::new(RecordingBackend::new(800, 600));
        assert_eq!(
            d.backend().commands(),
            &[
                GpuCommand::SetBlendState(BlendMode::PremultipliedAlpha.state()),
                GpuCommand::SetViewport(Rect::new(0, 0, 800, 600)),
            ]
        );
        assert_eq!(d.blend_mode(), Some(BlendMode::PremultipliedAlpha));
    }

    // ── blend ─────────────────────────────────────────────────────────────

    #[test]
    fn repeated_blend_mode_issues_one_change() {
        let mut d = device();
        d.set_blend_mode(BlendMode::Additive);
        d.set_blend_mode(BlendMode::Additive);
        assert_eq!(
            d.backend().commands(),
            &[GpuCommand::SetBlendState(BlendMode::Additive.state())]
        );
    }

    #[test]
    fn cached_blend_mode_is_skipped() {
        let mut d = device();
        d.set_blend_mode(BlendMode::PremultipliedAlpha);
        assert!(d.backend().commands().is_empty());
    }

    // ── scissor ───────────────────────────────────────────────────────────

    #[test]
    fn on_screen_scissor_is_flipped_for_bottom_left_origin() {
        let mut d = device();
        d.enable_scissor_rectangle(Rect::new(10, 20, 100, 50));
        assert_eq!(
            d.backend().commands(),
            &[GpuCommand::SetScissor(Some(Rect::new(10, 600 - 20 - 50, 100, 50)))]
        );
    }

    #[test]
    fn offscreen_scissor_is_unmodified() {
        let mut d = device();
        let rt = render_target(&mut d);
        d.bind_render_target(rt, true);
        d.backend_mut().clear_commands();

        d.enable_scissor_rectangle(Rect::new(10, 20, 100, 50));
        assert_eq!(
            d.backend().commands(),
            &[GpuCommand::SetScissor(Some(Rect::new(10, 20, 100, 50)))]
        );
    }

    #[test]
    fn top_left_backend_never_flips_scissor() {
        let mut d = top_left_device();
        d.enable_scissor_rectangle(Rect::new(10, 20, 100, 50));
        assert_eq!(
            d.backend().commands(),
            &[GpuCommand::SetScissor(Some(Rect::new(10, 20, 100, 50)))]
        );
    }

    #[test]
    fn disable_scissor_clears_flag() {
        let mut d = device();
        d.enable_scissor_rectangle(Rect::new(0, 0, 1, 1));
        d.disable_scissor_rectangle();
        assert!(!d.is_scissor_enabled());
        assert_eq!(d.backend().commands().last(), Some(&GpuCommand::SetScissor(None)));
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_color_is_cached() {
        let mut d = device();
        d.clear_screen(Color::BLACK);
        d.clear_screen(Color::BLACK);
        assert_eq!(
            d.backend().commands(),
            &[
                GpuCommand::SetClearColor(Color::BLACK),
                GpuCommand::Clear,
                GpuCommand::Clear,
            ]
        );
    }

    #[test]
    fn clear_suspends_and_restores_scissor() {
        let mut d = top_left_device();
        let scissor = Rect::new(1, 2, 3, 4);
        d.enable_scissor_rectangle(scissor);
        d.backend_mut().clear_commands();

        d.clear_screen(Color::WHITE);
        assert_eq!(
            d.backend().commands(),
            &[
                GpuCommand::SetScissor(None),
                GpuCommand::SetClearColor(Color::WHITE),
                GpuCommand::Clear,
                GpuCommand::SetScissor(Some(scissor)),
            ]
        );
        assert!(d.is_scissor_enabled());
    }

    #[test]
    fn clear_restores_flipped_scissor_once() {
        let mut d = device();
        d.enable_scissor_rectangle(Rect::new(10, 20, 100, 50));
        d.backend_mut().clear_commands();

        d.clear_screen(Color::WHITE);
        d.clear_screen(Color::WHITE);
        assert_eq!(
            d.backend().commands(),
            &[
                GpuCommand::SetScissor(None),
                GpuCommand::SetClearColor(Color::WHITE),
                GpuCommand::Clear,
                GpuCommand::SetScissor(Some(Rect::new(10, 530, 100, 50))),
                GpuCommand::SetScissor(None),
                GpuCommand::Clear,
                GpuCommand::SetScissor(Some(Rect::new(10, 530, 100, 50))),
            ]
        );
    }

    // ── render targets ────────────────────────────────────────────────────

    #[test]
    fn bind_render_target_sets_viewport_to_target() {
        let mut d = device();
        let rt = render_target(&mut d);
        d.bind_render_target(rt, true);

        assert!(d.is_using_render_target());
        assert_eq!(d.viewport(), Rect::new(0, 0, 256, 128));

        d.unbind_render_target(true);
        assert!(!d.is_using_render_target());
        assert_eq!(d.viewport(), Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn oversized_viewport_is_clipped_to_framebuffer() {
        let mut d = device();
        d.set_viewport(Rect::new(-100, 0, 1000, 600));

        assert_eq!(d.viewport(), Rect::new(-100, 0, 1000, 600));
        assert_eq!(d.effective_viewport(), Rect::new(0, 0, 800, 600));
        assert_eq!(
            d.backend().commands().last(),
            Some(&GpuCommand::SetViewport(Rect::new(0, 0, 800, 600)))
        );

        let rt = render_target(&mut d);
        d.bind_render_target(rt, false);
        assert_eq!(d.effective_viewport(), Rect::new(0, 0, 256, 128));
        assert_eq!(
            d.backend().commands().last(),
            Some(&GpuCommand::SetViewport(Rect::new(0, 0, 256, 128)))
        );
    }

    #[test]
    fn normal_texture_cannot_be_bound_as_target() {
        let mut d = device();
        let t = d
            .create_texture(4, 4, None, TextureFilter::Point, TextureKind::Normal)
            .unwrap();
        d.bind_render_target(t, true);
        assert!(!d.is_using_render_target());
    }

    #[test]
    fn destroying_bound_target_returns_to_screen() {
        let mut d = device();
        let rt = render_target(&mut d);
        d.bind_render_target(rt, true);
        d.destroy_texture(rt);

        assert!(!d.is_using_render_target());
        assert!(d.texture(rt).is_none());
    }

    // ── textures ──────────────────────────────────────────────────────────

    #[test]
    fn short_pixel_data_is_rejected() {
        let mut d = device();
        let err = d.create_texture(2, 2, Some(&[0u8; 8]), TextureFilter::Linear, TextureKind::Normal);
        assert!(err.is_err());
        assert!(d.backend().commands().is_empty());
    }

    #[test]
    fn texture_filter_round_trips_through_device() {
        let mut d = device();
        let t = d
            .create_texture(1, 1, Some(&[255; 4]), TextureFilter::Linear, TextureKind::Normal)
            .unwrap();
        d.set_texture_filter(t, TextureFilter::Point);
        assert_eq!(d.texture_filter(t), Some(TextureFilter::Point));
    }

    #[test]
    fn stale_texture_handle_is_ignored() {
        let mut d = device();
        let t = d
            .create_texture(1, 1, None, TextureFilter::Linear, TextureKind::Normal)
            .unwrap();
        d.destroy_texture(t);
        d.backend_mut().clear_commands();

        d.set_texture_filter(t, TextureFilter::Point);
        d.destroy_texture(t);
        assert!(d.backend().commands().is_empty());
    }

    #[test]
    fn png_bytes_are_decoded() {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let mut d = device();
        let t = d
            .create_texture_from_bytes(&png, TextureFilter::Linear, TextureKind::Normal)
            .unwrap();
        let tex = d.texture(t).unwrap();
        assert_eq!((tex.width(), tex.height()), (3, 2));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_primitives_derives_vertex_count() {
        let mut d = device();
        let vb = VertexBuffer::create(&mut d, BufferUsage::Dynamic, 64).unwrap();
        d.backend_mut().clear_commands();

        d.draw_primitives(&vb, PrimitiveTopology::LineStrip, 2, 5);
        assert_eq!(
            d.backend().commands(),
            &[GpuCommand::Draw {
                buffer: vb.id(),
                topology: PrimitiveTopology::LineStrip,
                first_vertex: 2,
                vertex_count: 6,
            }]
        );
    }

    #[test]
    fn oversized_draws_are_dropped() {
        let mut d = device();
        let vb = VertexBuffer::create(&mut d, BufferUsage::Dynamic, 64).unwrap();
        d.backend_mut().clear_commands();

        d.draw_primitives(&vb, PrimitiveTopology::Triangles, 0, u32::MAX);
        d.draw_primitives(&vb, PrimitiveTopology::Points, u32::MAX, 2);
        d.draw_primitives(&vb, PrimitiveTopology::Triangles, 60, 2);
        assert!(d.backend().commands().is_empty());
    }

    #[test]
    fn read_pixels_returns_rgba_rows() {
        let mut d = device();
        let pixels = d.read_pixels(0, 0, 4, 2).unwrap();
        assert_eq!(pixels.len(), 4 * 2 * 4);
        assert_eq!(d.backend().commands(), &[GpuCommand::ReadPixels(Rect::new(0, 0, 4, 2))]);
    }

    #[test]
    fn texture_ids_are_exposed_for_binding() {
        let mut d = device();
        let t = d
            .create_texture(2, 2, None, TextureFilter::Linear, TextureKind::Normal)
            .unwrap();
        assert_ne!(d.texture(t).unwrap().id(), TextureId(0));
    }
}
