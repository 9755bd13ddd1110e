use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use tessera_engine::backend::TextureFilter;
use tessera_engine::backend::gpu::GpuInit;
use tessera_engine::batch::{BatchEngine, QuadParams, UvMode};
use tessera_engine::coords::{Color, Mat4, Vec2};
use tessera_engine::core::{App, AppControl, Device, FrameCtx};
use tessera_engine::device::{BlendMode, TextureHandle, TextureKind};
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::window::{Runtime, RuntimeConfig};

const MAX_TRIANGLES: u32 = 1024;
const CHECKER_SIZE: u32 = 256;
const CHECKER_CELL: u32 = 32;

/// Draws an image into an offscreen target, blits the target to the window,
/// then spins the image on top.
struct Demo {
    image_path: Option<String>,
    resources: Option<Resources>,
}

struct Resources {
    batch: BatchEngine,
    image: TextureHandle,
    target: TextureHandle,
}

impl App for Demo {
    fn init(&mut self, device: &mut Device) -> Result<()> {
        let image = match &self.image_path {
            Some(path) => {
                device.create_texture_from_file(path, TextureFilter::Linear, TextureKind::Normal)?
            }
            None => device.create_texture(
                CHECKER_SIZE,
                CHECKER_SIZE,
                Some(&checkerboard(CHECKER_SIZE, CHECKER_CELL)),
                TextureFilter::Point,
                TextureKind::Normal,
            )?,
        };

        let (width, height) = device.drawable_size();
        let target = device.create_texture(
            width.max(1),
            height.max(1),
            None,
            TextureFilter::Linear,
            TextureKind::RenderTarget,
        )?;

        let batch = BatchEngine::new(device, MAX_TRIANGLES)?;

        log::info!(
            "demo ready: backend {:?}, target {width}x{height}",
            device.backend().gpu().adapter_info().backend
        );

        self.resources = Some(Resources { batch, image, target });
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(res) = self.resources.as_mut() else {
            return AppControl::Exit;
        };
        let device = &mut *ctx.device;

        // Offscreen pass.
        device.bind_render_target(res.target, true);
        device.clear_screen(Color::rgb(0.0, 0.0, 1.0));

        let (tw, th) = device
            .texture(res.target)
            .map(|t| (t.width() as f32, t.height() as f32))
            .unwrap_or_default();

        res.batch.begin(
            device,
            BlendMode::PremultipliedAlpha,
            Some(res.image),
            None,
            Mat4::IDENTITY,
        );
        res.batch.batch_quad_uv(
            device,
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::ZERO,
            Vec2::new(tw, th),
            None,
        );
        res.batch.end(device);

        // On-screen pass.
        device.unbind_render_target(true);
        device.clear_screen(Color::BLACK);

        let (sw, sh) = device.drawable_size();
        let center = Vec2::new(sw as f32 * 0.5, sh as f32 * 0.5);

        res.batch.begin(
            device,
            BlendMode::None,
            Some(res.target),
            None,
            Mat4::IDENTITY,
        );
        res.batch.batch_quad(
            device,
            &QuadParams {
                position: center,
                origin: Vec2::splat(0.5),
                ..Default::default()
            },
        );
        res.batch.end(device);

        res.batch.begin(
            device,
            BlendMode::Alpha,
            Some(res.image),
            None,
            Mat4::IDENTITY,
        );
        res.batch.batch_quad(
            device,
            &QuadParams {
                position: center,
                rotation: ctx.time.elapsed as f32,
                origin: Vec2::splat(0.5),
                uv_mode: UvMode::FLIP_HORIZONTAL,
                ..Default::default()
            },
        );
        res.batch.end(device);

        AppControl::Continue
    }

    fn on_exit(&mut self, device: &mut Device) {
        if let Some(res) = self.resources.take() {
            res.batch.destroy(device);
            device.destroy_texture(res.target);
            device.destroy_texture(res.image);
        }
    }
}

/// RGBA8 checkerboard, two shades of grey.
fn checkerboard(size: u32, cell: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let shade = if ((x / cell) + (y / cell)) % 2 == 0 { 0xE0 } else { 0x40 };
            pixels.extend_from_slice(&[shade, shade, shade, 0xFF]);
        }
    }
    pixels
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let demo = Demo {
        image_path: std::env::args().nth(1),
        resources: None,
    };

    Runtime::run(
        RuntimeConfig {
            title: "tessera demo".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        demo,
    )
}
