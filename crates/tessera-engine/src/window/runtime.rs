use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::backend::FrameStatus;
use crate::backend::gpu::{GpuInit, WgpuBackend};
use crate::core::{App, AppControl, Device, FrameCtx};
use crate::device::GraphicsDevice;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, drives `app` until it exits, then returns.
    ///
    /// Fails if the event loop, the window or the device cannot be created, or
    /// if [`App::init`] fails.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    device: Device,
    clock: FrameClock,
    window: Arc<Window>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let backend = WgpuBackend::for_window(window.clone(), self.gpu_init.clone())
            .context("GPU initialization failed for window")?;
        let mut device = GraphicsDevice::new(backend);

        self.app
            .init(&mut device)
            .context("application init failed")?;

        let id = window.id();
        self.entry = Some(WindowEntry {
            device,
            clock: FrameClock::default(),
            window,
        });
        Ok(id)
    }

    /// Runs `on_exit` once and releases the device.
    fn shutdown(&mut self) {
        if let Some(mut entry) = self.entry.take() {
            self.app.on_exit(&mut entry.device);
            log::info!("window closed");
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.shutdown();
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure = Some(error);
        self.request_exit(event_loop);
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(entry) = self.entry.as_mut() {
            entry.device.resize(size.width, size.height);
            entry.window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (app, slot) = (&mut self.app, &mut self.entry);
        let Some(entry) = slot.as_mut() else {
            return;
        };

        match entry.device.begin_frame() {
            FrameStatus::Ready => {}
            FrameStatus::Skip => {
                entry.window.request_redraw();
                return;
            }
            FrameStatus::Fatal => {
                self.fail(event_loop, anyhow!("surface lost beyond recovery"));
                return;
            }
        }

        let time = entry.clock.tick();
        let control = {
            let mut ctx = FrameCtx {
                window: &entry.window,
                device: &mut entry.device,
                time,
            };
            app.on_frame(&mut ctx)
        };

        entry.window.pre_present_notify();
        entry.device.end_frame();

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(id) => {
                log::info!("window {id:?} ready");
                if let Some(entry) = &self.entry {
                    entry.window.request_redraw();
                }
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.entry.as_ref().map(|e| e.window.id()) != Some(window_id) {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.entry.as_ref().map(|e| e.window.inner_size()) {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
