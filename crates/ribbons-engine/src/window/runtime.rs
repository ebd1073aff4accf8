use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::RibbonConfig;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::GpuInit;
use crate::host::{HostRegistry, ListenerKind};
use crate::input::platform::winit::translate_window_event;
use crate::lifecycle::RibbonEngine;
use crate::render::GpuSurface;

use super::host::WindowHost;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Create the window with a transparent background so only the ribbons
    /// show. Pair with [`GpuInit::transparent`].
    pub transparent: bool,
    /// Seed for ribbon jitter. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ribbons".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: true,
            seed: None,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Tears the running engine down and starts a fresh one with `config`.
    pub fn reconfigure(&mut self, config: RibbonConfig) {
        self.commands.push(Command::Reconfigure(config));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    Reconfigure(RibbonConfig),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs a ribbon engine in it until the window closes
    /// or the app asks to exit.
    pub fn run<A>(runtime: RuntimeConfig, gpu_init: GpuInit, ribbons: RibbonConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(runtime, gpu_init, ribbons, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    registry: HostRegistry,

    window: Window,

    /// Surface created with the entry, handed to the engine on mount. `None`
    /// if the GPU could not be initialized.
    #[borrows(window)]
    #[covariant]
    surface: Option<GpuSurface<'this>>,

    #[borrows(window)]
    #[covariant]
    engine: RibbonEngine<GpuSurface<'this>>,
}

impl WindowEntry {
    fn create(window: Window, registry: HostRegistry, gpu_init: GpuInit, config: RibbonConfig) -> Self {
        WindowEntryBuilder {
            registry,
            window,
            surface_builder: |w| match GpuSurface::new(w, gpu_init) {
                Ok(surface) => Some(surface),
                Err(e) => {
                    log::error!("GPU unavailable, ribbons disabled: {e:#}");
                    None
                }
            },
            engine_builder: |_| RibbonEngine::new(config),
        }
        .build()
    }

    /// Starts the engine if a surface is available.
    fn mount(&mut self, rng: &mut StdRng) {
        self.with_mut(|fields| {
            let Some(surface) = fields.surface.take() else { return };
            let mut host = WindowHost { window: fields.window, registry: fields.registry };
            if let Err(e) = fields.engine.start(&mut host, surface, rng) {
                log::error!("failed to start ribbon engine: {e:#}");
            }
        });
    }

    fn unmount(&mut self) {
        self.with_mut(|fields| {
            let mut host = WindowHost { window: fields.window, registry: fields.registry };
            fields.engine.stop(&mut host);
        });
    }

    /// Full teardown followed by a fresh engine (and surface) for `config`.
    fn rebuild(mut self, gpu_init: GpuInit, config: RibbonConfig, rng: &mut StdRng) -> Self {
        self.unmount();
        let heads = self.into_heads();
        let mut entry = WindowEntry::create(heads.window, heads.registry, gpu_init, config);
        entry.mount(rng);
        entry
    }

    fn wants(&self, kind: ListenerKind) -> bool {
        self.borrow_registry().wants(kind)
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    runtime: RuntimeConfig,
    gpu_init: GpuInit,
    ribbons: RibbonConfig,
    app: A,
    rng: StdRng,

    entry: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(runtime: RuntimeConfig, gpu_init: GpuInit, ribbons: RibbonConfig, app: A) -> Self {
        let rng = match runtime.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            runtime,
            gpu_init,
            ribbons,
            app,
            rng,
            entry: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.runtime.title.clone())
            .with_inner_size(self.runtime.initial_size)
            .with_transparent(self.runtime.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let mut entry = WindowEntry::create(window, HostRegistry::new(), self.gpu_init.clone(), self.ribbons.clone());
        entry.mount(&mut self.rng);
        self.entry = Some(entry);
        Ok(())
    }

    fn destroy_window_entry(&mut self) {
        if let Some(mut entry) = self.entry.take() {
            entry.unmount();
        }
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::Reconfigure(config) => {
                    log::info!("reconfiguring ribbons");
                    self.ribbons = config;
                    if let Some(entry) = self.entry.take() {
                        let gpu_init = self.gpu_init.clone();
                        self.entry = Some(entry.rebuild(gpu_init, self.ribbons.clone(), &mut self.rng));
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            self.destroy_window_entry();
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Frames are driven by the engine's schedule, not continuously.
        if let Some(entry) = &self.entry {
            if entry.borrow_registry().has_pending_frame() {
                entry.borrow_window().request_redraw();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else { return };
        if entry.borrow_window().id() != window_id {
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();
        if self.app.on_window_event(&event, &mut runtime_ctx) == AppControl::Exit {
            runtime_ctx.exit();
        }

        match &event {
            WindowEvent::CloseRequested => {
                runtime_ctx.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if entry.wants(ListenerKind::Resize) {
                    entry.with_mut(|fields| {
                        let host = WindowHost { window: fields.window, registry: fields.registry };
                        fields.engine.on_resize(&host);
                    });
                }
            }

            WindowEvent::RedrawRequested => {
                let mut frame_time = None;
                entry.with_mut(|fields| {
                    let Some(token) = fields.registry.take_due_frame() else { return };
                    let mut host = WindowHost { window: fields.window, registry: fields.registry };
                    if fields.engine.on_frame(&mut host, token, Instant::now()).is_some() {
                        frame_time = fields.engine.last_frame();
                    }
                });

                if let Some(time) = frame_time {
                    let mut ctx = FrameCtx { time, runtime: &mut runtime_ctx };
                    if self.app.on_frame(&mut ctx) == AppControl::Exit {
                        runtime_ctx.exit();
                    }
                }
            }

            other => {
                let input = translate_window_event(entry.borrow_window(), other);
                if let Some(ev) = input.filter(|ev| entry.wants(ev.listener_kind())) {
                    entry.with_mut(|fields| {
                        let host = WindowHost { window: fields.window, registry: fields.registry };
                        fields.engine.on_input(&host, &ev);
                    });
                }
            }
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}
