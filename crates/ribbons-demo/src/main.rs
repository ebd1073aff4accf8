use std::path::PathBuf;

use anyhow::Result;
use ribbons_engine::config::RibbonConfig;
use ribbons_engine::core::{App, AppControl, FrameCtx};
use ribbons_engine::device::GpuInit;
use ribbons_engine::logging::{LoggingConfig, init_logging};
use ribbons_engine::window::{Runtime, RuntimeConfig, RuntimeCtx};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Frames between two debug-level stats lines.
const STATS_EVERY: u64 = 600;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match &config_path {
        Some(path) => RibbonConfig::load(path)?,
        None => RibbonConfig::default().with_colors(["#ff9346", "#7cff67", "#ffee51", "#5227FF"]),
    };

    log::info!("keys: F fade, W wave, R reload, Esc quit");

    let gpu_init = GpuInit {
        present_mode: wgpu::PresentMode::AutoVsync,
        ..GpuInit::transparent()
    };

    let app = DemoApp::new(config_path, config.clone());
    Runtime::run(RuntimeConfig::default(), gpu_init, config, app)
}

struct DemoApp {
    config_path: Option<PathBuf>,
    config: RibbonConfig,
    stats_from: f32,
}

impl DemoApp {
    fn new(config_path: Option<PathBuf>, config: RibbonConfig) -> Self {
        Self { config_path, config, stats_from: 0.0 }
    }

    fn reload(&mut self) {
        let Some(path) = &self.config_path else {
            log::info!("no config file given; restarting with current settings");
            return;
        };
        match RibbonConfig::load(path) {
            Ok(config) => self.config = config,
            Err(e) => log::warn!("keeping previous config: {e:#}"),
        }
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let WindowEvent::KeyboardInput {
            event: KeyEvent { physical_key: PhysicalKey::Code(code), state: ElementState::Pressed, repeat: false, .. },
            ..
        } = event
        else {
            return AppControl::Continue;
        };

        match code {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::KeyF => {
                self.config.enable_fade = !self.config.enable_fade;
                log::info!("fade {}", on_off(self.config.enable_fade));
            }
            KeyCode::KeyW => {
                self.config.enable_shader_effect = !self.config.enable_shader_effect;
                log::info!("wave {}", on_off(self.config.enable_shader_effect));
            }
            KeyCode::KeyR => self.reload(),
            _ => return AppControl::Continue,
        }

        runtime.reconfigure(self.config.clone());
        self.stats_from = 0.0;
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let t = ctx.time;
        if t.frame_index > 0 && t.frame_index % STATS_EVERY == 0 {
            let span = t.elapsed - self.stats_from;
            if span > 0.0 {
                log::debug!("frame {}: {:.1} fps, last dt {:.2} ms", t.frame_index, STATS_EVERY as f32 / span, t.dt_ms);
            }
            self.stats_from = t.elapsed;
        }
        AppControl::Continue
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
