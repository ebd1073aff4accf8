use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget, StripRenderer};
use crate::ribbon::Scene;

/// Result of drawing one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawOutcome {
    Presented,
    /// Nothing was presented this frame; try again next frame.
    Skipped,
    /// The surface cannot recover. The engine tears itself down.
    Lost,
}

/// Where a scene gets drawn.
pub trait RenderSurface {
    /// Resizes the backing surface to `physical` pixels. Zero sizes are valid
    /// and make subsequent draws skip.
    fn resize(&mut self, physical: (u32, u32));

    /// Records and submits one frame for `scene`.
    fn draw(&mut self, scene: &Scene) -> DrawOutcome;
}

/// wgpu-backed render surface filling a window.
pub struct GpuSurface<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    renderer: StripRenderer,
}

impl<'w> GpuSurface<'w> {
    /// Creates the device and surface for `window`, blocking until wgpu is ready.
    pub fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window, init))?;
        Ok(Self { window, gpu, renderer: StripRenderer::new() })
    }
}

impl RenderSurface for GpuSurface<'_> {
    fn resize(&mut self, physical: (u32, u32)) {
        let (width, height) = physical;
        self.gpu.resize(PhysicalSize::new(width, height));
    }

    fn draw(&mut self, scene: &Scene) -> DrawOutcome {
        if self.gpu.is_zero_sized() {
            return DrawOutcome::Skipped;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let reason = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface lost: {reason}");
                        DrawOutcome::Lost
                    }
                    action => {
                        log::debug!("frame skipped ({action:?}): {reason}");
                        DrawOutcome::Skipped
                    }
                };
            }
        };

        let ctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.renderer.render(&ctx, &mut target, scene);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        DrawOutcome::Presented
    }
}
