//! Headless stand-ins for a window and a GPU surface.

use crate::coords::Rect;
use crate::host::{Container, FrameToken, HostRegistry, ListenerId, ListenerKind};
use crate::render::{DrawOutcome, RenderSurface};
use crate::ribbon::Scene;

/// Container with a fixed box and a plain registry.
pub(crate) struct FakeContainer {
    pub bounds: Rect,
    pub dpr: f32,
    pub registry: HostRegistry,
}

impl FakeContainer {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self { bounds: Rect::new(0.0, 0.0, width, height), dpr, registry: HostRegistry::new() }
    }
}

impl Container for FakeContainer {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn physical_size(&self) -> (u32, u32) {
        let dpr = if self.dpr > 0.0 { self.dpr } else { 1.0 };
        let w = (self.bounds.size.x * dpr).round().max(0.0) as u32;
        let h = (self.bounds.size.y * dpr).round().max(0.0) as u32;
        (w, h)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn attach(&mut self, kind: ListenerKind) -> ListenerId {
        self.registry.attach(kind)
    }

    fn detach(&mut self, id: ListenerId) {
        self.registry.detach(id);
    }

    fn schedule_frame(&mut self) -> FrameToken {
        self.registry.schedule_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.registry.cancel_frame(token);
    }
}

/// Surface that records what it was asked to do.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub sizes: Vec<(u32, u32)>,
    pub draws: usize,
    pub skipped: usize,
    /// Report `Lost` on every draw after this many.
    pub lose_after: Option<usize>,
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, physical: (u32, u32)) {
        self.sizes.push(physical);
    }

    fn draw(&mut self, _scene: &Scene) -> DrawOutcome {
        self.draws += 1;
        if self.lose_after.is_some_and(|n| self.draws > n) {
            return DrawOutcome::Lost;
        }
        match self.sizes.last() {
            Some(&(w, h)) if w > 0 && h > 0 => DrawOutcome::Presented,
            _ => {
                self.skipped += 1;
                DrawOutcome::Skipped
            }
        }
    }
}
