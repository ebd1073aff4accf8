use winit::window::Window;

use crate::coords::Rect;
use crate::host::{Container, FrameToken, HostRegistry, ListenerId, ListenerKind};

/// A winit window seen as a ribbon container.
///
/// Borrowed for the span of one event; the registry outlives it inside the
/// window entry.
pub(crate) struct WindowHost<'a> {
    pub window: &'a Window,
    pub registry: &'a mut HostRegistry,
}

impl Container for WindowHost<'_> {
    fn bounds(&self) -> Rect {
        let size = self.window.inner_size().to_logical::<f32>(self.window.scale_factor());
        Rect::new(0.0, 0.0, size.width, size.height)
    }

    fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    fn attach(&mut self, kind: ListenerKind) -> ListenerId {
        self.registry.attach(kind)
    }

    fn detach(&mut self, id: ListenerId) {
        self.registry.detach(id);
    }

    fn schedule_frame(&mut self) -> FrameToken {
        let token = self.registry.schedule_frame();
        self.window.request_redraw();
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.registry.cancel_frame(token);
    }
}
