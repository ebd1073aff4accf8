//! Host container contract.
//!
//! The engine never talks to a window system directly. Whatever hosts it (a
//! winit window at runtime, a fake in tests) implements [`Container`]: it
//! reports its bounds and pixel density, keeps the table of attached
//! listeners, and schedules frame callbacks.
//!
//! Listener and frame bookkeeping is shared through [`HostRegistry`], so every
//! container enforces the same attach/detach and cancel semantics.

mod registry;

pub use registry::HostRegistry;

use crate::coords::Rect;

/// Event families a container can deliver to the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ListenerKind {
    PointerMove,
    TouchStart,
    TouchMove,
    TouchEnd,
    Resize,
}

impl ListenerKind {
    /// Every listener the ribbon engine attaches while running.
    pub const ALL: [ListenerKind; 5] = [
        ListenerKind::PointerMove,
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
        ListenerKind::Resize,
    ];
}

/// Handle for an attached listener.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Handle for a scheduled frame callback.
///
/// A container fires at most one pending frame at a time; a callback carrying a
/// token that is no longer pending must be ignored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameToken(pub(crate) u64);

/// Device pixel ratio used when the host reports an unusable value.
pub const FALLBACK_DEVICE_PIXEL_RATIO: f32 = 2.0;

/// The sized element the engine draws into.
pub trait Container {
    /// Bounding box in logical pixels. Pointer events are relative to the same
    /// coordinate system.
    fn bounds(&self) -> Rect;

    /// Physical size of the drawable area in pixels.
    fn physical_size(&self) -> (u32, u32);

    /// Physical pixels per logical pixel as reported by the host.
    fn device_pixel_ratio(&self) -> f32;

    fn attach(&mut self, kind: ListenerKind) -> ListenerId;

    fn detach(&mut self, id: ListenerId);

    /// Requests a frame callback; the host later fires it with the returned token.
    fn schedule_frame(&mut self) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);
}

/// Sanitized device pixel ratio of `container`.
pub fn effective_device_pixel_ratio(container: &dyn Container) -> f32 {
    let dpr = container.device_pixel_ratio();
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        FALLBACK_DEVICE_PIXEL_RATIO
    }
}
