use std::time::Instant;

use anyhow::{Result, bail};
use rand::Rng;

use crate::config::RibbonConfig;
use crate::coords::Viewport;
use crate::host::{Container, FrameToken, ListenerId, ListenerKind, effective_device_pixel_ratio};
use crate::input::{InputEvent, InputTracker};
use crate::render::{DrawOutcome, RenderSurface};
use crate::ribbon::Scene;
use crate::time::{FrameClock, FrameTime};

/// Observable lifecycle phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EnginePhase {
    Uninitialized,
    Running,
    TornDown,
}

/// One ribbon bundle bound to one container and one render surface.
pub struct RibbonEngine<S: RenderSurface> {
    config: RibbonConfig,
    state: EngineState<S>,
}

enum EngineState<S> {
    Uninitialized,
    Running(Box<Running<S>>),
    TornDown,
}

struct Running<S> {
    surface: S,
    scene: Scene,
    tracker: InputTracker,
    clock: FrameClock,
    listeners: Vec<ListenerId>,
    pending: Option<FrameToken>,
    last_frame: Option<FrameTime>,
}

impl<S: RenderSurface> RibbonEngine<S> {
    pub fn new(config: RibbonConfig) -> Self {
        Self { config, state: EngineState::Uninitialized }
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    pub fn phase(&self) -> EnginePhase {
        match self.state {
            EngineState::Uninitialized => EnginePhase::Uninitialized,
            EngineState::Running(_) => EnginePhase::Running,
            EngineState::TornDown => EnginePhase::TornDown,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, EngineState::Running(_))
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.running().map(|r| &r.scene)
    }

    pub fn surface(&self) -> Option<&S> {
        self.running().map(|r| &r.surface)
    }

    /// Current pointer target in simulation space.
    pub fn target(&self) -> Option<crate::coords::Vec2> {
        self.running().map(|r| r.tracker.target())
    }

    /// Timing of the most recently drawn frame.
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.running().and_then(|r| r.last_frame)
    }

    /// The frame this engine is waiting for, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.running().and_then(|r| r.pending)
    }

    /// Builds the scene, subscribes to `host`, sizes `surface`, and schedules
    /// the first frame.
    ///
    /// Fails if the engine was already started, including after a stop.
    pub fn start<R: Rng + ?Sized>(&mut self, host: &mut dyn Container, surface: S, rng: &mut R) -> Result<()> {
        match self.state {
            EngineState::Uninitialized => {}
            EngineState::Running(_) => bail!("ribbon engine is already running"),
            EngineState::TornDown => bail!("ribbon engine was torn down; start a new one"),
        }

        let scene = Scene::build(&self.config, rng);
        let listeners = ListenerKind::ALL.iter().map(|&kind| host.attach(kind)).collect();

        let mut running = Running {
            surface,
            scene,
            tracker: InputTracker::new(),
            clock: FrameClock::new(),
            listeners,
            pending: None,
            last_frame: None,
        };
        running.apply_size(host);
        running.pending = Some(host.schedule_frame());

        log::info!(
            "ribbon engine started: {} ribbon(s), {} point(s) each",
            running.scene.ribbons().len(),
            self.config.effective_point_count(),
        );
        self.state = EngineState::Running(Box::new(running));
        Ok(())
    }

    /// Runs one frame if `token` is the frame this engine scheduled.
    ///
    /// Returns `None` when the callback was ignored (stale token, or the engine
    /// is not running). A `Lost` outcome tears the engine down.
    pub fn on_frame(&mut self, host: &mut dyn Container, token: FrameToken, now: Instant) -> Option<DrawOutcome> {
        let running = self.running_mut()?;
        if running.pending != Some(token) {
            log::trace!("ignoring stale frame {token:?}");
            return None;
        }
        running.pending = None;

        let ft = running.clock.tick_at(now);
        let pointer = running.tracker.target();
        running.scene.update(pointer, ft.dt_ms, ft.elapsed);
        running.scene.rebuild_geometry();
        running.last_frame = Some(ft);

        let outcome = running.surface.draw(&running.scene);
        if outcome == DrawOutcome::Lost {
            log::error!("render surface lost; stopping ribbon engine");
            self.stop(host);
            return Some(outcome);
        }

        running.pending = Some(host.schedule_frame());
        Some(outcome)
    }

    /// Feeds a pointer or touch event. Returns `true` if the target moved.
    pub fn on_input(&mut self, host: &dyn Container, event: &InputEvent) -> bool {
        let Some(running) = self.running_mut() else { return false };
        running.tracker.apply(event, host.bounds())
    }

    /// Re-reads the container size and pixel ratio.
    pub fn on_resize(&mut self, host: &dyn Container) {
        if let Some(running) = self.running_mut() {
            running.apply_size(host);
        }
    }

    /// Cancels the pending frame, detaches every listener, and releases the
    /// surface. Stopping an engine that is not running only marks it torn down.
    pub fn stop(&mut self, host: &mut dyn Container) {
        let previous = std::mem::replace(&mut self.state, EngineState::TornDown);
        let EngineState::Running(running) = previous else { return };

        let Running { surface, listeners, pending, .. } = *running;
        if let Some(token) = pending {
            host.cancel_frame(token);
        }
        for id in listeners {
            host.detach(id);
        }
        drop(surface);
        log::info!("ribbon engine stopped");
    }

    fn running(&self) -> Option<&Running<S>> {
        match &self.state {
            EngineState::Running(r) => Some(&**r),
            _ => None,
        }
    }

    fn running_mut(&mut self) -> Option<&mut Running<S>> {
        match &mut self.state {
            EngineState::Running(r) => Some(&mut **r),
            _ => None,
        }
    }
}

impl<S: RenderSurface> Running<S> {
    fn apply_size(&mut self, host: &dyn Container) {
        let bounds = host.bounds();
        let viewport = Viewport::new(bounds.size.x, bounds.size.y);
        let dpr = effective_device_pixel_ratio(host);
        let physical = host.physical_size();

        if self.scene.resize(viewport, dpr) {
            log::debug!("resized to {}x{} logical @{dpr}, {}x{} physical", viewport.width, viewport.height, physical.0, physical.1);
        } else {
            log::debug!("container has no area; keeping last size");
        }
        self.surface.resize(physical);
    }
}

impl<S: RenderSurface> Drop for RibbonEngine<S> {
    fn drop(&mut self) {
        if self.is_running() {
            log::warn!("ribbon engine dropped while running; listeners stay attached on the host");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::coords::{Rect, Vec3};
    use crate::input::{PointerMoveEvent, TouchEvent, TouchPhase};
    use crate::lifecycle::testing::{FakeContainer, RecordingSurface};

    fn engine(config: RibbonConfig) -> RibbonEngine<RecordingSurface> {
        RibbonEngine::new(config)
    }

    fn started(config: RibbonConfig, host: &mut FakeContainer) -> RibbonEngine<RecordingSurface> {
        let mut e = engine(config);
        e.start(host, RecordingSurface::default(), &mut StdRng::seed_from_u64(11)).unwrap();
        e
    }

    /// Fires `frames` frames `dt` apart, the way a host would.
    fn pump(e: &mut RibbonEngine<RecordingSurface>, host: &mut FakeContainer, start: Instant, frames: u32, dt: Duration) {
        for i in 0..frames {
            let token = host.registry.take_due_frame().expect("engine keeps a frame scheduled");
            e.on_frame(host, token, start + dt * i);
        }
    }

    // ── start ─────────────────────────────────────────────────────────────

    #[test]
    fn start_attaches_listeners_and_schedules() {
        let mut host = FakeContainer::new(800.0, 600.0, 2.0);
        let e = started(RibbonConfig::default(), &mut host);
        assert_eq!(e.phase(), EnginePhase::Running);
        assert_eq!(host.registry.listener_count(), ListenerKind::ALL.len());
        assert!(host.registry.has_pending_frame());
        for kind in ListenerKind::ALL {
            assert!(host.registry.wants(kind));
        }
        let surface = e.surface().unwrap();
        assert_eq!(surface.sizes, vec![(1600, 1200)]);
        assert_eq!(e.scene().unwrap().ribbons()[0].uniforms().resolution, [800.0, 600.0]);
        assert_eq!(e.scene().unwrap().ribbons()[0].uniforms().dpr, 2.0);
    }

    #[test]
    fn double_start_is_an_error() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        let again = e.start(&mut host, RecordingSurface::default(), &mut StdRng::seed_from_u64(1));
        assert!(again.is_err());
        assert_eq!(host.registry.listener_count(), ListenerKind::ALL.len());
    }

    #[test]
    fn start_after_stop_is_an_error() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        e.stop(&mut host);
        assert_eq!(e.phase(), EnginePhase::TornDown);
        assert!(e.start(&mut host, RecordingSurface::default(), &mut StdRng::seed_from_u64(1)).is_err());
        assert_eq!(host.registry.listener_count(), 0);
    }

    #[test]
    fn bad_pixel_ratio_falls_back() {
        let mut host = FakeContainer::new(400.0, 300.0, 0.0);
        let e = started(RibbonConfig::default(), &mut host);
        assert_eq!(e.scene().unwrap().device_pixel_ratio(), 2.0);
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn pointer_held_converges_bundle() {
        let config = RibbonConfig::default()
            .with_colors(["#ffffff"])
            .with_point_count(5)
            .with_max_age(500.0)
            .with_speed_multiplier(1.0)
            .with_spring(0.5)
            .with_friction(0.3);
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(config, &mut host);

        // (600, 150) in an 800x600 box is (0.5, 0.5) in simulation space.
        let ev = InputEvent::PointerMoved(PointerMoveEvent { x: 600.0, y: 150.0 });
        assert!(e.on_input(&host, &ev));

        pump(&mut e, &mut host, Instant::now(), 125, Duration::from_millis(16));

        let ribbon = &e.scene().unwrap().ribbons()[0];
        let target = ribbon.target(Vec3::new(0.5, 0.5, 0.0));
        assert!(ribbon.head().distance(target) < 1e-3, "head {:?} target {target:?}", ribbon.head());
        let pts = ribbon.points();
        for a in pts {
            for b in pts {
                assert!(a.distance(*b) < 1e-2);
            }
        }
        assert_eq!(e.surface().unwrap().draws, 125);
    }

    #[test]
    fn teardown_after_frames_leaves_host_clean() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        pump(&mut e, &mut host, Instant::now(), 100, Duration::from_millis(16));
        assert!(host.registry.has_pending_frame());

        e.stop(&mut host);
        assert!(!host.registry.has_pending_frame());
        assert_eq!(host.registry.listener_count(), 0);
        assert!(e.scene().is_none());
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        let stale = host.registry.take_due_frame().unwrap();
        let now = Instant::now();
        assert!(e.on_frame(&mut host, stale, now).is_some());

        // Already consumed.
        assert!(e.on_frame(&mut host, stale, now).is_none());
        assert_eq!(e.surface().unwrap().draws, 1);
    }

    #[test]
    fn frames_after_stop_are_ignored() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        let token = e.pending_frame().unwrap();
        e.stop(&mut host);
        assert!(e.on_frame(&mut host, token, Instant::now()).is_none());
    }

    #[test]
    fn lost_surface_tears_down() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = engine(RibbonConfig::default());
        let surface = RecordingSurface { lose_after: Some(3), ..Default::default() };
        e.start(&mut host, surface, &mut StdRng::seed_from_u64(5)).unwrap();

        let now = Instant::now();
        let mut outcomes = Vec::new();
        while let Some(token) = host.registry.take_due_frame() {
            outcomes.extend(e.on_frame(&mut host, token, now));
        }
        assert_eq!(outcomes.last(), Some(&DrawOutcome::Lost));
        assert_eq!(outcomes.len(), 4);
        assert_eq!(e.phase(), EnginePhase::TornDown);
        assert_eq!(host.registry.listener_count(), 0);
    }

    #[test]
    fn elapsed_time_reaches_shader() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        pump(&mut e, &mut host, Instant::now(), 11, Duration::from_millis(100));
        let t = e.scene().unwrap().ribbons()[0].uniforms().time;
        assert!((t - 1.0).abs() < 1e-3, "time {t}");
        assert_eq!(e.last_frame().unwrap().frame_index, 10);
    }

    // ── input & resize ────────────────────────────────────────────────────

    #[test]
    fn secondary_touch_does_not_steer() {
        let mut host = FakeContainer::new(100.0, 100.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        let touch = |id, phase, x, y| InputEvent::Touch(TouchEvent { id, phase, x, y });

        assert!(e.on_input(&host, &touch(1, TouchPhase::Started, 100.0, 0.0)));
        assert!(!e.on_input(&host, &touch(2, TouchPhase::Moved, 0.0, 100.0)));
        let target = e.target().unwrap();
        assert_eq!((target.x, target.y), (1.0, 1.0));
    }

    #[test]
    fn resize_keeps_points() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        e.on_input(&host, &InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 10.0 }));
        pump(&mut e, &mut host, Instant::now(), 30, Duration::from_millis(16));
        let before = e.scene().unwrap().ribbons()[0].points().to_vec();

        host.bounds = Rect::new(0.0, 0.0, 1024.0, 768.0);
        host.dpr = 1.5;
        e.on_resize(&host);

        let ribbon = &e.scene().unwrap().ribbons()[0];
        assert_eq!(ribbon.points(), before.as_slice());
        assert_eq!(ribbon.uniforms().resolution, [1024.0, 768.0]);
        assert_eq!(ribbon.uniforms().dpr, 1.5);
        assert_eq!(e.surface().unwrap().sizes.last(), Some(&(1536, 1152)));
    }

    #[test]
    fn zero_area_container_is_inert() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut e = started(RibbonConfig::default(), &mut host);
        host.bounds = Rect::new(0.0, 0.0, 0.0, 0.0);
        e.on_resize(&host);

        assert_eq!(e.scene().unwrap().viewport(), Viewport::new(800.0, 600.0));
        assert_eq!(e.surface().unwrap().sizes.last(), Some(&(0, 0)));
        assert!(!e.on_input(&host, &InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 1.0 })));

        pump(&mut e, &mut host, Instant::now(), 3, Duration::from_millis(16));
        assert_eq!(e.surface().unwrap().skipped, 3);
        assert!(e.is_running());
    }

    #[test]
    fn restart_with_new_config_is_fresh() {
        let mut host = FakeContainer::new(800.0, 600.0, 1.0);
        let mut first = started(RibbonConfig::default(), &mut host);
        pump(&mut first, &mut host, Instant::now(), 10, Duration::from_millis(16));
        first.stop(&mut host);

        let second = started(RibbonConfig::default().with_colors(["red", "blue"]), &mut host);
        assert_eq!(second.scene().unwrap().ribbons().len(), 2);
        assert_eq!(host.registry.listener_count(), ListenerKind::ALL.len());
        assert!(second.scene().unwrap().ribbons().iter().all(|r| r.points().iter().all(|p| *p == Vec3::zero())));
    }
}
