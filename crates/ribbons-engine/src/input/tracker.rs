use crate::coords::{Rect, Vec2};

use super::types::{InputEvent, PointerMoveEvent, TouchEvent, TouchPhase};

/// Shared pointer target for a ribbon bundle.
///
/// Holds the most recent pointer or primary-touch position, normalized to
/// `[-1, 1]` with +Y up. There is no smoothing: every accepted event replaces
/// the target outright. Until the first event the target is the origin.
#[derive(Debug, Default)]
pub struct InputTracker {
    target: Vec2,

    /// Id of the touch that drives the target while fingers are down.
    primary_touch: Option<u64>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current target in simulation space.
    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Applies an event against the container's bounding box.
    ///
    /// Returns `true` when the target changed. Events are ignored while the
    /// bounds are empty, and touch moves from secondary fingers are ignored.
    pub fn apply(&mut self, ev: &InputEvent, bounds: Rect) -> bool {
        let pos = match *ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => Vec2::new(x, y),
            InputEvent::Touch(TouchEvent { id, phase, x, y }) => {
                match phase {
                    // A move without a seen start (listener attached mid-gesture)
                    // also claims the primary slot.
                    TouchPhase::Started | TouchPhase::Moved => {
                        if self.primary_touch.is_none() {
                            self.primary_touch = Some(id);
                        }
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        if self.primary_touch == Some(id) {
                            self.primary_touch = None;
                        }
                        return false;
                    }
                }
                if self.primary_touch != Some(id) {
                    return false;
                }
                Vec2::new(x, y)
            }
        };

        match bounds.to_unit(pos) {
            Some(unit) if unit.is_finite() => {
                self.target = unit;
                true
            }
            _ => false,
        }
    }
}
