#![forbid(unsafe_code)]

//! Enter/leave tracking for pooled slots.
//!
//! Whether a slot is bound and whether it is on screen are different
//! questions. Collaborators that start or stop expensive work (lazy image
//! loading, playback) should react to [`VisibilityEvent`]s, which fire only on
//! transitions.
//!
//! Events are queued during [`VisibilityTracker::update`] and drained by the
//! caller, so no closures are stored inside the engine.
//!
//! # Invariants
//!
//! 1. Without `force`, an event fires only when the visibility of a slot
//!    differs from its last known state.
//! 2. With `force`, an event fires regardless and the state is refreshed.
//! 3. `drain_events()` clears the queue; events are never replayed.

use vlist_core::geometry::Rect;

use crate::error::{Result, check_index};

/// A slot entered or left the viewport.
///
/// Transitions are tracked per renderer slot, not per item. When a visible
/// slot is rebound from one item to the next and stays on screen no event
/// fires; [`ItemRenderer::bind`](crate::ItemRenderer::bind) is the signal that
/// the content changed. `data_index` records what the slot showed when the
/// transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEvent {
    /// Pool slot that changed.
    pub slot: usize,
    /// Data index bound to the slot at the time of the change.
    pub data_index: usize,
    /// `true` on enter, `false` on leave.
    pub visible: bool,
}

/// Per-slot last known visibility plus the pending event queue.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    states: Vec<bool>,
    events: Vec<VisibilityEvent>,
}

impl VisibilityTracker {
    /// Track `slots` slots, all initially not visible.
    pub fn new(slots: usize) -> Self {
        Self {
            states: vec![false; slots],
            events: Vec::new(),
        }
    }

    /// Pure predicate: do the two boxes overlap on both axes?
    ///
    /// Intervals are half-open, so a slot whose bottom edge touches the
    /// viewport top is not visible.
    #[inline]
    pub fn evaluate(slot_bounds: &Rect, viewport_bounds: &Rect) -> bool {
        slot_bounds.intersects(viewport_bounds)
    }

    /// Number of tracked slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no slots are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Last known visibility of `slot`.
    pub fn is_visible(&self, slot: usize) -> Result<bool> {
        check_index(slot, self.len())?;
        Ok(self.states[slot])
    }

    /// Record the new visibility of `slot`, queueing an event on transition
    /// or when `force` is set. Returns whether an event was queued.
    pub fn update(
        &mut self,
        slot: usize,
        data_index: usize,
        is_visible: bool,
        force: bool,
    ) -> Result<bool> {
        check_index(slot, self.len())?;
        if !force && self.states[slot] == is_visible {
            return Ok(false);
        }
        self.states[slot] = is_visible;
        self.events.push(VisibilityEvent {
            slot,
            data_index,
            visible: is_visible,
        });
        Ok(true)
    }

    /// Forget `slot` as it is unbound, announcing a leave if it was visible.
    pub fn reset(&mut self, slot: usize, data_index: Option<usize>) -> Result<()> {
        check_index(slot, self.len())?;
        if self.states[slot] {
            self.states[slot] = false;
            if let Some(data_index) = data_index {
                self.events.push(VisibilityEvent {
                    slot,
                    data_index,
                    visible: false,
                });
            }
        }
        Ok(())
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<VisibilityEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// Drop all state and queued events.
    pub fn clear(&mut self) {
        self.states.clear();
        self.events.clear();
    }
}
