#![forbid(unsafe_code)]

//! Collaborator contract: data source, item renderers, and load tickets.
//!
//! The engine never fetches, parses, or draws anything itself. It reads item
//! payloads from an [`ItemSource`], drives pooled [`ItemRenderer`]s through a
//! single downward command channel (`bind`, `position`, `apply_state`), and
//! accepts height reports through
//! [`ScrollVirtualizer::on_height_change`](crate::ScrollVirtualizer::on_height_change).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// An ordered, indexable collection with stable indices.
///
/// The length must not change while a list is bound to the source.
pub trait ItemSource {
    /// Item payload handed to renderers on bind.
    type Payload;

    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the source holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload at `index`, or `None` outside `[0, len)`.
    fn payload(&self, index: usize) -> Option<&Self::Payload>;

    /// A pre-measured height for `index`, if the source knows one.
    ///
    /// Items without a known height start at the configured fallback.
    fn initial_height(&self, _index: usize) -> Option<f32> {
        None
    }
}

impl<T> ItemSource for Vec<T> {
    type Payload = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn payload(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

/// Visual representation of one item, recycled across data indices.
///
/// Different item kinds implement this trait independently; the engine does
/// not care which variant occupies a slot.
pub trait ItemRenderer {
    /// Payload type this renderer can display.
    type Payload;

    /// Show the content of item `index`.
    ///
    /// A slot that stays on screen across a rebind gets no visibility event,
    /// so per-item work should restart here.
    fn bind(&mut self, index: usize, payload: &Self::Payload);

    /// Hide the renderer. It stays allocated and may be bound again.
    ///
    /// Also called for every bound slot on dispose, with no leave event.
    fn unbind(&mut self) {}

    /// Place the renderer in content coordinates. Pure geometry.
    fn position(&mut self, top: f32, height: f32, width: f32);

    /// Restore per-item UI state (expanded/collapsed) after a rebind.
    fn apply_state(&mut self, _expanded: bool) {}
}

/// Handle for an in-flight data fetch.
///
/// Issued by [`ScrollVirtualizer::begin_load`](crate::ScrollVirtualizer::begin_load).
/// The fetch may run anywhere; it should poll [`is_cancelled`](Self::is_cancelled)
/// and stop early once the list is disposed or a newer load has started. Data
/// delivered with a stale ticket is dropped.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl LoadTicket {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Monotonic load generation this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the owning list no longer wants this load.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_source_reads() {
        let source = vec!["a", "b", "c"];
        assert_eq!(ItemSource::len(&source), 3);
        assert!(!ItemSource::is_empty(&source));
        assert_eq!(source.payload(1), Some(&"b"));
        assert_eq!(source.payload(3), None);
        assert_eq!(source.initial_height(0), None);
    }

    #[test]
    fn empty_vec_source() {
        let source: Vec<u8> = Vec::new();
        assert!(ItemSource::is_empty(&source));
    }

    #[test]
    fn ticket_cancel_is_shared_across_clones() {
        let ticket = LoadTicket::new(3);
        let remote = ticket.clone();
        assert!(!remote.is_cancelled());
        ticket.cancel();
        assert!(remote.is_cancelled());
        assert_eq!(remote.generation(), 3);
    }

    #[test]
    fn ticket_cancel_visible_from_other_thread() {
        let ticket = LoadTicket::new(1);
        let remote = ticket.clone();
        ticket.cancel();
        let seen = std::thread::spawn(move || remote.is_cancelled())
            .join()
            .unwrap();
        assert!(seen);
    }
}
