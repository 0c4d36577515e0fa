#![forbid(unsafe_code)]

//! Fixed-capacity pool of recyclable renderer slots.
//!
//! The pool instantiates its renderers exactly once in [`SlotPool::build`] and
//! never grows or shrinks afterwards. Scrolling rebinds existing renderers to
//! new data indices instead of creating and destroying them.
//!
//! # Invariants
//!
//! 1. `capacity()` is fixed between `build` and `clear`.
//! 2. `bound_count() <= capacity()`.
//! 3. Re-binding a slot to the index it already shows does not call
//!    [`ItemRenderer::bind`] again.

use vlist_core::geometry::Rect;

use crate::error::{Result, VirtualListError, check_index};
use crate::source::ItemRenderer;

/// One pooled renderer and its current binding.
#[derive(Debug)]
pub struct Slot<R> {
    renderer: R,
    bound_index: Option<usize>,
    bounds: Rect,
}

impl<R> Slot<R> {
    /// Data index currently shown, if any.
    #[inline]
    pub fn bound_index(&self) -> Option<usize> {
        self.bound_index
    }

    /// Last geometry assigned by [`SlotPool::position`].
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The renderer occupying this slot.
    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Result of [`SlotPool::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The slot already showed this index; the renderer was left alone.
    Reaffirmed,
    /// The renderer was bound to new content.
    Rebound,
}

/// Fixed-size collection of renderer slots.
#[derive(Debug)]
pub struct SlotPool<R> {
    slots: Vec<Slot<R>>,
    bound: usize,
    built: bool,
}

impl<R> Default for SlotPool<R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            bound: 0,
            built: false,
        }
    }
}

impl<R: ItemRenderer> SlotPool<R> {
    /// Create an empty, unbuilt pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate exactly `pool_size` renderers, one per slot index.
    ///
    /// # Errors
    /// [`VirtualListError::InvalidState`] if the pool was already built.
    pub fn build<F>(&mut self, pool_size: usize, mut factory: F) -> Result<()>
    where
        F: FnMut(usize) -> R,
    {
        if self.built {
            return Err(VirtualListError::InvalidState {
                operation: "build",
                state: "built",
            });
        }

        self.slots = (0..pool_size)
            .map(|slot| Slot {
                renderer: factory(slot),
                bound_index: None,
                bounds: Rect::default(),
            })
            .collect();
        self.bound = 0;
        self.built = true;
        Ok(())
    }

    /// Whether [`build`](Self::build) has run.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently bound to a data index.
    #[inline]
    pub fn bound_count(&self) -> usize {
        self.bound
    }

    /// Data index bound to `slot`.
    pub fn bound_index(&self, slot: usize) -> Result<Option<usize>> {
        check_index(slot, self.capacity())?;
        Ok(self.slots[slot].bound_index)
    }

    /// Slot currently showing `data_index`, if any. O(capacity).
    pub fn slot_for_index(&self, data_index: usize) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.bound_index == Some(data_index))
    }

    /// Bind `slot` to `data_index`.
    ///
    /// # Errors
    /// - [`VirtualListError::InvalidState`] before [`build`](Self::build).
    /// - [`VirtualListError::CapacityExceeded`] if `slot` lies beyond the
    ///   pool, i.e. the caller asked for more simultaneous bindings than exist.
    pub fn bind(
        &mut self,
        slot: usize,
        data_index: usize,
        payload: &R::Payload,
    ) -> Result<BindOutcome> {
        if !self.built {
            return Err(VirtualListError::InvalidState {
                operation: "bind",
                state: "unbuilt",
            });
        }
        if slot >= self.capacity() {
            return Err(VirtualListError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let entry = &mut self.slots[slot];
        match entry.bound_index {
            Some(current) if current == data_index => return Ok(BindOutcome::Reaffirmed),
            Some(_) => {}
            None => self.bound += 1,
        }
        entry.bound_index = Some(data_index);
        entry.renderer.bind(data_index, payload);
        Ok(BindOutcome::Rebound)
    }

    /// Deactivate `slot` without destroying its renderer.
    ///
    /// Returns the index it was bound to.
    pub fn unbind(&mut self, slot: usize) -> Result<Option<usize>> {
        check_index(slot, self.capacity())?;
        let entry = &mut self.slots[slot];
        let previous = entry.bound_index.take();
        if previous.is_some() {
            self.bound -= 1;
            entry.renderer.unbind();
        }
        Ok(previous)
    }

    /// Unbind every bound slot, returning how many were bound.
    pub fn unbind_all(&mut self) -> usize {
        let mut released = 0;
        for entry in &mut self.slots {
            if entry.bound_index.take().is_some() {
                entry.renderer.unbind();
                released += 1;
            }
        }
        self.bound = 0;
        released
    }

    /// Place `slot` at `top` with the given size. Content is untouched.
    pub fn position(&mut self, slot: usize, top: f32, height: f32, width: f32) -> Result<()> {
        check_index(slot, self.capacity())?;
        let entry = &mut self.slots[slot];
        entry.bounds = Rect::new(0.0, top, width, height);
        entry.renderer.position(top, height, width);
        Ok(())
    }

    /// Last geometry assigned to `slot`.
    pub fn bounds(&self, slot: usize) -> Result<Rect> {
        check_index(slot, self.capacity())?;
        Ok(self.slots[slot].bounds)
    }

    /// Renderer in `slot`.
    pub fn renderer(&self, slot: usize) -> Result<&R> {
        check_index(slot, self.capacity())?;
        Ok(&self.slots[slot].renderer)
    }

    /// Mutable renderer in `slot`.
    pub fn renderer_mut(&mut self, slot: usize) -> Result<&mut R> {
        check_index(slot, self.capacity())?;
        Ok(&mut self.slots[slot].renderer)
    }

    /// Iterate over all slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot<R>> {
        self.slots.iter()
    }

    /// Drop every renderer and return to the unbuilt state.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.bound = 0;
        self.built = false;
    }
}
