#![forbid(unsafe_code)]

//! Scroll virtualizer: the orchestrator that owns the offset table, slot
//! pool, and visibility tracker.
//!
//! # Lifecycle
//!
//! ```text
//!   Uninitialized ──(data ready + viewport measured)──▶ Ready ──dispose()──▶ Disposed
//!                                                       │  ▲
//!                                    scroll / height ───┘  │
//!                                    change / relayout ────┘
//! ```
//!
//! Data and viewport may arrive in either order; whichever arrives second
//! builds the offset table and slot pool and binds the initial window.
//!
//! # Event handling
//!
//! - **Scroll**: look up the first visible item, clamp it so the window never
//!   runs past the end, and rebind every slot only when that index changed.
//!   Visibility is re-evaluated on every scroll because items cross the
//!   viewport edge without the window moving.
//! - **Height change**: update the offset table. If the item is bound, every
//!   active slot is repositioned (geometry only, no rebind). Items outside the
//!   window only update the table.
//!
//! # Failure Modes
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Scroll/height/data event before `Ready` | Buffered (viewport, data) or dropped (height) |
//! | Any transient event after `Disposed` | Dropped silently |
//! | `relayout`/`set_source`/`begin_load` misuse | `InvalidState` |
//! | Height report for an index outside `[0, N)` | `OutOfRange` |
//! | NaN or negative height | Clamped to 1.0, never an error |

use std::fmt;
use std::ops::Range;

use vlist_core::geometry::Viewport;

use crate::config::VirtualListConfig;
use crate::error::{Result, VirtualListError, check_index};
use crate::offset_table::OffsetTable;
use crate::slot_pool::{BindOutcome, SlotPool};
use crate::source::{ItemRenderer, ItemSource, LoadTicket};
use crate::visibility::{VisibilityEvent, VisibilityTracker};

/// Lifecycle state of a [`ScrollVirtualizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Waiting for data and/or the first viewport measurement.
    Uninitialized,
    /// Tables and pool built; reacting to events.
    Ready,
    /// Torn down; every event is ignored.
    Disposed,
}

impl ListState {
    fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Disposed => "disposed",
        }
    }
}

type RendererFactory<R> = Box<dyn FnMut(usize) -> R>;

/// Variable-height virtualized list over an [`ItemSource`].
pub struct ScrollVirtualizer<S, R>
where
    S: ItemSource,
    R: ItemRenderer<Payload = S::Payload>,
{
    config: VirtualListConfig,
    state: ListState,
    source: Option<S>,
    viewport: Option<Viewport>,
    table: OffsetTable,
    pool: SlotPool<R>,
    visibility: VisibilityTracker,
    /// Per-item expanded flag, persisted across recycling.
    expanded: Vec<bool>,
    /// First bound data index, `None` until the first bind pass.
    first: Option<usize>,
    factory: RendererFactory<R>,
    load: Option<LoadTicket>,
    load_generation: u64,
}

impl<S, R> fmt::Debug for ScrollVirtualizer<S, R>
where
    S: ItemSource,
    R: ItemRenderer<Payload = S::Payload>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollVirtualizer")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("len", &self.table.len())
            .field("pool_size", &self.pool.capacity())
            .field("first", &self.first)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl<S, R> ScrollVirtualizer<S, R>
where
    S: ItemSource,
    R: ItemRenderer<Payload = S::Payload>,
{
    /// Create an uninitialised list.
    ///
    /// `factory` is called once per slot, with the slot index, when the pool
    /// is built.
    ///
    /// # Errors
    /// [`VirtualListError::InvalidConfig`] if `config` fails validation.
    pub fn new<F>(config: VirtualListConfig, factory: F) -> Result<Self>
    where
        F: FnMut(usize) -> R + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            state: ListState::Uninitialized,
            source: None,
            viewport: None,
            table: OffsetTable::new(),
            pool: SlotPool::new(),
            visibility: VisibilityTracker::default(),
            expanded: Vec::new(),
            first: None,
            factory: Box::new(factory),
            load: None,
            load_generation: 0,
        })
    }

    // ─── Accessors ────────────────────────────────────────────────

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ListState {
        self.state
    }

    /// Whether the list is in [`ListState::Ready`].
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == ListState::Ready
    }

    /// Layout configuration.
    #[inline]
    pub fn config(&self) -> &VirtualListConfig {
        &self.config
    }

    /// Number of items (0 until ready).
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the list has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Fixed slot count (0 until ready).
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.pool.capacity()
    }

    /// First bound data index.
    #[inline]
    pub fn first_visible(&self) -> Option<usize> {
        self.first
    }

    /// Data indices currently bound, `first..min(first + pool_size, N)`.
    pub fn bound_range(&self) -> Range<usize> {
        match self.first {
            Some(first) => {
                let end = first.saturating_add(self.pool.capacity()).min(self.len());
                first..end
            }
            None => 0..0,
        }
    }

    /// Height the scroll container should give its content.
    #[inline]
    pub fn total_content_height(&self) -> f32 {
        self.table.total_content_height()
    }

    /// Last viewport received.
    #[inline]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Top offset of item `index`.
    pub fn offset(&self, index: usize) -> Result<f32> {
        self.table.offset(index)
    }

    /// Current height of item `index`.
    pub fn height(&self, index: usize) -> Result<f32> {
        self.table.height(index)
    }

    /// The offset table.
    #[inline]
    pub fn table(&self) -> &OffsetTable {
        &self.table
    }

    /// The slot pool.
    #[inline]
    pub fn pool(&self) -> &SlotPool<R> {
        &self.pool
    }

    /// The bound data source, once it has arrived.
    #[inline]
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Take all pending enter/leave notifications.
    pub fn drain_visibility_events(&mut self) -> Vec<VisibilityEvent> {
        self.visibility.drain_events()
    }

    /// Last known visibility of `slot`.
    pub fn is_slot_visible(&self, slot: usize) -> Result<bool> {
        self.visibility.is_visible(slot)
    }

    // ─── Data arrival ─────────────────────────────────────────────

    /// Start a data fetch, cancelling any fetch still in flight.
    ///
    /// # Errors
    /// [`VirtualListError::InvalidState`] once the list is ready (the item
    /// count is fixed for the session) or disposed.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        if self.state != ListState::Uninitialized || self.source.is_some() {
            return Err(self.invalid_state("begin_load"));
        }
        if let Some(previous) = self.load.take() {
            previous.cancel();
        }
        self.load_generation += 1;
        let ticket = LoadTicket::new(self.load_generation);
        self.load = Some(ticket.clone());
        vlist_core::debug!(generation = self.load_generation, "data load started");
        Ok(ticket)
    }

    /// Deliver the result of the fetch started with `ticket`.
    ///
    /// Returns `false` and drops `source` if the ticket is stale or cancelled,
    /// or if the list has been disposed.
    pub fn on_data_ready(&mut self, ticket: &LoadTicket, source: S) -> Result<bool> {
        let current = self
            .load
            .as_ref()
            .is_some_and(|t| t.generation() == ticket.generation());
        if self.state != ListState::Uninitialized || !current || ticket.is_cancelled() {
            vlist_core::trace!(
                generation = ticket.generation(),
                state = self.state.name(),
                "dropped stale data delivery"
            );
            return Ok(false);
        }
        self.load = None;
        self.source = Some(source);
        self.try_initialize()?;
        Ok(true)
    }

    /// Bind a data source directly, without a load ticket.
    ///
    /// # Errors
    /// [`VirtualListError::InvalidState`] if a source is already bound or the
    /// list is disposed.
    pub fn set_source(&mut self, source: S) -> Result<()> {
        if self.state != ListState::Uninitialized || self.source.is_some() {
            return Err(self.invalid_state("set_source"));
        }
        if let Some(pending) = self.load.take() {
            pending.cancel();
        }
        self.source = Some(source);
        self.try_initialize()
    }

    // ─── Viewport events ──────────────────────────────────────────

    /// Record new viewport geometry.
    ///
    /// Before ready this may complete initialisation. Once ready, a width
    /// change repositions every slot and a scroll change runs the scroll path.
    /// The pool is never resized after it is built.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        match self.state {
            ListState::Disposed => {
                vlist_core::trace!("viewport update after dispose ignored");
                Ok(())
            }
            ListState::Uninitialized => {
                self.viewport = Some(viewport);
                self.try_initialize()
            }
            ListState::Ready => {
                let previous = self.viewport.replace(viewport);
                let width_changed = previous.is_none_or(|p| p.width != viewport.width);
                if width_changed {
                    self.reposition_active()?;
                }
                self.refresh(false)
            }
        }
    }

    /// The viewport scrolled to `scroll_offset`.
    pub fn on_scroll(&mut self, scroll_offset: f32) -> Result<()> {
        match self.state {
            ListState::Disposed => {
                vlist_core::trace!(scroll_offset, "scroll after dispose ignored");
                Ok(())
            }
            ListState::Uninitialized => {
                if let Some(vp) = self.viewport.as_mut() {
                    vp.scroll_offset = scroll_offset;
                }
                Ok(())
            }
            ListState::Ready => {
                if let Some(vp) = self.viewport.as_mut() {
                    vp.scroll_offset = scroll_offset;
                }
                self.refresh(false)
            }
        }
    }

    // ─── Height and state events ──────────────────────────────────

    /// Item `index` reports a new rendered height.
    ///
    /// Dropped silently unless the list is ready.
    ///
    /// # Errors
    /// [`VirtualListError::OutOfRange`] for an index outside `[0, N)`.
    pub fn on_height_change(&mut self, index: usize, height: f32) -> Result<()> {
        if self.state != ListState::Ready {
            vlist_core::trace!(
                index,
                state = self.state.name(),
                "height change outside ready state ignored"
            );
            return Ok(());
        }

        if !self.table.set_height(index, height)? {
            return Ok(());
        }

        if self.pool.slot_for_index(index).is_some() {
            self.reposition_active()?;
            self.update_visibility(false)?;
        }
        Ok(())
    }

    /// The renderer in `slot` reports a new height for whatever it shows.
    ///
    /// Ignored if the slot is unbound or the list is not ready.
    pub fn on_slot_height_change(&mut self, slot: usize, height: f32) -> Result<()> {
        if self.state != ListState::Ready {
            return Ok(());
        }
        match self.pool.bound_index(slot)? {
            Some(index) => self.on_height_change(index, height),
            None => Ok(()),
        }
    }

    /// Whether item `index` is expanded.
    pub fn is_expanded(&self, index: usize) -> Result<bool> {
        check_index(index, self.expanded.len())?;
        Ok(self.expanded[index])
    }

    /// Record the expanded flag of item `index`.
    ///
    /// The flag survives recycling and is re-applied whenever a slot is bound
    /// to the item. If the item is bound right now its renderer is updated
    /// immediately. Dropped silently unless ready.
    pub fn set_expanded(&mut self, index: usize, expanded: bool) -> Result<()> {
        if self.state != ListState::Ready {
            return Ok(());
        }
        check_index(index, self.expanded.len())?;
        self.expanded[index] = expanded;
        if let Some(slot) = self.pool.slot_for_index(index) {
            self.pool.renderer_mut(slot)?.apply_state(expanded);
        }
        Ok(())
    }

    // ─── Commands ─────────────────────────────────────────────────

    /// Rebind, reposition, and re-announce visibility for every slot.
    ///
    /// # Errors
    /// [`VirtualListError::InvalidState`] unless ready.
    pub fn relayout(&mut self) -> Result<()> {
        if self.state != ListState::Ready {
            return Err(self.invalid_state("relayout"));
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("relayout", len = self.table.len()).entered();
        self.refresh(true)
    }

    /// Tear everything down and enter [`ListState::Disposed`].
    ///
    /// Cancels any in-flight load. Every bound renderer receives
    /// [`ItemRenderer::unbind`], which is the teardown signal; no leave
    /// events are queued and pending ones are discarded. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == ListState::Disposed {
            return;
        }
        if let Some(ticket) = self.load.take() {
            ticket.cancel();
        }
        self.pool.unbind_all();
        self.pool.clear();
        self.table.teardown();
        self.visibility.clear();
        self.expanded = Vec::new();
        self.source = None;
        self.first = None;
        self.state = ListState::Disposed;
        vlist_core::debug!("list disposed");
    }

    // ─── Internals ────────────────────────────────────────────────

    fn invalid_state(&self, operation: &'static str) -> VirtualListError {
        VirtualListError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }

    /// Perform `Uninitialized -> Ready` once both inputs are present.
    fn try_initialize(&mut self) -> Result<()> {
        if self.state != ListState::Uninitialized {
            return Ok(());
        }
        let Some(viewport) = self.viewport.filter(Viewport::is_measured) else {
            return Ok(());
        };
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };

        let n = source.len();
        let fallback = self.config.effective_fallback_height();
        let heights: Vec<f32> = (0..n)
            .map(|i| source.initial_height(i).unwrap_or(fallback))
            .collect();
        let pool_size = self.config.pool_size(viewport.height);

        let _span = vlist_core::debug_span!("initialize", len = n, pool_size).entered();

        self.table
            .initialize(&heights, self.config.spacing, self.config.end_padding)?;
        self.expanded = vec![false; n];
        self.pool.build(pool_size, &mut self.factory)?;
        self.visibility = VisibilityTracker::new(pool_size);
        self.first = None;
        self.state = ListState::Ready;

        vlist_core::debug!(
            len = n,
            pool_size,
            total_height = self.table.total_content_height(),
            "list ready"
        );
        self.refresh(true)
    }

    /// Scroll path: rebind when the window moved (or `force`), then update
    /// visibility.
    fn refresh(&mut self, force: bool) -> Result<()> {
        let Some(viewport) = self.viewport else {
            return Ok(());
        };

        let max_first = self.table.len().saturating_sub(self.pool.capacity());
        let new_first = self
            .table
            .find_first_visible(viewport.scroll_offset)
            .min(max_first);

        if force || self.first != Some(new_first) {
            self.first = Some(new_first);
            self.rebind_window(new_first, viewport.width)?;
        }
        self.update_visibility(force)
    }

    /// Bind slot `s` to `first + s`, unbinding slots that fall past the end.
    fn rebind_window(&mut self, first: usize, width: f32) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "rebind_window",
            first,
            pool_size = self.pool.capacity()
        )
        .entered();

        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };
        let n = self.table.len();

        for slot in 0..self.pool.capacity() {
            let data_index = first + slot;
            if data_index >= n {
                let previous = self.pool.unbind(slot)?;
                self.visibility.reset(slot, previous)?;
                continue;
            }

            let payload = source
                .payload(data_index)
                .ok_or(VirtualListError::OutOfRange {
                    index: data_index,
                    len: source.len(),
                })?;
            if self.pool.bind(slot, data_index, payload)? == BindOutcome::Rebound {
                self.pool
                    .renderer_mut(slot)?
                    .apply_state(self.expanded[data_index]);
            }

            let top = self.table.offset(data_index)?;
            let height = self.table.height(data_index)?;
            self.pool.position(slot, top, height, width)?;
        }
        Ok(())
    }

    /// Move every bound slot to its item's current offset. No rebinding.
    fn reposition_active(&mut self) -> Result<()> {
        let width = self.viewport.map_or(0.0, |vp| vp.width);
        for slot in 0..self.pool.capacity() {
            if let Some(index) = self.pool.bound_index(slot)? {
                let top = self.table.offset(index)?;
                let height = self.table.height(index)?;
                self.pool.position(slot, top, height, width)?;
            }
        }
        Ok(())
    }

    fn update_visibility(&mut self, force: bool) -> Result<()> {
        let Some(viewport) = self.viewport else {
            return Ok(());
        };
        let viewport_bounds = viewport.bounds();
        for slot in 0..self.pool.capacity() {
            if let Some(index) = self.pool.bound_index(slot)? {
                let bounds = self.pool.bounds(slot)?;
                let visible = VisibilityTracker::evaluate(&bounds, &viewport_bounds);
                self.visibility.update(slot, index, visible, force)?;
            }
        }
        Ok(())
    }
}
