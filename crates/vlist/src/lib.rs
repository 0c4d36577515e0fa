#![forbid(unsafe_code)]

//! Variable-height virtualized list engine.
//!
//! Presents a scrollable list of `N` items, each with its own height that may
//! change at runtime, while keeping only a small fixed pool of renderers
//! alive. Only items intersecting the viewport (plus a buffer) are bound.
//!
//! # Layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`offset_table`] | Heights, prefix-sum offsets, first-visible search |
//! | [`slot_pool`] | Fixed set of recycled renderers and their bindings |
//! | [`visibility`] | Per-slot enter/leave detection |
//! | [`virtualizer`] | Lifecycle and event orchestration |
//! | [`expand`] | Expand/collapse height animation |
//! | [`source`] | Data source, renderer, and load-ticket contracts |
//!
//! # Example
//!
//! ```
//! use vlist::{ItemRenderer, ScrollVirtualizer, VirtualListConfig};
//! use vlist_core::geometry::Viewport;
//!
//! struct Row;
//!
//! impl ItemRenderer for Row {
//!     type Payload = String;
//!     fn bind(&mut self, _index: usize, _payload: &String) {}
//!     fn position(&mut self, _top: f32, _height: f32, _width: f32) {}
//! }
//!
//! let items: Vec<String> = (0..100).map(|i| format!("row {i}")).collect();
//! let mut list = ScrollVirtualizer::new(VirtualListConfig::default(), |_| Row)?;
//! list.set_source(items)?;
//! list.set_viewport(Viewport::new(0.0, 800.0, 400.0))?;
//! assert!(list.is_ready());
//!
//! list.on_scroll(1_000.0)?;
//! list.on_height_change(6, 420.0)?;
//! assert!(list.bound_range().contains(&6));
//! # Ok::<(), vlist::VirtualListError>(())
//! ```

pub mod config;
pub mod error;
pub mod expand;
pub mod offset_table;
pub mod slot_pool;
pub mod source;
pub mod virtualizer;
pub mod visibility;

pub use config::VirtualListConfig;
pub use error::{Result, VirtualListError};
pub use expand::{ExpandConfig, ExpandController};
pub use offset_table::OffsetTable;
pub use slot_pool::{BindOutcome, Slot, SlotPool};
pub use source::{ItemRenderer, ItemSource, LoadTicket};
pub use virtualizer::{ListState, ScrollVirtualizer};
pub use visibility::{VisibilityEvent, VisibilityTracker};
