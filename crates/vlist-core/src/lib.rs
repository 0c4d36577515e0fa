#![forbid(unsafe_code)]

//! Core: geometry, animation, and logging primitives shared by the vlist engine.

pub mod animation;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
