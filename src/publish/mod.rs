//! Surface publishing module
//!
//! Throttled fan-out of engine state to the presentation surfaces: a
//! per-key debounce gate and the fan-out logic that applies it.

pub mod debounce;
pub mod fanout;

// Re-export main types
pub use debounce::DebounceGate;
pub use fanout::{RenderSink, SurfaceFanout};
