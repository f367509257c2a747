//! State management module
//!
//! This module contains the timer state entity and the phase enumeration
//! that determines countdown durations.

pub mod phase;
pub mod timer_state;

// Re-export main types
pub use phase::Phase;
pub use timer_state::TimerState;
