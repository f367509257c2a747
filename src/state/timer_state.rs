//! Timer state structure

use serde::{Deserialize, Serialize};

use super::phase::{Phase, DEFAULT_FOCUS_MS};

/// The single mutable entity of the daemon: the countdown state shared by
/// every presentation surface.
///
/// Mutated exclusively through [`crate::engine::TimerEngine`] operations;
/// event subscribers receive cloned snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Time left in the current countdown, clamped at zero.
    pub remaining_ms: u64,
    /// Whether the countdown loop is actively ticking.
    pub is_running: bool,
    /// Current phase of the Pomodoro cycle.
    pub phase: Phase,
    /// Configurable duration for the focus phase only.
    pub focus_duration_ms: u64,
}

impl TimerState {
    /// Create a fresh state: focus phase, not running, full duration.
    pub fn new(focus_duration_ms: u64) -> Self {
        Self {
            remaining_ms: focus_duration_ms,
            is_running: false,
            phase: Phase::Focus,
            focus_duration_ms,
        }
    }

    /// Nominal duration for a fresh countdown in the given phase.
    pub fn duration_for(&self, phase: Phase) -> u64 {
        phase.fixed_duration_ms().unwrap_or(self.focus_duration_ms)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MS)
    }
}
