//! Timer phase enumeration and fixed durations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default focus countdown: 25 minutes.
pub const DEFAULT_FOCUS_MS: u64 = 25 * 60 * 1000;
/// Short break countdown: 5 minutes, not configurable.
pub const SHORT_BREAK_MS: u64 = 5 * 60 * 1000;
/// Long break countdown: 15 minutes, not configurable.
pub const LONG_BREAK_MS: u64 = 15 * 60 * 1000;
/// Countdown tick granularity.
pub const TICK_MS: u64 = 1000;

/// The current phase of the Pomodoro cycle.
///
/// Only the focus phase has a user-configurable duration; both break
/// phases use fixed durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Fixed duration for break phases; `None` for focus, whose duration
    /// lives on the timer state.
    pub fn fixed_duration_ms(&self) -> Option<u64> {
        match self {
            Phase::Focus => None,
            Phase::ShortBreak => Some(SHORT_BREAK_MS),
            Phase::LongBreak => Some(LONG_BREAK_MS),
        }
    }

    /// Human-readable label used by the presentation surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Phase::Focus),
            "short-break" | "short_break" => Ok(Phase::ShortBreak),
            "long-break" | "long_break" => Ok(Phase::LongBreak),
            other => Err(format!("unknown phase: {}", other)),
        }
    }
}
