//! Timer events broadcast by the engine
//!
//! Every state-mutating engine operation produces exactly one
//! `StateChanged` carrying a snapshot of the new state. `Completed` is
//! raised once per countdown reaching zero, in addition to the final
//! `StateChanged`, so subscribers can distinguish "the clock hit zero"
//! from an ordinary tick.

use serde::{Deserialize, Serialize};

use crate::state::{Phase, TimerState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    StateChanged(TimerState),
    Completed { phase: Phase },
}
