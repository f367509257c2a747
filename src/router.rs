//! Command router
//!
//! Translates external trigger events (UI buttons, overlay taps,
//! notification actions) into engine calls. Pure translation: no state of
//! its own, no side effects beyond delegating.

use std::sync::Arc;

use tracing::debug;

use crate::engine::{EngineError, TimerEngine};
use crate::state::Phase;

/// External trigger events, as delivered by the command transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Tap on the floating overlay ball.
    OverlayTap,
    /// "Pause/continue" action on the status notification.
    NotificationToggle,
    /// "Stop" action on the status notification.
    NotificationStop,
    /// Start/pause button on the main display.
    MainToggle,
    /// Reset button on the main display.
    MainReset,
    /// One of the phase-switch buttons.
    SelectPhase(Phase),
    /// Duration-picker save, minutes and seconds as entered.
    SaveFocusDuration { minutes: i64, seconds: i64 },
}

/// Dispatch one trigger to the engine. Only `SaveFocusDuration` can fail
/// (non-positive duration); everything else is total.
pub fn dispatch(engine: &Arc<TimerEngine>, trigger: Trigger) -> Result<(), EngineError> {
    debug!(?trigger, "dispatching trigger");
    match trigger {
        Trigger::OverlayTap => {
            let state = engine.snapshot();
            if state.is_running {
                engine.pause();
            } else if state.remaining_ms > 0 {
                engine.start();
            } else {
                engine.reset();
            }
        }
        Trigger::NotificationToggle | Trigger::MainToggle => {
            if engine.snapshot().is_running {
                engine.pause();
            } else {
                engine.start();
            }
        }
        Trigger::NotificationStop | Trigger::MainReset => engine.reset(),
        Trigger::SelectPhase(phase) => engine.switch_phase(phase),
        Trigger::SaveFocusDuration { minutes, seconds } => {
            // The values come straight from the request body; checked math
            // so absurd inputs are rejected instead of wrapping.
            let ms = minutes
                .checked_mul(60_000)
                .and_then(|m| seconds.checked_mul(1_000).and_then(|s| m.checked_add(s)))
                .ok_or(EngineError::DurationOverflow { minutes, seconds })?;
            engine.set_focus_duration(ms)?;
        }
    }
    Ok(())
}
