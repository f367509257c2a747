//! Timer engine
//!
//! Owns the canonical [`TimerState`] and serializes every mutation behind a
//! single mutex, so commands arriving from HTTP handlers and ticks arriving
//! from the background clock task never interleave mid-transition. Each
//! mutating operation broadcasts one [`TimerEvent::StateChanged`] snapshot
//! before returning; the countdown reaching zero additionally broadcasts
//! [`TimerEvent::Completed`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events::TimerEvent;
use crate::state::phase::TICK_MS;
use crate::state::{Phase, TimerState};
use crate::tasks::tick::tick_loop;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("focus duration must be positive, got {0} ms")]
    InvalidDuration(i64),
    #[error("focus duration out of range: {minutes}m {seconds}s")]
    DurationOverflow { minutes: i64, seconds: i64 },
}

/// Outcome of a single tick, used by the clock task to decide whether to
/// keep scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented and still has time left.
    Running,
    /// Countdown just reached zero; the completion event has been emitted.
    Completed,
    /// The engine is no longer running; the loop must terminate.
    Stopped,
}

#[derive(Debug)]
pub struct TimerEngine {
    state: Mutex<TimerState>,
    /// Handle of the live tick task, if any. At most one exists at a time:
    /// only `start` spawns, and it is gated on `is_running`.
    tick_task: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
    event_tx: broadcast::Sender<TimerEvent>,
    /// Keep one receiver alive to prevent channel closure
    _event_rx: broadcast::Receiver<TimerEvent>,
}

impl TimerEngine {
    /// Create an engine in the fresh state: focus phase, not running,
    /// full duration.
    pub fn new(focus_duration_ms: u64) -> Self {
        let (event_tx, event_rx) = broadcast::channel(100);
        Self {
            state: Mutex::new(TimerState::new(focus_duration_ms)),
            tick_task: Mutex::new(None),
            tick_interval: Duration::from_millis(TICK_MS),
            event_tx,
            _event_rx: event_rx,
        }
    }

    /// Subscribe to engine events. Each subscriber observes events in
    /// emission order.
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> TimerState {
        self.lock_state().clone()
    }

    /// Interval between ticks of the clock task.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Begin the countdown. No-op while already running, and no-op at zero
    /// remaining time (a finished countdown needs `reset` first — starting
    /// it would re-emit a completion for the same countdown).
    pub fn start(self: &Arc<Self>) {
        let snapshot = {
            let mut state = self.lock_state();
            if state.is_running || state.remaining_ms == 0 {
                debug!(
                    is_running = state.is_running,
                    remaining_ms = state.remaining_ms,
                    "start ignored"
                );
                return;
            }
            state.is_running = true;
            state.clone()
        };

        info!(remaining_ms = snapshot.remaining_ms, phase = %snapshot.phase, "starting countdown");
        let engine = Arc::clone(self);
        let handle = tokio::spawn(tick_loop(engine));
        if let Some(old) = self.lock_tick_task().replace(handle) {
            // Either already finished (completed countdown) or a loop that a
            // racing stop missed before this handle was stored; that loop
            // would terminate on its next is_running re-check anyway.
            old.abort();
        }

        self.emit_state(snapshot);
    }

    /// Stop ticking, keeping the remaining time. Idempotent; always emits so
    /// surfaces never miss a paused status.
    pub fn pause(&self) {
        let snapshot = {
            let mut state = self.lock_state();
            state.is_running = false;
            state.clone()
        };
        self.cancel_tick_task();

        info!(remaining_ms = snapshot.remaining_ms, "countdown paused");
        self.emit_state(snapshot);
    }

    /// Stop ticking and restore the full duration of the current phase.
    pub fn reset(&self) {
        let snapshot = {
            let mut state = self.lock_state();
            state.is_running = false;
            state.remaining_ms = state.duration_for(state.phase);
            state.clone()
        };
        self.cancel_tick_task();

        info!(remaining_ms = snapshot.remaining_ms, phase = %snapshot.phase, "countdown reset");
        self.emit_state(snapshot);
    }

    /// Stop ticking and switch to `phase` with its fresh duration.
    pub fn switch_phase(&self, phase: Phase) {
        let snapshot = {
            let mut state = self.lock_state();
            state.is_running = false;
            state.phase = phase;
            state.remaining_ms = state.duration_for(phase);
            state.clone()
        };
        self.cancel_tick_task();

        info!(phase = %snapshot.phase, remaining_ms = snapshot.remaining_ms, "switched phase");
        self.emit_state(snapshot);
    }

    /// Update the focus-phase duration. Re-bases the remaining time
    /// immediately when the focus phase is active, even mid-countdown;
    /// running status is unaffected.
    pub fn set_focus_duration(&self, ms: i64) -> Result<TimerState, EngineError> {
        if ms <= 0 {
            return Err(EngineError::InvalidDuration(ms));
        }
        let snapshot = {
            let mut state = self.lock_state();
            state.focus_duration_ms = ms as u64;
            if state.phase == Phase::Focus {
                state.remaining_ms = ms as u64;
            }
            state.clone()
        };

        info!(focus_duration_ms = snapshot.focus_duration_ms, "focus duration updated");
        self.emit_state(snapshot.clone());
        Ok(snapshot)
    }

    /// Advance the countdown by one tick. Normally driven by the clock task;
    /// callable directly to simulate time in tests.
    ///
    /// Re-checks `is_running` under the state lock, so a pause issued
    /// concurrently with a pending tick wins: no decrement is applied after
    /// pause takes effect.
    pub fn tick(&self) -> TickOutcome {
        let (snapshot, completed) = {
            let mut state = self.lock_state();
            if !state.is_running || state.remaining_ms == 0 {
                return TickOutcome::Stopped;
            }
            state.remaining_ms = state.remaining_ms.saturating_sub(TICK_MS);
            let completed = state.remaining_ms == 0;
            if completed {
                state.is_running = false;
            }
            (state.clone(), completed)
        };

        let phase = snapshot.phase;
        self.emit_state(snapshot);
        if completed {
            info!(phase = %phase, "countdown completed");
            self.emit(TimerEvent::Completed { phase });
            TickOutcome::Completed
        } else {
            TickOutcome::Running
        }
    }

    fn cancel_tick_task(&self) {
        if let Some(handle) = self.lock_tick_task().take() {
            handle.abort();
        }
    }

    fn emit_state(&self, snapshot: TimerState) {
        self.emit(TimerEvent::StateChanged(snapshot));
    }

    fn emit(&self, event: TimerEvent) {
        if let Err(e) = self.event_tx.send(event) {
            warn!("failed to broadcast timer event: {}", e);
        }
    }

    // Mutations never panic while holding the lock, so a poisoned lock still
    // holds consistent data.
    fn lock_state(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_tick_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.tick_task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn drain(rx: &mut broadcast::Receiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event channel broken: {}", e),
            }
        }
        events
    }

    #[tokio::test]
    async fn start_then_pause_reflects_last_call() {
        let engine = Arc::new(TimerEngine::new(1_500_000));
        engine.start();
        assert!(engine.snapshot().is_running);
        engine.pause();
        assert!(!engine.snapshot().is_running);
        assert_eq!(engine.snapshot().remaining_ms, 1_500_000);
    }

    #[tokio::test]
    async fn start_while_running_is_a_noop() {
        let engine = Arc::new(TimerEngine::new(1_500_000));
        let mut rx = engine.subscribe();
        engine.start();
        engine.start();
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1, "duplicate start must not emit");
    }

    #[tokio::test]
    async fn start_at_zero_is_a_noop() {
        let engine = Arc::new(TimerEngine::new(2_000));
        engine.start();
        engine.tick();
        assert_eq!(engine.tick(), TickOutcome::Completed);
        let mut rx = engine.subscribe();
        engine.start();
        assert!(!engine.snapshot().is_running);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn reset_restores_full_duration() {
        let engine = Arc::new(TimerEngine::new(10_000));
        engine.start();
        engine.tick();
        engine.tick();
        engine.reset();
        let state = engine.snapshot();
        assert!(!state.is_running);
        assert_eq!(state.remaining_ms, 10_000);
    }

    #[tokio::test]
    async fn switch_phase_stops_and_rebases() {
        let engine = Arc::new(TimerEngine::new(10_000));
        engine.start();
        engine.switch_phase(Phase::ShortBreak);
        let state = engine.snapshot();
        assert!(!state.is_running);
        assert_eq!(state.phase, Phase::ShortBreak);
        assert_eq!(state.remaining_ms, 300_000);

        engine.switch_phase(Phase::LongBreak);
        assert_eq!(engine.snapshot().remaining_ms, 900_000);
    }

    #[tokio::test]
    async fn set_focus_duration_rebases_only_focus_phase() {
        let engine = Arc::new(TimerEngine::new(1_500_000));
        engine.set_focus_duration(60_000).unwrap();
        assert_eq!(engine.snapshot().remaining_ms, 60_000);

        engine.switch_phase(Phase::ShortBreak);
        engine.set_focus_duration(120_000).unwrap();
        let state = engine.snapshot();
        // Break countdown untouched, only the stored focus duration moved.
        assert_eq!(state.remaining_ms, 300_000);
        assert_eq!(state.focus_duration_ms, 120_000);
    }

    #[tokio::test]
    async fn set_focus_duration_rejects_non_positive() {
        let engine = Arc::new(TimerEngine::new(1_500_000));
        let before = engine.snapshot();
        let mut rx = engine.subscribe();
        assert_eq!(
            engine.set_focus_duration(-100),
            Err(EngineError::InvalidDuration(-100))
        );
        assert_eq!(
            engine.set_focus_duration(0),
            Err(EngineError::InvalidDuration(0))
        );
        assert_eq!(engine.snapshot(), before);
        assert!(drain(&mut rx).is_empty(), "rejected change must not emit");
    }

    #[tokio::test]
    async fn countdown_completes_exactly_once() {
        let engine = Arc::new(TimerEngine::new(5_000));
        let mut rx = engine.subscribe();
        engine.start();
        for _ in 0..4 {
            assert_eq!(engine.tick(), TickOutcome::Running);
        }
        assert_eq!(engine.tick(), TickOutcome::Completed);

        let state = engine.snapshot();
        assert_eq!(state.remaining_ms, 0);
        assert!(!state.is_running);

        let completions = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, TimerEvent::Completed { .. }))
            .count();
        assert_eq!(completions, 1);

        // The loop must terminate rather than reschedule.
        assert_eq!(engine.tick(), TickOutcome::Stopped);
    }

    #[tokio::test]
    async fn tick_after_pause_does_not_decrement() {
        let engine = Arc::new(TimerEngine::new(10_000));
        engine.start();
        engine.tick();
        engine.pause();
        assert_eq!(engine.tick(), TickOutcome::Stopped);
        assert_eq!(engine.snapshot().remaining_ms, 9_000);
    }

    #[tokio::test]
    async fn focus_pause_reset_scenario() {
        let engine = Arc::new(TimerEngine::new(1_500_000));
        engine.start();
        engine.tick();
        engine.tick();
        engine.tick();
        let state = engine.snapshot();
        assert_eq!(state.remaining_ms, 1_497_000); // 24:57
        assert!(state.is_running);

        engine.pause();
        let state = engine.snapshot();
        assert_eq!(state.remaining_ms, 1_497_000);
        assert!(!state.is_running);

        engine.reset();
        let state = engine.snapshot();
        assert_eq!(state.remaining_ms, 1_500_000); // 25:00
        assert!(!state.is_running);
    }
}
