//! Surface fan-out
//!
//! Distributes engine events to registered render sinks, throttled per
//! surface by the debounce gate. Two kinds of events bypass the gate:
//! any state with `is_running == false` (a paused or stopped status must
//! never be delayed) and the completion event. Skipped events are not
//! queued — the next event that passes the gate carries current state.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::events::TimerEvent;
use crate::state::{Phase, TimerState};

use super::DebounceGate;

/// Minimum interval between throttled renders of a single surface.
pub const RENDER_WINDOW: Duration = Duration::from_millis(1000);

/// A presentation surface fed by the fan-out. Implementations must not
/// block; the engine never waits on rendering.
pub trait RenderSink: Send + Sync {
    fn render(&self, state: &TimerState);
    fn on_completed(&self, phase: Phase);
}

pub struct SurfaceFanout {
    gate: DebounceGate,
    window: Duration,
    sinks: Vec<(String, Arc<dyn RenderSink>)>,
}

impl SurfaceFanout {
    pub fn new() -> Self {
        Self::with_window(RENDER_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            gate: DebounceGate::new(),
            window,
            sinks: Vec::new(),
        }
    }

    /// Register a surface under its debounce key.
    pub fn register(&mut self, key: impl Into<String>, sink: Arc<dyn RenderSink>) {
        self.sinks.push((key.into(), sink));
    }

    /// Route one engine event to the registered surfaces.
    pub fn handle_event(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::StateChanged(state) => self.publish(state),
            TimerEvent::Completed { phase } => self.publish_completed(*phase),
        }
    }

    fn publish(&mut self, state: &TimerState) {
        for (key, sink) in &self.sinks {
            // A not-running status always goes through; surfaces must show
            // a pause immediately even right after a throttled render.
            if !state.is_running || self.gate.should_execute(key, self.window) {
                sink.render(state);
            } else {
                debug!(surface = %key, "render throttled");
            }
        }
    }

    fn publish_completed(&mut self, phase: Phase) {
        for (_, sink) in &self.sinks {
            sink.on_completed(phase);
        }
    }
}

impl Default for SurfaceFanout {
    fn default() -> Self {
        Self::new()
    }
}
