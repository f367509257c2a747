//! Presentation surfaces
//!
//! Thin render sinks standing in for the three status surfaces of the
//! original client: the main display, the floating overlay ball, and the
//! system notification. Each renders to the structured log; rendering is
//! fire-and-forget and never reports failures back to the engine.

use tracing::info;

use crate::publish::RenderSink;
use crate::state::{Phase, TimerState};
use crate::utils::format_mmss;

/// Debounce key and sink for the in-app main display.
pub const MAIN_SURFACE: &str = "main";
/// Debounce key and sink for the floating overlay ball.
pub const OVERLAY_SURFACE: &str = "overlay";
/// Debounce key and sink for the system notification.
pub const NOTIFICATION_SURFACE: &str = "notification";

pub struct MainDisplay;

impl RenderSink for MainDisplay {
    fn render(&self, state: &TimerState) {
        info!(
            target: "tomatime::surface::main",
            "{} | {} | {}",
            state.phase,
            format_mmss(state.remaining_ms),
            if state.is_running { "running" } else { "paused" },
        );
    }

    fn on_completed(&self, phase: Phase) {
        info!(target: "tomatime::surface::main", "{} finished", phase);
    }
}

pub struct OverlayBall;

impl RenderSink for OverlayBall {
    fn render(&self, state: &TimerState) {
        // The ball only shows the time and a running indicator.
        info!(
            target: "tomatime::surface::overlay",
            "({}) {}",
            if state.is_running { "*" } else { " " },
            format_mmss(state.remaining_ms),
        );
    }

    fn on_completed(&self, _phase: Phase) {
        info!(target: "tomatime::surface::overlay", "(!) 00:00");
    }
}

pub struct NotificationPanel;

impl RenderSink for NotificationPanel {
    fn render(&self, state: &TimerState) {
        let title = if state.is_running {
            "Timer running..."
        } else if state.remaining_ms == state.duration_for(state.phase) {
            "Timer ready"
        } else {
            "Timer paused"
        };
        info!(
            target: "tomatime::surface::notification",
            "{} - {}: {} left",
            title,
            state.phase,
            format_mmss(state.remaining_ms),
        );
    }

    fn on_completed(&self, phase: Phase) {
        info!(
            target: "tomatime::surface::notification",
            "Time's up! {} session ended",
            phase,
        );
    }
}
