//! HTTP API module
//!
//! The command transport: endpoints standing in for the original client's
//! buttons, overlay-click broadcast, and notification actions, plus a
//! status endpoint. Handlers translate requests into triggers for the
//! command router and never touch engine state directly.

pub mod handlers;
pub mod responses;

use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::TimerEngine;
use handlers::*;

/// Shared handler state: the engine plus server metadata.
pub struct ServerState {
    pub engine: Arc<TimerEngine>,
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    last_command: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl ServerState {
    pub fn new(engine: Arc<TimerEngine>, host: String, port: u16) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
            port,
            host,
            last_command: Mutex::new(None),
        }
    }

    /// Remember the last accepted command for the status endpoint.
    pub fn record_command(&self, name: &str) {
        if let Ok(mut last) = self.last_command.lock() {
            *last = Some((name.to_string(), Utc::now()));
        }
    }

    pub fn last_command(&self) -> Option<(String, DateTime<Utc>)> {
        self.last_command.lock().ok().and_then(|last| last.clone())
    }

    /// Server uptime as a formatted string.
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/phase/:phase", post(phase_handler))
        .route("/focus-duration", post(focus_duration_handler))
        .route("/overlay/click", post(overlay_click_handler))
        .route("/notification/toggle", post(notification_toggle_handler))
        .route("/notification/stop", post(notification_stop_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
