//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::router::{dispatch, Trigger};
use crate::state::Phase;
use crate::utils::format_mmss;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};
use super::ServerState;

/// Request body for the duration-picker save.
#[derive(Debug, Deserialize)]
pub struct FocusDurationRequest {
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

fn command_response(state: &ServerState, command: &str) -> Json<ApiResponse> {
    state.record_command(command);
    let timer = state.engine.snapshot();
    let message = format!(
        "{}: {} {} ({})",
        command,
        timer.phase,
        format_mmss(timer.remaining_ms),
        if timer.is_running { "running" } else { "stopped" },
    );
    Json(ApiResponse::ok(message, timer))
}

/// Handle POST /toggle - main display start/pause button
pub async fn toggle_handler(State(state): State<Arc<ServerState>>) -> Json<ApiResponse> {
    info!("Toggle endpoint called");
    let _ = dispatch(&state.engine, Trigger::MainToggle);
    command_response(&state, "toggle")
}

/// Handle POST /reset - main display reset button
pub async fn reset_handler(State(state): State<Arc<ServerState>>) -> Json<ApiResponse> {
    info!("Reset endpoint called");
    let _ = dispatch(&state.engine, Trigger::MainReset);
    command_response(&state, "reset")
}

/// Handle POST /phase/:phase - phase-switch buttons
pub async fn phase_handler(
    State(state): State<Arc<ServerState>>,
    Path(phase): Path<String>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match phase.parse::<Phase>() {
        Ok(phase) => {
            info!("Phase endpoint called: {}", phase);
            let _ = dispatch(&state.engine, Trigger::SelectPhase(phase));
            Ok(command_response(&state, "phase"))
        }
        Err(e) => {
            warn!("Rejected phase switch: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e, state.engine.snapshot())),
            ))
        }
    }
}

/// Handle POST /focus-duration - duration-picker save
pub async fn focus_duration_handler(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<FocusDurationRequest>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    info!("Focus duration endpoint called: {}m {}s", req.minutes, req.seconds);
    match dispatch(
        &state.engine,
        Trigger::SaveFocusDuration {
            minutes: req.minutes,
            seconds: req.seconds,
        },
    ) {
        Ok(()) => Ok(command_response(&state, "focus-duration")),
        Err(e) => {
            warn!("Rejected focus duration: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string(), state.engine.snapshot())),
            ))
        }
    }
}

/// Handle POST /overlay/click - tap on the floating overlay ball
pub async fn overlay_click_handler(State(state): State<Arc<ServerState>>) -> Json<ApiResponse> {
    info!("Overlay click received");
    let _ = dispatch(&state.engine, Trigger::OverlayTap);
    command_response(&state, "overlay-click")
}

/// Handle POST /notification/toggle - notification pause/continue action
pub async fn notification_toggle_handler(
    State(state): State<Arc<ServerState>>,
) -> Json<ApiResponse> {
    info!("Notification pause/continue action received");
    let _ = dispatch(&state.engine, Trigger::NotificationToggle);
    command_response(&state, "notification-toggle")
}

/// Handle POST /notification/stop - notification stop action
pub async fn notification_stop_handler(
    State(state): State<Arc<ServerState>>,
) -> Json<ApiResponse> {
    info!("Notification stop action received");
    let _ = dispatch(&state.engine, Trigger::NotificationStop);
    command_response(&state, "notification-stop")
}

/// Handle GET /status - current timer and server status
pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let timer = state.engine.snapshot();
    let (last_command, last_command_time) = match state.last_command() {
        Some((name, at)) => (Some(name), Some(at)),
        None => (None, None),
    };

    Json(StatusResponse {
        remaining: format_mmss(timer.remaining_ms),
        timer,
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_command,
        last_command_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
