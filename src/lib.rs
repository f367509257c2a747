//! Tomatime - a state-managed Pomodoro timer daemon
//!
//! This library hosts a single countdown state machine (focus, short
//! break, long break) and publishes its state, with per-surface
//! debouncing, to multiple presentation surfaces. Commands arrive over a
//! local HTTP API.

pub mod api;
pub mod config;
pub mod engine;
pub mod events;
pub mod publish;
pub mod router;
pub mod state;
pub mod surfaces;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::{create_router, ServerState};
pub use config::Config;
pub use engine::TimerEngine;
pub use events::TimerEvent;
pub use state::{Phase, TimerState};
pub use utils::shutdown_signal;
