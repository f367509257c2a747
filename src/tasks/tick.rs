//! Countdown clock task
//!
//! The clock source for the engine: a repeating scheduled wait of one tick
//! interval, driving `TimerEngine::tick` until the engine reports that the
//! countdown stopped or completed. Spawned by `TimerEngine::start`, which
//! guarantees at most one live instance; cancelled by every operation that
//! stops the countdown.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::debug;

use crate::engine::{TickOutcome, TimerEngine};

pub async fn tick_loop(engine: Arc<TimerEngine>) {
    debug!("tick loop started");
    loop {
        sleep(engine.tick_interval()).await;
        match engine.tick() {
            TickOutcome::Running => {}
            outcome => {
                debug!(?outcome, "tick loop terminating");
                break;
            }
        }
    }
}
