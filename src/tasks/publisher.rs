//! Surface publisher task
//!
//! Drains engine events into the surface fan-out. The subscription is
//! created by the caller before the task is spawned, so no event emitted
//! after setup can be missed. A single task serves every surface, which
//! keeps updates in emission order for each of them.

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{info, warn};

use crate::events::TimerEvent;
use crate::publish::SurfaceFanout;

pub async fn surface_publisher_task(mut events: Receiver<TimerEvent>, mut fanout: SurfaceFanout) {
    info!("starting surface publisher task");

    loop {
        match events.recv().await {
            Ok(event) => fanout.handle_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                // Stale updates are worthless; the next event carries
                // current state.
                warn!(skipped, "surface publisher lagged behind engine events");
            }
            Err(RecvError::Closed) => {
                info!("engine event channel closed, stopping surface publisher");
                break;
            }
        }
    }
}
