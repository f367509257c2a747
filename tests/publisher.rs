//! End-to-end tests: engine events flowing through the publisher task to
//! registered surfaces, including the real countdown clock task.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tomatime::engine::TimerEngine;
use tomatime::publish::{RenderSink, SurfaceFanout};
use tomatime::state::{Phase, TimerState};
use tomatime::tasks::surface_publisher_task;

#[derive(Default)]
struct RecordingSink {
    renders: Mutex<Vec<TimerState>>,
    completions: Mutex<Vec<Phase>>,
}

impl RecordingSink {
    fn renders(&self) -> Vec<TimerState> {
        self.renders.lock().unwrap().clone()
    }

    fn completions(&self) -> Vec<Phase> {
        self.completions.lock().unwrap().clone()
    }
}

impl RenderSink for RecordingSink {
    fn render(&self, state: &TimerState) {
        self.renders.lock().unwrap().push(state.clone());
    }

    fn on_completed(&self, phase: Phase) {
        self.completions.lock().unwrap().push(phase);
    }
}

/// Publisher setup with an unthrottled fan-out, so every event reaches
/// the sink and ordering can be asserted exactly.
fn spawn_publisher(engine: &Arc<TimerEngine>) -> Arc<RecordingSink> {
    let sink = Arc::new(RecordingSink::default());
    let mut fanout = SurfaceFanout::with_window(Duration::ZERO);
    fanout.register("surface", sink.clone());
    tokio::spawn(surface_publisher_task(engine.subscribe(), fanout));
    sink
}

async fn wait_until(deadline_iters: u32, mut done: impl FnMut() -> bool) {
    for _ in 0..deadline_iters {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_to_completion_through_the_pipeline() {
    let engine = Arc::new(TimerEngine::new(3_000));
    let sink = spawn_publisher(&engine);

    engine.start();
    wait_until(1_000, || !sink.completions().is_empty()).await;

    let renders = sink.renders();
    let remaining: Vec<u64> = renders.iter().map(|s| s.remaining_ms).collect();
    assert_eq!(remaining, vec![3_000, 2_000, 1_000, 0]);
    assert!(renders[0].is_running);
    assert!(!renders[3].is_running);
    assert_eq!(sink.completions(), vec![Phase::Focus]);

    // The countdown is over; nothing further may arrive.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(sink.renders().len(), 4);
    assert_eq!(sink.completions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn pause_stops_the_clock_and_reaches_the_surface() {
    let engine = Arc::new(TimerEngine::new(60_000));
    let sink = spawn_publisher(&engine);

    engine.start();
    wait_until(1_000, || sink.renders().len() >= 3).await;
    engine.pause();
    wait_until(1_000, || {
        sink.renders().last().is_some_and(|s| !s.is_running)
    })
    .await;

    let paused_at = engine.snapshot().remaining_ms;
    assert!(paused_at < 60_000);

    // No tick survives the pause.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.snapshot().remaining_ms, paused_at);
    assert!(sink.renders().iter().all(|s| s.remaining_ms >= paused_at));
}

#[tokio::test(start_paused = true)]
async fn surfaces_see_updates_in_event_order() {
    let engine = Arc::new(TimerEngine::new(5_000));
    let sink = spawn_publisher(&engine);

    engine.start();
    wait_until(1_000, || !sink.completions().is_empty()).await;

    let remaining: Vec<u64> = sink.renders().iter().map(|s| s.remaining_ms).collect();
    let mut sorted = remaining.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(remaining, sorted, "updates must arrive in non-increasing order");
}
