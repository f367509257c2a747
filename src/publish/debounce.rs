//! Per-key debounce gate
//!
//! Decides whether an update keyed by name may fire now, given a minimum
//! interval since the last approved firing for that key. An instance is
//! owned by the surface fan-out rather than living in process-wide state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct DebounceGate {
    last_fire: HashMap<String, Instant>,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records now as the last firing for `key` if at
    /// least `min_interval` has elapsed since the previous approval (or
    /// none exists). Returns false with no side effect otherwise.
    pub fn should_execute(&mut self, key: &str, min_interval: Duration) -> bool {
        self.should_execute_at(key, min_interval, Instant::now())
    }

    fn should_execute_at(&mut self, key: &str, min_interval: Duration, now: Instant) -> bool {
        match self.last_fire.get(key) {
            Some(last) if now.duration_since(*last) < min_interval => false,
            _ => {
                self.last_fire.insert(key.to_string(), now);
                true
            }
        }
    }

    /// Forget the record for one key.
    pub fn clear(&mut self, key: &str) {
        self.last_fire.remove(key);
    }

    /// Forget all records.
    pub fn clear_all(&mut self) {
        self.last_fire.clear();
    }
}
