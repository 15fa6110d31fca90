//! Hover-triggered image preloading with a debounce.
//!
//! Hovering a card schedules its full image for preload after
//! `PRELOAD_DEBOUNCE`. Leaving the card before then cancels it. An item is
//! handed out for preload at most once per session.

use crate::constants::PRELOAD_DEBOUNCE;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug)]
pub struct PreloadScheduler {
    delay: Duration,
    pending: HashMap<String, Instant>,
    done: HashSet<String>,
}

impl Default for PreloadScheduler {
    fn default() -> Self {
        Self::new(PRELOAD_DEBOUNCE)
    }
}

impl PreloadScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
            done: HashSet::new(),
        }
    }

    /// Pointer entered an item. Re-hovering restarts the timer.
    pub fn hover_start(&mut self, id: &str, now: Instant) {
        if self.done.contains(id) {
            return;
        }
        trace!(id, "preload scheduled");
        self.pending.insert(id.to_string(), now + self.delay);
    }

    /// Pointer left an item. Returns true if a pending preload was cancelled.
    pub fn hover_end(&mut self, id: &str) -> bool {
        self.pending.remove(id).is_some()
    }

    /// Ids whose debounce has elapsed, earliest first. Each is returned once.
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<(String, Instant)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (id.clone(), *deadline))
            .collect();
        due.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        due.into_iter()
            .map(|(id, _)| {
                self.pending.remove(&id);
                self.done.insert(id.clone());
                id
            })
            .collect()
    }

    pub fn is_preloaded(&self, id: &str) -> bool {
        self.done.contains(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }
}
