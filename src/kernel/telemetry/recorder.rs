use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};

const MAX_EVENTS: usize = 10_000;

#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
}

impl TelemetryRecorder {
    pub const CAPACITY: usize = MAX_EVENTS;

    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    /// Oldest events are dropped once the buffer is full.
    pub fn record(&mut self, event: TelemetryEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        // Computed on demand from the buffer
        compute_snapshot(&self.buffer)
    }

    pub fn events(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Session roll-up, emitted when the session ends.
    pub fn aggregate_session(&self, turns: u64) -> TelemetryEvent {
        let snap = self.snapshot();

        let fallback_ratio = if turns > 0 {
            snap.fallbacks as f32 / turns as f32
        } else {
            0.0
        };

        TelemetryEvent::SessionSummary {
            turns,
            fallback_ratio,
            slots_filled: snap.slot_stats.filled,
            faq_hits: snap.faq_stats.hits,
        }
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}
