//! Frame-based timers
//!
//! Delayed effects are queued with the frame they fire on and drained by the
//! tick, so they land at a deterministic point instead of in the middle of
//! an entity pass.

use serde::{Deserialize, Serialize};

/// Something that happens a fixed number of frames later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledAction {
    /// End the run (bomb caught)
    EndGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub fire_at: u64,
    pub action: ScheduledAction,
}

/// Pending timers, kept in firing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pending: Vec<ScheduledEvent>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire on frame `now + delay`
    pub fn schedule(&mut self, now: u64, delay: u64, action: ScheduledAction) {
        let event = ScheduledEvent {
            fire_at: now.saturating_add(delay),
            action,
        };
        // Insert after any event with the same frame to keep FIFO order
        let pos = self.pending.partition_point(|e| e.fire_at <= event.fire_at);
        self.pending.insert(pos, event);
    }

    /// Remove and return every event due at or before `frame`
    pub fn drain_due(&mut self, frame: u64) -> Vec<ScheduledAction> {
        let due = self.pending.partition_point(|e| e.fire_at <= frame);
        self.pending.drain(..due).map(|e| e.action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
