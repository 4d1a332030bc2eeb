use chrono::Utc;
use parking_lot::RwLock;

use crate::config::ACTIVITY_WINDOW;
use crate::models::models::ActivityEvent;

/// Append-only audit trail. Only the read view is bounded; the log itself is
/// never compacted.
#[derive(Default)]
pub struct ActivityLog {
    events: RwLock<Vec<ActivityEvent>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, message: impl Into<String>) {
        let event = ActivityEvent {
            at: Utc::now(),
            message: message.into(),
        };
        self.events.write().push(event);
    }

    /// The last `ACTIVITY_WINDOW` events, oldest first.
    pub fn recent(&self) -> Vec<ActivityEvent> {
        let events = self.events.read();
        let start = events.len().saturating_sub(ACTIVITY_WINDOW);
        events[start..].to_vec()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.events.read().len()
    }
}
