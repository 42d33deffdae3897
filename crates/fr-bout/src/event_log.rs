use crate::BoutEvent;
use serde::{Deserialize, Serialize};

/// Append-only chronological record of bout events.
///
/// Insertion order is chronological order. There is no removal or mutation;
/// a reset that clears the log replaces the whole log instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<BoutEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: BoutEvent) {
        self.events.push(event);
    }

    /// Events in chronological order. Each call restarts from the first event.
    pub fn iter(&self) -> std::slice::Iter<'_, BoutEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[BoutEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&BoutEvent> {
        self.events.last()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a BoutEvent;
    type IntoIter = std::slice::Iter<'a, BoutEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
