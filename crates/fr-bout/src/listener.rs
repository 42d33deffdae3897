use crate::{BoutNotice, Card, Side};
use std::sync::{Arc, Mutex};

/// Display collaborator. Receives every render instruction the controller emits.
pub trait BoutListener: Send {
    fn notify(&mut self, notice: &BoutNotice);
}

impl<F> BoutListener for F
where
    F: FnMut(&BoutNotice) + Send,
{
    fn notify(&mut self, notice: &BoutNotice) {
        self(notice)
    }
}

/// Listener that keeps every notice in a shared buffer.
///
/// Clone it before subscribing; the clone left behind reads the same buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    notices: Arc<Mutex<Vec<BoutNotice>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<BoutNotice> {
        self.notices
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn clear(&self) {
        if let Ok(mut v) = self.notices.lock() {
            v.clear();
        }
    }

    /// Most recent score rendered for `side`.
    pub fn last_score(&self, side: Side) -> Option<u32> {
        self.notices().into_iter().rev().find_map(|n| match n {
            BoutNotice::Score { side: s, score } if s == side => Some(score),
            _ => None,
        })
    }

    /// Most recent card rendered for `side`.
    pub fn last_card(&self, side: Side) -> Option<Card> {
        self.notices().into_iter().rev().find_map(|n| match n {
            BoutNotice::Card { side: s, card } if s == side => Some(card),
            _ => None,
        })
    }

    /// Most recent time rendered.
    pub fn last_time(&self) -> Option<f64> {
        self.notices().into_iter().rev().find_map(|n| match n {
            BoutNotice::Time { remaining } => Some(remaining),
            _ => None,
        })
    }
}

impl BoutListener for RecordingListener {
    fn notify(&mut self, notice: &BoutNotice) {
        match self.notices.lock() {
            Ok(mut v) => v.push(notice.clone()),
            Err(poisoned) => poisoned.into_inner().push(notice.clone()),
        }
    }
}
