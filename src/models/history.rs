use serde::{Deserialize, Serialize};

use super::TripId;

/// Maximum number of trip ids kept in the viewed history
pub const MAX_VIEWED_HISTORY: usize = 10;

/// Trip ids the visitor has opened, oldest first
///
/// Holds no duplicates and never more than [`MAX_VIEWED_HISTORY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TripId>", into = "Vec<TripId>")]
pub struct ViewedHistory {
    ids: Vec<TripId>,
}

impl ViewedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from persisted ids, restoring the invariants
    ///
    /// A repeated id keeps only its latest position, and the oldest entries
    /// beyond the cap are dropped.
    pub fn from_ids(ids: impl IntoIterator<Item = TripId>) -> Self {
        let mut history = Self::new();
        for id in ids {
            history.record(id);
        }
        history
    }

    /// Moves `id` to the most recent position, evicting the oldest entry
    /// when the cap is exceeded
    pub fn record(&mut self, id: TripId) {
        self.ids.retain(|existing| *existing != id);
        self.ids.push(id);
        if self.ids.len() > MAX_VIEWED_HISTORY {
            let overflow = self.ids.len() - MAX_VIEWED_HISTORY;
            self.ids.drain(..overflow);
        }
    }

    pub fn contains(&self, id: TripId) -> bool {
        self.ids.contains(&id)
    }

    /// Ids in oldest-to-newest order
    pub fn ids(&self) -> &[TripId] {
        &self.ids
    }

    pub fn most_recent_first(&self) -> impl Iterator<Item = TripId> + '_ {
        self.ids.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<TripId>> for ViewedHistory {
    fn from(ids: Vec<TripId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<ViewedHistory> for Vec<TripId> {
    fn from(history: ViewedHistory) -> Self {
        history.ids
    }
}
