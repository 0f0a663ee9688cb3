//! Navigation history tracking.
//!
//! Every stack mutation is recorded as a [`NavigationRecord`]. The history is
//! bounded: once `capacity` records are held, the oldest is dropped.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of records kept by a machine.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// The kind of stack mutation a record describes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NavigationKind {
    Push,
    Pop,
    Clear,
}

/// Record of a single stack mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationRecord {
    pub kind: NavigationKind,
    /// Top of the stack before the mutation
    pub from: Option<StateId>,
    /// Top of the stack after the mutation
    pub to: Option<StateId>,
    /// Stack depth after the mutation
    pub depth: usize,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of navigation.
///
/// # Example
///
/// ```rust
/// use panelstack::core::{NavigationHistory, NavigationKind, NavigationRecord};
/// use panelstack::StateId;
/// use chrono::Utc;
///
/// let mut history = NavigationHistory::with_capacity(2);
/// for raw in 1..=3 {
///     history.record(NavigationRecord {
///         kind: NavigationKind::Push,
///         from: None,
///         to: Some(StateId::new(raw)),
///         depth: 1,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.tops(), vec![Some(StateId::new(2)), Some(StateId::new(3))]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct NavigationHistory {
    capacity: usize,
    records: VecDeque<NavigationRecord>,
}

/// Serialized form; replayed through [`NavigationHistory::record`] so a
/// loaded history respects its capacity.
#[derive(Deserialize)]
struct StoredHistory {
    capacity: usize,
    records: Vec<NavigationRecord>,
}

impl From<StoredHistory> for NavigationHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut history = Self::with_capacity(stored.capacity);
        for record in stored.records {
            history.record(record);
        }
        history
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl NavigationHistory {
    /// Create an empty history holding at most `capacity` records.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
        }
    }

    /// Maximum number of retained records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: NavigationRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &NavigationRecord> {
        self.records.iter()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&NavigationRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The focused state after each recorded mutation, oldest first.
    pub fn tops(&self) -> Vec<Option<StateId>> {
        self.records.iter().map(|record| record.to).collect()
    }

    /// Time between the first and last retained record.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
