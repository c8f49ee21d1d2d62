//! Schedule (solution) model.
//!
//! A schedule is the execution-ordered list of service slices handed out
//! by a discipline. Non-preemptive disciplines emit one entry per user;
//! Round-Robin emits one entry per quantum slice.

use serde::{Deserialize, Serialize};

/// One contiguous slice of booking service given to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Served user.
    pub user_id: u32,
    /// Slice start (minutes).
    pub start_time: i64,
    /// Slice end (minutes).
    pub finish_time: i64,
}

impl ScheduleEntry {
    /// Creates a new entry.
    pub fn new(user_id: u32, start_time: i64, finish_time: i64) -> Self {
        Self {
            user_id,
            start_time,
            finish_time,
        }
    }

    /// Slice length (finish - start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.finish_time - self.start_time
    }
}

/// An execution-ordered sequence of schedule entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Entries in execution order.
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Makespan: latest finish time across all entries.
    pub fn makespan(&self) -> i64 {
        self.entries.iter().map(|e| e.finish_time).max().unwrap_or(0)
    }

    /// All slices given to a user, in execution order.
    pub fn entries_for_user(&self, user_id: u32) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.user_id == user_id).collect()
    }

    /// First dispatch of a user.
    pub fn first_start(&self, user_id: u32) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.user_id == user_id)
            .map(|e| e.start_time)
    }

    /// Completion time of a user (end of its last slice).
    pub fn completion_time(&self, user_id: u32) -> Option<i64> {
        self.entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.finish_time)
            .max()
    }

    /// Total service handed to a user across all slices.
    pub fn service_received(&self, user_id: u32) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(ScheduleEntry::duration)
            .sum()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
