//! Back-to-back fairness tracking.
//!
//! Remembers the most recent date each person held any role and prefers
//! candidates who did not serve on the date immediately preceding the
//! current one in the processed date sequence. Only that one date counts;
//! a single-date run or the first date of a run never penalizes anyone.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Per-person last-assigned dates plus the preceding scheduled date.
#[derive(Debug, Clone, Default)]
pub struct FairnessTracker {
    last_assigned: HashMap<String, NaiveDate>,
    previous_date: Option<NaiveDate>,
}

impl FairnessTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date preceding the one about to be processed
    /// (`None` for the first date of the sequence).
    pub fn begin_date(&mut self, previous_date: Option<NaiveDate>) {
        self.previous_date = previous_date;
    }

    /// Whether `name` is preferred for the current date.
    pub fn prefer(&self, name: &str) -> bool {
        match self.previous_date {
            None => true,
            Some(previous) => self.last_assigned.get(name) != Some(&previous),
        }
    }

    /// Records that `name` holds a role on `date`.
    pub fn record(&mut self, name: &str, date: NaiveDate) {
        self.last_assigned.insert(name.to_string(), date);
    }

    /// Most recent date `name` held a role.
    pub fn last_assigned(&self, name: &str) -> Option<NaiveDate> {
        self.last_assigned.get(name).copied()
    }

    /// The preceding date currently in effect.
    pub fn previous_date(&self) -> Option<NaiveDate> {
        self.previous_date
    }
}
