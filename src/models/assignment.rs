//! Assignment (solution) model.
//!
//! An assignment maps date → service → role label → ordered names. It is
//! the single output artifact of a scheduling run and only grows while the
//! run is in progress. Ordered maps keep iteration and serialization stable,
//! so two runs with the same seed compare equal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Service;

/// Role label → assigned names (pick order).
pub type RoleSlots = BTreeMap<String, Vec<String>>;

/// Complete duty assignment for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    days: BTreeMap<NaiveDate, BTreeMap<Service, RoleSlots>>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an (empty) service entry for `date` if none exists yet.
    pub fn ensure_service(&mut self, date: NaiveDate, service: Service) {
        self.days.entry(date).or_default().entry(service).or_default();
    }

    /// Records the names for one role slot, replacing any earlier value.
    pub fn set(
        &mut self,
        date: NaiveDate,
        service: Service,
        role: impl Into<String>,
        names: Vec<String>,
    ) {
        self.days
            .entry(date)
            .or_default()
            .entry(service)
            .or_default()
            .insert(role.into(), names);
    }

    /// Names assigned to a role slot, if the slot was written.
    pub fn get(&self, date: NaiveDate, service: Service, role: &str) -> Option<&[String]> {
        self.roles(date, service)
            .and_then(|slots| slots.get(role))
            .map(Vec::as_slice)
    }

    /// All role slots of one service.
    pub fn roles(&self, date: NaiveDate, service: Service) -> Option<&RoleSlots> {
        self.days.get(&date).and_then(|services| services.get(&service))
    }

    /// Scheduled dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Every name holding a role in one service (one entry per role held).
    pub fn names_in_service(&self, date: NaiveDate, service: Service) -> Vec<&str> {
        self.roles(date, service)
            .map(|slots| {
                slots
                    .values()
                    .flat_map(|names| names.iter().map(String::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of filled name positions.
    pub fn assignment_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|services| services.values())
            .flat_map(|slots| slots.values())
            .map(Vec::len)
            .sum()
    }

    /// Number of role slots written (including empty ones).
    pub fn slot_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|services| services.values())
            .map(|slots| slots.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn sample() -> Assignment {
        let mut a = Assignment::new();
        a.set(d(3), Service::First, "Lektor 1", vec!["Ani".into()]);
        a.set(d(3), Service::First, "Kolektan 1", vec!["Budi".into()]);
        a.set(d(3), Service::Second, "Majelis Pendamping", vec!["Ani".into()]);
        a.set(d(10), Service::First, "Lektor 1", vec![]);
        a
    }

    #[test]
    fn test_set_and_get() {
        let a = sample();
        assert_eq!(
            a.get(d(3), Service::First, "Lektor 1"),
            Some(&["Ani".to_string()][..])
        );
        assert_eq!(a.get(d(10), Service::First, "Lektor 1"), Some(&[][..]));
        assert!(a.get(d(10), Service::Second, "Lektor 1").is_none());
        assert!(a.get(d(17), Service::First, "Lektor 1").is_none());
    }

    #[test]
    fn test_counts() {
        let a = sample();
        assert_eq!(a.assignment_count(), 3);
        assert_eq!(a.slot_count(), 4);
    }

    #[test]
    fn test_ensure_service_keeps_existing() {
        let mut a = sample();
        a.ensure_service(d(3), Service::First);
        a.ensure_service(d(24), Service::Second);
        assert_eq!(a.roles(d(3), Service::First).map(|r| r.len()), Some(2));
        assert_eq!(a.roles(d(24), Service::Second).map(|r| r.len()), Some(0));
        assert_eq!(a.slot_count(), 4);
    }

    #[test]
    fn test_dates_sorted() {
        let mut a = Assignment::new();
        a.set(d(17), Service::First, "X", vec![]);
        a.set(d(3), Service::First, "X", vec![]);
        let dates: Vec<_> = a.dates().collect();
        assert_eq!(dates, vec![d(3), d(17)]);
    }

    #[test]
    fn test_names_in_service() {
        let a = sample();
        let mut first = a.names_in_service(d(3), Service::First);
        first.sort();
        assert_eq!(first, vec!["Ani", "Budi"]);
        assert_eq!(a.names_in_service(d(3), Service::Second), vec!["Ani"]);
        assert!(a.names_in_service(d(10), Service::First).is_empty());
    }
}
