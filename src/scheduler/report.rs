//! Composition quota reports.
//!
//! One report per composition category per service, comparing the clamped
//! elder/member requirement with what was actually picked.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | Missing elders | max(0, required elders - picked elders) |
//! | Missing members | max(0, required members - picked members) |
//! | Missing slots | max(0, required total - picked total) |

use chrono::NaiveDate;
use std::fmt;

use crate::classify::RoleCategory;
use crate::models::{CompositionPattern, Service};

/// Outcome of one composition pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionReport {
    pub date: NaiveDate,
    pub service: Service,
    pub category: RoleCategory,
    /// Requirement after clamping to the category's row count.
    pub required: CompositionPattern,
    pub picked_elders: usize,
    pub picked_members: usize,
}

impl CompositionReport {
    /// Builds a report from picked names and an elder lookup.
    pub fn from_picks(
        date: NaiveDate,
        service: Service,
        category: RoleCategory,
        required: CompositionPattern,
        picked: &[String],
        is_elder: impl Fn(&str) -> bool,
    ) -> Self {
        let picked_elders = picked.iter().filter(|n| is_elder(n)).count();
        Self {
            date,
            service,
            category,
            required,
            picked_elders,
            picked_members: picked.len() - picked_elders,
        }
    }

    pub fn required_total(&self) -> usize {
        self.required.total()
    }

    pub fn picked_total(&self) -> usize {
        self.picked_elders + self.picked_members
    }

    pub fn missing_elders(&self) -> usize {
        self.required.elders.saturating_sub(self.picked_elders)
    }

    pub fn missing_members(&self) -> usize {
        self.required.members.saturating_sub(self.picked_members)
    }

    pub fn missing_slots(&self) -> usize {
        self.required_total().saturating_sub(self.picked_total())
    }

    /// Whether the split was met; under strict composition any empty slot counts as a miss.
    pub fn is_satisfied(&self, strict_composition: bool) -> bool {
        self.missing_elders() == 0
            && self.missing_members() == 0
            && !(strict_composition && self.missing_slots() > 0)
    }
}

impl fmt::Display for CompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: picked elders:{} members:{} of {}",
            self.date,
            self.service,
            self.category.name(),
            self.picked_elders,
            self.picked_members,
            self.required
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(required: CompositionPattern, picked: &[&str]) -> CompositionReport {
        let picked: Vec<String> = picked.iter().map(|s| s.to_string()).collect();
        CompositionReport::from_picks(
            NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            Service::First,
            RoleCategory::UsherCollector,
            required,
            &picked,
            |n| n.starts_with('E'),
        )
    }

    #[test]
    fn test_satisfied() {
        let r = report(CompositionPattern::new(1, 1), &["E1", "M1"]);
        assert_eq!(r.picked_elders, 1);
        assert_eq!(r.picked_members, 1);
        assert!(r.is_satisfied(true));
        assert_eq!(r.missing_slots(), 0);
    }

    #[test]
    fn test_backfilled_by_member() {
        let r = report(CompositionPattern::new(2, 0), &["E1", "M1"]);
        assert_eq!(r.missing_elders(), 1);
        assert_eq!(r.missing_members(), 0);
        assert_eq!(r.missing_slots(), 0);
        assert!(!r.is_satisfied(false));
    }

    #[test]
    fn test_empty_slot() {
        let r = report(CompositionPattern::new(2, 0), &["E1"]);
        assert_eq!(r.missing_elders(), 1);
        assert_eq!(r.missing_slots(), 1);
        assert!(!r.is_satisfied(true));
    }

    #[test]
    fn test_display() {
        let r = report(CompositionPattern::new(1, 2), &["E1"]);
        assert_eq!(
            r.to_string(),
            "2025-08-03 07 usher-collector: picked elders:1 members:0 of elders:1 members:2"
        );
    }
}
