//! Candidate pickers.
//!
//! Every picker walks an already-shuffled candidate pool and commits names
//! into shared per-day state: the working sets (who already serves in this
//! service / today) and the fairness tracker. A commit is visible to every
//! later pick immediately.
//!
//! # Pickers
//!
//! - [`pick_capped`]: up to `limit` names, preferred first, then relaxed.
//! - [`pick_escort`]: elder escort with the cross-service backfill.
//! - [`pick_composition`]: elder/member quota with four graduated steps.

mod capped;
mod composition;
mod escort;

pub use capped::pick_capped;
pub use composition::pick_composition;
pub use escort::pick_escort;

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::fairness::FairnessTracker;

/// Names already holding a role in the current service / on the current date.
#[derive(Debug, Clone, Default)]
pub struct WorkingSets {
    this_service: HashSet<String>,
    today: HashSet<String>,
}

impl WorkingSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears both sets at the start of a date.
    pub fn reset_day(&mut self) {
        self.this_service.clear();
        self.today.clear();
    }

    /// Clears the per-service set at the start of a service.
    pub fn reset_service(&mut self) {
        self.this_service.clear();
    }

    /// Whether `name` holds a role in the current service.
    pub fn in_service(&self, name: &str) -> bool {
        self.this_service.contains(name)
    }

    /// Whether `name` holds a role in either service today.
    pub fn today(&self, name: &str) -> bool {
        self.today.contains(name)
    }

    fn mark(&mut self, name: &str) {
        self.this_service.insert(name.to_string());
        self.today.insert(name.to_string());
    }
}

/// Mutable state shared by every pick within one service.
#[derive(Debug)]
pub struct PickContext<'s> {
    sets: &'s mut WorkingSets,
    fairness: &'s mut FairnessTracker,
    date: NaiveDate,
}

impl<'s> PickContext<'s> {
    pub fn new(
        sets: &'s mut WorkingSets,
        fairness: &'s mut FairnessTracker,
        date: NaiveDate,
    ) -> Self {
        Self {
            sets,
            fairness,
            date,
        }
    }

    /// The date being scheduled.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether `name` is free in this service and today.
    pub fn is_free(&self, name: &str) -> bool {
        !self.sets.in_service(name) && !self.sets.today(name)
    }

    /// Fairness preference for `name`.
    pub fn prefer(&self, name: &str) -> bool {
        self.fairness.prefer(name)
    }

    fn admits(&self, name: &str, rule: Admission) -> bool {
        match rule {
            Admission::Preferred => self.is_free(name) && self.prefer(name),
            Admission::Free => self.is_free(name),
            Admission::OtherService => !self.sets.in_service(name),
        }
    }

    /// Marks `name` as serving and records the date for fairness.
    fn commit(&mut self, name: &str, pass: Pass) {
        self.sets.mark(name);
        self.fairness.record(name, self.date);
        tracing::trace!(name, pass = pass.name(), "pick");
    }
}

/// Which pass produced a pick (for logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Prefer,
    Fallback,
    Relax,
    RelaxAny,
    EscortRelax,
}

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Pass::Prefer => "prefer",
            Pass::Fallback => "fallback",
            Pass::Relax => "relax",
            Pass::RelaxAny => "relax-any",
            Pass::EscortRelax => "escort-relax",
        }
    }
}

/// Admission rule applied to each candidate in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// Free and preferred.
    Preferred,
    /// Free, preference ignored.
    Free,
    /// Only the current service must be free.
    OtherService,
}

/// Appends up to `want` admitted names from `pool` to `picked`.
///
/// Returns how many names were added.
fn fill(
    pool: &[String],
    want: usize,
    picked: &mut Vec<String>,
    ctx: &mut PickContext<'_>,
    rule: Admission,
    pass: Pass,
) -> usize {
    let mut added = 0;
    for name in pool {
        if added >= want {
            break;
        }
        if !ctx.admits(name, rule) {
            continue;
        }
        ctx.commit(name, pass);
        picked.push(name.clone());
        added += 1;
    }
    added
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_working_sets_reset() {
        let mut sets = WorkingSets::new();
        sets.mark("Ani");
        assert!(sets.in_service("Ani"));
        assert!(sets.today("Ani"));

        sets.reset_service();
        assert!(!sets.in_service("Ani"));
        assert!(sets.today("Ani"));

        sets.reset_day();
        assert!(!sets.today("Ani"));
    }

    #[test]
    fn test_commit_updates_sets_and_fairness() {
        let mut sets = WorkingSets::new();
        let mut fairness = FairnessTracker::new();
        {
            let mut ctx = PickContext::new(&mut sets, &mut fairness, d(3));
            assert!(ctx.is_free("Ani"));
            ctx.commit("Ani", Pass::Prefer);
            assert!(!ctx.is_free("Ani"));
        }
        assert!(sets.in_service("Ani"));
        assert_eq!(fairness.last_assigned("Ani"), Some(d(3)));
    }

    #[test]
    fn test_fill_respects_want_and_rule() {
        let mut sets = WorkingSets::new();
        let mut fairness = FairnessTracker::new();
        fairness.record("Budi", d(3));
        fairness.begin_date(Some(d(3)));

        let mut ctx = PickContext::new(&mut sets, &mut fairness, d(10));
        let pool = names(&["Budi", "Citra", "Dewi"]);
        let mut picked = Vec::new();

        let added = fill(&pool, 1, &mut picked, &mut ctx, Admission::Preferred, Pass::Prefer);
        assert_eq!(added, 1);
        assert_eq!(picked, names(&["Citra"]));

        let added = fill(&pool, 5, &mut picked, &mut ctx, Admission::Free, Pass::Relax);
        assert_eq!(added, 2);
        assert_eq!(picked, names(&["Citra", "Budi", "Dewi"]));
    }
}
