//! Composition picker.
//!
//! Fills an elder quota and a member quota for one composition category,
//! never placing more names than the category has rows.
//!
//! # Algorithm
//!
//! Each step only works on the still-unmet part of each quota, and every
//! step stops once `min(quota.total(), slots)` names are picked:
//!
//! 1. **Prefer**: elders, then members, free and preferred.
//! 2. **Fallback**: re-scan the free remainder of each pool, still preferred.
//! 3. **Relax**: same scan ignoring preference (skipped under strict fairness).
//! 4. **Any**: merge the free remainder of both pools, reshuffle, and fill the
//!    unmet total regardless of elder/member type or preference (skipped
//!    under strict composition).
//!
//! The per-type quotas are not rebalanced against `slots`: with one row and
//! a `(1, 2)` quota, a preferred member still takes the row when no elder
//! is free.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{fill, Admission, Pass, PickContext};
use crate::config::SchedulerConfig;
use crate::models::CompositionPattern;

/// Picks up to `slots` names for a composition category from shuffled
/// elder/member pools, in pick order.
pub fn pick_composition<R: Rng + ?Sized>(
    elders: &[String],
    members: &[String],
    quota: CompositionPattern,
    slots: usize,
    ctx: &mut PickContext<'_>,
    config: &SchedulerConfig,
    rng: &mut R,
) -> Vec<String> {
    let mut out = Picks::new(quota.total().min(slots));
    let mut need_elders = quota.elders;
    let mut need_members = quota.members;

    out.take(elders, &mut need_elders, ctx, Admission::Preferred, Pass::Prefer);
    out.take(members, &mut need_members, ctx, Admission::Preferred, Pass::Prefer);

    let rest = remaining(elders, ctx);
    out.take(&rest, &mut need_elders, ctx, Admission::Preferred, Pass::Fallback);
    let rest = remaining(members, ctx);
    out.take(&rest, &mut need_members, ctx, Admission::Preferred, Pass::Fallback);

    if config.allow_relax() {
        let rest = remaining(elders, ctx);
        out.take(&rest, &mut need_elders, ctx, Admission::Free, Pass::Relax);
        let rest = remaining(members, ctx);
        out.take(&rest, &mut need_members, ctx, Admission::Free, Pass::Relax);
    }

    if !config.strict_composition && out.unmet() > 0 {
        let mut merged = remaining(elders, ctx);
        merged.extend(remaining(members, ctx));
        merged.shuffle(rng);
        let mut any = out.unmet();
        out.take(&merged, &mut any, ctx, Admission::Free, Pass::RelaxAny);
    }

    if need_elders > 0 || need_members > 0 {
        tracing::debug!(
            need_elders,
            need_members,
            picked = out.picked.len(),
            total = out.total,
            "composition quota not met by type"
        );
    }
    out.picked
}

/// Picks so far, bounded by the category's slot total.
struct Picks {
    total: usize,
    picked: Vec<String>,
}

impl Picks {
    fn new(total: usize) -> Self {
        Self {
            total,
            picked: Vec::with_capacity(total),
        }
    }

    fn unmet(&self) -> usize {
        self.total.saturating_sub(self.picked.len())
    }

    /// One pass for one quota type; never exceeds `total`.
    fn take(
        &mut self,
        pool: &[String],
        need: &mut usize,
        ctx: &mut PickContext<'_>,
        rule: Admission,
        pass: Pass,
    ) {
        let want = (*need).min(self.unmet());
        if want > 0 {
            *need -= fill(pool, want, &mut self.picked, ctx, rule, pass);
        }
    }
}

/// Pool entries still free in this service and today.
fn remaining(pool: &[String], ctx: &PickContext<'_>) -> Vec<String> {
    pool.iter().filter(|n| ctx.is_free(n)).cloned().collect()
}
