//! Escort picker.
//!
//! The escort is an elder serving the second service. When the preferred
//! pass cannot meet the quota, an unconditional backfill may take an elder
//! who already serves in the first service that day. This is the only way
//! a person holds roles in both services of one date; the current service
//! is never doubled.

use super::{fill, Admission, Pass, PickContext};

/// Picks up to `quota` escorts from a shuffled elder-only pool.
pub fn pick_escort(pool: &[String], quota: usize, ctx: &mut PickContext<'_>) -> Vec<String> {
    let mut picked = Vec::with_capacity(quota);
    fill(pool, quota, &mut picked, ctx, Admission::Preferred, Pass::Prefer);
    if picked.len() < quota {
        let want = quota - picked.len();
        fill(pool, want, &mut picked, ctx, Admission::OtherService, Pass::EscortRelax);
    }
    picked
}
