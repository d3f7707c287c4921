//! Two-pass slot picker for capped categories and uncategorized rows.

use super::{fill, Admission, Pass, PickContext};

/// Picks up to `limit` names from a shuffled pool.
///
/// Pass A takes free, preferred candidates. Pass B, only when
/// `allow_relax`, fills what is left from free candidates regardless of
/// preference. Shortfalls return fewer names.
pub fn pick_capped(
    pool: &[String],
    limit: usize,
    ctx: &mut PickContext<'_>,
    allow_relax: bool,
) -> Vec<String> {
    let mut picked = Vec::with_capacity(limit);
    fill(pool, limit, &mut picked, ctx, Admission::Preferred, Pass::Prefer);
    if allow_relax && picked.len() < limit {
        let want = limit - picked.len();
        fill(pool, want, &mut picked, ctx, Admission::Free, Pass::Relax);
    }
    picked
}
