//! Role classification.
//!
//! Maps role labels onto the canonical categories the engine schedules in
//! distinct phases. Matching is case-insensitive on the trimmed label:
//!
//! | Category | Rule |
//! |----------|------|
//! | Reader | prefix `lektor` |
//! | Cantor | prefix `prokantor` |
//! | Musician | prefix `pemusik` |
//! | UsherCollector | prefix `kolektan` |
//! | DutyMember | contains `pjemaat` or `p. jemaat` |
//! | Escort | contains both `majel` and `pend` |
//! | Other | anything else |

use std::collections::HashMap;

use crate::models::{RoleMapping, Service};

const READER_PREFIX: &str = "lektor";
const CANTOR_PREFIX: &str = "prokantor";
const MUSICIAN_PREFIX: &str = "pemusik";
const USHER_PREFIX: &str = "kolektan";
const DUTY_MEMBER_MARKERS: [&str; 2] = ["pjemaat", "p. jemaat"];
const ESCORT_MARKERS: [&str; 2] = ["majel", "pend"];

/// Canonical role category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    /// Elder escort, second service only.
    Escort,
    /// Usher-collector composition category.
    UsherCollector,
    /// Duty-member composition category.
    DutyMember,
    /// Capped reader category.
    Reader,
    /// Capped cantor category.
    Cantor,
    /// Capped musician category.
    Musician,
    /// Everything else, scheduled row by row.
    Other,
}

impl RoleCategory {
    /// Composition categories in processing order.
    pub const COMPOSITION: [RoleCategory; 2] =
        [RoleCategory::UsherCollector, RoleCategory::DutyMember];

    /// Capped categories in processing order.
    pub const CAPPED: [RoleCategory; 3] = [
        RoleCategory::Reader,
        RoleCategory::Cantor,
        RoleCategory::Musician,
    ];

    /// Classifies a role label.
    pub fn classify(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.starts_with(READER_PREFIX) {
            RoleCategory::Reader
        } else if lower.starts_with(CANTOR_PREFIX) {
            RoleCategory::Cantor
        } else if lower.starts_with(MUSICIAN_PREFIX) {
            RoleCategory::Musician
        } else if lower.starts_with(USHER_PREFIX) {
            RoleCategory::UsherCollector
        } else if DUTY_MEMBER_MARKERS.iter().any(|m| lower.contains(m)) {
            RoleCategory::DutyMember
        } else if is_escort_label(&lower) {
            RoleCategory::Escort
        } else {
            RoleCategory::Other
        }
    }

    /// Short lowercase name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            RoleCategory::Escort => "escort",
            RoleCategory::UsherCollector => "usher-collector",
            RoleCategory::DutyMember => "duty-member",
            RoleCategory::Reader => "reader",
            RoleCategory::Cantor => "cantor",
            RoleCategory::Musician => "musician",
            RoleCategory::Other => "other",
        }
    }

    /// The capped category whose stem appears anywhere in `label`.
    ///
    /// Used for the slot default of uncategorized rows such as
    /// "Koordinator Lektor".
    pub fn capped_stem_in(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        [
            (READER_PREFIX, RoleCategory::Reader),
            (CANTOR_PREFIX, RoleCategory::Cantor),
            (MUSICIAN_PREFIX, RoleCategory::Musician),
        ]
        .into_iter()
        .find(|(stem, _)| lower.contains(stem))
        .map(|(_, category)| category)
    }
}

/// Whether a label names the escort role (contains both escort markers).
pub fn is_escort_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    ESCORT_MARKERS.iter().all(|m| lower.contains(m))
}

/// Mapping rows grouped by category, in input order.
#[derive(Debug, Clone, Default)]
pub struct RoleGroups<'a> {
    groups: HashMap<RoleCategory, Vec<&'a RoleMapping>>,
}

impl<'a> RoleGroups<'a> {
    /// Classifies every mapping row once.
    pub fn new(mappings: &'a [RoleMapping]) -> Self {
        let mut groups: HashMap<RoleCategory, Vec<&'a RoleMapping>> = HashMap::new();
        for mapping in mappings {
            groups
                .entry(RoleCategory::classify(&mapping.role))
                .or_default()
                .push(mapping);
        }
        Self { groups }
    }

    /// Rows of `category` that apply to `service`, in input order.
    pub fn rows(&self, category: RoleCategory, service: Service) -> Vec<&'a RoleMapping> {
        self.groups
            .get(&category)
            .map(|rows| {
                rows.iter()
                    .copied()
                    .filter(|m| m.applies_to(service))
                    .collect()
            })
            .unwrap_or_default()
    }
}
