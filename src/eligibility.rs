//! Eligibility index.
//!
//! Derives candidate name lists from the roster for a given eligibility
//! key. Every list is sorted and deduplicated so that shuffling it with a
//! seeded generator is reproducible.

use std::collections::BTreeSet;

use crate::models::{normalize_key, Person};

/// Read-only view over the roster for candidate lookup.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityIndex<'a> {
    people: &'a [Person],
}

impl<'a> EligibilityIndex<'a> {
    /// Creates an index over `people`.
    pub fn new(people: &'a [Person]) -> Self {
        Self { people }
    }

    /// Names eligible for `key`, restricted to elders when `require_elder`.
    pub fn candidates(&self, key: &str, require_elder: bool) -> Vec<String> {
        let key = normalize_key(key);
        self.eligible(&key)
            .into_iter()
            .filter(|p| !require_elder || p.is_elder)
            .map(|p| p.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names eligible for `key`, partitioned into (elders, members).
    pub fn candidates_split(&self, key: &str) -> (Vec<String>, Vec<String>) {
        let key = normalize_key(key);
        let mut elders = BTreeSet::new();
        let mut members = BTreeSet::new();
        for person in self.eligible(&key) {
            if person.is_elder {
                elders.insert(person.name.clone());
            } else {
                members.insert(person.name.clone());
            }
        }
        (elders.into_iter().collect(), members.into_iter().collect())
    }

    /// Whether `name` is eligible for `key`.
    pub fn is_eligible(&self, name: &str, key: &str) -> bool {
        self.people
            .iter()
            .any(|p| p.name == name && p.is_eligible(key))
    }

    /// Whether any roster row carries a column for `key`.
    pub fn knows_key(&self, key: &str) -> bool {
        self.people.iter().any(|p| p.has_key(key))
    }

    fn eligible(&self, normalized: &str) -> Vec<&'a Person> {
        self.people
            .iter()
            .filter(|p| p.marks.get(normalized).copied().unwrap_or(false))
            .collect()
    }
}
