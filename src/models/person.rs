//! Person model.
//!
//! A person is a roster entry: a unique name, an elder flag, and a set of
//! eligibility marks keyed by normalized column header. People are built
//! once from the roster and never mutated during a run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A roster entry that can be assigned to duty roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique display name.
    pub name: String,
    /// Whether this person belongs to the elder subpopulation.
    pub is_elder: bool,
    /// Normalized eligibility key → mark.
    pub marks: HashMap<String, bool>,
}

impl Person {
    /// Creates a member (non-elder) with no marks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_elder: false,
            marks: HashMap::new(),
        }
    }

    /// Creates an elder with no marks.
    pub fn elder(name: impl Into<String>) -> Self {
        Self::new(name).with_elder(true)
    }

    /// Sets the elder flag.
    pub fn with_elder(mut self, is_elder: bool) -> Self {
        self.is_elder = is_elder;
        self
    }

    /// Sets an eligibility mark. The key is normalized.
    pub fn with_mark(mut self, key: &str, eligible: bool) -> Self {
        self.marks.insert(normalize_key(key), eligible);
        self
    }

    /// Marks this person eligible for every given key.
    pub fn eligible_for(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self.marks.insert(normalize_key(key), true);
        }
        self
    }

    /// Whether the mark for `key` is present and true.
    pub fn is_eligible(&self, key: &str) -> bool {
        self.marks.get(&normalize_key(key)).copied().unwrap_or(false)
    }

    /// Whether this person's roster row carried a column for `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.marks.contains_key(&normalize_key(key))
    }
}

/// Normalizes an eligibility key or header: trimmed, lowercase.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Interprets a roster cell as an eligibility mark.
///
/// Accepts `x`, `1`, `true`, `ya` (case-insensitive, surrounding whitespace ignored).
pub fn is_marked(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "x" | "1" | "true" | "ya"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_builder() {
        let p = Person::elder("Andreas")
            .with_mark(" Lektor ", true)
            .with_mark("Pemusik", false);

        assert_eq!(p.name, "Andreas");
        assert!(p.is_elder);
        assert!(p.is_eligible("lektor"));
        assert!(p.is_eligible("LEKTOR"));
        assert!(!p.is_eligible("pemusik"));
        assert!(p.has_key("pemusik"));
        assert!(!p.is_eligible("kolektan"));
        assert!(!p.has_key("kolektan"));
    }

    #[test]
    fn test_eligible_for() {
        let p = Person::new("Budi").eligible_for(&["Kolektan", "P. Jemaat"]);
        assert!(!p.is_elder);
        assert!(p.is_eligible("kolektan"));
        assert!(p.is_eligible("p. jemaat"));
    }

    #[test]
    fn test_is_marked() {
        for v in ["x", "X", " 1 ", "true", "TRUE", "Ya"] {
            assert!(is_marked(v), "{v:?} should be marked");
        }
        for v in ["", "0", "no", "false", "y", "-"] {
            assert!(!is_marked(v), "{v:?} should not be marked");
        }
    }
}
