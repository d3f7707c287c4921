//! Composition pattern codes.
//!
//! A code `<count><letter>` selects an (elders, members) split for a
//! composition role category. The enumeration is fixed:
//!
//! | Count | Codes |
//! |-------|-------|
//! | 1 | `1a`=(1,0) `1b`=(0,1) |
//! | 2 | `2a`=(1,1) `2b`=(2,0) `2c`=(0,2) |
//! | 3 | `3a`=(1,2) `3b`=(2,1) `3c`=(3,0) `3d`=(0,3) |
//! | 4 | `4a`=(1,3) `4b`=(2,2) `4c`=(3,1) `4d`=(4,0) `4e`=(0,4) |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RosterError};

/// Elder/member split for a composition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionPattern {
    /// Required elders.
    pub elders: usize,
    /// Required members.
    pub members: usize,
}

impl CompositionPattern {
    /// Creates a pattern from explicit counts.
    pub const fn new(elders: usize, members: usize) -> Self {
        Self { elders, members }
    }

    /// Parses a pattern code such as `2b` or ` 4E `.
    pub fn parse(code: &str) -> Result<Self> {
        let normalized = code.trim().to_lowercase();
        if normalized.len() < 2 {
            return Err(RosterError::pattern(code, "code too short"));
        }

        let digits_end = normalized
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(normalized.len());
        let (digits, suffix) = normalized.split_at(digits_end);
        let count: usize = digits
            .parse()
            .map_err(|_| RosterError::pattern(code, "missing leading count"))?;
        if !(1..=4).contains(&count) {
            return Err(RosterError::pattern(
                code,
                format!("count {count} outside 1..4"),
            ));
        }

        let (elders, members) = match (count, suffix) {
            (1, "a") => (1, 0),
            (1, "b") => (0, 1),
            (2, "a") => (1, 1),
            (2, "b") => (2, 0),
            (2, "c") => (0, 2),
            (3, "a") => (1, 2),
            (3, "b") => (2, 1),
            (3, "c") => (3, 0),
            (3, "d") => (0, 3),
            (4, "a") => (1, 3),
            (4, "b") => (2, 2),
            (4, "c") => (3, 1),
            (4, "d") => (4, 0),
            (4, "e") => (0, 4),
            _ => return Err(RosterError::pattern(code, "unknown variant")),
        };
        Ok(Self::new(elders, members))
    }

    /// Total people required.
    #[inline]
    pub fn total(&self) -> usize {
        self.elders + self.members
    }

    /// The split as reported against `rows` slots, elders first.
    pub fn clamp_to(&self, rows: usize) -> Self {
        let elders = self.elders.min(rows);
        let members = self.members.min(rows - elders);
        Self::new(elders, members)
    }
}

impl FromStr for CompositionPattern {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CompositionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elders:{} members:{}", self.elders, self.members)
    }
}
