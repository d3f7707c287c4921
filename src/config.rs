//! Scheduler configuration.
//!
//! [`SchedulerConfig`] is the immutable value handed to the driver: slot
//! caps, composition patterns, and the two strictness toggles. An optional
//! TOML file ([`ConfigFile`]) can override the defaults; command-line flags
//! are applied on top by the binary.
//!
//! ```toml
//! [limits]
//! readers = 3
//!
//! [composition]
//! usher = "2b"
//! duty_member = "3a"
//! strict = true
//!
//! [fairness]
//! strict = false
//!
//! [run]
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::classify::RoleCategory;
use crate::error::Result;
use crate::models::CompositionPattern;

/// Default per-service cap for readers, cantors, and musicians.
pub const DEFAULT_CAP: usize = 2;
/// Upper bound for the reader cap.
pub const MAX_READERS: usize = 4;
/// Upper bound for the cantor cap.
pub const MAX_CANTORS: usize = 3;
/// Upper bound for the musician cap.
pub const MAX_MUSICIANS: usize = 3;
/// Default usher-collector pattern.
pub const DEFAULT_USHER_PATTERN: &str = "2b";
/// Default duty-member pattern.
pub const DEFAULT_DUTY_MEMBER_PATTERN: &str = "3a";

/// Immutable engine configuration.
///
/// # Example
///
/// ```
/// use u_roster::config::SchedulerConfig;
/// use u_roster::models::CompositionPattern;
///
/// let config = SchedulerConfig::default()
///     .with_max_readers(9)
///     .with_usher_pattern(CompositionPattern::new(1, 1))
///     .with_strict_composition(true);
/// assert_eq!(config.max_readers, 4); // clamped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Readers per service (1..=4).
    pub max_readers: usize,
    /// Cantors per service (1..=3).
    pub max_cantors: usize,
    /// Musicians per service (1..=3).
    pub max_musicians: usize,
    /// Elder/member split for usher-collectors.
    pub usher_pattern: CompositionPattern,
    /// Elder/member split for duty members.
    pub duty_member_pattern: CompositionPattern,
    /// Leave unmet composition quotas empty instead of backfilling.
    pub strict_composition: bool,
    /// Never relax the back-to-back preference (escort backfill excepted).
    pub strict_fairness: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_readers: DEFAULT_CAP,
            max_cantors: DEFAULT_CAP,
            max_musicians: DEFAULT_CAP,
            usher_pattern: CompositionPattern::new(2, 0),
            duty_member_pattern: CompositionPattern::new(1, 2),
            strict_composition: false,
            strict_fairness: false,
        }
    }
}

impl SchedulerConfig {
    pub fn with_max_readers(mut self, n: usize) -> Self {
        self.max_readers = n.clamp(1, MAX_READERS);
        self
    }

    pub fn with_max_cantors(mut self, n: usize) -> Self {
        self.max_cantors = n.clamp(1, MAX_CANTORS);
        self
    }

    pub fn with_max_musicians(mut self, n: usize) -> Self {
        self.max_musicians = n.clamp(1, MAX_MUSICIANS);
        self
    }

    pub fn with_usher_pattern(mut self, pattern: CompositionPattern) -> Self {
        self.usher_pattern = pattern;
        self
    }

    pub fn with_duty_member_pattern(mut self, pattern: CompositionPattern) -> Self {
        self.duty_member_pattern = pattern;
        self
    }

    pub fn with_strict_composition(mut self, strict: bool) -> Self {
        self.strict_composition = strict;
        self
    }

    pub fn with_strict_fairness(mut self, strict: bool) -> Self {
        self.strict_fairness = strict;
        self
    }

    /// Per-service cap for a capped category.
    pub fn cap_for(&self, category: RoleCategory) -> Option<usize> {
        match category {
            RoleCategory::Reader => Some(self.max_readers),
            RoleCategory::Cantor => Some(self.max_cantors),
            RoleCategory::Musician => Some(self.max_musicians),
            _ => None,
        }
    }

    /// Pattern for a composition category.
    pub fn pattern_for(&self, category: RoleCategory) -> Option<CompositionPattern> {
        match category {
            RoleCategory::UsherCollector => Some(self.usher_pattern),
            RoleCategory::DutyMember => Some(self.duty_member_pattern),
            _ => None,
        }
    }

    /// Whether prefer-relaxing passes may run.
    #[inline]
    pub fn allow_relax(&self) -> bool {
        !self.strict_fairness
    }
}

/// Optional TOML configuration file. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub limits: LimitsSection,
    pub composition: CompositionSection,
    pub fairness: FairnessSection,
    pub run: RunSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsSection {
    pub readers: Option<usize>,
    pub cantors: Option<usize>,
    pub musicians: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionSection {
    pub usher: Option<String>,
    pub duty_member: Option<String>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FairnessSection {
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    pub seed: Option<u64>,
    pub header_rows: Option<usize>,
}

impl ConfigFile {
    /// Loads a config file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a config file from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies the file's values on top of `base`.
    ///
    /// Pattern strings are parsed here; an unknown code is a pattern error.
    pub fn apply_to(&self, base: SchedulerConfig) -> Result<SchedulerConfig> {
        let mut config = base;
        if let Some(n) = self.limits.readers {
            config = config.with_max_readers(n);
        }
        if let Some(n) = self.limits.cantors {
            config = config.with_max_cantors(n);
        }
        if let Some(n) = self.limits.musicians {
            config = config.with_max_musicians(n);
        }
        if let Some(code) = &self.composition.usher {
            config = config.with_usher_pattern(CompositionPattern::parse(code)?);
        }
        if let Some(code) = &self.composition.duty_member {
            config = config.with_duty_member_pattern(CompositionPattern::parse(code)?);
        }
        if let Some(strict) = self.composition.strict {
            config = config.with_strict_composition(strict);
        }
        if let Some(strict) = self.fairness.strict {
            config = config.with_strict_fairness(strict);
        }
        Ok(config)
    }
}
