//! Input validation for roster data.
//!
//! Checks the roster and mapping snapshots before scheduling. Detects:
//! - Empty roster or mapping list
//! - Duplicate person names
//! - Mapping rows whose eligibility key matches no roster column
//!
//! Every problem is collected; callers decide which ones abort the run
//! via [`ValidationError::is_fatal`].

use std::collections::HashSet;

use crate::eligibility::EligibilityIndex;
use crate::models::{Person, RoleMapping};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No people in the roster.
    EmptyRoster,
    /// No role mapping rows.
    EmptyMappings,
    /// Two roster rows share a name.
    DuplicateName,
    /// A mapping's eligibility key is not a roster column.
    UnknownEligibilityKey,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this error must abort the run.
    ///
    /// An unknown eligibility key only yields an empty candidate pool.
    pub fn is_fatal(&self) -> bool {
        self.kind != ValidationErrorKind::UnknownEligibilityKey
    }
}

/// Validates the roster and mapping snapshots.
///
/// Checks:
/// 1. At least one person
/// 2. At least one mapping row
/// 3. No duplicate person names
/// 4. Every mapping key is a column of at least one roster row
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(people: &[Person], mappings: &[RoleMapping]) -> ValidationResult {
    let mut errors = Vec::new();

    if people.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no people",
        ));
    }
    if mappings.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyMappings,
            "Role mapping has no rows",
        ));
    }

    let mut names = HashSet::new();
    for p in people {
        if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate person name: {}", p.name),
            ));
        }
    }

    if !people.is_empty() {
        let index = EligibilityIndex::new(people);
        for m in mappings {
            if !index.knows_key(&m.eligibility_key) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownEligibilityKey,
                    format!(
                        "Role '{}' references unknown roster column '{}'",
                        m.role, m.eligibility_key
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
