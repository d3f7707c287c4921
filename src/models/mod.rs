//! Duty roster domain models.
//!
//! Provides the data types consumed and produced by the assignment engine.
//!
//! # Domain Mappings
//!
//! | u-roster | Meaning |
//! |----------|---------|
//! | Person | Roster entry with elder flag and eligibility marks |
//! | RoleMapping | Role label → eligibility key, service scope, slot overrides |
//! | Service | One of the two fixed services on a date |
//! | Assignment | date → service → role → names |
//! | CompositionPattern | Elder/member split for a composition category |

mod assignment;
mod pattern;
mod person;
mod role;

pub use assignment::{Assignment, RoleSlots};
pub use pattern::CompositionPattern;
pub use person::{is_marked, normalize_key, Person};
pub use role::{RoleMapping, Service, ServiceScope};
