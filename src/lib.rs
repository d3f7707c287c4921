//! Duty-roster assignment for recurring two-service worship dates.
//!
//! Given a roster of people (elders and members) with per-role eligibility
//! marks, a role-mapping table, and a list of dates, fills every role of
//! both services on each date under composition quotas, per-role caps,
//! and a cross-date fairness preference.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Person`, `RoleMapping`, `Service`,
//!   `CompositionPattern`, `Assignment`
//! - **`eligibility`**: Candidate pools per eligibility key
//! - **`fairness`**: Previous-date preference tracking
//! - **`classify`**: Role label → category
//! - **`picker`**: Capped, escort, and composition pickers
//! - **`scheduler`**: Phased per-date driver and composition reports
//! - **`config`**: Scheduler limits and the TOML config file
//! - **`calendar`**: Run dates and header placeholders
//! - **`io`**: CSV roster loading and schedule grid output
//! - **`validation`**: Roster integrity checks
//! - **`logging`**: Console subscriber setup
//!
//! # Guarantees
//!
//! - Nobody holds two roles in the same service.
//! - Nobody is assigned to both services of a date, except escorts
//!   relaxed into the second service.
//! - Every assigned name is eligible for its row.
//! - The same seed and inputs yield the same assignment.

pub mod calendar;
pub mod classify;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod fairness;
pub mod io;
pub mod logging;
pub mod models;
pub mod picker;
pub mod scheduler;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{Result, RosterError};
pub use scheduler::{CompositionReport, DutyScheduler, ScheduleRequest, ScheduleResult};
