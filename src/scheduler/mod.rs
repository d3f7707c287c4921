//! Phased duty scheduler and composition reports.
//!
//! # Algorithm
//!
//! `DutyScheduler` walks dates in input order and, per service, runs the
//! escort, composition, capped, and other-role phases. It is greedy and
//! deterministic given its random generator: no global optimization and
//! no backtracking across dates.
//!
//! # Reports
//!
//! `CompositionReport` records, per composition category and service, how
//! many elders and members were required and picked.

mod driver;
mod report;

pub use driver::{DutyScheduler, ScheduleRequest, ScheduleResult};
pub use report::CompositionReport;
