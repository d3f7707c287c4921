//! Roster input and schedule output.
//!
//! - **`roster`**: people and role-mapping sheets from CSV
//! - **`sink`**: [`ScheduleSink`] capability and the CSV [`GridSink`]

mod roster;
mod sink;

pub use roster::{load_mappings, load_people, read_mappings, read_people};
pub use sink::{write_assignment, GridSink, ScheduleSink, DATE_HEADER};
