//! Schedule output.
//!
//! The engine produces an [`Assignment`]; a [`ScheduleSink`] places it into
//! a labelled grid where column 0 holds role labels and column `1 + i`
//! holds the i-th scheduled date.
//!
//! # Template layout
//!
//! A row whose label contains a service's section marker (`07.00` or
//! `10.00`) opens that service's section; the section runs until the next
//! marker row. Without a marker for a service, the whole grid is searched.
//!
//! # Row lookup
//!
//! 1. Trimmed, case-insensitive exact label match within the section
//! 2. For escort roles only: the first label containing both escort markers

use std::fs::File;
use std::io::{Read, Write};
use std::ops::Range;
use std::path::Path;

use chrono::NaiveDate;

use super::roster::read_rows;
use crate::calendar::render_placeholders;
use crate::classify::is_escort_label;
use crate::error::Result;
use crate::models::{Assignment, RoleMapping, Service};

/// Header placeholder written into generated grids.
pub const DATE_HEADER: &str = "{Day}, {dd} {MMMM} {yyyy}";

/// A destination for schedule cells.
pub trait ScheduleSink {
    /// Row holding `role` within the section of `service`.
    fn find_row_for_label(&self, service: Service, role: &str) -> Option<usize>;

    /// Writes one cell, growing the grid when needed.
    fn write_cell(&mut self, row: usize, col: usize, value: &str);

    /// Writes the names of one role slot into the date's column.
    ///
    /// Names are joined by newlines. Returns `false` when no row matches.
    fn set_role_value(
        &mut self,
        date_index: usize,
        service: Service,
        role: &str,
        names: &[String],
    ) -> bool {
        match self.find_row_for_label(service, role) {
            Some(row) => {
                self.write_cell(row, 1 + date_index, &names.join("\n"));
                true
            }
            None => false,
        }
    }
}

/// Writes every role slot of `assignment` into `sink`.
///
/// `dates` fixes the column order. Returns the number of cells written.
pub fn write_assignment<S: ScheduleSink + ?Sized>(
    assignment: &Assignment,
    dates: &[NaiveDate],
    sink: &mut S,
) -> usize {
    let mut written = 0;
    for (i, &date) in dates.iter().enumerate() {
        for service in Service::ALL {
            let Some(slots) = assignment.roles(date, service) else {
                continue;
            };
            for (role, names) in slots {
                if sink.set_role_value(i, service, role, names) {
                    written += 1;
                } else {
                    tracing::warn!(
                        %date,
                        %service,
                        role = %role,
                        "role not found in schedule grid"
                    );
                }
            }
        }
    }
    written
}

/// An in-memory CSV grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSink {
    rows: Vec<Vec<String>>,
}

impl GridSink {
    /// Wraps raw rows.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Reads a template grid.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_rows(read_rows(reader)?))
    }

    /// Loads a template grid from a CSV file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Generates a grid from the mapping rows.
    ///
    /// One header row with a date placeholder per column, then a section
    /// per service listing its role labels in mapping order.
    pub fn blank(mappings: &[RoleMapping], date_count: usize) -> Self {
        let mut header = vec!["Petugas".to_string()];
        header.extend(std::iter::repeat(DATE_HEADER.to_string()).take(date_count));

        let mut rows = vec![header];
        for service in Service::ALL {
            rows.push(vec![format!("Ibadah {}", service.section_marker())]);
            let mut seen = std::collections::HashSet::new();
            for m in mappings.iter().filter(|m| m.applies_to(service)) {
                if seen.insert(m.role.trim().to_lowercase()) {
                    rows.push(vec![m.role.trim().to_string()]);
                }
            }
        }
        Self { rows }
    }

    /// Raw rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell text, if the cell exists.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Renders date placeholders in the first `header_rows` rows of every
    /// date column. Returns the number of cells changed.
    pub fn fill_headers(&mut self, dates: &[NaiveDate], header_rows: usize) -> usize {
        let mut changed = 0;
        for (i, &date) in dates.iter().enumerate() {
            let col = 1 + i;
            for row in self.rows.iter_mut().take(header_rows) {
                let Some(cell) = row.get_mut(col) else {
                    continue;
                };
                if !cell.contains('{') {
                    continue;
                }
                let rendered = render_placeholders(cell, date);
                if rendered != *cell {
                    *cell = rendered;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Writes the grid as CSV; rows are padded to a common width.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            let mut record = row.clone();
            record.resize(width, String::new());
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Saves the grid to a CSV file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(File::create(path)?)
    }

    fn label(&self, row: usize) -> Option<&str> {
        self.cell(row, 0).map(str::trim)
    }

    fn is_marker_row(&self, row: usize) -> bool {
        self.label(row).is_some_and(|label| {
            Service::ALL
                .iter()
                .any(|s| label.contains(s.section_marker()))
        })
    }

    fn section(&self, service: Service) -> Range<usize> {
        let start = (0..self.rows.len()).find(|&r| {
            self.label(r)
                .is_some_and(|label| label.contains(service.section_marker()))
        });
        match start {
            Some(start) => {
                let end = (start + 1..self.rows.len())
                    .find(|&r| self.is_marker_row(r))
                    .unwrap_or(self.rows.len());
                start + 1..end
            }
            None => 0..self.rows.len(),
        }
    }
}

impl ScheduleSink for GridSink {
    fn find_row_for_label(&self, service: Service, role: &str) -> Option<usize> {
        let target = role.trim().to_lowercase();
        let section = self.section(service);

        let exact = section
            .clone()
            .find(|&r| self.label(r).is_some_and(|l| l.to_lowercase() == target));
        if exact.is_some() {
            return exact;
        }
        if is_escort_label(role) {
            return section.into_iter().find(|&r| self.label(r).is_some_and(is_escort_label));
        }
        None
    }

    fn write_cell(&mut self, row: usize, col: usize, value: &str) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
Petugas,\"{Day}, {dd} {MMM}\",\"{Day}, {dd} {MMM}\"
Ibadah 07.00,,
Lektor 1,,
Kolektan 1,,
Ibadah 10.00,,
LEKTOR 1,,
Majelis Pendamping (MP),,
";

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn template() -> GridSink {
        GridSink::from_reader(TEMPLATE.as_bytes()).unwrap()
    }

    #[test]
    fn test_find_row_by_section() {
        let grid = template();
        assert_eq!(grid.find_row_for_label(Service::First, "lektor 1"), Some(2));
        assert_eq!(grid.find_row_for_label(Service::Second, " Lektor 1 "), Some(5));
        assert_eq!(grid.find_row_for_label(Service::First, "Kolektan 1"), Some(3));
        assert_eq!(grid.find_row_for_label(Service::Second, "Kolektan 1"), None);
    }

    #[test]
    fn test_escort_fuzzy_fallback() {
        let grid = template();
        assert_eq!(
            grid.find_row_for_label(Service::Second, "Majelis Pendamping"),
            Some(6)
        );
        assert_eq!(grid.find_row_for_label(Service::First, "Majelis Pendamping"), None);
        assert_eq!(grid.find_row_for_label(Service::Second, "Majelis"), None);
    }

    #[test]
    fn test_no_markers_searches_whole_grid() {
        let grid = GridSink::from_rows(vec![names(&["Lektor 1"]), names(&["Kolektan 1"])]);
        assert_eq!(grid.find_row_for_label(Service::First, "Kolektan 1"), Some(1));
        assert_eq!(grid.find_row_for_label(Service::Second, "Kolektan 1"), Some(1));
    }

    #[test]
    fn test_set_role_value_joins_names() {
        let mut grid = template();
        assert!(grid.set_role_value(1, Service::Second, "Majelis Pendamping", &names(&["A", "B"])));
        assert_eq!(grid.cell(6, 2), Some("A\nB"));
        assert!(!grid.set_role_value(0, Service::First, "Pemusik", &names(&["C"])));
    }

    #[test]
    fn test_write_cell_grows_grid() {
        let mut grid = GridSink::default();
        grid.write_cell(2, 3, "x");
        assert_eq!(grid.rows().len(), 3);
        assert_eq!(grid.cell(2, 3), Some("x"));
        assert_eq!(grid.cell(2, 0), Some(""));
    }

    #[test]
    fn test_fill_headers() {
        let mut grid = template();
        assert_eq!(grid.fill_headers(&[d(3), d(10)], 30), 2);
        assert_eq!(grid.cell(0, 1), Some("Minggu, 03 Agustus"));
        assert_eq!(grid.cell(0, 2), Some("Minggu, 10 Agustus"));

        let mut limited = template();
        assert_eq!(limited.fill_headers(&[d(3)], 0), 0);
    }

    #[test]
    fn test_blank_grid() {
        let maps = vec![
            RoleMapping::new("Lektor 1", "Lektor"),
            RoleMapping::new("Majelis Pendamping", "Penatua")
                .with_scope(crate::models::ServiceScope::SecondOnly),
            RoleMapping::new("lektor 1 ", "Lektor"),
        ];
        let grid = GridSink::blank(&maps, 2);
        assert_eq!(grid.rows()[0].len(), 3);
        assert_eq!(grid.find_row_for_label(Service::First, "Lektor 1"), Some(2));
        assert_eq!(grid.find_row_for_label(Service::First, "Majelis Pendamping"), None);
        assert_eq!(grid.find_row_for_label(Service::Second, "Lektor 1"), Some(4));
        assert_eq!(grid.find_row_for_label(Service::Second, "Majelis Pendamping"), Some(5));
        assert_eq!(grid.rows().len(), 6);
    }

    #[test]
    fn test_write_assignment_counts_matches() {
        let mut assignment = Assignment::new();
        assignment.set(d(3), Service::First, "Lektor 1", names(&["Rina"]));
        assignment.set(d(3), Service::Second, "Majelis Pendamping", names(&["Yosef", "Paulus"]));
        assignment.set(d(3), Service::Second, "Multimedia", names(&["Budi"]));

        let mut grid = template();
        let written = write_assignment(&assignment, &[d(3)], &mut grid);
        assert_eq!(written, 2);
        assert_eq!(grid.cell(2, 1), Some("Rina"));
        assert_eq!(grid.cell(6, 1), Some("Yosef\nPaulus"));
    }

    #[test]
    fn test_write_to_pads_rows() {
        let grid = GridSink::from_rows(vec![names(&["a", "b"]), names(&["c"])]);
        let mut out = Vec::new();
        grid.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\nc,\n");
    }
}
