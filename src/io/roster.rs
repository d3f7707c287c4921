//! Roster and role-mapping loading from CSV.
//!
//! # People sheet
//!
//! Header row required. `Nama` (or `name`) is required, `Penatua` (or
//! `elder`) is optional; every non-empty header becomes an eligibility key
//! whose cell is marked by `x`, `1`, `true`, or `ya`. Rows without a name
//! are skipped.
//!
//! # Mapping sheet
//!
//! `Role` and `Kolom Master` (or `source`) are required; `Service`
//! (`07`, `10`, anything else = both), `Slots07` and `Slots10` are optional.
//! Rows missing a role or key are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, RosterError};
use crate::models::{is_marked, normalize_key, Person, RoleMapping, Service, ServiceScope};

/// Reads the people sheet.
pub fn read_people<R: Read>(reader: R) -> Result<Vec<Person>> {
    let rows = read_rows(reader)?;
    let Some((header, body)) = rows.split_first() else {
        return Err(RosterError::data("people sheet is empty"));
    };
    if body.is_empty() {
        return Err(RosterError::data("people sheet has no data rows"));
    }

    let index = header_index(header);
    let name_col = find_header(&index, &["nama", "name"])
        .ok_or_else(|| RosterError::data("people sheet requires a 'Nama' column"))?;
    let elder_col = find_header(&index, &["penatua", "elder"]);

    let mut people = Vec::new();
    for row in body {
        let name = row.get(name_col).map(|s| s.trim()).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let mut person = Person::new(name);
        if let Some(col) = elder_col {
            person.is_elder = row.get(col).is_some_and(|v| is_marked(v));
        }
        for (col, value) in row.iter().enumerate() {
            let Some(key) = header.get(col).map(|h| h.trim()) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            person.marks.insert(normalize_key(key), is_marked(value));
        }
        people.push(person);
    }

    if people.is_empty() {
        return Err(RosterError::data("people sheet has no named rows"));
    }
    tracing::debug!(
        people = people.len(),
        elders = people.iter().filter(|p| p.is_elder).count(),
        "people loaded"
    );
    Ok(people)
}

/// Reads the role-mapping sheet.
pub fn read_mappings<R: Read>(reader: R) -> Result<Vec<RoleMapping>> {
    let rows = read_rows(reader)?;
    let Some((header, body)) = rows.split_first() else {
        return Err(RosterError::data("mapping sheet is empty"));
    };

    let index = header_index(header);
    let (Some(role_col), Some(key_col)) = (
        find_header(&index, &["role"]),
        find_header(&index, &["kolom master", "source"]),
    ) else {
        return Err(RosterError::data(
            "mapping sheet requires 'Role' and 'Kolom Master' columns",
        ));
    };
    let service_col = find_header(&index, &["service"]);
    let first_slots_col = find_header(&index, &["slots07"]);
    let second_slots_col = find_header(&index, &["slots10"]);

    let cell = |row: &[String], col: Option<usize>| -> String {
        col.and_then(|c| row.get(c))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut mappings = Vec::new();
    for row in body {
        let role = cell(row, Some(role_col));
        let key = cell(row, Some(key_col));
        if role.is_empty() || key.is_empty() {
            continue;
        }
        let mapping = RoleMapping::new(role, key)
            .with_scope(ServiceScope::parse(&cell(row, service_col)))
            .with_slots(Service::First, leading_number(&cell(row, first_slots_col)))
            .with_slots(Service::Second, leading_number(&cell(row, second_slots_col)));
        mappings.push(mapping);
    }

    if mappings.is_empty() {
        return Err(RosterError::data("mapping sheet has no usable rows"));
    }
    tracing::debug!(rows = mappings.len(), "role mappings loaded");
    Ok(mappings)
}

/// Loads the people sheet from a CSV file.
pub fn load_people<P: AsRef<Path>>(path: P) -> Result<Vec<Person>> {
    read_people(File::open(path)?)
}

/// Loads the mapping sheet from a CSV file.
pub fn load_mappings<P: AsRef<Path>>(path: P) -> Result<Vec<RoleMapping>> {
    read_mappings(File::open(path)?)
}

/// Reads every CSV record as raw cells; ragged rows are allowed.
pub(crate) fn read_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }
    Ok(rows)
}

fn header_index(header: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (col, name) in header.iter().enumerate() {
        index.entry(normalize_key(name)).or_insert(col);
    }
    index
}

fn find_header(index: &HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| index.get(*n).copied())
}

/// Leading integer of a cell (`"2 orang"` → 2); zero when absent.
fn leading_number(value: &str) -> usize {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
