//! Services and role mappings.
//!
//! Each date has two fixed services. A role mapping ties a role label to
//! the eligibility key that defines its candidate pool, the services it
//! applies to, and optional per-service slot counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed services held on every scheduled date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
    /// Early service ("07").
    First,
    /// Main service ("10").
    Second,
}

impl Service {
    /// Services in processing order.
    pub const ALL: [Service; 2] = [Service::First, Service::Second];

    /// Short label used in mapping sheets.
    pub fn label(&self) -> &'static str {
        match self {
            Service::First => "07",
            Service::Second => "10",
        }
    }

    /// Marker text that opens this service's section in a schedule template.
    pub fn section_marker(&self) -> &'static str {
        match self {
            Service::First => "07.00",
            Service::Second => "10.00",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which services a role mapping applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceScope {
    FirstOnly,
    SecondOnly,
    #[default]
    Both,
}

impl ServiceScope {
    /// Parses a mapping-sheet service cell.
    ///
    /// `07` → first only, `10` → second only, anything else → both.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "07" => ServiceScope::FirstOnly,
            "10" => ServiceScope::SecondOnly,
            _ => ServiceScope::Both,
        }
    }

    /// Whether the scope covers `service`.
    pub fn includes(&self, service: Service) -> bool {
        matches!(
            (self, service),
            (ServiceScope::Both, _)
                | (ServiceScope::FirstOnly, Service::First)
                | (ServiceScope::SecondOnly, Service::Second)
        )
    }
}

/// A role row from the mapping sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    /// Role label as it appears in the schedule.
    pub role: String,
    /// Roster column whose marks define the candidate pool.
    pub eligibility_key: String,
    /// Services this row applies to.
    pub scope: ServiceScope,
    /// Explicit slot count for the first service.
    pub first_slots: Option<usize>,
    /// Explicit slot count for the second service.
    pub second_slots: Option<usize>,
}

impl RoleMapping {
    /// Creates a mapping for both services with no slot overrides.
    pub fn new(role: impl Into<String>, eligibility_key: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            eligibility_key: eligibility_key.into(),
            scope: ServiceScope::Both,
            first_slots: None,
            second_slots: None,
        }
    }

    /// Sets the service scope.
    pub fn with_scope(mut self, scope: ServiceScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets an explicit slot count for one service. Zero clears the override.
    pub fn with_slots(mut self, service: Service, slots: usize) -> Self {
        let value = (slots > 0).then_some(slots);
        match service {
            Service::First => self.first_slots = value,
            Service::Second => self.second_slots = value,
        }
        self
    }

    /// Explicit slot count for `service`, if any.
    pub fn slots_for(&self, service: Service) -> Option<usize> {
        match service {
            Service::First => self.first_slots,
            Service::Second => self.second_slots,
        }
    }

    /// Whether this row applies to `service`.
    #[inline]
    pub fn applies_to(&self, service: Service) -> bool {
        self.scope.includes(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!(ServiceScope::parse("07"), ServiceScope::FirstOnly);
        assert_eq!(ServiceScope::parse(" 10 "), ServiceScope::SecondOnly);
        assert_eq!(ServiceScope::parse("both"), ServiceScope::Both);
        assert_eq!(ServiceScope::parse(""), ServiceScope::Both);
        assert_eq!(ServiceScope::parse("7"), ServiceScope::Both);
    }

    #[test]
    fn test_scope_includes() {
        assert!(ServiceScope::Both.includes(Service::First));
        assert!(ServiceScope::Both.includes(Service::Second));
        assert!(ServiceScope::FirstOnly.includes(Service::First));
        assert!(!ServiceScope::FirstOnly.includes(Service::Second));
        assert!(!ServiceScope::SecondOnly.includes(Service::First));
    }

    #[test]
    fn test_mapping_slots() {
        let m = RoleMapping::new("Majelis Pendamping", "Penatua")
            .with_scope(ServiceScope::SecondOnly)
            .with_slots(Service::Second, 2)
            .with_slots(Service::First, 0);

        assert_eq!(m.slots_for(Service::Second), Some(2));
        assert_eq!(m.slots_for(Service::First), None);
        assert!(m.applies_to(Service::Second));
        assert!(!m.applies_to(Service::First));
    }

    #[test]
    fn test_service_order_and_labels() {
        assert_eq!(Service::ALL, [Service::First, Service::Second]);
        assert!(Service::First < Service::Second);
        assert_eq!(Service::Second.to_string(), "10");
        assert_eq!(Service::First.section_marker(), "07.00");
    }
}
