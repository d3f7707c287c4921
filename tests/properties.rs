//! Invariants of the scheduler over varied rosters, seeds, and flags.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_roster::models::{CompositionPattern, Person, RoleMapping, Service, ServiceScope};
use u_roster::{DutyScheduler, ScheduleResult, SchedulerConfig};

const ESCORT: &str = "Majelis Pendamping";

fn dates(count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|i| {
            NaiveDate::from_ymd_opt(2025, 8, 3).unwrap() + chrono::Duration::days(7 * i as i64)
        })
        .collect()
}

fn roster(elders: usize, members: usize, readers: usize) -> Vec<Person> {
    let mut people = Vec::new();
    for i in 0..elders {
        people.push(
            Person::elder(format!("E{i}")).eligible_for(&["Kolektan", "P. Jemaat", "Majelis"]),
        );
    }
    for i in 0..members {
        let person = Person::new(format!("M{i}")).eligible_for(&["Kolektan", "P. Jemaat"]);
        let person = if i < readers {
            person.with_mark("Lektor", true)
        } else {
            person.with_mark("Lektor", false)
        };
        people.push(person);
    }
    people
}

fn mappings(escort_slots: usize) -> Vec<RoleMapping> {
    vec![
        RoleMapping::new(ESCORT, "Majelis")
            .with_scope(ServiceScope::SecondOnly)
            .with_slots(Service::Second, escort_slots),
        RoleMapping::new("Kolektan 1", "Kolektan"),
        RoleMapping::new("Kolektan 2", "Kolektan"),
        RoleMapping::new("P. Jemaat 1", "P. Jemaat"),
        RoleMapping::new("P. Jemaat 2", "P. Jemaat"),
        RoleMapping::new("P. Jemaat 3", "P. Jemaat"),
        RoleMapping::new("Lektor 1", "Lektor"),
        RoleMapping::new("Lektor 2", "Lektor"),
    ]
}

fn run(
    people: &[Person],
    maps: &[RoleMapping],
    config: SchedulerConfig,
    days: &[NaiveDate],
    seed: u64,
) -> ScheduleResult {
    let mut rng = StdRng::seed_from_u64(seed);
    DutyScheduler::new(config).schedule(people, maps, days, &mut rng)
}

fn config_strategy() -> impl Strategy<Value = SchedulerConfig> {
    (any::<bool>(), any::<bool>(), 1usize..=4).prop_map(
        |(strict_composition, strict_fairness, readers)| {
            SchedulerConfig::default()
                .with_strict_composition(strict_composition)
                .with_strict_fairness(strict_fairness)
                .with_max_readers(readers)
        },
    )
}

proptest! {
    #[test]
    fn property_assignment_invariants(
        elders in 0usize..6,
        members in 0usize..10,
        readers in 0usize..5,
        escort_slots in 1usize..3,
        day_count in 1usize..5,
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        let people = roster(elders, members, readers);
        let maps = mappings(escort_slots);
        let days = dates(day_count);
        let result = run(&people, &maps, config, &days, seed);
        let a = &result.assignment;

        let by_name: HashMap<&str, &Person> =
            people.iter().map(|p| (p.name.as_str(), p)).collect();
        let keys: HashMap<&str, &str> = maps
            .iter()
            .map(|m| (m.role.as_str(), m.eligibility_key.as_str()))
            .collect();

        for &date in &days {
            for service in Service::ALL {
                // Nobody twice in one service.
                let names = a.names_in_service(date, service);
                let unique: HashSet<&str> = names.iter().copied().collect();
                prop_assert_eq!(names.len(), unique.len(), "{} {}", date, service);

                for (role, assigned) in a.roles(date, service).unwrap() {
                    // Every name is eligible for its row.
                    for name in assigned {
                        let person = by_name[name.as_str()];
                        prop_assert!(
                            person.is_eligible(keys[role.as_str()]),
                            "{} not eligible for {}",
                            name,
                            role
                        );
                        if role == ESCORT {
                            prop_assert!(person.is_elder);
                        }
                    }
                    if role == ESCORT {
                        prop_assert!(assigned.len() <= escort_slots);
                    } else {
                        prop_assert!(assigned.len() <= 1);
                    }
                }
            }

            // Only escorts may serve in both services of a date.
            let first: HashSet<&str> =
                a.names_in_service(date, Service::First).into_iter().collect();
            let escorts: HashSet<&str> = a
                .get(date, Service::Second, ESCORT)
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect();
            for name in a.names_in_service(date, Service::Second) {
                if first.contains(name) {
                    prop_assert!(escorts.contains(name), "{} serves twice on {}", name, date);
                }
            }
        }

        // Readers never exceed the cap.
        for &date in &days {
            for service in Service::ALL {
                let readers_picked = ["Lektor 1", "Lektor 2"]
                    .iter()
                    .filter(|r| a.get(date, service, r).is_some_and(|n| !n.is_empty()))
                    .count();
                prop_assert!(readers_picked <= config.max_readers);
            }
        }
    }

    #[test]
    fn property_same_seed_same_schedule(seed in any::<u64>(), config in config_strategy()) {
        let people = roster(5, 9, 4);
        let maps = mappings(1);
        let days = dates(4);

        let a = run(&people, &maps, config, &days, seed);
        let b = run(&people, &maps, config, &days, seed);
        prop_assert_eq!(&a.assignment, &b.assignment);
        prop_assert_eq!(
            serde_json::to_string(&a.assignment).unwrap(),
            serde_json::to_string(&b.assignment).unwrap()
        );
        prop_assert_eq!(a.reports, b.reports);
    }

    #[test]
    fn property_strict_fairness_never_repeats(seed in any::<u64>()) {
        let people = roster(8, 16, 8);
        let maps = mappings(1);
        let days = dates(4);
        let config = SchedulerConfig::default()
            .with_strict_fairness(true)
            .with_strict_composition(true);
        let result = run(&people, &maps, config, &days, seed);

        // Escorts may be relaxed and the any-type backfill is off; everyone
        // else skips a date after serving.
        for pair in days.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let served_prev: HashSet<&str> = Service::ALL
                .iter()
                .flat_map(|&s| result.assignment.names_in_service(prev, s))
                .collect();
            for service in Service::ALL {
                for (role, names) in result.assignment.roles(cur, service).unwrap() {
                    if role == ESCORT {
                        continue;
                    }
                    for name in names {
                        prop_assert!(
                            !served_prev.contains(name.as_str()),
                            "{} repeats on {}",
                            name,
                            cur
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_strict_composition_leaves_slot_empty() {
    let people = roster(1, 6, 0);
    let maps = mappings(1);
    let days = dates(1);
    let config = SchedulerConfig::default()
        .with_usher_pattern(CompositionPattern::new(2, 0))
        .with_strict_composition(true);
    let result = run(&people, &maps, config, &days, 1);

    let picked: usize = ["Kolektan 1", "Kolektan 2"]
        .iter()
        .map(|r| result.assignment.get(days[0], Service::First, r).unwrap().len())
        .sum();
    assert_eq!(picked, 1);

    let report = result
        .reports
        .iter()
        .find(|r| r.service == Service::First && r.picked_total() > 0 && r.required.elders == 2)
        .unwrap();
    assert_eq!(report.missing_elders(), 1);
    assert!(!report.is_satisfied(true));
}

#[test]
fn test_relaxed_composition_backfills_with_members() {
    let people = roster(1, 6, 0);
    let maps = mappings(1);
    let days = dates(1);
    let config = SchedulerConfig::default().with_usher_pattern(CompositionPattern::new(2, 0));
    let result = run(&people, &maps, config, &days, 1);

    let names: Vec<&String> = ["Kolektan 1", "Kolektan 2"]
        .iter()
        .flat_map(|r| result.assignment.get(days[0], Service::First, r).unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with('M')));
}

#[test]
fn test_escort_relaxes_into_first_service_elders() {
    // Two elders, both needed as ushers in the first service.
    let people = roster(2, 6, 0);
    let maps = mappings(2);
    let days = dates(1);
    let result = run(&people, &maps, SchedulerConfig::default(), &days, 4);

    let escorts = result.assignment.get(days[0], Service::Second, ESCORT).unwrap();
    assert_eq!(escorts.len(), 2);
    let first = result.assignment.names_in_service(days[0], Service::First);
    assert!(escorts.iter().all(|e| first.contains(&e.as_str())));
}
