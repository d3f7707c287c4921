//! Phased duty scheduler.
//!
//! # Algorithm
//!
//! Dates are processed in input order; each date runs the first service,
//! then the second. Within a service the phases run strictly in order and
//! every pick is visible to later phases:
//!
//! 1. **Escort** (second service only): elder-only pool, quota = override or 1,
//!    preferred pass then the cross-service backfill.
//! 2. **Composition**: usher-collectors, then duty members. Elder and member
//!    pools are the union over the category's rows; at most one pick per row,
//!    mapped onto rows in row order.
//! 3. **Capped**: readers, cantors, musicians. Limit = configured cap clamped
//!    to the row count; one name per row.
//! 4. **Other**: each remaining row independently, slot count = override,
//!    else the capped stem's cap, else 1.
//!
//! Shortfalls leave slots short or empty; nothing is retried across phases
//! or dates.
//!
//! # Complexity
//! O(d * r * p) where d=dates, r=mapping rows, p=people.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

use super::CompositionReport;
use crate::classify::{RoleCategory, RoleGroups};
use crate::config::SchedulerConfig;
use crate::eligibility::EligibilityIndex;
use crate::fairness::FairnessTracker;
use crate::models::{Assignment, Person, RoleMapping, Service};
use crate::picker::{pick_capped, pick_composition, pick_escort, PickContext, WorkingSets};

/// Input container for a scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    /// Roster snapshot.
    pub people: Vec<Person>,
    /// Role mapping rows.
    pub mappings: Vec<RoleMapping>,
    /// Dates to schedule, in processing order.
    pub dates: Vec<NaiveDate>,
}

impl ScheduleRequest {
    /// Creates a request.
    pub fn new(people: Vec<Person>, mappings: Vec<RoleMapping>, dates: Vec<NaiveDate>) -> Self {
        Self {
            people,
            mappings,
            dates,
        }
    }
}

/// Output of a scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleResult {
    /// The filled assignment.
    pub assignment: Assignment,
    /// One report per composition category per service.
    pub reports: Vec<CompositionReport>,
}

/// Deterministic phased scheduler.
///
/// All randomness comes from the generator passed to [`DutyScheduler::schedule`];
/// the same seed, roster, mappings, and dates give the same assignment.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_roster::config::SchedulerConfig;
/// use u_roster::models::{Person, RoleMapping, Service};
/// use u_roster::scheduler::DutyScheduler;
///
/// let people = vec![
///     Person::new("Ani").eligible_for(&["Lektor"]),
///     Person::new("Budi").eligible_for(&["Lektor"]),
/// ];
/// let mappings = vec![RoleMapping::new("Lektor 1", "Lektor")];
/// let date = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
///
/// let scheduler = DutyScheduler::new(SchedulerConfig::default());
/// let mut rng = StdRng::seed_from_u64(1);
/// let result = scheduler.schedule(&people, &mappings, &[date], &mut rng);
///
/// let first = result.assignment.get(date, Service::First, "Lektor 1").unwrap();
/// let second = result.assignment.get(date, Service::Second, "Lektor 1").unwrap();
/// assert_eq!(first.len(), 1);
/// assert_eq!(second.len(), 1);
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DutyScheduler {
    config: SchedulerConfig,
}

impl DutyScheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Schedules every date.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        people: &[Person],
        mappings: &[RoleMapping],
        dates: &[NaiveDate],
        rng: &mut R,
    ) -> ScheduleResult {
        let mut run = Run {
            config: self.config,
            index: EligibilityIndex::new(people),
            groups: RoleGroups::new(mappings),
            elders: people
                .iter()
                .filter(|p| p.is_elder)
                .map(|p| p.name.as_str())
                .collect(),
            rng,
            sets: WorkingSets::new(),
            fairness: FairnessTracker::new(),
            result: ScheduleResult::default(),
        };

        let mut previous = None;
        for &date in dates {
            run.schedule_date(date, previous);
            previous = Some(date);
        }

        tracing::debug!(
            dates = dates.len(),
            filled = run.result.assignment.assignment_count(),
            slots = run.result.assignment.slot_count(),
            "schedule complete"
        );
        run.result
    }

    /// Schedules from a request.
    pub fn schedule_request<R: Rng + ?Sized>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
    ) -> ScheduleResult {
        self.schedule(&request.people, &request.mappings, &request.dates, rng)
    }
}

/// State owned by one run.
struct Run<'a, R: ?Sized> {
    config: SchedulerConfig,
    index: EligibilityIndex<'a>,
    groups: RoleGroups<'a>,
    elders: HashSet<&'a str>,
    rng: &'a mut R,
    sets: WorkingSets,
    fairness: FairnessTracker,
    result: ScheduleResult,
}

impl<R: Rng + ?Sized> Run<'_, R> {
    fn schedule_date(&mut self, date: NaiveDate, previous: Option<NaiveDate>) {
        let span = tracing::debug_span!("date", %date);
        let _enter = span.enter();

        self.fairness.begin_date(previous);
        self.sets.reset_day();
        for service in Service::ALL {
            let span = tracing::debug_span!("service", %service);
            let _enter = span.enter();

            self.sets.reset_service();
            self.result.assignment.ensure_service(date, service);
            if service == Service::Second {
                self.escort_phase(date);
            }
            self.composition_phase(date, service);
            self.capped_phase(date, service);
            self.other_phase(date, service);
        }
    }

    fn escort_phase(&mut self, date: NaiveDate) {
        let service = Service::Second;
        for row in self.groups.rows(RoleCategory::Escort, service) {
            let quota = row.slots_for(service).unwrap_or(1);
            let mut pool = self.index.candidates(&row.eligibility_key, true);
            pool.shuffle(&mut *self.rng);

            let mut ctx = PickContext::new(&mut self.sets, &mut self.fairness, date);
            let picked = pick_escort(&pool, quota, &mut ctx);
            tracing::debug!(role = %row.role, quota, picked = picked.len(), "escort");
            self.result
                .assignment
                .set(date, service, row.role.clone(), picked);
        }
    }

    fn composition_phase(&mut self, date: NaiveDate, service: Service) {
        for category in RoleCategory::COMPOSITION {
            let rows = self.groups.rows(category, service);
            let Some(pattern) = self.config.pattern_for(category) else {
                continue;
            };
            if rows.is_empty() {
                continue;
            }
            let slots = rows.len();

            let mut elder_pool = BTreeSet::new();
            let mut member_pool = BTreeSet::new();
            for row in &rows {
                let (elders, members) = self.index.candidates_split(&row.eligibility_key);
                elder_pool.extend(elders);
                member_pool.extend(members);
            }
            let mut elders: Vec<String> = elder_pool.into_iter().collect();
            let mut members: Vec<String> = member_pool.into_iter().collect();
            elders.shuffle(&mut *self.rng);
            members.shuffle(&mut *self.rng);
            tracing::debug!(
                category = category.name(),
                elders = elders.len(),
                members = members.len(),
                need_elders = pattern.elders,
                need_members = pattern.members,
                slots,
                "composition pool"
            );

            let mut ctx = PickContext::new(&mut self.sets, &mut self.fairness, date);
            let picked = pick_composition(
                &elders,
                &members,
                pattern,
                slots,
                &mut ctx,
                &self.config,
                &mut *self.rng,
            );

            let elder_names = &self.elders;
            let report = CompositionReport::from_picks(
                date,
                service,
                category,
                pattern.clamp_to(slots),
                &picked,
                |n| elder_names.contains(n),
            );
            if report.is_satisfied(self.config.strict_composition) {
                tracing::info!(%report, "composition OK");
            } else {
                tracing::info!(
                    %report,
                    missing_elders = report.missing_elders(),
                    missing_members = report.missing_members(),
                    missing_slots = report.missing_slots(),
                    "composition SHORT"
                );
            }
            self.result.reports.push(report);

            self.write_rows(date, service, &rows, picked);
        }
    }

    fn capped_phase(&mut self, date: NaiveDate, service: Service) {
        for category in RoleCategory::CAPPED {
            let rows = self.groups.rows(category, service);
            if rows.is_empty() {
                continue;
            }
            let limit = self.config.cap_for(category).unwrap_or(1).min(rows.len());

            let mut pool = self.shared_pool(&rows);
            pool.shuffle(&mut *self.rng);
            tracing::debug!(
                category = category.name(),
                rows = rows.len(),
                limit,
                pool = pool.len(),
                "capped group"
            );

            let mut ctx = PickContext::new(&mut self.sets, &mut self.fairness, date);
            let picked = pick_capped(&pool, limit, &mut ctx, self.config.allow_relax());
            self.write_rows(date, service, &rows, picked);
        }
    }

    fn other_phase(&mut self, date: NaiveDate, service: Service) {
        for row in self.groups.rows(RoleCategory::Other, service) {
            let slots = row
                .slots_for(service)
                .unwrap_or_else(|| self.default_slots(&row.role));
            let mut pool = self.index.candidates(&row.eligibility_key, false);
            pool.shuffle(&mut *self.rng);

            let mut ctx = PickContext::new(&mut self.sets, &mut self.fairness, date);
            let picked = pick_capped(&pool, slots, &mut ctx, self.config.allow_relax());
            tracing::debug!(role = %row.role, slots, picked = picked.len(), "role");
            self.result
                .assignment
                .set(date, service, row.role.clone(), picked);
        }
    }

    /// Names eligible for every row of a capped category.
    fn shared_pool(&self, rows: &[&RoleMapping]) -> Vec<String> {
        let Some((first, rest)) = rows.split_first() else {
            return Vec::new();
        };
        let mut pool = self.index.candidates(&first.eligibility_key, false);
        pool.retain(|name| {
            rest.iter()
                .all(|row| self.index.is_eligible(name, &row.eligibility_key))
        });
        pool
    }

    fn default_slots(&self, role: &str) -> usize {
        RoleCategory::capped_stem_in(role)
            .and_then(|category| self.config.cap_for(category))
            .unwrap_or(1)
    }

    /// One name per row in row order; rows past the picks stay empty.
    fn write_rows(
        &mut self,
        date: NaiveDate,
        service: Service,
        rows: &[&RoleMapping],
        picked: Vec<String>,
    ) {
        let mut picked = picked.into_iter();
        for row in rows {
            let names: Vec<String> = picked.next().into_iter().collect();
            self.result
                .assignment
                .set(date, service, row.role.clone(), names);
        }
    }
}
