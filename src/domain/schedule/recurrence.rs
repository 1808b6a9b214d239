//! Recurrence rules and occurrence enumeration.
//!
//! Occurrence `n` is always computed from the schedule start as
//! `start + n * step`, so month-end clamping never drifts: a schedule
//! starting on Jan 31 lands on Feb 28, then Mar 31.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        write!(f, "{}", s)
    }
}

fn default_interval() -> u32 {
    1
}

/// How a schedule repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Step multiplier, e.g. 2 with `Weekly` means every other week.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Total number of occurrences, including the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Last instant an occurrence may fall on (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<Timestamp>,
}

impl Recurrence {
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval,
            count: None,
            until: None,
        }
    }

    pub fn once() -> Self {
        Self::new(Frequency::Once, 1)
    }

    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly, 1)
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_until(mut self, until: Timestamp) -> Self {
        self.until = Some(until);
        self
    }

    /// Validation messages for this rule relative to `start`. Empty when valid.
    pub fn validate(&self, start: &Timestamp) -> Vec<String> {
        let mut errors = Vec::new();
        if self.interval < 1 {
            errors.push("Recurrence interval must be at least 1".to_string());
        }
        if self.count == Some(0) {
            errors.push("Recurrence count must be at least 1".to_string());
        }
        if let Some(until) = &self.until {
            if !until.is_after(start) {
                errors.push("Invalid recurrence: Until must be after Start".to_string());
            }
        }
        errors
    }

    /// Whether enumeration terminates without an external horizon.
    pub fn is_bounded(&self) -> bool {
        self.frequency == Frequency::Once || self.count.is_some() || self.until.is_some()
    }

    /// The `n`-th occurrence, ignoring `count` and `until`.
    ///
    /// Returns `None` on arithmetic overflow.
    pub fn nth_from(&self, start: Timestamp, n: u32) -> Option<Timestamp> {
        if n == 0 {
            return Some(start);
        }
        let steps = n.checked_mul(self.interval.max(1))?;
        match self.frequency {
            Frequency::Once => None,
            Frequency::Daily => start.add_days(i64::from(steps)),
            Frequency::Weekly => start.add_days(i64::from(steps) * 7),
            Frequency::Monthly => start.add_months(steps),
            Frequency::Yearly => start.add_years(steps),
        }
    }

    /// All occurrences from `start`, honoring `count` and `until`.
    ///
    /// Unbounded rules yield an endless iterator; callers cap it.
    pub fn occurrences(&self, start: Timestamp) -> Occurrences {
        Occurrences {
            recurrence: self.clone(),
            start,
            index: 0,
            done: false,
        }
    }

    /// Occurrences on or after `from`, skipping ahead without walking every step.
    pub fn occurrences_from(&self, start: Timestamp, from: Timestamp) -> Occurrences {
        let mut iter = self.occurrences(start);
        iter.index = self.lower_bound_index(start, from);
        iter
    }

    /// An index whose occurrence is not after `at`.
    fn lower_bound_index(&self, start: Timestamp, at: Timestamp) -> u32 {
        if !at.is_after(&start) {
            return 0;
        }
        let interval = i64::from(self.interval.max(1));
        let estimate = match self.frequency {
            Frequency::Once => 0,
            Frequency::Daily => at.duration_since(&start).num_days() / interval,
            Frequency::Weekly => at.duration_since(&start).num_weeks() / interval,
            Frequency::Monthly => months_between(&start, &at) / interval - 1,
            Frequency::Yearly => months_between(&start, &at) / 12 / interval - 1,
        };
        u32::try_from(estimate.max(0)).unwrap_or(u32::MAX)
    }
}

fn months_between(from: &Timestamp, to: &Timestamp) -> i64 {
    let (a, b) = (from.as_datetime(), to.as_datetime());
    (i64::from(b.year()) - i64::from(a.year())) * 12 + i64::from(b.month())
        - i64::from(a.month())
}

/// Iterator over the occurrences of a recurrence.
#[derive(Debug, Clone)]
pub struct Occurrences {
    recurrence: Recurrence,
    start: Timestamp,
    index: u32,
    done: bool,
}

impl Iterator for Occurrences {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Timestamp> {
        if self.done {
            return None;
        }
        if self.recurrence.count.is_some_and(|count| self.index >= count) {
            self.done = true;
            return None;
        }
        let Some(occurrence) = self.recurrence.nth_from(self.start, self.index) else {
            self.done = true;
            return None;
        };
        if self.recurrence.until.is_some_and(|until| occurrence.is_after(&until)) {
            self.done = true;
            return None;
        }
        self.index = self.index.saturating_add(1);
        Some(occurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn once_yields_only_start() {
        let start = at("2025-03-01T19:00:00Z");
        let all: Vec<_> = Recurrence::once().occurrences(start).collect();
        assert_eq!(all, vec![start]);
    }

    #[test]
    fn count_includes_first_occurrence() {
        let start = at("2025-03-01T19:00:00Z");
        let all: Vec<_> = Recurrence::weekly().with_count(3).occurrences(start).collect();
        assert_eq!(
            all,
            vec![start, at("2025-03-08T19:00:00Z"), at("2025-03-15T19:00:00Z")]
        );
    }

    #[test]
    fn until_is_inclusive() {
        let start = at("2025-03-01T19:00:00Z");
        let rule = Recurrence::new(Frequency::Daily, 2).with_until(at("2025-03-05T19:00:00Z"));
        let all: Vec<_> = rule.occurrences(start).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], at("2025-03-05T19:00:00Z"));
    }

    #[test]
    fn huge_interval_stops_after_first_occurrence() {
        let start = at("2025-03-01T19:00:00Z");
        for freq in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly, Frequency::Yearly] {
            let rule = Recurrence::new(freq, 100_000_000);
            let all: Vec<_> = rule.occurrences(start).collect();
            assert_eq!(all, vec![start], "{freq:?}");

            let later = at("2025-03-02T19:00:00Z");
            assert_eq!(rule.occurrences_from(start, later).find(|t| !t.is_before(&later)), None);
        }
    }

    #[test]
    fn monthly_does_not_drift_after_short_month() {
        let start = at("2025-01-31T18:00:00Z");
        let dates: Vec<_> = Recurrence::new(Frequency::Monthly, 1)
            .with_count(3)
            .occurrences(start)
            .map(|t| t.date())
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn yearly_from_leap_day_clamps() {
        let start = at("2024-02-29T18:00:00Z");
        let next = Recurrence::new(Frequency::Yearly, 1).nth_from(start, 1).unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        let fourth = Recurrence::new(Frequency::Yearly, 1).nth_from(start, 4).unwrap();
        assert_eq!(fourth.date(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn validate_collects_every_problem() {
        let start = at("2025-03-01T19:00:00Z");
        let rule = Recurrence {
            frequency: Frequency::Weekly,
            interval: 0,
            count: Some(0),
            until: Some(start),
        };
        assert_eq!(rule.validate(&start).len(), 3);
    }

    #[test]
    fn boundedness() {
        assert!(Recurrence::once().is_bounded());
        assert!(Recurrence::weekly().with_count(4).is_bounded());
        assert!(!Recurrence::weekly().is_bounded());
    }

    #[test]
    fn interval_defaults_to_one_when_missing() {
        let rule: Recurrence = serde_yaml::from_str("frequency: daily\n").unwrap();
        assert_eq!(rule.interval, 1);
    }

    proptest! {
        #[test]
        fn skipping_ahead_never_misses_an_occurrence(
            freq in prop_oneof![
                Just(Frequency::Daily),
                Just(Frequency::Weekly),
                Just(Frequency::Monthly),
                Just(Frequency::Yearly),
            ],
            interval in 1u32..4,
            offset_days in 0i64..2000,
        ) {
            let start = at("2024-01-31T20:00:00Z");
            let from = start.add_days(offset_days).unwrap();
            let rule = Recurrence::new(freq, interval);

            let walked = rule.occurrences(start).find(|t| !t.is_before(&from));
            let skipped = rule.occurrences_from(start, from).find(|t| !t.is_before(&from));

            prop_assert_eq!(walked, skipped);
        }

        #[test]
        fn occurrences_are_strictly_increasing(
            interval in 1u32..6,
            count in 1u32..40,
        ) {
            let start = at("2025-01-31T20:00:00Z");
            let all: Vec<_> = Recurrence::new(Frequency::Monthly, interval)
                .with_count(count)
                .occurrences(start)
                .collect();
            prop_assert_eq!(all.len(), count as usize);
            for pair in all.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
