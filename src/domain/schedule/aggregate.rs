//! Schedule aggregate.
//!
//! A schedule is a one-off or recurring calendar definition that the
//! materializer turns into `Scheduled` game sessions. Deleting a schedule
//! never touches the sessions it produced.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CalendarEventId, OwnedByUser, ScheduleId, Timestamp, UserId};
use crate::domain::game_session::{count_masters, Participant, MAX_TITLE_LENGTH};

use super::{Occurrences, Recurrence, ScheduleError};

/// Input for creating a schedule.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub owner_id: UserId,
    pub title: String,
    pub calendar_event_id: Option<CalendarEventId>,
    pub start: Timestamp,
    pub duration_minutes: u32,
    pub recurrence: Option<Recurrence>,
    pub participants: Vec<Participant>,
}

/// Partial update. `None` leaves a field unchanged; `recurrence: Some(None)`
/// clears the recurrence.
#[derive(Debug, Clone, Default)]
pub struct ScheduleChanges {
    pub title: Option<String>,
    pub start: Option<Timestamp>,
    pub duration_minutes: Option<u32>,
    pub recurrence: Option<Option<Recurrence>>,
    pub participants: Option<Vec<Participant>>,
}

impl ScheduleChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.duration_minutes.is_none()
            && self.recurrence.is_none()
            && self.participants.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    id: ScheduleId,
    owner_id: UserId,
    title: String,
    calendar_event_id: Option<CalendarEventId>,
    start: Timestamp,
    duration_minutes: u32,
    recurrence: Option<Recurrence>,
    participants: Vec<Participant>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Schedule {
    /// Validates every rule and reports all failures together.
    pub fn create(id: ScheduleId, new: NewSchedule, now: Timestamp) -> Result<Self, ScheduleError> {
        let title = new.title.trim().to_string();
        let mut errors = Vec::new();
        errors.extend(validate_title(&title));
        if !new.start.is_after(&now) {
            errors.push("Start date must be in the future".to_string());
        }
        errors.extend(validate_shape(
            &new.owner_id,
            &new.start,
            new.duration_minutes,
            new.recurrence.as_ref(),
            &new.participants,
        ));
        if !errors.is_empty() {
            return Err(ScheduleError::Invalid(errors));
        }

        Ok(Self {
            id,
            owner_id: new.owner_id,
            title,
            calendar_event_id: new.calendar_event_id,
            start: new.start,
            duration_minutes: new.duration_minutes,
            recurrence: new.recurrence,
            participants: new.participants,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn calendar_event_id(&self) -> Option<CalendarEventId> {
        self.calendar_event_id
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update, validating the resulting schedule as a whole.
    ///
    /// A new start must lie in the future; an unchanged start may already be
    /// in the past. Returns `false` when nothing changed.
    pub fn apply(&mut self, changes: ScheduleChanges, now: Timestamp) -> Result<bool, ScheduleError> {
        let mut candidate = self.clone();
        let mut errors = Vec::new();

        if let Some(title) = changes.title {
            candidate.title = title.trim().to_string();
            errors.extend(validate_title(&candidate.title));
        }
        if let Some(start) = changes.start {
            if start != self.start && !start.is_after(&now) {
                errors.push("Start date must be in the future".to_string());
            }
            candidate.start = start;
        }
        if let Some(duration) = changes.duration_minutes {
            candidate.duration_minutes = duration;
        }
        if let Some(recurrence) = changes.recurrence {
            candidate.recurrence = recurrence;
        }
        if let Some(participants) = changes.participants {
            candidate.participants = participants;
        }

        errors.extend(validate_shape(
            &candidate.owner_id,
            &candidate.start,
            candidate.duration_minutes,
            candidate.recurrence.as_ref(),
            &candidate.participants,
        ));
        if !errors.is_empty() {
            return Err(ScheduleError::Invalid(errors));
        }

        if candidate == *self {
            return Ok(false);
        }
        candidate.updated_at = now;
        *self = candidate;
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Occurrences
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether enumeration ends without an external horizon.
    pub fn is_bounded(&self) -> bool {
        self.recurrence.as_ref().map_or(true, Recurrence::is_bounded)
    }

    fn rule(&self) -> Recurrence {
        self.recurrence.clone().unwrap_or_else(Recurrence::once)
    }

    /// All occurrences, starting with `start`.
    pub fn occurrences(&self) -> Occurrences {
        self.rule().occurrences(self.start)
    }

    /// Occurrences on or after `from`.
    pub fn occurrences_from(&self, from: Timestamp) -> impl Iterator<Item = Timestamp> {
        self.rule()
            .occurrences_from(self.start, from)
            .skip_while(move |t| t.is_before(&from))
    }

    /// Whether the start or any occurrence falls in `[from, to]`, both inclusive.
    pub fn has_occurrence_in(&self, from: Timestamp, to: Timestamp) -> bool {
        self.occurrences_from(from)
            .next()
            .is_some_and(|first| !first.is_after(&to))
    }
}

impl OwnedByUser for Schedule {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

fn validate_title(title: &str) -> Vec<String> {
    if title.is_empty() {
        vec!["Title cannot be empty".to_string()]
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        vec![format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH)]
    } else {
        Vec::new()
    }
}

/// Rules that hold for every stored schedule regardless of the clock.
fn validate_shape(
    owner_id: &UserId,
    start: &Timestamp,
    duration_minutes: u32,
    recurrence: Option<&Recurrence>,
    participants: &[Participant],
) -> Vec<String> {
    let mut errors = Vec::new();
    if duration_minutes == 0 {
        errors.push("Duration must be positive".to_string());
    }
    if let Some(recurrence) = recurrence {
        errors.extend(recurrence.validate(start));
    }
    if !participants.iter().any(|p| &p.user_id == owner_id) {
        errors.push("Owner must be included in participants".to_string());
    }
    if count_masters(participants) > 1 {
        errors.push("A schedule can only have one participant with the Master role".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game_session::PlayerType;
    use crate::domain::schedule::Frequency;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn now() -> Timestamp {
        at("2025-01-01T00:00:00Z")
    }

    fn new_schedule(recurrence: Option<Recurrence>) -> NewSchedule {
        NewSchedule {
            owner_id: user("gm"),
            title: "Friday Game Night".to_string(),
            calendar_event_id: None,
            start: at("2025-01-03T19:00:00Z"),
            duration_minutes: 240,
            recurrence,
            participants: vec![
                Participant::master(user("gm")),
                Participant::new(user("p1"), PlayerType::Player),
            ],
        }
    }

    #[test]
    fn create_accepts_valid_schedule() {
        let schedule =
            Schedule::create(ScheduleId::new(), new_schedule(Some(Recurrence::weekly())), now())
                .unwrap();
        assert_eq!(schedule.title(), "Friday Game Night");
        assert!(!schedule.is_bounded());
    }

    #[test]
    fn create_collects_all_errors() {
        let mut input = new_schedule(Some(Recurrence {
            frequency: Frequency::Weekly,
            interval: 0,
            count: None,
            until: Some(at("2024-12-01T00:00:00Z")),
        }));
        input.start = at("2024-12-31T00:00:00Z");
        input.duration_minutes = 0;
        input.participants = vec![Participant::new(user("p1"), PlayerType::Player)];

        let err = Schedule::create(ScheduleId::new(), input, now()).unwrap_err();
        let errors = err.errors();

        assert!(errors.contains(&"Start date must be in the future".to_string()));
        assert!(errors.contains(&"Duration must be positive".to_string()));
        assert!(errors.contains(&"Recurrence interval must be at least 1".to_string()));
        assert!(errors.contains(&"Invalid recurrence: Until must be after Start".to_string()));
        assert!(errors.contains(&"Owner must be included in participants".to_string()));
    }

    #[test]
    fn create_rejects_two_masters() {
        let mut input = new_schedule(None);
        input.participants.push(Participant::master(user("co-gm")));
        assert!(Schedule::create(ScheduleId::new(), input, now()).is_err());
    }

    #[test]
    fn apply_allows_past_start_if_unchanged() {
        let mut schedule = Schedule::create(ScheduleId::new(), new_schedule(None), now()).unwrap();
        let later = at("2025-02-01T00:00:00Z");
        let changed = schedule
            .apply(
                ScheduleChanges {
                    title: Some("Saturday Game Night".to_string()),
                    start: Some(schedule.start()),
                    ..Default::default()
                },
                later,
            )
            .unwrap();
        assert!(changed);
        assert_eq!(schedule.title(), "Saturday Game Night");
        assert_eq!(schedule.updated_at(), &later);
    }

    #[test]
    fn apply_rejects_new_past_start_and_leaves_schedule_untouched() {
        let mut schedule = Schedule::create(ScheduleId::new(), new_schedule(None), now()).unwrap();
        let before = schedule.clone();
        let result = schedule.apply(
            ScheduleChanges {
                start: Some(at("2024-06-01T00:00:00Z")),
                ..Default::default()
            },
            now(),
        );
        assert!(result.is_err());
        assert_eq!(schedule, before);
    }

    #[test]
    fn apply_without_changes_reports_noop() {
        let mut schedule = Schedule::create(ScheduleId::new(), new_schedule(None), now()).unwrap();
        assert_eq!(schedule.apply(ScheduleChanges::default(), now()), Ok(false));
    }

    #[test]
    fn one_off_schedule_window_is_inclusive() {
        let schedule = Schedule::create(ScheduleId::new(), new_schedule(None), now()).unwrap();
        let start = schedule.start();
        assert!(schedule.has_occurrence_in(start, start.add_days(1).unwrap()));
        assert!(schedule.has_occurrence_in(start.add_days(-1).unwrap(), start));
        assert!(!schedule.has_occurrence_in(start.plus_minutes(1).unwrap(), start.add_days(30).unwrap()));
    }

    #[test]
    fn weekly_schedule_hits_later_window() {
        let schedule = Schedule::create(
            ScheduleId::new(),
            new_schedule(Some(Recurrence::weekly())),
            now(),
        )
        .unwrap();
        // Fridays: Jan 3, 10, 17 ...
        assert!(schedule.has_occurrence_in(at("2025-01-17T19:00:00Z"), at("2025-01-17T19:00:00Z")));
        assert!(!schedule.has_occurrence_in(at("2025-01-18T00:00:00Z"), at("2025-01-23T23:59:59Z")));
    }

    #[test]
    fn until_bounds_listing() {
        let schedule = Schedule::create(
            ScheduleId::new(),
            new_schedule(Some(Recurrence::weekly().with_until(at("2025-01-10T19:00:00Z")))),
            now(),
        )
        .unwrap();
        assert!(schedule.has_occurrence_in(at("2025-01-10T00:00:00Z"), at("2025-01-11T00:00:00Z")));
        assert!(!schedule.has_occurrence_in(at("2025-01-11T00:00:00Z"), at("2025-03-01T00:00:00Z")));
    }
}
