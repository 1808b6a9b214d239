//! Schedule domain module.
//!
//! Recurring or one-off calendar definitions and the occurrence engine that
//! drives session generation.

mod aggregate;
mod errors;
mod events;
mod recurrence;

pub use aggregate::{NewSchedule, Schedule, ScheduleChanges};
pub use errors::ScheduleError;
pub use events::{ScheduleCreated, ScheduleDeleted, ScheduleUpdated, SessionsGenerated};
pub use recurrence::{Frequency, Occurrences, Recurrence};
