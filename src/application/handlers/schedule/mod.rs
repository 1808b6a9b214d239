//! Schedule command and query handlers.

mod create_schedule;
mod delete_schedule;
mod generate_sessions;
mod list_upcoming_schedules;
mod support;
mod update_schedule;

pub use create_schedule::{CreateScheduleCommand, CreateScheduleHandler};
pub use delete_schedule::{DeleteScheduleCommand, DeleteScheduleHandler};
pub use generate_sessions::{
    GenerateSessionsCommand, GenerateSessionsHandler, GenerateSessionsResult,
    MAX_GENERATED_OCCURRENCES,
};
pub use list_upcoming_schedules::{ListUpcomingSchedulesHandler, ListUpcomingSchedulesQuery};
pub use update_schedule::{UpdateScheduleCommand, UpdateScheduleHandler};
