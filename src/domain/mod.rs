//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, status, errors, events)
//! - `game_session` - Game session aggregate: participants, chat and event log
//! - `schedule` - Schedules, recurrence rules and occurrence enumeration

pub mod foundation;
pub mod game_session;
pub mod schedule;
