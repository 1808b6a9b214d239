//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain operations over the ports. The schedule
//! materializer drives session generation in the background.

pub mod handlers;
pub mod schedule_materializer;

pub use schedule_materializer::{
    ScheduleMaterializer, ScheduleMaterializerConfig, SCHEDULER_SOURCE,
};
