//! VTT Game - game sessions, session logs and recurring schedules for a
//! virtual tabletop.
//!
//! The crate is laid out in layers: `domain` holds the aggregates and their
//! rules, `ports` the storage and messaging seams, `application` the command
//! and query handlers plus the schedule materializer, and `adapters` the
//! in-memory and file-backed implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
