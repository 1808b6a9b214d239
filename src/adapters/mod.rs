//! Adapters - Implementations of port interfaces.
//!
//! - `events` - In-process event bus
//! - `storage` - In-memory and YAML-file repositories
//! - `catalog` - Seedable content catalog and user directory

pub mod catalog;
pub mod events;
pub mod storage;

pub use catalog::{InMemoryContentCatalog, InMemoryUserDirectory};
pub use events::InMemoryEventBus;
pub use storage::{
    FileGameSessionRepository, FileScheduleRepository, InMemoryGameSessionRepository,
    InMemoryScheduleRepository,
};
