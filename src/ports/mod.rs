//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `GameSessionRepository` - Versioned game session persistence
//! - `ScheduleRepository` - Schedule persistence
//!
//! ## Lookup Ports
//!
//! - `ContentCatalog` - Scene and encounter existence
//! - `UserDirectory` - User existence
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events

mod content_catalog;
mod event_publisher;
mod event_subscriber;
mod game_session_repository;
mod schedule_repository;

pub use content_catalog::{ContentCatalog, UserDirectory};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use game_session_repository::GameSessionRepository;
pub use schedule_repository::ScheduleRepository;
