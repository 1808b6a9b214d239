//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus; subscribers run in the publishing task

mod in_memory;

pub use in_memory::InMemoryEventBus;
