//! Content catalog and user directory adapters.

mod in_memory;

pub use in_memory::{InMemoryContentCatalog, InMemoryUserDirectory};
