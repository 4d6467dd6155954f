//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus for testing

mod in_memory;

pub use in_memory::InMemoryEventBus;
