//! Durable local store adapters.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
