//! Storage layer: durable key/value stores and atomic file operations.

mod atomic_toml;
mod atomic_write;
mod file_store;
mod memory_store;

pub use atomic_toml::AtomicTomlFile;
pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
