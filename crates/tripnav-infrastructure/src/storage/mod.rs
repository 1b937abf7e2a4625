//! Storage layer for atomic file operations and preference stores.

mod atomic_toml;
mod memory_preference_store;
mod toml_preference_store;

pub use atomic_toml::AtomicTomlFile;
pub use memory_preference_store::MemoryPreferenceStore;
pub use toml_preference_store::TomlPreferenceStore;
