//! Storage Adapters
//!
//! Implementations of the ConfigStorage port for persisting registries and
//! user preferences.
//!
//! ## Available Adapters
//!
//! - **YamlConfigStorage** - Stores state as a YAML file on disk
//! - **InMemoryConfigStorage** - Stores state in memory (testing/development)

mod in_memory_config_storage;
mod yaml_config_storage;

pub use in_memory_config_storage::InMemoryConfigStorage;
pub use yaml_config_storage::YamlConfigStorage;
