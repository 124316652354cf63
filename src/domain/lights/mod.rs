//! Lights module - Device, group, scene and schedule registries plus the
//! state-change notifications that flow through the broadcast stream.

mod records;
mod registry;
mod transitions;
mod update;

pub use records::{Group, Light, LightColor, Scene, Schedule};
pub use registry::{Registries, Registry, RegistryRecord, RegistrySnapshot};
pub use update::{LightEnvelope, LightUpdate};
