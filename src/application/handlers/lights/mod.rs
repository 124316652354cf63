//! Light update handlers.

mod publish_update;

pub use publish_update::{PublishLightUpdateHandler, PublishLightUpdateResult};
