//! Controller adapters - Implementations of the LightController port.

mod loopback;

pub use loopback::LoopbackLightController;
