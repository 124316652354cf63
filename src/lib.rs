//! Lightboard - Multi-client live lighting dashboard
//!
//! Every connected viewer gets its own committed view and a worker that keeps
//! it in sync with the shared light registries through a broadcast stream.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
