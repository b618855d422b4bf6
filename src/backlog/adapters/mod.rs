//! Adapter implementations for the backlog store port.

pub mod filesystem;
pub mod memory;
