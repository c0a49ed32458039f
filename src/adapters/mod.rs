//! Adapters - implementations of the ports for concrete collaborators.

pub mod memory;
pub mod stripe;
