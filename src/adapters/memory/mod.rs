//! In-memory adapters for tests and host-application wiring experiments.
//!
//! Not a persistence engine: state lives in process memory and provides the
//! same per-document atomicity the real store contracts promise, nothing
//! more.

mod gateway;
mod store;

pub use gateway::MemoryGateway;
pub use store::MemoryStore;
