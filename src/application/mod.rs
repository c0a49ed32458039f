//! Application layer: one command handler per operation.

pub mod handlers;
