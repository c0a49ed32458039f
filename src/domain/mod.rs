//! Domain layer: pure business logic with no I/O.

pub mod catalog;
pub mod credits;
pub mod foundation;
pub mod order;
pub mod payment;
