//! # Rename Unit Components
//!
//! Organises the rename unit tests by concern.



/// Random operation sequences checked against the register partition invariant.
pub mod properties;


/// Register state: maps, values, readiness, and destination allocation.
pub mod rename;
