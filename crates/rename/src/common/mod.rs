//! Common types shared by the rename components.
//!
//! This module provides:
//! 1. **Identifiers:** Newtypes for logical registers, physical registers, and branch tags.
//! 2. **Errors:** Configuration errors raised at construction time.

/// Configuration and invariant error types.
pub mod error;

/// Register and branch identifier newtypes.
pub mod reg;

pub use error::{ConfigError, InvariantViolation};
pub use reg::{BranchId, LogReg, PhysReg};
