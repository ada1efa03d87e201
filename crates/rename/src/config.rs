//! Configuration for the rename unit.
//!
//! This module defines the construction parameters of a `Renamer`. It provides:
//! 1. **Defaults:** Baseline register-file, checkpoint, and active-list sizes.
//! 2. **Structure:** `RenamerConfig`, deserializable from JSON with per-field defaults.
//! 3. **Validation:** Rejection of parameter combinations that cannot be built.
//!
//! Sizes are fixed for the lifetime of a renamer; there is no resizing at runtime.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the rename unit.
mod defaults {
    /// Default architectural register count (RV64I integer file).
    pub const LOG_REGS: usize = 32;

    /// Default physical register count (64 spare registers for renaming).
    pub const PHYS_REGS: usize = 96;

    /// Default number of branch checkpoints.
    pub const BRANCHES: usize = 16;

    /// Default active list (reorder buffer) capacity.
    pub const ACTIVE_LIST_SIZE: usize = 64;
}

/// Width of the global branch mask; upper bound on `RenamerConfig::branches`.
pub const MAX_BRANCHES: usize = u64::BITS as usize;

/// Rename unit sizing.
///
/// # Examples
///
/// ```
/// use rvsim_rename::config::RenamerConfig;
///
/// let config = RenamerConfig::from_json(r#"{ "phys_regs": 128, "branches": 8 }"#).unwrap();
/// assert_eq!(config.log_regs, 32);
/// assert_eq!(config.phys_regs, 128);
/// assert_eq!(config.branches, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenamerConfig {
    /// Number of architectural registers.
    #[serde(default = "RenamerConfig::default_log_regs")]
    pub log_regs: usize,

    /// Number of physical registers; must exceed `log_regs`.
    #[serde(default = "RenamerConfig::default_phys_regs")]
    pub phys_regs: usize,

    /// Number of branch checkpoints (1 ..= `MAX_BRANCHES`).
    #[serde(default = "RenamerConfig::default_branches")]
    pub branches: usize,

    /// Active list capacity.
    #[serde(default = "RenamerConfig::default_active_list_size")]
    pub active_list_size: usize,
}

impl RenamerConfig {
    fn default_log_regs() -> usize {
        defaults::LOG_REGS
    }

    fn default_phys_regs() -> usize {
        defaults::PHYS_REGS
    }

    fn default_branches() -> usize {
        defaults::BRANCHES
    }

    fn default_active_list_size() -> usize {
        defaults::ACTIVE_LIST_SIZE
    }

    /// Builds a configuration from explicit sizes without validating it.
    pub const fn new(
        log_regs: usize,
        phys_regs: usize,
        branches: usize,
        active_list_size: usize,
    ) -> Self {
        Self {
            log_regs,
            phys_regs,
            branches,
            active_list_size,
        }
    }

    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown fields, or the
    /// matching validation error for out-of-range sizes.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a renamer can be built from these sizes.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_regs == 0 {
            return Err(ConfigError::NoLogicalRegisters);
        }
        if self.phys_regs <= self.log_regs {
            return Err(ConfigError::TooFewPhysicalRegisters {
                logical: self.log_regs,
                physical: self.phys_regs,
            });
        }
        if self.branches == 0 || self.branches > MAX_BRANCHES {
            return Err(ConfigError::BranchSlots {
                requested: self.branches,
                max: MAX_BRANCHES,
            });
        }
        if self.active_list_size == 0 {
            return Err(ConfigError::EmptyActiveList);
        }
        Ok(())
    }

    /// Number of physical registers available for renaming (free list capacity).
    pub const fn spare_regs(&self) -> usize {
        self.phys_regs - self.log_regs
    }
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self::new(
            defaults::LOG_REGS,
            defaults::PHYS_REGS,
            defaults::BRANCHES,
            defaults::ACTIVE_LIST_SIZE,
        )
    }
}
