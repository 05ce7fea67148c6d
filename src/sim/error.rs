//! Error types for the simulation engine.

use thiserror::Error;

/// Errors produced by particle-set construction and stepping.
///
/// The engine is a closed numerical core with no I/O, so every error is a
/// configuration or usage error caught before any particle state is touched.
/// Degenerate geometry and empty neighborhoods are valid states, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A numeric parameter failed validation.
    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter {
        /// Field name in [`SimParams`](super::params::SimParams).
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// What the field requires.
        reason: &'static str,
    },

    /// A particle set cannot be constructed with zero particles.
    #[error("particle count must be positive")]
    EmptySet,

    /// A local-frame particle set was stepped without a container.
    #[error("local-frame particle set requires a container")]
    MissingContainer,
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
