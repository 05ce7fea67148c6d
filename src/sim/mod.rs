//! Particle-physics simulation module.
//!
//! One engine with configurable policy replaces the usual zoo of demo
//! variants: free-floating vs. container-bound particle sets, brute-force
//! vs. tree-accelerated neighbor search, and optional temperature-driven
//! buoyancy are all choices made at construction, not separate code paths.
//!
//! # Architecture
//!
//! - [`params`]: numeric configuration passed to every step
//! - [`error`]: fail-fast configuration errors
//! - [`frame`]: world/local frames and the rotating container
//! - [`particle`]: particle-set state and the publish buffer
//! - [`spatial`]: radius queries (brute force or k-d tree)
//! - [`forces`]: gravity/buoyancy integration and damping
//! - [`boundary`]: ground-plane and container-box confinement
//! - [`collision`]: pairwise positional separation
//! - [`smoothing`]: neighbor-centroid relaxation and density color
//! - [`simulation`]: the per-tick orchestrator
//! - [`plugin`]: Bevy integration
//!
//! Each tick runs index rebuild, integration, boundary resolution,
//! collision, smoothing, and publish, in that order, per set.

pub mod boundary;
pub mod collision;
pub mod error;
pub mod forces;
pub mod frame;
pub mod params;
pub mod particle;
pub mod plugin;
pub mod simulation;
pub mod smoothing;
pub mod spatial;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::boundary::BoundaryPolicy;
    pub use super::error::SimError;
    pub use super::frame::{to_local, to_world, Container, Frame};
    pub use super::params::SimParams;
    pub use super::particle::{grid_positions, ParticleInstance, ParticleSet};
    pub use super::plugin::SimulationPlugin;
    pub use super::simulation::{step, Simulation};
    pub use super::smoothing::density_to_color;
    pub use super::spatial::{SpatialIndex, SpatialStrategy};
}
