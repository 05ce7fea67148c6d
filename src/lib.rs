//! Spume - interactive real-time particle simulation for Bevy
//!
//! This library simulates bounded sets of point particles under gravity,
//! buoyancy, inter-particle collision, and local density smoothing, inside
//! containers that can themselves be arbitrarily rotated.
//!
//! # Features
//!
//! - **Two frames**: free-floating world sets bounce off a ground plane;
//!   container-bound sets live in the local frame of a rotating box
//! - **Two neighbor-search strategies**: brute-force scan or a balanced
//!   k-d tree behind one query interface
//! - **Buoyancy**: optional per-particle temperatures make hot particles
//!   rise and cold ones sink
//! - **Watery smoothing**: neighbor-centroid relaxation for cohesive,
//!   fluid-like motion, with a density color gradient for presentation
//! - **Host-agnostic core**: `step()` is a plain synchronous function; the
//!   Bevy plugin is one convenient driver for it
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use spume::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SimulationPlugin::with_params(SimParams::convection()))
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut simulation: ResMut<Simulation>, mut container: ResMut<Container>) {
//!     container.half_extent = 25.0;
//!
//!     // A container-bound set on a regular grid, warm at the bottom.
//!     let positions = grid_positions(Vec3::ZERO, Vec3::splat(20.0), 4.0);
//!     let set = ParticleSet::new(positions.len(), Frame::Local, |i| positions[i])
//!         .expect("particle set")
//!         .with_temperatures(|i| if positions[i].y < 0.0 { 80.0 } else { 20.0 });
//!     simulation.add_set(set);
//! }
//! ```
//!
//! Rendering and input are deliberately outside the crate: read particle
//! state (or the packed [`ParticleInstance`](sim::particle::ParticleInstance)
//! buffer) after each tick, and write
//! [`Container::orientation`](sim::frame::Container) between ticks to rotate
//! the box under the particles.

pub mod sim;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::sim::prelude::*;
}
