//! The per-tick orchestrator.
//!
//! [`step`] runs the full pipeline for one particle set:
//!
//! ```text
//! REBUILD_INDEX -> INTEGRATE -> BOUNDARY -> COLLIDE -> SMOOTH -> PUBLISH
//! ```
//!
//! The whole pipeline is a finite synchronous computation with no I/O and
//! no blocking, so any host scheduler can drive it: a fixed-rate timer, a
//! render callback, or a test calling [`step`] directly. Independent sets
//! have no data dependency on each other within a tick and may be stepped in
//! parallel by a host that keeps each set's arrays private.

use bevy::prelude::*;

use super::collision;
use super::error::{Result, SimError};
use super::forces;
use super::frame::{self, Container, Frame};
use super::params::SimParams;
use super::particle::ParticleSet;
use super::smoothing;
use super::spatial::SpatialIndex;

/// Advances one particle set by one tick, mutating it in place.
///
/// The collision and smoothing passes share the index built at the start of
/// the tick; it is not rebuilt after integration moves particles. That
/// staleness is bounded by one tick of motion and is the same approximation
/// throughout the engine.
///
/// Local-frame sets require `container` (its orientation is read once, here);
/// world-frame sets ignore it. When `step` returns, positions and the
/// publish buffer are fully updated; a reader never observes a partial
/// write.
pub fn step(set: &mut ParticleSet, params: &SimParams, container: Option<&Container>) -> Result<()> {
    params.validate()?;

    let (gravity, half_extent) = match set.frame {
        Frame::World => (params.gravity, 0.0),
        Frame::Local => {
            let container = container.ok_or(SimError::MissingContainer)?;
            (
                frame::to_local(params.gravity, container.orientation),
                container.half_extent,
            )
        }
    };

    if set.positions.is_empty() {
        return Ok(());
    }

    let index = SpatialIndex::build(set.strategy, &set.positions);

    forces::integrate(
        &mut set.positions,
        &mut set.velocities,
        set.temperatures.as_deref(),
        gravity,
        params,
    );
    set.boundary
        .apply(&mut set.positions, &mut set.velocities, half_extent, params);
    collision::resolve(&mut set.positions, &mut set.velocities, &index, params);
    smoothing::smooth(&mut set.positions, &mut set.neighbor_counts, &index, params);
    set.publish();

    Ok(())
}

/// All particle sets driven by the plugin.
///
/// Local-frame sets read the shared [`Container`] resource when stepped.
#[derive(Resource, Default)]
pub struct Simulation {
    /// Registered sets, stepped in order every fixed tick.
    pub sets: Vec<ParticleSet>,
}

impl Simulation {
    /// Registers a set, returning its index for later read-back.
    pub fn add_set(&mut self, set: ParticleSet) -> usize {
        self.sets.push(set);
        self.sets.len() - 1
    }
}
