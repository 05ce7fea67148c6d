//! Simulation parameters.
//!
//! Every knob the engine reads lives in [`SimParams`]; it is passed
//! explicitly to [`step`](super::simulation::step) on every tick, so there is
//! no process-wide configuration to mutate behind the engine's back.

use bevy::prelude::*;

use super::error::{Result, SimError};

/// Parameters controlling a particle set's per-tick update.
///
/// Velocities are in distance units per tick; there is no explicit timestep.
/// The defaults produce loosely cohesive, watery motion for sets of a few
/// hundred particles in a container roughly 100 units across.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct SimParams {
    /// Gravity acceleration in world space, applied every tick.
    /// Rotated into a container's local frame for container-bound sets.
    pub gravity: Vec3,

    /// Uniform velocity damping applied after integration and on collision,
    /// in (0, 1]. 1.0 disables damping.
    pub friction: f32,

    /// Bounce damping on boundary contact, in [0, 1]. The violating velocity
    /// component is multiplied by `-restitution`, so 0.5 gives a half-energy
    /// bounce and 0.0 a dead stop.
    pub restitution: f32,

    /// Particle radius. The box boundary is inset by this much so particles
    /// rest against the walls rather than halfway through them.
    pub particle_radius: f32,

    /// Center distance below which a particle pair is pushed apart.
    pub collision_distance: f32,

    /// Radius of the neighborhood averaged by the smoothing pass.
    pub neighbor_radius: f32,

    /// Lerp factor toward the neighborhood centroid, in [0, 1].
    /// Typical range: 0.05 - 0.2; 1.0 snaps clusters to their centroid.
    pub smoothing_factor: f32,

    /// Vertical acceleration per unit of temperature deviation from
    /// `mid_temperature`. 0.0 disables buoyancy.
    pub buoyancy_scale: f32,

    /// Temperature at which buoyancy is neutral. Hotter particles rise,
    /// colder ones sink.
    pub mid_temperature: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -0.2, 0.0),
            friction: 0.9,
            restitution: 0.5,
            particle_radius: 1.0,
            collision_distance: 10.0,
            neighbor_radius: 8.0,
            smoothing_factor: 0.1,
            buoyancy_scale: 0.0,
            mid_temperature: 50.0,
        }
    }
}

impl SimParams {
    /// Parameters for temperature-driven convection in a small container:
    /// weak gravity, tight collisions, and buoyancy switched on.
    pub fn convection() -> Self {
        Self {
            gravity: Vec3::new(0.0, -0.1, 0.0),
            friction: 0.8,
            restitution: 0.3,
            collision_distance: 3.0,
            buoyancy_scale: 0.01,
            ..Self::default()
        }
    }

    /// Parameters for large, frothy particles that keep all their energy
    /// between contacts.
    pub fn foam() -> Self {
        Self {
            friction: 1.0,
            particle_radius: 8.0,
            collision_distance: 8.0,
            neighbor_radius: 7.0,
            ..Self::default()
        }
    }

    /// Checks every field, rejecting values the engine cannot run with.
    ///
    /// Called at plugin insertion and at every [`step`](super::simulation::step)
    /// invocation. Out-of-range values are reported, never clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "gravity",
                value: self.gravity.length(),
                reason: "must be finite",
            });
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SimError::InvalidParameter {
                name: "friction",
                value: self.friction,
                reason: "must be in (0, 1]",
            });
        }
        if !(self.restitution >= 0.0 && self.restitution <= 1.0) {
            return Err(SimError::InvalidParameter {
                name: "restitution",
                value: self.restitution,
                reason: "must be in [0, 1]",
            });
        }
        if !(self.particle_radius.is_finite() && self.particle_radius >= 0.0) {
            return Err(SimError::InvalidParameter {
                name: "particle_radius",
                value: self.particle_radius,
                reason: "must be non-negative",
            });
        }
        if !(self.collision_distance.is_finite() && self.collision_distance > 0.0) {
            return Err(SimError::InvalidParameter {
                name: "collision_distance",
                value: self.collision_distance,
                reason: "must be positive",
            });
        }
        if !(self.neighbor_radius.is_finite() && self.neighbor_radius > 0.0) {
            return Err(SimError::InvalidParameter {
                name: "neighbor_radius",
                value: self.neighbor_radius,
                reason: "must be positive",
            });
        }
        if !(self.smoothing_factor >= 0.0 && self.smoothing_factor <= 1.0) {
            return Err(SimError::InvalidParameter {
                name: "smoothing_factor",
                value: self.smoothing_factor,
                reason: "must be in [0, 1]",
            });
        }
        if !self.buoyancy_scale.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "buoyancy_scale",
                value: self.buoyancy_scale,
                reason: "must be finite",
            });
        }
        if !self.mid_temperature.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "mid_temperature",
                value: self.mid_temperature,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}
