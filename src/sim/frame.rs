//! Coordinate frames and the rotating container.
//!
//! A particle set's positions are either world-fixed or expressed relative to
//! a [`Container`] that external input can rotate freely. Body-local physics
//! stays correct under rotation because gravity is re-expressed in the
//! container's frame every tick.

use bevy::prelude::*;

/// Coordinate frame of a particle set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum Frame {
    /// Positions are expressed in the global coordinate system.
    #[default]
    World,
    /// Positions are expressed relative to a rotating [`Container`].
    Local,
}

/// A rotatable confinement box referenced by local-frame particle sets.
///
/// The engine only ever reads `orientation`; rotation comes from the host's
/// input layer, which must write it between ticks (Bevy's scheduler
/// serializes the resource access).
#[derive(Resource, Clone, Copy, Debug, Reflect)]
#[reflect(Resource)]
pub struct Container {
    /// Current rotation of the container.
    pub orientation: Quat,
    /// Half-size of the confinement box along each axis.
    pub half_extent: f32,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            half_extent: 50.0,
        }
    }
}

impl Container {
    /// Creates an unrotated container of the given half-size.
    pub fn new(half_extent: f32) -> Self {
        Self {
            half_extent,
            ..Self::default()
        }
    }
}

/// Rotates a world-space vector into a container's local frame.
///
/// Recomputed every tick; the orientation may have changed since the last
/// one.
pub fn to_local(v: Vec3, orientation: Quat) -> Vec3 {
    orientation.inverse() * v
}

/// Rotates a container-local vector back into world space.
pub fn to_world(v: Vec3, orientation: Quat) -> Vec3 {
    orientation * v
}
