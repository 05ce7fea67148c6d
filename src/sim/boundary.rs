//! Boundary confinement policies.
//!
//! World-frame sets bounce off an infinite ground plane; container-bound
//! sets are clamped to the box in their local frame. Both policies are O(N)
//! and need no spatial index.

use bevy::prelude::*;

use super::frame::Frame;
use super::params::SimParams;

/// How a particle set is confined to its domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum BoundaryPolicy {
    /// Clamp to the `y >= 0` half-space with a damped bounce.
    Ground,
    /// Clamp per axis to the container box, inset by the particle radius.
    Box,
}

impl BoundaryPolicy {
    /// The policy a frame implies: world sets land on the ground,
    /// container-bound sets stay in the box.
    pub fn for_frame(frame: Frame) -> Self {
        match frame {
            Frame::World => Self::Ground,
            Frame::Local => Self::Box,
        }
    }

    /// Confines every particle, clamping the position and flipping-and-
    /// damping the violating velocity component.
    ///
    /// `half_extent` is only read by the box policy. Axes are handled
    /// independently, so a particle driven into a corner clamps on several
    /// axes in the same tick.
    pub fn apply(
        &self,
        positions: &mut [Vec3],
        velocities: &mut [Vec3],
        half_extent: f32,
        params: &SimParams,
    ) {
        match self {
            Self::Ground => {
                for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
                    if pos.y < 0.0 {
                        pos.y = 0.0;
                        vel.y *= -params.restitution;
                    }
                }
            }
            Self::Box => {
                let bound = half_extent - params.particle_radius;
                for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
                    for axis in 0..3 {
                        if pos[axis] > bound {
                            pos[axis] = bound;
                            vel[axis] *= -params.restitution;
                        } else if pos[axis] < -bound {
                            pos[axis] = -bound;
                            vel[axis] *= -params.restitution;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn ground_clamps_and_bounces() {
        let mut positions = vec![Vec3::new(0.0, -2.0, 0.0)];
        let mut velocities = vec![Vec3::new(1.0, -4.0, 0.0)];
        let params = SimParams {
            restitution: 0.5,
            ..SimParams::default()
        };

        BoundaryPolicy::Ground.apply(&mut positions, &mut velocities, 0.0, &params);

        assert_eq!(positions[0].y, 0.0);
        assert_eq!(velocities[0].y, 2.0);
        // Tangential motion is untouched.
        assert_eq!(velocities[0].x, 1.0);
    }

    #[test]
    fn ground_ignores_airborne_particles() {
        let mut positions = vec![Vec3::new(0.0, 5.0, 0.0)];
        let mut velocities = vec![Vec3::new(0.0, -1.0, 0.0)];
        let params = SimParams::default();

        BoundaryPolicy::Ground.apply(&mut positions, &mut velocities, 0.0, &params);

        assert_eq!(positions[0].y, 5.0);
        assert_eq!(velocities[0].y, -1.0);
    }

    #[test]
    fn box_clamps_every_violating_axis() {
        let mut positions = vec![Vec3::new(60.0, -70.0, 10.0)];
        let mut velocities = vec![Vec3::new(5.0, -5.0, 1.0)];
        let params = SimParams {
            restitution: 0.5,
            particle_radius: 1.0,
            ..SimParams::default()
        };

        BoundaryPolicy::Box.apply(&mut positions, &mut velocities, 50.0, &params);

        assert_eq!(positions[0], Vec3::new(49.0, -49.0, 10.0));
        assert_eq!(velocities[0], Vec3::new(-2.5, 2.5, 1.0));
    }

    #[test]
    fn box_contains_arbitrary_velocities_forever() {
        let params = SimParams {
            particle_radius: 1.0,
            ..SimParams::default()
        };
        let half_extent = 50.0;
        let mut rng = SmallRng::seed_from_u64(9);

        let mut positions: Vec<Vec3> = (0..32)
            .map(|_| Vec3::splat(rng.gen_range(-40.0..40.0)))
            .collect();
        let mut velocities: Vec<Vec3> = (0..32)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-200.0..200.0),
                    rng.gen_range(-200.0..200.0),
                    rng.gen_range(-200.0..200.0),
                )
            })
            .collect();

        for _ in 0..200 {
            for (pos, vel) in positions.iter_mut().zip(velocities.iter()) {
                *pos += *vel;
            }
            BoundaryPolicy::Box.apply(&mut positions, &mut velocities, half_extent, &params);

            for pos in &positions {
                assert!(
                    pos.abs().max_element() <= half_extent,
                    "escaped to {pos:?}"
                );
            }
        }
    }
}
