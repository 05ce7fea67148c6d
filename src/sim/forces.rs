//! External forces and per-tick integration.

use bevy::prelude::*;

use super::params::SimParams;

/// Applies external accelerations and advances positions by one tick.
///
/// `gravity` must already be expressed in the set's frame (see
/// [`to_local`](super::frame::to_local)); buoyancy always acts along the
/// set's local up. The order is fixed: accelerate, integrate (semi-implicit
/// Euler), then damp. Damping runs on the velocity that includes this
/// tick's acceleration.
pub fn integrate(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    temperatures: Option<&[f32]>,
    gravity: Vec3,
    params: &SimParams,
) {
    for i in 0..positions.len() {
        let mut accel = gravity;
        if let Some(temps) = temperatures {
            // Hotter than the midpoint rises, colder sinks.
            accel.y += (temps[i] - params.mid_temperature) * params.buoyancy_scale;
        }
        velocities[i] += accel;
        positions[i] += velocities[i];
        velocities[i] *= params.friction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with(friction: f32, buoyancy_scale: f32) -> SimParams {
        SimParams {
            friction,
            buoyancy_scale,
            mid_temperature: 50.0,
            ..SimParams::default()
        }
    }

    #[test]
    fn gravity_accelerates_then_moves() {
        let mut positions = vec![Vec3::ZERO];
        let mut velocities = vec![Vec3::ZERO];
        let gravity = Vec3::new(0.0, -0.2, 0.0);

        integrate(
            &mut positions,
            &mut velocities,
            None,
            gravity,
            &params_with(1.0, 0.0),
        );

        // Semi-implicit Euler: the fresh velocity moves the particle.
        assert_eq!(positions[0], gravity);
        assert_eq!(velocities[0], gravity);
    }

    #[test]
    fn damping_runs_after_integration() {
        let mut positions = vec![Vec3::ZERO];
        let mut velocities = vec![Vec3::ZERO];
        let gravity = Vec3::new(0.0, -1.0, 0.0);

        integrate(
            &mut positions,
            &mut velocities,
            None,
            gravity,
            &params_with(0.5, 0.0),
        );

        // The position advance sees the undamped velocity.
        assert_eq!(positions[0].y, -1.0);
        assert_eq!(velocities[0].y, -0.5);
    }

    #[test]
    fn hot_particles_rise_and_cold_ones_sink() {
        let mut positions = vec![Vec3::ZERO, Vec3::ZERO];
        let mut velocities = vec![Vec3::ZERO, Vec3::ZERO];
        let temperatures = [90.0, 10.0];

        integrate(
            &mut positions,
            &mut velocities,
            Some(&temperatures),
            Vec3::ZERO,
            &params_with(1.0, 0.01),
        );

        assert!(velocities[0].y > 0.0, "hot particle should rise");
        assert!(velocities[1].y < 0.0, "cold particle should sink");
        // Symmetric deviation from the midpoint gives symmetric buoyancy.
        assert!((velocities[0].y + velocities[1].y).abs() < 1e-6);
    }

    #[test]
    fn midpoint_temperature_is_neutral() {
        let mut positions = vec![Vec3::ZERO];
        let mut velocities = vec![Vec3::ZERO];
        let temperatures = [50.0];

        integrate(
            &mut positions,
            &mut velocities,
            Some(&temperatures),
            Vec3::ZERO,
            &params_with(1.0, 0.01),
        );

        assert_eq!(velocities[0], Vec3::ZERO);
        assert_eq!(positions[0], Vec3::ZERO);
    }

    #[test]
    fn unit_friction_preserves_velocity() {
        let mut positions = vec![Vec3::ZERO];
        let mut velocities = vec![Vec3::new(3.0, 0.0, -4.0)];

        integrate(
            &mut positions,
            &mut velocities,
            None,
            Vec3::ZERO,
            &params_with(1.0, 0.0),
        );

        assert_eq!(velocities[0], Vec3::new(3.0, 0.0, -4.0));
        assert_eq!(positions[0], Vec3::new(3.0, 0.0, -4.0));
    }
}
