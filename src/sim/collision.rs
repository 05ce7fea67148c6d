//! Pairwise collision resolution.

use bevy::prelude::*;

use super::params::SimParams;
use super::spatial::SpatialIndex;

/// Squared-distance floor below which a pair counts as coincident and is
/// skipped, leaving no direction to separate along.
pub const DISTANCE_EPSILON: f32 = 1e-8;

/// Pushes overlapping pairs apart and damps their velocities.
///
/// Candidates come from the tick's index; the separation test itself uses
/// current positions, so a pair already separated by an earlier correction in
/// the same pass is left alone. Each particle of a pair moves half the
/// overlap along the unit separation normal, a symmetric positional
/// correction rather than an impulse solve. The pass runs in place
/// without rebuilding the index, so a late correction can be based on a
/// neighbor's pre-pass position.
///
/// Coincident pairs (squared distance at most [`DISTANCE_EPSILON`]) are
/// skipped; a skipped pair never aborts the rest of the pass.
pub fn resolve(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    index: &SpatialIndex,
    params: &SimParams,
) {
    let radius_sq = params.collision_distance * params.collision_distance;
    let mut near = Vec::new();

    for i in 0..positions.len() {
        index.query_into(positions[i], radius_sq, &mut near);
        for &j in &near {
            if j == i {
                continue;
            }
            let delta = positions[i] - positions[j];
            let dist_sq = delta.length_squared();
            if dist_sq <= DISTANCE_EPSILON || dist_sq >= radius_sq {
                continue;
            }

            let dist = dist_sq.sqrt();
            let normal = delta / dist;
            let push = 0.5 * (params.collision_distance - dist);

            positions[i] += normal * push;
            positions[j] -= normal * push;

            velocities[i] *= params.friction;
            velocities[j] *= params.friction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spatial::SpatialStrategy;

    fn params(collision_distance: f32, friction: f32) -> SimParams {
        SimParams {
            collision_distance,
            friction,
            ..SimParams::default()
        }
    }

    fn run_pass(
        positions: &mut [Vec3],
        velocities: &mut [Vec3],
        params: &SimParams,
    ) {
        let index = SpatialIndex::build(SpatialStrategy::KdTree, positions);
        resolve(positions, velocities, &index, params);
    }

    #[test]
    fn overlapping_pair_separates_by_the_full_overlap() {
        // Two particles one unit apart with collision distance 3: each moves
        // by half the overlap, landing at (-1,0,0) and (2,0,0).
        let mut positions = vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        let mut velocities = vec![Vec3::ZERO, Vec3::ZERO];

        run_pass(&mut positions, &mut velocities, &params(3.0, 1.0));

        assert!((positions[0] - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
        assert!((positions[1] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn separation_is_monotonic() {
        let mut positions = vec![Vec3::ZERO, Vec3::new(0.5, 0.5, 0.0)];
        let mut velocities = vec![Vec3::ZERO, Vec3::ZERO];
        let before = positions[0].distance(positions[1]);

        run_pass(&mut positions, &mut velocities, &params(3.0, 1.0));

        let after = positions[0].distance(positions[1]);
        assert!(after > before, "pair got closer: {before} -> {after}");
    }

    #[test]
    fn separated_pair_is_untouched() {
        let mut positions = vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
        let mut velocities = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO];

        run_pass(&mut positions, &mut velocities, &params(3.0, 0.5));

        assert_eq!(positions[1], Vec3::new(10.0, 0.0, 0.0));
        // No contact, no damping.
        assert_eq!(velocities[0], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn coincident_pair_is_skipped_without_nans() {
        let mut positions = vec![Vec3::ONE, Vec3::ONE];
        let mut velocities = vec![Vec3::ZERO, Vec3::ZERO];

        run_pass(&mut positions, &mut velocities, &params(3.0, 1.0));

        assert!(positions[0].is_finite());
        assert!(positions[1].is_finite());
        assert_eq!(positions[0], Vec3::ONE);
    }

    #[test]
    fn contact_damps_both_velocities() {
        let mut positions = vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        let mut velocities = vec![Vec3::new(2.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0)];

        run_pass(&mut positions, &mut velocities, &params(3.0, 0.5));

        assert!(velocities[0].length() < 2.0);
        assert!(velocities[1].length() < 2.0);
    }
}
