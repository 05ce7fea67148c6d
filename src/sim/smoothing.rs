//! Neighborhood smoothing and the density color metric.
//!
//! Relaxing every particle toward the centroid of its neighborhood is what
//! turns a pile of bouncing points into something that moves like a liquid.
//! The same neighborhood lookup yields a per-particle crowdedness count used
//! only for presentation.

use bevy::prelude::*;

use super::params::SimParams;
use super::spatial::SpatialIndex;

/// Neighbor count at which the density color gradient saturates.
pub const DENSITY_SATURATION: usize = 20;

/// Relaxes each particle toward the centroid of its neighborhood.
///
/// Neighborhoods are looked up in the tick's index at the configured
/// neighbor radius. Query results include the particle itself, so a lone
/// particle sees a single entry and is skipped. New positions are staged
/// and committed together: every centroid
/// is computed from the same pre-pass positions, making the pass
/// order-independent.
///
/// Each particle's self-inclusive neighbor count is recorded in
/// `neighbor_counts` for the presentation gradient.
pub fn smooth(
    positions: &mut [Vec3],
    neighbor_counts: &mut [usize],
    index: &SpatialIndex,
    params: &SimParams,
) {
    let radius_sq = params.neighbor_radius * params.neighbor_radius;
    let mut staged = positions.to_vec();
    let mut near = Vec::new();

    for i in 0..positions.len() {
        index.query_into(positions[i], radius_sq, &mut near);
        neighbor_counts[i] = near.len();
        if near.len() <= 1 {
            continue;
        }

        let mut mean = Vec3::ZERO;
        for &j in &near {
            mean += positions[j];
        }
        mean /= near.len() as f32;

        staged[i] = positions[i].lerp(mean, params.smoothing_factor);
    }

    positions.copy_from_slice(&staged);
}

/// Maps a local neighbor count to the presentation color gradient.
///
/// Sparse neighborhoods render teal, crowded ones deep blue, saturating at
/// [`DENSITY_SATURATION`] neighbors.
pub fn density_to_color(neighbor_count: usize) -> Color {
    let t = (neighbor_count as f32 / DENSITY_SATURATION as f32).min(1.0);

    let sparse = Color::srgb(0.0, 0.8, 1.0).to_linear();
    let dense = Color::srgb(0.0, 0.2, 1.0).to_linear();

    Color::linear_rgba(
        sparse.red + (dense.red - sparse.red) * t,
        sparse.green + (dense.green - sparse.green) * t,
        sparse.blue + (dense.blue - sparse.blue) * t,
        1.0,
    )
}
