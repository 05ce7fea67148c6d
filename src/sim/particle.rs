//! Particle-set state and the render-facing publish buffer.
//!
//! A [`ParticleSet`] owns the arrays for one homogeneous group of particles
//! in structure-of-arrays layout. The count is fixed at construction and the
//! arrays are index-stable for the set's whole life, so an index is a durable
//! particle identity.

use bevy::prelude::*;

use super::boundary::BoundaryPolicy;
use super::error::{Result, SimError};
use super::frame::Frame;
use super::smoothing::density_to_color;
use super::spatial::SpatialStrategy;

/// Packed per-particle data published for the render layer once per tick.
///
/// `#[repr(C)]` with a 16-byte-aligned field layout so a host renderer can
/// upload the whole buffer as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// Position in the set's frame (xyz) + normalized temperature (w,
    /// 0.0 for sets without temperatures).
    pub position: [f32; 4],
    /// Linear RGBA density color from the neighbor-count gradient.
    pub color: [f32; 4],
}

/// The owned state of one homogeneous group of particles.
///
/// All positions and velocities are expressed in the set's single [`Frame`],
/// never mixed mid-step. Sets are created once at simulation start and
/// mutated in place by [`step`](super::simulation::step).
#[derive(Debug, Clone)]
pub struct ParticleSet {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) velocities: Vec<Vec3>,
    pub(crate) temperatures: Option<Vec<f32>>,
    pub(crate) neighbor_counts: Vec<usize>,
    pub(crate) frame: Frame,
    pub(crate) strategy: SpatialStrategy,
    pub(crate) boundary: BoundaryPolicy,
    pub(crate) instances: Vec<ParticleInstance>,
}

impl ParticleSet {
    /// Creates a set of `count` particles at rest.
    ///
    /// `position_sampler` is called once per index to place each particle in
    /// the set's frame. Fails fast on a zero count.
    pub fn new(
        count: usize,
        frame: Frame,
        mut position_sampler: impl FnMut(usize) -> Vec3,
    ) -> Result<Self> {
        if count == 0 {
            return Err(SimError::EmptySet);
        }
        let mut set = Self {
            positions: (0..count).map(&mut position_sampler).collect(),
            velocities: vec![Vec3::ZERO; count],
            temperatures: None,
            neighbor_counts: vec![0; count],
            frame,
            strategy: SpatialStrategy::default(),
            boundary: BoundaryPolicy::for_frame(frame),
            instances: vec![ParticleInstance::default(); count],
        };
        set.publish();
        Ok(set)
    }

    /// Attaches per-particle temperatures, sampled once per index.
    ///
    /// Temperatures drive buoyancy (see the `buoyancy_scale` field of
    /// [`SimParams`](super::params::SimParams)) and the published instance's
    /// w component.
    pub fn with_temperatures(mut self, mut sampler: impl FnMut(usize) -> f32) -> Self {
        self.temperatures = Some((0..self.positions.len()).map(&mut sampler).collect());
        self.publish();
        self
    }

    /// Selects the neighbor-search strategy. Defaults to the k-d tree.
    pub fn with_strategy(mut self, strategy: SpatialStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Number of particles, fixed for the set's life.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a constructed set; kept for completeness.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The set's coordinate frame.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// The set's neighbor-search strategy.
    pub fn strategy(&self) -> SpatialStrategy {
        self.strategy
    }

    /// The set's boundary policy.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Current positions, in the set's frame.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current velocities, in the set's frame.
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Per-particle temperatures, if the set carries them.
    pub fn temperatures(&self) -> Option<&[f32]> {
        self.temperatures.as_deref()
    }

    /// Self-inclusive neighbor counts from the last smoothing pass.
    /// Presentation-only; the physics never reads them back.
    pub fn neighbor_counts(&self) -> &[usize] {
        &self.neighbor_counts
    }

    /// The packed publish buffer, refreshed at the end of every step.
    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    /// Refreshes the publish buffer from current state.
    pub(crate) fn publish(&mut self) {
        for i in 0..self.positions.len() {
            let p = self.positions[i];
            let t = self
                .temperatures
                .as_ref()
                .map_or(0.0, |temps| temps[i] / 100.0);
            let color = density_to_color(self.neighbor_counts[i]).to_linear();
            self.instances[i] = ParticleInstance {
                position: [p.x, p.y, p.z, t],
                color: [color.red, color.green, color.blue, color.alpha],
            };
        }
    }
}

/// Generates positions on a regular grid filling a box, for demos and tests.
pub fn grid_positions(center: Vec3, half_extents: Vec3, spacing: f32) -> Vec<Vec3> {
    let min = center - half_extents;
    let max = center + half_extents;
    let mut positions = Vec::new();

    let mut x = min.x;
    while x <= max.x {
        let mut y = min.y;
        while y <= max.y {
            let mut z = min.z;
            while z <= max.z {
                positions.push(Vec3::new(x, y, z));
                z += spacing;
            }
            y += spacing;
        }
        x += spacing;
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_share_one_length() {
        let set = ParticleSet::new(16, Frame::World, |i| Vec3::splat(i as f32))
            .unwrap()
            .with_temperatures(|i| i as f32);

        assert_eq!(set.len(), 16);
        assert_eq!(set.velocities().len(), 16);
        assert_eq!(set.temperatures().unwrap().len(), 16);
        assert_eq!(set.neighbor_counts().len(), 16);
        assert_eq!(set.instances().len(), 16);
    }

    #[test]
    fn zero_count_is_rejected() {
        let result = ParticleSet::new(0, Frame::World, |_| Vec3::ZERO);
        assert_eq!(result.unwrap_err(), SimError::EmptySet);
    }

    #[test]
    fn sampler_receives_each_index() {
        let set = ParticleSet::new(4, Frame::Local, |i| Vec3::new(i as f32, 0.0, 0.0)).unwrap();
        assert_eq!(set.positions()[3], Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn frame_selects_the_boundary_policy() {
        let world = ParticleSet::new(1, Frame::World, |_| Vec3::ZERO).unwrap();
        let local = ParticleSet::new(1, Frame::Local, |_| Vec3::ZERO).unwrap();
        assert_eq!(world.boundary(), BoundaryPolicy::Ground);
        assert_eq!(local.boundary(), BoundaryPolicy::Box);
    }

    #[test]
    fn instances_carry_position_and_temperature() {
        let set = ParticleSet::new(1, Frame::World, |_| Vec3::new(1.0, 2.0, 3.0))
            .unwrap()
            .with_temperatures(|_| 75.0);

        let instance = set.instances()[0];
        assert_eq!(instance.position, [1.0, 2.0, 3.0, 0.75]);
    }

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
    }

    #[test]
    fn grid_positions_fill_the_box() {
        let positions = grid_positions(Vec3::ZERO, Vec3::splat(1.0), 1.0);
        assert_eq!(positions.len(), 27);
        for p in &positions {
            assert!(p.abs().max_element() <= 1.0 + f32::EPSILON);
        }
    }
}
