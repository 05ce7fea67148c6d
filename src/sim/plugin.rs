//! Bevy plugin wiring.

use bevy::prelude::*;

use super::frame::Container;
use super::params::SimParams;
use super::simulation::{self, Simulation};

/// Adds the particle simulation to a Bevy app.
///
/// Inserts the [`SimParams`], [`Container`] and [`Simulation`] resources and
/// steps every registered set once per `FixedUpdate` tick. Rendering and
/// input stay outside the engine: a render layer reads
/// [`Simulation`] set state after the tick, and an input layer writes
/// [`Container::orientation`] between ticks.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use spume::prelude::*;
///
/// fn main() {
///     App::new()
///         .add_plugins(DefaultPlugins)
///         .add_plugins(SimulationPlugin::with_params(SimParams::convection()))
///         .add_systems(Startup, spawn_particles)
///         .run();
/// }
///
/// fn spawn_particles(mut simulation: ResMut<Simulation>) {
///     let set = ParticleSet::new(500, Frame::Local, |i| {
///         Vec3::new((i % 10) as f32, ((i / 10) % 10) as f32, (i / 100) as f32) * 4.0
///             - Vec3::splat(20.0)
///     })
///     .expect("particle set");
///     simulation.add_set(set);
/// }
/// ```
pub struct SimulationPlugin {
    /// Parameters shared by every registered set.
    pub params: SimParams,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            params: SimParams::default(),
        }
    }
}

impl SimulationPlugin {
    /// Creates the plugin with explicit parameters.
    pub fn with_params(params: SimParams) -> Self {
        Self { params }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Configuration problems surface at startup, not on tick one.
        if let Err(err) = self.params.validate() {
            panic!("invalid simulation parameters: {err}");
        }

        app.register_type::<SimParams>().register_type::<Container>();

        app.insert_resource(self.params.clone())
            .init_resource::<Container>()
            .init_resource::<Simulation>();

        app.add_systems(FixedUpdate, run_simulation);
    }
}

/// Steps every registered particle set once.
///
/// A failing set is reported and skipped; the remaining sets still step.
fn run_simulation(
    params: Res<SimParams>,
    container: Res<Container>,
    mut simulation: ResMut<Simulation>,
) {
    for (i, set) in simulation.sets.iter_mut().enumerate() {
        if let Err(err) = simulation::step(set, &params, Some(&container)) {
            bevy::log::error!("particle set {i}: {err}");
        }
    }
}
