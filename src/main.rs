//! Spume - headless particle simulation demo
//!
//! Runs a free-floating set raining onto the ground plane next to a
//! container-bound convection set, with the container slowly rotating in
//! place of drag input, and logs a one-line status each second. A render
//! layer would read the same resources this demo prints.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use spume::prelude::*;

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin::default(),
            SimulationPlugin::with_params(SimParams::convection()),
        ))
        .add_systems(Startup, setup)
        .add_systems(Update, (rotate_container, report))
        .run();
}

/// Spawns the demo particle sets.
fn setup(mut simulation: ResMut<Simulation>, mut container: ResMut<Container>) {
    container.half_extent = 25.0;
    let extent = container.half_extent * 0.8;

    // Free-floating particles start scattered above the ground.
    let mut sky = SmallRng::seed_from_u64(11);
    let free = ParticleSet::new(50, Frame::World, |_| {
        Vec3::new(
            sky.gen_range(-extent..extent),
            sky.gen_range(50.0..100.0),
            sky.gen_range(-extent..extent),
        )
    })
    .expect("free set");
    simulation.add_set(free);

    // Container-bound particles with a temperature spread drive convection.
    let mut rng = SmallRng::seed_from_u64(7);
    let bound = ParticleSet::new(800, Frame::Local, |_| {
        Vec3::new(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        )
    })
    .expect("bound set");
    let bound = bound.with_temperatures(|_| rng.gen_range(0.0..100.0));
    simulation.add_set(bound);

    info!("spawned {} particle sets", simulation.sets.len());
}

/// Stand-in for drag input: slowly rotates the container between ticks.
fn rotate_container(time: Res<Time>, mut container: ResMut<Container>) {
    let dt = time.delta_secs();
    container.orientation =
        Quat::from_euler(EulerRot::XYZ, 0.12 * dt, 0.3 * dt, 0.0) * container.orientation;
}

/// Logs a one-line status per set every second.
fn report(time: Res<Time>, simulation: Res<Simulation>, mut last: Local<u32>) {
    let second = time.elapsed_secs() as u32;
    if second == *last {
        return;
    }
    *last = second;

    for (i, set) in simulation.sets.iter().enumerate() {
        let mean_height = set.positions().iter().map(|p| p.y).sum::<f32>() / set.len() as f32;
        let mean_neighbors =
            set.neighbor_counts().iter().sum::<usize>() as f32 / set.len() as f32;
        info!(
            "set {i} ({:?}): {} particles, mean height {mean_height:.1}, mean neighbors {mean_neighbors:.1}",
            set.frame(),
            set.len(),
        );
    }
}
