use crate::config::SimulationConfig;
use crate::simulation::Simulation;
use crate::stats::SimStats;
use bevy::prelude::*;

/// Runs the blob arena inside a bevy app. Works headless under
/// `MinimalPlugins`; rendering is added separately by the binary.
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Simulation::new(self.config.clone()))
            .init_resource::<SimStats>()
            .add_systems(Update, (advance_simulation, record_stats).chain());
    }
}

/// System to tick the engine with the frame's wall-clock delta
pub fn advance_simulation(time: Res<Time>, mut sim: ResMut<Simulation>) {
    sim.advance(time.delta_secs());
}

/// System to sample the per-half mean traits
pub fn record_stats(sim: Res<Simulation>, mut stats: ResMut<SimStats>) {
    stats.record(&sim);
}
