mod camera;
mod render;
mod selection;

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, egui};
use blob_arena::config::MANUAL_SPAWN_COUNT;
use blob_arena::{ConfigError, SimStats, Simulation, SimulationConfig, SimulationPlugin, SimulationState, Traits};
use camera::{CameraState, camera_pan, camera_zoom, setup_camera};
use clap::Parser;
use render::{setup_arena, sync_blob_sprites, sync_candy_sprites};
use selection::{SelectedBlob, handle_selection, setup_selection_outline, update_selection_outline};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two blob populations foraging across a divided arena", long_about = None)]
struct Cli {
    /// Path to a JSON simulation config (defaults for every missing key)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random stream, overriding the config file
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), ConfigError> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Blob Arena".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(SimulationPlugin { config })
        .init_resource::<CameraState>()
        .init_resource::<SelectedBlob>()
        .add_systems(Startup, (setup_camera, setup_arena, setup_selection_outline))
        .add_systems(
            Update,
            (
                camera_zoom,
                camera_pan,
                toggle_pause_key,
                handle_selection,
                sync_blob_sprites,
                sync_candy_sprites,
                update_selection_outline,
                ui_system,
            ),
        )
        .run();

    Ok(())
}

/// System to pause and resume with the P key
fn toggle_pause_key(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    if keys.just_pressed(KeyCode::KeyP) {
        let paused = sim.clock.toggle_pause();
        info!("Simulation {}", if paused { "paused" } else { "resumed" });
    }
}

fn format_means(means: Option<Traits>) -> String {
    match means {
        Some(traits) => format!("size {:.2}, speed {:.1}", traits.size, traits.speed),
        None => "N/A".to_string(),
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    camera_state: Res<CameraState>,
    mut sim: ResMut<Simulation>,
    stats: Res<SimStats>,
    selected: Res<SelectedBlob>,
) {
    egui::Window::new("Simulation Info")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                let running = sim.clock.state == SimulationState::Running;
                let button_text = if running { "⏸ Pause" } else { "▶ Resume" };
                if ui.button(button_text).clicked() {
                    sim.clock.toggle_pause();
                }
                ui.label(format!("State: {}", if running { "Running" } else { "Paused" }));
            });

            ui.horizontal(|ui| {
                if ui.button(format!("➕ Spawn {} Blobs", MANUAL_SPAWN_COUNT)).clicked() {
                    sim.spawn_random_blobs(MANUAL_SPAWN_COUNT);
                }
            });

            ui.add(egui::Slider::new(&mut sim.clock.speed, 0.0..=10.0).text("Sim speed"));

            ui.separator();
            ui.heading("Camera Controls");
            ui.separator();

            ui.label(format!("Zoom: {:.2}x", camera_state.zoom));
            ui.label(format!(
                "Position: ({:.1}, {:.1})",
                camera_state.position.x, camera_state.position.y
            ));

            ui.separator();
            ui.label("Controls:");
            ui.label("• Mouse Wheel - Zoom in/out");
            ui.label("• Middle Mouse - Pan camera");
            ui.label("• Left Click - Select blob");
            ui.label("• P - Pause/resume");

            ui.separator();
            ui.heading("Ecology Stats");
            ui.separator();

            ui.label(format!("Time: {:.1}s (seed {})", sim.time(), sim.seed()));
            ui.label(format!("Blobs: {}", sim.blob_count()));
            ui.label(format!("Candies: {}", sim.candy_count()));

            let means = sim.mean_traits();
            ui.label(format!("Left: {}", format_means(means.left)));
            ui.label(format!("Right: {}", format_means(means.right)));
            ui.label(format!("Separation gap: {:.2}", sim.config().separation_gap));
            match stats.latest() {
                Some(point) => ui.label(format!(
                    "Samples recorded: {} (last at {:.0}s)",
                    stats.len(),
                    point.time
                )),
                None => ui.label("Samples recorded: 0"),
            };
        });

    let Some(blob) = selected.id.and_then(|id| sim.blob(id)) else {
        return;
    };

    egui::Window::new("Selected Blob")
        .default_pos(egui::pos2(10.0, 420.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(format!("Blob #{}", blob.id.0));
            ui.separator();

            ui.label(format!("Energy: {:.0} / {:.0}", blob.energy, blob.max_energy()));
            let energy_ratio = blob.energy_fraction().clamp(0.0, 1.0);
            let progress_bar = egui::ProgressBar::new(energy_ratio)
                .text(format!("{}%", (energy_ratio * 100.0) as u32));
            ui.add(progress_bar);

            ui.separator();
            ui.label(format!("Size: {:.2} (radius {:.1})", blob.traits.size, blob.radius()));
            ui.label(format!("Speed: {:.1}", blob.traits.speed));
            ui.label(format!("Age: {:.2}s", blob.age));
            ui.label(format!("Position: ({:.1}, {:.1})", blob.position.x, blob.position.y));
            ui.label(format!("Velocity: ({:.1}, {:.1})", blob.velocity.x, blob.velocity.y));
        });
}
