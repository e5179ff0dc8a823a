use bevy::prelude::*;

mod constants;
mod foliage;
mod meshes;
mod ornaments;
mod particles;
mod progress;
mod ribbon;
mod sampling;
mod setup;
mod types;
mod ui;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins((
            progress::ProgressPlugin,
            ornaments::OrnamentsPlugin,
            ribbon::RibbonPlugin,
            foliage::FoliagePlugin,
            particles::AmbientDustPlugin,
            ui::OverlayPlugin,
        ))
        .add_systems(Startup, setup::setup_scene)
        .add_systems(Update, setup::orbit_camera_movement)
        .run();
}
