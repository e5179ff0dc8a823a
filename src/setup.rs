// Scene setup and orbit camera module
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::*;
use crate::progress::MorphProgress;
use crate::types::{SceneAudio, TreeState};

#[derive(Component)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

pub fn setup_scene(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ClearColor(BACKGROUND));

    // Low emerald-tinted fill so scattered pieces never go fully black.
    commands.insert_resource(AmbientLight {
        color: AMBIENT_TINT,
        brightness: 80.0,
        affects_lightmapped_meshes: false,
    });

    // Warm key spot from high right.
    commands.spawn((
        SpotLight {
            color: SPOT_WARM_WHITE,
            intensity: 2_000_000.0,
            range: 120.0,
            inner_angle: 0.0,
            outer_angle: 0.3,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Gold bounce from the lower back.
    commands.spawn((
        PointLight {
            color: GOLD_METALLIC,
            intensity: 500_000.0,
            range: 80.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-10.0, -5.0, -10.0),
    ));

    // Orbit camera looking straight at the tree, hdr + bloom so the
    // emissive star and lights glow.
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::Reinhard,
        Bloom::NATURAL,
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_START_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera {
            focus_point: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_START_DISTANCE,
        },
    ));

    // One-shot chime played on every toggle.
    commands.insert_resource(SceneAudio {
        toggle_sfx: asset_server.load("audio/sfx/sleigh_bells.wav"),
    });

    info!("🎥 Scene ready: camera at {}, tree {}x{}", CAMERA_START_DISTANCE, TREE_HEIGHT, TREE_RADIUS * 2.0);
}

/// Drag to orbit, wheel to zoom, slow auto-rotate while the tree is
/// assembled. Pitch and distance stay clamped to the showcase envelope.
pub fn orbit_camera_movement(
    time: Res<Time>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    mut scroll_events: EventReader<MouseWheel>,
    mut mouse_motion_events: EventReader<MouseMotion>,
    progress: Res<MorphProgress>,
    mut camera_query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    if let Ok((mut transform, mut camera)) = camera_query.single_mut() {
        if mouse_button_input.pressed(MouseButton::Left) {
            for motion in mouse_motion_events.read() {
                camera.yaw -= motion.delta.x * CAMERA_ROTATION_SPEED;
                camera.pitch = (camera.pitch - motion.delta.y * CAMERA_ROTATION_SPEED)
                    .clamp(CAMERA_PITCH_MIN, CAMERA_PITCH_MAX);
            }
        } else {
            // Clear motion events while not dragging to prevent accumulation
            mouse_motion_events.clear();
        }

        if progress.state == TreeState::Assembled {
            camera.yaw += AUTO_ROTATE_SPEED * time.delta_secs();
        }

        for scroll in scroll_events.read() {
            let zoom_delta = match scroll.unit {
                MouseScrollUnit::Line => scroll.y * CAMERA_ZOOM_SPEED,
                MouseScrollUnit::Pixel => scroll.y * CAMERA_ZOOM_SPEED * 0.1,
            };
            camera.distance =
                (camera.distance - zoom_delta).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        }

        let rotation = Quat::from_euler(EulerRot::YXZ, camera.yaw, camera.pitch, 0.0);
        let offset = rotation * Vec3::new(0.0, 0.0, camera.distance);

        transform.translation = camera.focus_point + offset;
        transform.rotation = rotation;
    }
}
