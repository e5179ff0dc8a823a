//! The single wrapping ribbon: a spiral band around the tree that flies in
//! from just in front of the camera as the scene assembles.

use bevy::prelude::*;
use std::f32::consts::PI;

use crate::constants::*;
use crate::meshes::sweep_ribbon_strip;
use crate::progress::{advance_progress, MorphProgress};
use crate::sampling::lerp;

pub struct RibbonPlugin;

impl Plugin for RibbonPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_wrapping_ribbon)
            .add_systems(Update, update_wrapping_ribbon.after(advance_progress));
    }
}

#[derive(Component)]
pub struct WrappingRibbon;

/// Spiral spine from the base of the tree to the tip, tapering with height.
pub fn spiral_spine() -> Vec<Vec3> {
    (0..=RIBBON_SPINE_STEPS)
        .map(|i| {
            let t = i as f32 / RIBBON_SPINE_STEPS as f32;
            let angle = t * PI * 2.0 * RIBBON_TURNS;
            let y = -TREE_HEIGHT / 2.0 + t * TREE_HEIGHT;
            let r = RIBBON_BASE_RADIUS * (1.0 - t) + RIBBON_TIP_RADIUS;
            Vec3::new(angle.cos() * r, y, angle.sin() * r)
        })
        .collect()
}

/// Translation and scale for a given eased progress. Unclamped on purpose:
/// overshoot pushes the ribbon slightly past its rest pose for a bounce.
pub fn ribbon_pose(eased: f32) -> (Vec3, f32) {
    let translation = Vec3::new(
        0.0,
        lerp(RIBBON_SCATTER_Y, 0.0, eased),
        lerp(RIBBON_SCATTER_Z, 0.0, eased),
    );
    let scale = lerp(RIBBON_SCATTER_SCALE, 1.0, eased);
    (translation, scale)
}

fn spawn_wrapping_ribbon(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(sweep_ribbon_strip(
        &spiral_spine(),
        RIBBON_WIDTH,
        RIBBON_THICKNESS,
    ));
    let material = materials.add(StandardMaterial {
        base_color: RIBBON_RED,
        perceptual_roughness: 0.4,
        metallic: 0.3,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        WrappingRibbon,
        Name::new("WrappingRibbon"),
    ));
}

fn update_wrapping_ribbon(
    time: Res<Time>,
    progress: Res<MorphProgress>,
    mut query: Query<&mut Transform, With<WrappingRibbon>>,
) {
    let t = progress.eased;
    let (translation, scale) = ribbon_pose(t);

    // Fast spin while flying in, settling into a slow drift.
    let spin = (1.0 - t) * PI * 2.0 + time.elapsed_secs() * RIBBON_DRIFT_SPEED;

    for mut transform in query.iter_mut() {
        transform.translation = translation;
        transform.scale = Vec3::splat(scale);
        transform.rotation = Quat::from_rotation_y(spin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_endpoints() {
        let (scattered, scattered_scale) = ribbon_pose(0.0);
        assert_eq!(scattered, Vec3::new(0.0, RIBBON_SCATTER_Y, RIBBON_SCATTER_Z));
        assert_eq!(scattered_scale, RIBBON_SCATTER_SCALE);

        let (settled, settled_scale) = ribbon_pose(1.0);
        assert_eq!(settled, Vec3::ZERO);
        assert_eq!(settled_scale, 1.0);
    }

    #[test]
    fn test_pose_extrapolates_on_overshoot() {
        // Back-ease overshoot past 1 should push the pose beyond rest.
        let (pos, scale) = ribbon_pose(1.1);
        assert!(pos.z < 0.0);
        assert!(scale < 1.0);
    }

    #[test]
    fn test_spiral_tapers_with_height() {
        let spine = spiral_spine();
        assert_eq!(spine.len(), RIBBON_SPINE_STEPS + 1);
        assert!((spine[0].y + TREE_HEIGHT / 2.0).abs() < 1e-4);
        assert!((spine.last().unwrap().y - TREE_HEIGHT / 2.0).abs() < 1e-4);
        for p in &spine {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r <= RIBBON_BASE_RADIUS + RIBBON_TIP_RADIUS + 1e-4);
            assert!(r >= RIBBON_TIP_RADIUS - 1e-4);
        }
    }
}
