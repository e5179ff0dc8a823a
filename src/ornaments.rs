//! Instanced ornament groups and their per-frame choreography.
//!
//! Each family (gifts, baubles, candy canes, bows, string lights, the top
//! star) is one batch of entities sharing a mesh and material handle, so the
//! renderer draws them instanced. Every instance carries its static dual
//! pose plus a chaos-rotation accumulator; one system sweeps all of them
//! each frame off the shared morph progress.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::constants::*;
use crate::meshes;
use crate::progress::{advance_progress, MorphProgress};
use crate::sampling::{cone_point, cone_surface_point, explosion_point, lerp, smoothstep};
use crate::types::{DualPosition, OrnamentKind};

pub struct OrnamentsPlugin;

impl Plugin for OrnamentsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ornament_groups)
            .add_systems(
                Update,
                (update_ornament_transforms, update_star).after(advance_progress),
            );
    }
}

// ===== COMPONENTS =====

/// One instanced ornament. Pose data is fixed at spawn; `spin` is the
/// running chaos-rotation accumulator in radians per axis.
#[derive(Component)]
pub struct Ornament {
    pub scatter_pos: Vec3,
    pub tree_pos: Vec3,
    pub target_rotation: Vec3,
    pub scale: f32,
    pub float_speed: f32,
    pub float_phase: f32,
    pub spin: Vec3,
}

impl Ornament {
    fn from_seed(seed: &DualPosition) -> Self {
        Self {
            scatter_pos: seed.scatter_pos,
            tree_pos: seed.tree_pos,
            target_rotation: seed.rotation,
            scale: seed.scale,
            float_speed: seed.float_speed,
            float_phase: seed.float_phase,
            spin: Vec3::ZERO,
        }
    }
}

/// The singleton top star follows its own strict script instead of the
/// chaos-spin physics: it hides at the origin, rises, then settles.
#[derive(Component)]
pub struct StarOrnament {
    pub apex_y: f32,
    pub base_scale: f32,
    pub spin: f32,
}

// ===== DATASET BUILDER =====

/// Generate the paired scatter/tree poses and static attributes for one
/// ornament family. `count = 0` is valid and yields an empty batch.
pub fn build_ornament_data(
    rng: &mut impl Rng,
    count: usize,
    kind: OrnamentKind,
) -> Vec<DualPosition> {
    (0..count)
        .map(|_| {
            let mut tree_pos;
            let mut rotation = Vec3::ZERO;
            let scale;
            let color;

            match kind {
                OrnamentKind::Gift => {
                    // Flat annulus around the trunk base, light y jitter.
                    let r = rng.gen::<f32>() * 4.0;
                    let angle = rng.gen::<f32>() * PI * 2.0;
                    tree_pos = Vec3::new(
                        r * angle.cos(),
                        -TREE_HEIGHT / 2.0 + rng.gen::<f32>() * 2.0,
                        r * angle.sin(),
                    );
                    scale = 0.4 + rng.gen::<f32>() * 0.4;
                    let roll = rng.gen::<f32>();
                    color = if roll > 0.66 {
                        RED_VELVET
                    } else if roll > 0.33 {
                        GOLD_METALLIC
                    } else {
                        EMERALD_DEEP
                    };
                }
                OrnamentKind::Bauble => {
                    // Inset so the spheres sit inside the foliage shell.
                    tree_pos = cone_point(rng, TREE_HEIGHT - 2.0, TREE_RADIUS - 0.5);
                    tree_pos.y += 1.0;
                    scale = 0.2 + rng.gen::<f32>() * 0.2;
                    let roll = rng.gen::<f32>();
                    color = if roll > 0.6 {
                        RED_VELVET
                    } else if roll > 0.3 {
                        GOLD_BRIGHT
                    } else {
                        SILVER_MIST
                    };
                }
                OrnamentKind::CandyCane => {
                    tree_pos = cone_surface_point(rng, TREE_HEIGHT - 1.0, TREE_RADIUS);
                    tree_pos.y += 0.5;
                    scale = 0.6;
                    color = CANDY_WHITE;

                    // Face the trunk axis, with a loose hand-hung tilt.
                    let yaw = (-tree_pos.x).atan2(-tree_pos.z);
                    let tilt_x = (rng.gen::<f32>() - 0.5) * 1.5;
                    let tilt_z = (rng.gen::<f32>() - 0.5) * 0.5;
                    rotation = Vec3::new(tilt_x, yaw, tilt_z);
                }
                OrnamentKind::Bow => {
                    // Pushed 5% out of the foliage so the loops stay visible.
                    tree_pos = cone_surface_point(rng, TREE_HEIGHT - 2.0, TREE_RADIUS) * 1.05;
                    scale = 0.8 + rng.gen::<f32>() * 0.4;
                    color = RIBBON_RED;

                    // Face outward (trunk yaw plus a half turn) with z wiggle.
                    let yaw = (-tree_pos.x).atan2(-tree_pos.z) + PI;
                    let wiggle_z = (rng.gen::<f32>() - 0.5) * 0.3;
                    rotation = Vec3::new(0.0, yaw, wiggle_z);
                }
                OrnamentKind::Star => {
                    tree_pos = Vec3::new(0.0, STAR_APEX_Y, 0.0);
                    scale = 1.8;
                    color = GOLD_BRIGHT;
                }
                OrnamentKind::Light => {
                    tree_pos = cone_point(rng, TREE_HEIGHT, TREE_RADIUS);
                    scale = 0.08;
                    color = WHITE_GLOW;
                }
            }

            // The star rises from inside the tree; everything else flies in
            // from the camera-biased burst cloud.
            let scatter_pos = if kind == OrnamentKind::Star {
                Vec3::ZERO
            } else {
                explosion_point(rng, ORNAMENT_SCATTER_RADIUS)
            };

            DualPosition {
                scatter_pos,
                tree_pos,
                rotation,
                scale,
                color,
                float_speed: 0.5 + rng.gen::<f32>(),
                float_phase: rng.gen::<f32>() * PI * 2.0,
            }
        })
        .collect()
}

// ===== GROUP SPAWNING =====

pub fn spawn_ornament_groups(
    mut commands: Commands,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();

    // One material handle per palette color so batches stay instanced.
    let mut metallic_cache: Vec<(Color, Handle<StandardMaterial>)> = Vec::new();
    let mut metallic_for = |color: Color, materials: &mut Assets<StandardMaterial>| {
        if let Some((_, handle)) = metallic_cache.iter().find(|(c, _)| *c == color) {
            return handle.clone();
        }
        let handle = materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.2,
            metallic: 0.8,
            ..default()
        });
        metallic_cache.push((color, handle.clone()));
        handle
    };

    // Gifts and baubles: primitive meshes, palette-grouped metal.
    let gift_mesh = mesh_assets.add(Cuboid::new(1.0, 1.0, 1.0));
    let bauble_mesh = mesh_assets.add(Sphere::new(1.0).mesh().uv(32, 18));

    for (kind, count, mesh) in [
        (OrnamentKind::Gift, GIFT_COUNT, &gift_mesh),
        (OrnamentKind::Bauble, BAUBLE_COUNT, &bauble_mesh),
    ] {
        let data = build_ornament_data(&mut rng, count, kind);
        for seed in &data {
            let material = metallic_for(seed.color, &mut materials);
            spawn_instance(&mut commands, mesh.clone(), material, seed);
        }
    }

    // Candy canes: the striped body and its little bow are two render
    // variants rigidly following one shared dataset.
    let cane_mesh = mesh_assets.add(meshes::create_candy_cane_mesh());
    let cane_bow_mesh = mesh_assets.add(meshes::create_cane_bow_mesh());
    let cane_body_material = materials.add(StandardMaterial {
        // Vertex colors carry the stripes.
        base_color: Color::WHITE,
        perceptual_roughness: 0.2,
        metallic: 0.3,
        ..default()
    });
    let cane_bow_material = materials.add(StandardMaterial {
        base_color: RED_VELVET,
        perceptual_roughness: 0.4,
        metallic: 0.2,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let cane_data = build_ornament_data(&mut rng, CANDY_CANE_COUNT, OrnamentKind::CandyCane);
    for seed in &cane_data {
        spawn_instance(&mut commands, cane_mesh.clone(), cane_body_material.clone(), seed);
        spawn_instance(&mut commands, cane_bow_mesh.clone(), cane_bow_material.clone(), seed);
    }

    // Scattered bow ornaments.
    let bow_mesh = mesh_assets.add(meshes::create_ribbon_bow_mesh());
    let bow_material = materials.add(StandardMaterial {
        base_color: RIBBON_RED,
        perceptual_roughness: 0.5,
        metallic: 0.1,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    for seed in &build_ornament_data(&mut rng, BOW_COUNT, OrnamentKind::Bow) {
        spawn_instance(&mut commands, bow_mesh.clone(), bow_material.clone(), seed);
    }

    // String lights: tiny emissive gems, dense.
    let light_mesh = mesh_assets.add(meshes::create_light_gem_mesh());
    let light_material = materials.add(StandardMaterial {
        base_color: WHITE_GLOW,
        emissive: WHITE_GLOW.to_linear() * 4.0,
        ..default()
    });
    for seed in &build_ornament_data(&mut rng, LIGHT_COUNT, OrnamentKind::Light) {
        spawn_instance(&mut commands, light_mesh.clone(), light_material.clone(), seed);
    }

    // The top star.
    let star_mesh = mesh_assets.add(meshes::create_star_mesh());
    let star_material = materials.add(StandardMaterial {
        base_color: GOLD_METALLIC,
        emissive: GOLD_BRIGHT.to_linear() * 2.0,
        perceptual_roughness: 0.3,
        metallic: 0.8,
        ..default()
    });
    if let Some(seed) = build_ornament_data(&mut rng, 1, OrnamentKind::Star).first() {
        commands.spawn((
            Mesh3d(star_mesh),
            MeshMaterial3d(star_material),
            Transform::from_translation(seed.tree_pos).with_scale(Vec3::splat(seed.scale)),
            StarOrnament {
                apex_y: seed.tree_pos.y,
                base_scale: seed.scale,
                spin: 0.0,
            },
            Name::new("TopStar"),
        ));
    }

    info!(
        "🎄 Ornament groups spawned: {} gifts, {} baubles, {} candy canes, {} bows, {} lights + star",
        GIFT_COUNT, BAUBLE_COUNT, CANDY_CANE_COUNT, BOW_COUNT, LIGHT_COUNT
    );
}

fn spawn_instance(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    seed: &DualPosition,
) {
    // The scene opens assembled, so instances start at their tree pose.
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        seed.rotation.x,
        seed.rotation.y,
        seed.rotation.z,
    );
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(seed.tree_pos)
            .with_rotation(rotation)
            .with_scale(Vec3::splat(seed.scale)),
        Ornament::from_seed(seed),
    ));
}

// ===== PER-FRAME CHOREOGRAPHY =====

/// Sweep every non-star instance: unclamped pose interpolation plus bobbing,
/// chaos spin fed by the transition velocity, and late `t^4` alignment onto
/// the static target orientation.
pub fn update_ornament_transforms(
    time: Res<Time>,
    progress: Res<MorphProgress>,
    mut query: Query<(&mut Ornament, &mut Transform)>,
) {
    let t = progress.eased;
    let velocity = progress.velocity;
    let elapsed = time.elapsed_secs();
    let dt = time.delta_secs();

    // Alignment only bites in the final approach; mid-flight stays chaotic.
    let align = t.powi(ALIGN_EXPONENT);
    let spin_rate = BASE_FLOAT_SPEED + velocity * SPIN_FACTOR;

    for (mut ornament, mut transform) in query.iter_mut() {
        let mut pos = ornament.scatter_pos.lerp(ornament.tree_pos, t);
        pos.y += (elapsed * ornament.float_speed + ornament.float_phase).sin() * FLOAT_AMPLITUDE;

        ornament.spin.x += spin_rate * dt;
        ornament.spin.y += spin_rate * dt;
        ornament.spin.z += spin_rate * 0.5 * dt;

        let rotation = Vec3::new(
            lerp(ornament.spin.x, ornament.target_rotation.x, align),
            lerp(ornament.spin.y, ornament.target_rotation.y, align),
            lerp(ornament.spin.z, ornament.target_rotation.z, align),
        );

        transform.translation = pos;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        transform.scale = Vec3::splat(ornament.scale);
    }
}

/// Star height for a given progress value: pinned to the floor of the trunk
/// until the rise threshold, then a smoothstep climb to the apex.
pub fn star_rise_y(apex_y: f32, progress: f32) -> f32 {
    if progress < STAR_RISE_START {
        0.0
    } else {
        lerp(0.0, apex_y, smoothstep(STAR_RISE_START, 1.0, progress))
    }
}

/// Hidden -> rising -> settled, driven purely by the progress scalar so the
/// whole sequence reverses if the scene scatters mid-rise.
pub fn update_star(
    time: Res<Time>,
    progress: Res<MorphProgress>,
    mut query: Query<(&mut StarOrnament, &mut Transform)>,
) {
    let t = progress.eased;

    for (mut star, mut transform) in query.iter_mut() {
        let mut pos = Vec3::new(0.0, star_rise_y(star.apex_y, t), 0.0);

        if t > STAR_HOVER_START {
            pos.y += (time.elapsed_secs() * STAR_HOVER_FREQ).sin() * STAR_HOVER_AMPLITUDE;
        }

        if t > STAR_SPIN_START {
            star.spin += time.delta_secs() * STAR_SPIN_SPEED;
            transform.rotation = Quat::from_rotation_y(star.spin);
        } else {
            star.spin = 0.0;
            transform.rotation = Quat::IDENTITY;
        }

        transform.translation = pos;
        transform.scale =
            Vec3::splat(star.base_scale * smoothstep(STAR_RISE_START, STAR_SCALE_END, t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dataset_count_is_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in [
            OrnamentKind::Gift,
            OrnamentKind::Bauble,
            OrnamentKind::CandyCane,
            OrnamentKind::Bow,
            OrnamentKind::Light,
        ] {
            assert_eq!(build_ornament_data(&mut rng, 64, kind).len(), 64);
            assert!(build_ornament_data(&mut rng, 0, kind).is_empty());
        }
    }

    #[test]
    fn test_gift_pose_sits_at_the_base() {
        let mut rng = StdRng::seed_from_u64(2);
        for seed in build_ornament_data(&mut rng, 500, OrnamentKind::Gift) {
            let r = (seed.tree_pos.x.powi(2) + seed.tree_pos.z.powi(2)).sqrt();
            assert!(r <= 4.0 + 1e-4);
            assert!(seed.tree_pos.y >= -7.0 && seed.tree_pos.y <= -5.0);
            assert!(seed.scale >= 0.4 && seed.scale <= 0.8);
        }
    }

    #[test]
    fn test_scatter_poses_fly_toward_the_camera() {
        let mut rng = StdRng::seed_from_u64(3);
        for seed in build_ornament_data(&mut rng, 500, OrnamentKind::Bauble) {
            assert!(seed.scatter_pos.z >= 5.0 && seed.scatter_pos.z <= 45.0);
            assert!(seed.scatter_pos.x.abs() <= ORNAMENT_SCATTER_RADIUS * 1.5);
        }
    }

    #[test]
    fn test_star_seed_is_a_singleton_rule() {
        let mut rng = StdRng::seed_from_u64(4);
        let data = build_ornament_data(&mut rng, 1, OrnamentKind::Star);
        assert_eq!(data[0].scatter_pos, Vec3::ZERO);
        assert_eq!(data[0].tree_pos, Vec3::new(0.0, STAR_APEX_Y, 0.0));
        assert_eq!(data[0].scale, 1.8);
    }

    #[test]
    fn test_candy_cane_faces_the_trunk() {
        let mut rng = StdRng::seed_from_u64(5);
        for seed in build_ornament_data(&mut rng, 200, OrnamentKind::CandyCane) {
            let forward = Quat::from_rotation_y(seed.rotation.y) * Vec3::Z;
            let inward = Vec3::new(-seed.tree_pos.x, 0.0, -seed.tree_pos.z).normalize();
            assert!(
                forward.dot(inward) > 0.99,
                "cane yaw points away from the trunk: {:?}",
                seed.rotation
            );
        }
    }

    #[test]
    fn test_float_attributes_in_range() {
        let mut rng = StdRng::seed_from_u64(6);
        for seed in build_ornament_data(&mut rng, 500, OrnamentKind::Light) {
            assert!(seed.float_speed >= 0.5 && seed.float_speed <= 1.5);
            assert!(seed.float_phase >= 0.0 && seed.float_phase < PI * 2.0);
        }
    }

    #[test]
    fn test_star_rise_is_gated_and_monotone() {
        for i in 0..70 {
            assert_eq!(star_rise_y(STAR_APEX_Y, i as f32 / 100.0), 0.0);
        }
        let mut prev = 0.0;
        for i in 70..=100 {
            let y = star_rise_y(STAR_APEX_Y, i as f32 / 100.0);
            assert!(y >= prev, "rise regressed at progress {}", i);
            prev = y;
        }
        assert!((prev - STAR_APEX_Y).abs() < 1e-4);
    }

    #[test]
    fn test_alignment_weight_curve() {
        assert_eq!(0.0f32.powi(ALIGN_EXPONENT), 0.0);
        assert_eq!(1.0f32.powi(ALIGN_EXPONENT), 1.0);
        assert!((0.9f32.powi(ALIGN_EXPONENT) - 0.6561).abs() < 1e-4);
    }
}
