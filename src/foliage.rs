//! Dense foliage point cloud.
//!
//! Tens of thousands of points get their position blend done on the GPU:
//! the mesh carries both endpoint poses as vertex attributes and the
//! material publishes three scalars per frame (time, eased progress, pixel
//! ratio). No per-point CPU work after the buffers are built.

use bevy::asset::RenderAssetUsages;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef, PrimitiveTopology};
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
    VertexFormat,
};
use bevy::render::view::NoFrustumCulling;
use rand::Rng;
use rayon::prelude::*;

use crate::constants::*;
use crate::progress::{advance_progress, MorphProgress};
use crate::sampling::{cone_point, explosion_point};

pub struct FoliagePlugin;

impl Plugin for FoliagePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<FoliageMaterial>::default())
            .add_systems(Startup, spawn_foliage)
            .add_systems(Update, publish_foliage_uniforms.after(advance_progress));
    }
}

#[derive(Component)]
pub struct FoliagePointCloud;

/// Scatter-pose endpoint, one per point (the tree pose rides in the
/// standard position attribute).
pub const ATTRIBUTE_SCATTER_POS: MeshVertexAttribute =
    MeshVertexAttribute::new("Foliage_ScatterPos", 936147850, VertexFormat::Float32x3);

/// Per-point random scalar driving sway phase and color variation.
pub const ATTRIBUTE_POINT_SEED: MeshVertexAttribute =
    MeshVertexAttribute::new("Foliage_PointSeed", 936147851, VertexFormat::Float32);

/// Scalars published to the point shader every frame. Layout mirrors the
/// uniform block in `assets/shaders/foliage.wgsl`.
#[derive(Clone, Copy, Debug, ShaderType)]
pub struct FoliageParams {
    pub time: f32,
    pub progress: f32,
    pub pixel_ratio: f32,
    pub _pad: f32,
    pub color_core: Vec4,
    pub color_tip: Vec4,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct FoliageMaterial {
    #[uniform(0)]
    pub params: FoliageParams,
}

impl Material for FoliageMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/foliage.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/foliage.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_SCATTER_POS.at_shader_location(1),
            ATTRIBUTE_POINT_SEED.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        Ok(())
    }
}

/// Build the dual-position point buffers once and hand them to the GPU.
fn spawn_foliage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
) {
    let tree_positions: Vec<[f32; 3]> = (0..FOLIAGE_COUNT)
        .into_par_iter()
        .map_init(rand::thread_rng, |rng, _| {
            cone_point(rng, TREE_HEIGHT, TREE_RADIUS).to_array()
        })
        .collect();

    let scatter_positions: Vec<[f32; 3]> = (0..FOLIAGE_COUNT)
        .into_par_iter()
        .map_init(rand::thread_rng, |rng, _| {
            explosion_point(rng, FOLIAGE_SCATTER_RADIUS).to_array()
        })
        .collect();

    let seeds: Vec<f32> = (0..FOLIAGE_COUNT)
        .into_par_iter()
        .map_init(rand::thread_rng, |rng, _| rng.gen::<f32>())
        .collect();

    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, tree_positions)
        .with_inserted_attribute(ATTRIBUTE_SCATTER_POS, scatter_positions)
        .with_inserted_attribute(ATTRIBUTE_POINT_SEED, seeds);

    let material = FoliageMaterial {
        params: FoliageParams {
            time: 0.0,
            progress: 1.0,
            pixel_ratio: 1.0,
            _pad: 0.0,
            color_core: Vec4::from_array(EMERALD_DEEP.to_linear().to_f32_array()),
            color_tip: Vec4::from_array(GOLD_METALLIC.to_linear().to_f32_array()),
        },
    };

    // The cloud spans both poses, so culling against either would flicker.
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(material)),
        Transform::IDENTITY,
        NoFrustumCulling,
        FoliagePointCloud,
        Name::new("FoliagePointCloud"),
    ));

    info!("🌲 Foliage point cloud built: {} points", FOLIAGE_COUNT);
}

/// Push the per-frame scalars into the point material. If the material is
/// not loaded yet the cloud simply keeps last frame's values.
fn publish_foliage_uniforms(
    time: Res<Time>,
    progress: Res<MorphProgress>,
    windows: Query<&Window>,
    cloud: Query<&MeshMaterial3d<FoliageMaterial>, With<FoliagePointCloud>>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
) {
    let pixel_ratio = windows
        .single()
        .map(|window| window.scale_factor().min(2.0))
        .unwrap_or(1.0);

    for handle in cloud.iter() {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        material.params.time = time.elapsed_secs();
        material.params.progress = progress.eased;
        material.params.pixel_ratio = pixel_ratio;
    }
}
