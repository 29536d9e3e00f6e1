use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::asset::RenderAssetUsages;
use bevy::render::view::NoFrustumCulling;
use shared::ocean::{OceanConfig, OceanGrid, WaveField};

use crate::assets::GameAssets;
use crate::GameState;

#[derive(Component)]
pub struct OceanSurface;

/// CPU copy of the surface, rewritten every frame and pushed to the mesh.
#[derive(Resource)]
pub struct Ocean {
    grid: OceanGrid,
    mesh: Handle<Mesh>,
}

fn build_mesh(grid: &OceanGrid) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, grid.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, grid.normals.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, grid.uvs.clone());
    mesh.insert_indices(Indices::U32(grid.indices.clone()));
    mesh
}

pub fn setup_ocean(
    mut commands: Commands,
    config: Res<OceanConfig>,
    assets: Res<GameAssets>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let grid = OceanGrid::new(&config);
    let mesh = meshes.add(build_mesh(&grid));

    // mirrored texcoords never leave [0, 1], clamp avoids bleeding at tile seams
    if let Some(image) = images.get_mut(&assets.waves) {
        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::ClampToEdge,
            address_mode_v: ImageAddressMode::ClampToEdge,
            ..ImageSamplerDescriptor::linear()
        });
    }

    commands.spawn((
        StateScoped(GameState::Game),
        OceanSurface,
        // the bounds are computed from the flat grid and go stale once it moves
        NoFrustumCulling,
        Mesh3d(mesh.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(assets.waves.clone()),
            perceptual_roughness: 0.3,
            reflectance: 0.6,
            ..default()
        })),
        Transform::from_xyz(0.0, config.sea_level, 0.0),
    ));

    info!(
        "Ocean surface ready: {} vertices, seed {}",
        grid.vertex_count(),
        config.seed
    );
    commands.insert_resource(WaveField::new(config.clone()));
    commands.insert_resource(Ocean { grid, mesh });
}

/// Applies edits made to the ocean config at runtime (from the inspector).
pub fn ocean_config_changed_system(
    config: Res<OceanConfig>,
    mut field: ResMut<WaveField>,
    mut ocean: ResMut<Ocean>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surface: Query<&mut Transform, With<OceanSurface>>,
) {
    if !config.is_changed() || *field.config() == *config {
        return;
    }
    let old = field.config().clone();
    *field = WaveField::new(config.clone());

    if old.resolution() != config.resolution()
        || old.span != config.span
        || old.texture_tiles != config.texture_tiles
    {
        ocean.grid = OceanGrid::new(&config);
        if let Some(mesh) = meshes.get_mut(&ocean.mesh) {
            *mesh = build_mesh(&ocean.grid);
        }
        debug!("Rebuilt ocean grid at resolution {}", ocean.grid.resolution());
    }
    for mut transform in surface.iter_mut() {
        transform.translation.y = config.sea_level;
    }
}

pub fn animate_ocean_system(
    time: Res<Time>,
    field: Res<WaveField>,
    mut ocean: ResMut<Ocean>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let ocean = ocean.as_mut();
    ocean.grid.update(&field, time.elapsed_secs());

    let Some(mesh) = meshes.get_mut(&ocean.mesh) else {
        return;
    };
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, ocean.grid.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, ocean.grid.normals.clone());
}
