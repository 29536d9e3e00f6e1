use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use bevy::transform::helper::TransformHelper;
use shared::physics::{OrientedBox, ShipColliders, TriangleMesh};

use super::models::{MaterialOverride, MaterialSlots, ModelEditor};
use crate::assets::GameAssets;
use crate::constants::*;
use crate::GameState;

#[derive(Component)]
pub struct ShipModel;

#[derive(Component)]
pub struct LadderModel;

// glTF material slots of ship.glb
const SHIP_SIDES: usize = 1;
const SHIP_MASTS: usize = 2;
const SHIP_DECK: usize = 3;
const SHIP_SAILS: usize = 4;

pub fn spawn_ship(mut commands: Commands, assets: Res<GameAssets>) {
    commands
        .spawn((
            StateScoped(GameState::Game),
            ShipModel,
            SceneRoot(assets.ship.clone()),
            Transform::from_translation(SHIP_TRANSLATION).with_scale(Vec3::splat(SHIP_SCALE)),
        ))
        .observe(on_ship_ready);

    commands
        .spawn((
            StateScoped(GameState::Game),
            LadderModel,
            SceneRoot(assets.ladder.clone()),
            Transform::from_translation(LADDER_TRANSLATION)
                .with_rotation(Quat::from_rotation_y(LADDER_YAW))
                .with_scale(Vec3::splat(LADDER_SCALE)),
        ))
        .observe(on_ladder_ready);
}

/// World-space triangles of one mesh entity.
fn mesh_triangles(
    mesh: &Mesh,
    transform: &GlobalTransform,
) -> Option<TriangleMesh> {
    let positions = mesh.attribute(Mesh::ATTRIBUTE_POSITION)?.as_float3()?;
    let triangles = match mesh.indices() {
        Some(indices) => TriangleMesh::from_indexed(positions, indices.iter(), &transform.affine()),
        None => TriangleMesh::from_indexed(positions, 0..positions.len(), &transform.affine()),
    };
    Some(triangles)
}

fn on_ship_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut editor: ModelEditor,
    assets: Res<GameAssets>,
    transform_helper: TransformHelper,
    mut colliders: ResMut<ShipColliders>,
) {
    let root = trigger.target();

    editor.randomize_uvs(root, &mut rand::thread_rng());
    let wood = MaterialOverride::texture(&assets.wood);
    editor.apply_overrides(
        &mut commands,
        root,
        &MaterialSlots::Indexed(vec![
            (SHIP_SIDES, wood.clone()),
            (SHIP_MASTS, wood.clone()),
            (SHIP_DECK, wood),
            (SHIP_SAILS, MaterialOverride::tinted(&assets.sail, Color::WHITE)),
        ]),
    );

    let mut hull = TriangleMesh::default();
    for (entity, handle, _) in editor.mesh_entities(root) {
        let transform = match transform_helper.compute_global_transform(entity) {
            Ok(transform) => transform,
            Err(e) => {
                warn!("Skipping ship mesh {:?}: {}", entity, e);
                continue;
            }
        };
        let Some(mesh) = editor.meshes.get(&handle) else {
            continue;
        };
        if let Some(triangles) = mesh_triangles(mesh, &transform) {
            hull.append(triangles);
        }
    }

    info!("Ship hull collider built from {} triangles", hull.len());
    colliders.hull.append(hull);
    colliders.hull_ready = true;
}

fn on_ladder_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut editor: ModelEditor,
    assets: Res<GameAssets>,
    transform_helper: TransformHelper,
    mut colliders: ResMut<ShipColliders>,
) {
    let root = trigger.target();

    editor.randomize_uvs(root, &mut rand::thread_rng());
    editor.apply_overrides(
        &mut commands,
        root,
        &MaterialSlots::All(MaterialOverride::texture(&assets.wood)),
    );

    // the climbable volume is the box around the ladder's first mesh
    let ladder = editor
        .mesh_entities(root)
        .into_iter()
        .find_map(|(entity, handle, _)| {
            let transform = transform_helper.compute_global_transform(entity).ok()?;
            let mesh = editor.meshes.get(&handle)?;
            let positions = mesh.attribute(Mesh::ATTRIBUTE_POSITION)?.as_float3()?;
            OrientedBox::from_local_points(
                positions.iter().map(|p| Vec3::from_array(*p)),
                transform.affine(),
            )
        });

    match ladder {
        Some(_) => info!("Ladder collider ready"),
        None => warn!("Ladder model has no mesh, climbing is disabled"),
    }
    colliders.ladder = ladder;
    colliders.ladder_ready = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::{Indices, PrimitiveTopology};
    use bevy::asset::RenderAssetUsages;
    use shared::physics::Collider;

    #[test]
    fn test_mesh_triangles_in_world_space() {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![[-1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [-1.0, 0.0, 1.0], [1.0, 0.0, 1.0]],
        );
        mesh.insert_indices(Indices::U16(vec![0, 2, 1, 1, 2, 3]));
        let transform = GlobalTransform::from(
            Transform::from_translation(SHIP_TRANSLATION).with_scale(Vec3::splat(SHIP_SCALE)),
        );

        let triangles = mesh_triangles(&mesh, &transform).unwrap();
        assert_eq!(triangles.len(), 2);

        let above = SHIP_TRANSLATION + Vec3::new(5.0, 10.0, -3.0);
        let hit = triangles.cast_ray(above, Vec3::NEG_Y, 100.0).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-3);

        // the deck is 24 units wide after scaling, a ray 13 units out misses
        let outside = SHIP_TRANSLATION + Vec3::new(13.0, 10.0, 0.0);
        assert!(triangles.cast_ray(outside, Vec3::NEG_Y, 100.0).is_none());
    }
}
