//! The jukebox and the sticker canvas standing on deck.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use shared::canvas::{Canvas, CanvasFrame};
use shared::interaction::{InteractTargets, Interactable};
use shared::jukebox::Jukebox;
use shared::physics::{OrientedBox, ShipColliders};
use shared::rewards::RewardCatalog;

use crate::constants::*;
use crate::GameState;

/// GPU image showing the canvas pixels.
#[derive(Resource)]
pub struct CanvasImage(pub Handle<Image>);

fn canvas_image(canvas: &Canvas) -> Image {
    let mut image = Image::new_fill(
        Extent3d {
            width: canvas.width(),
            height: canvas.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[255, 255, 255, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    image.data = Some(canvas.pixels().to_vec());
    image
}

fn jukebox_transform() -> Transform {
    Transform::from_translation(JUKEBOX_TRANSLATION)
}

fn canvas_transform() -> Transform {
    Transform::from_translation(CANVAS_TRANSLATION).with_rotation(Quat::from_rotation_y(CANVAS_YAW))
}

pub fn interact_targets(canvas_size: UVec2) -> InteractTargets {
    let half_canvas = CANVAS_SIZE_WORLD.extend(CANVAS_THICKNESS) / 2.0;
    InteractTargets {
        jukebox: Some(OrientedBox::new(
            -JUKEBOX_SIZE / 2.0,
            JUKEBOX_SIZE / 2.0,
            jukebox_transform().compute_affine(),
        )),
        canvas: Some(CanvasFrame {
            volume: OrientedBox::new(-half_canvas, half_canvas, canvas_transform().compute_affine()),
            size: canvas_size,
        }),
    }
}

pub fn spawn_props(
    mut commands: Commands,
    canvas: Res<Canvas>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut colliders: ResMut<ShipColliders>,
) {
    commands.spawn((
        StateScoped(GameState::Game),
        Interactable::Jukebox,
        Mesh3d(meshes.add(Cuboid::from_size(JUKEBOX_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.27, 0.07),
            emissive: LinearRgba::rgb(0.3, 0.1, 0.0),
            ..default()
        })),
        jukebox_transform(),
    ));

    let image = images.add(canvas_image(&canvas));
    commands
        .spawn((
            StateScoped(GameState::Game),
            Interactable::Canvas,
            Mesh3d(meshes.add(Rectangle::from_size(CANVAS_SIZE_WORLD))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(image.clone()),
                unlit: true,
                ..default()
            })),
            canvas_transform(),
        ))
        .with_child((
            Mesh3d(meshes.add(Cuboid::new(
                CANVAS_SIZE_WORLD.x + 0.2,
                CANVAS_SIZE_WORLD.y + 0.2,
                CANVAS_THICKNESS,
            ))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.35, 0.2, 0.1),
                ..default()
            })),
            // frame sits just behind the painted face
            Transform::from_xyz(0.0, 0.0, -CANVAS_THICKNESS / 2.0 - 0.01),
        ));

    // props block the player like the hull does
    let targets = interact_targets(UVec2::new(canvas.width(), canvas.height()));
    for (_, volume) in targets.iter() {
        colliders.hull.extend(volume.triangles());
    }

    commands.insert_resource(CanvasImage(image));
    commands.insert_resource(targets);
}

/// Uploads the canvas pixels whenever they change.
pub fn sync_canvas_image_system(
    canvas: Res<Canvas>,
    canvas_image: Option<Res<CanvasImage>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !canvas.is_changed() {
        return;
    }
    let Some(canvas_image) = canvas_image else {
        return;
    };
    if let Some(image) = images.get_mut(&canvas_image.0) {
        image.data = Some(canvas.pixels().to_vec());
    }
}

/// Currently playing jukebox track.
#[derive(Component)]
pub struct JukeboxTrack;

/// Starts the jukebox's current song whenever it changes.
pub fn jukebox_playback_system(
    mut commands: Commands,
    jukebox: Res<Jukebox>,
    catalog: Res<RewardCatalog>,
    tracks: Query<Entity, With<JukeboxTrack>>,
    #[cfg(feature = "audio")] asset_server: Res<AssetServer>,
) {
    if !jukebox.is_changed() {
        return;
    }
    for entity in tracks.iter() {
        commands.entity(entity).despawn();
    }
    let Some(song) = jukebox.current.and_then(|id| catalog.song(id)) else {
        return;
    };

    info!("Jukebox playing \"{}\"", song.title);

    #[cfg(feature = "audio")]
    commands.spawn((
        StateScoped(GameState::Game),
        JukeboxTrack,
        AudioPlayer::new(asset_server.load(song.path.clone())),
        PlaybackSettings::LOOP,
    ));
    #[cfg(not(feature = "audio"))]
    commands.spawn((StateScoped(GameState::Game), JukeboxTrack, Name::new(song.title.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::interaction::pick_interactable;

    #[test]
    fn test_canvas_faces_the_spawn_point() {
        let targets = interact_targets(UVec2::splat(256));
        let frame = targets.canvas.unwrap();
        let eye = Vec3::new(CANVAS_TRANSLATION.x, CANVAS_TRANSLATION.y, CANVAS_TRANSLATION.z - 4.0);
        let (kind, hit) = pick_interactable(eye, Vec3::Z, 6.0, targets.iter()).unwrap();
        assert_eq!(kind, Interactable::Canvas);

        let uv = frame.uv_at(hit.point).unwrap();
        assert!((uv - Vec2::splat(0.5)).length() < 1e-3);

        // a point up and to the viewer's right lands in the upper right quadrant
        let right = Vec3::Z.cross(Vec3::Y);
        let uv = frame.uv_at(hit.point + right * 0.5 + Vec3::Y * 0.5).unwrap();
        assert!(uv.x > 0.5 && uv.y < 0.5);
    }

    #[test]
    fn test_canvas_image_matches_canvas() {
        let canvas = Canvas::new(8, 4);
        let image = canvas_image(&canvas);
        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 4);
        assert_eq!(image.data.as_deref(), Some(canvas.pixels()));
    }
}
