//! Post-processing of loaded glTF scenes: texture overrides per material slot
//! and noise texcoords for the hand-modeled props.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

/// Index of a glTF material, taken from its asset label (`Material3`).
pub fn gltf_material_index(
    asset_server: &AssetServer,
    handle: &Handle<StandardMaterial>,
) -> Option<usize> {
    let path = asset_server.get_path(handle.id())?;
    let label = path.label()?.strip_prefix("Material")?;
    let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// How one material slot of a model is retextured.
#[derive(Clone)]
pub struct MaterialOverride {
    pub texture: Option<Handle<Image>>,
    pub base_color: Option<Color>,
}

impl MaterialOverride {
    pub fn texture(texture: &Handle<Image>) -> Self {
        Self {
            texture: Some(texture.clone()),
            base_color: None,
        }
    }

    pub fn tinted(texture: &Handle<Image>, base_color: Color) -> Self {
        Self {
            texture: Some(texture.clone()),
            base_color: Some(base_color),
        }
    }

    pub fn color(base_color: Color) -> Self {
        Self {
            texture: None,
            base_color: Some(base_color),
        }
    }
}

/// Which override applies to a given material slot.
pub enum MaterialSlots {
    /// Every material in the model.
    All(MaterialOverride),
    /// Only the listed glTF material indices.
    Indexed(Vec<(usize, MaterialOverride)>),
}

impl MaterialSlots {
    fn get(&self, index: Option<usize>) -> Option<&MaterialOverride> {
        match self {
            MaterialSlots::All(o) => Some(o),
            MaterialSlots::Indexed(slots) => {
                let index = index?;
                slots.iter().find(|(i, _)| *i == index).map(|(_, o)| o)
            }
        }
    }
}

#[derive(SystemParam)]
pub struct ModelEditor<'w, 's> {
    pub asset_server: Res<'w, AssetServer>,
    pub children: Query<'w, 's, &'static Children>,
    pub mesh_query: Query<
        'w,
        's,
        (
            Entity,
            &'static Mesh3d,
            Option<&'static MeshMaterial3d<StandardMaterial>>,
        ),
    >,
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl ModelEditor<'_, '_> {
    /// Every mesh entity below `root`, with its glTF material index.
    pub fn mesh_entities(&self, root: Entity) -> Vec<(Entity, Handle<Mesh>, Option<usize>)> {
        self.children
            .iter_descendants(root)
            .filter_map(|entity| self.mesh_query.get(entity).ok())
            .map(|(entity, mesh, material)| {
                let index = material
                    .and_then(|m| gltf_material_index(&self.asset_server, &m.0));
                (entity, mesh.0.clone(), index)
            })
            .collect()
    }

    /// Swaps the materials below `root` for retextured copies. Returns the
    /// entities whose material was replaced, with the glTF index.
    pub fn apply_overrides(
        &mut self,
        commands: &mut Commands,
        root: Entity,
        slots: &MaterialSlots,
    ) -> Vec<(Entity, Option<usize>)> {
        let mut replaced: HashMap<AssetId<StandardMaterial>, Handle<StandardMaterial>> =
            HashMap::new();
        let mut touched = Vec::new();

        let targets: Vec<_> = self
            .children
            .iter_descendants(root)
            .filter_map(|entity| self.mesh_query.get(entity).ok())
            .filter_map(|(entity, _, material)| material.map(|m| (entity, m.0.clone())))
            .collect();

        for (entity, handle) in targets {
            let index = gltf_material_index(&self.asset_server, &handle);
            let Some(slot) = slots.get(index) else {
                continue;
            };
            let new_handle = match replaced.get(&handle.id()) {
                Some(h) => h.clone(),
                None => {
                    let mut material = self.materials.get(&handle).cloned().unwrap_or_default();
                    if let Some(texture) = &slot.texture {
                        material.base_color_texture = Some(texture.clone());
                    }
                    if let Some(color) = slot.base_color {
                        material.base_color = color;
                    }
                    let h = self.materials.add(material);
                    replaced.insert(handle.id(), h.clone());
                    h
                }
            };
            commands.entity(entity).insert(MeshMaterial3d(new_handle));
            touched.push((entity, index));
        }
        touched
    }

    /// Replaces the texcoords of every mesh below `root` with uniform noise,
    /// quantized to 1/255 steps.
    pub fn randomize_uvs(&mut self, root: Entity, rng: &mut impl Rng) {
        let handles: Vec<Handle<Mesh>> = self
            .mesh_entities(root)
            .into_iter()
            .map(|(_, mesh, _)| mesh)
            .collect();
        for handle in handles {
            let Some(mesh) = self.meshes.get_mut(&handle) else {
                continue;
            };
            let uvs = random_uvs(mesh.count_vertices(), rng);
            mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        }
    }
}

pub fn random_uvs(count: usize, rng: &mut impl Rng) -> Vec<[f32; 2]> {
    (0..count)
        .map(|_| {
            [
                rng.gen_range(0..=255) as f32 / 255.0,
                rng.gen_range(0..=255) as f32 / 255.0,
            ]
        })
        .collect()
}
