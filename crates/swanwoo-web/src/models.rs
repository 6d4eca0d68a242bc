//! glTF model loading for the product viewers

use bevy::asset::LoadState;
use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;
use std::collections::HashMap;
use swanwoo_core::ProductAssets;

use crate::app::SiteSettings;
use crate::viewer::{model_transform, ModelRoot, Viewer, ViewerStatus};

pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelCache>()
            .add_systems(PostStartup, request_models)
            .add_systems(Update, load_models);
    }
}

/// glTF handles still loading, keyed by viewer entity
#[derive(Resource, Default)]
pub struct ModelCache {
    pub loading: HashMap<Entity, (String, Handle<Gltf>)>,
}

/// Scene to instance from a loaded glTF: the default scene, else the first
pub fn pick_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned())
}

fn request_models(
    mut cache: ResMut<ModelCache>,
    asset_server: Res<AssetServer>,
    settings: Res<SiteSettings>,
    viewers: Query<(Entity, &ViewerStatus), With<Viewer>>,
) {
    for (entity, status) in viewers.iter() {
        let path = ProductAssets::new(&settings.0.assets.base, status.name()).model_path();
        tracing::info!("Loading model for {}: {}", status.name(), path);
        let handle: Handle<Gltf> = asset_server.load(path.clone());
        cache.loading.insert(entity, (path, handle));
    }
}

/// Check loading state and instance the scenes of loaded models
fn load_models(
    mut commands: Commands,
    mut cache: ResMut<ModelCache>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    mut viewers: Query<(&Viewer, &mut ViewerStatus)>,
) {
    if cache.loading.is_empty() {
        return;
    }

    let mut finished = Vec::new();
    for (entity, (path, handle)) in cache.loading.iter() {
        let outcome = match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => match gltf_assets.get(handle).and_then(pick_scene) {
                Some(scene) => Ok(scene),
                None => Err(format!("{} has no scene", path)),
            },
            Some(LoadState::Failed(e)) => Err(e.to_string()),
            // Still loading
            _ => continue,
        };
        finished.push(*entity);

        // The viewer may have gone away while the asset was in flight
        let Ok((viewer, mut status)) = viewers.get_mut(*entity) else {
            tracing::debug!("Dropping model {} for a removed viewer", path);
            continue;
        };

        match outcome {
            Ok(scene) => {
                let root = commands
                    .spawn((
                        SceneRoot(scene),
                        model_transform(),
                        ModelRoot,
                        RenderLayers::layer(viewer.layer),
                    ))
                    .id();
                commands.entity(viewer.group).add_child(root);
                status.model_loaded();
                tracing::info!("Model loaded for {}", status.name());
            }
            Err(reason) => status.model_failed(reason),
        }
    }

    for entity in finished {
        cache.loading.remove(&entity);
    }
}
