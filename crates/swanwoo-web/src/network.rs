//! Product spec fetching

use bevy::prelude::*;
use std::sync::{Arc, Mutex};
use swanwoo_core::{ProductAssets, ProductSpec, SpecError};

use crate::app::SiteSettings;
use crate::viewer::{Viewer, ViewerStatus};

pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingSpecs>()
            .add_systems(PostStartup, request_specs)
            .add_systems(Update, receive_specs);
    }
}

/// Completed spec fetches waiting to be applied, filled by async tasks
#[derive(Resource, Default, Clone)]
pub struct PendingSpecs(pub Arc<Mutex<Vec<(Entity, Result<ProductSpec, SpecError>)>>>);

fn request_specs(
    settings: Res<SiteSettings>,
    pending: Res<PendingSpecs>,
    viewers: Query<(Entity, &ViewerStatus), With<Viewer>>,
) {
    for (entity, status) in viewers.iter() {
        let url = ProductAssets::new(&settings.0.assets.base, status.name()).spec_url();
        fetch_spec(entity, url, &pending);
    }
}

#[cfg(target_arch = "wasm32")]
fn fetch_spec(viewer: Entity, url: String, pending: &PendingSpecs) {
    use wasm_bindgen_futures::spawn_local;

    let pending_clone = pending.0.clone();

    spawn_local(async move {
        tracing::debug!("Fetching spec from: {}", url);
        let result = request_spec(&url).await;
        if let Ok(mut queue) = pending_clone.lock() {
            queue.push((viewer, result));
        }
    });
}

#[cfg(target_arch = "wasm32")]
async fn request_spec(url: &str) -> Result<ProductSpec, SpecError> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| SpecError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    if !response.ok() {
        return Err(SpecError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let text = response.text().await.map_err(|e| SpecError::Request {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    ProductSpec::from_json(&text)
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_spec(viewer: Entity, url: String, pending: &PendingSpecs) {
    if let Ok(mut queue) = pending.0.lock() {
        queue.push((
            viewer,
            Err(SpecError::Request {
                url,
                reason: "no browser available".to_string(),
            }),
        ));
    }
}

/// Hand finished fetches to their viewers
fn receive_specs(pending: Res<PendingSpecs>, mut viewers: Query<&mut ViewerStatus>) {
    // A contended queue is simply picked up next frame
    let results: Vec<_> = match pending.0.try_lock() {
        Ok(mut queue) if !queue.is_empty() => queue.drain(..).collect(),
        _ => return,
    };

    for (entity, result) in results {
        match viewers.get_mut(entity) {
            Ok(mut status) => status.spec_fetched(result),
            Err(_) => tracing::debug!("Discarding spec for a removed viewer"),
        }
    }
}
