//! Product viewers: one window, camera, light and model group per canvas
//!
//! Each viewer renders into its own `<canvas>` through a Bevy window, and
//! keeps its scene on a private render layer so viewers never see each
//! other's models or lights.

use bevy::camera::visibility::RenderLayers;
use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::window::{WindowEvent, WindowRef};
use std::f32::consts::PI;
use swanwoo_core::page::canvas_id;
use swanwoo_core::{LoadStatus, ModelPose, OrbitCamera, OrbitLimits, PageLayout, Pointer, PointerEvent, ViewerState};

use crate::app::SiteSettings;
use crate::input::ResetGeneration;

/// Initial camera placement
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 3.0];
pub const CAMERA_FOV_DEGREES: f32 = 50.0;
pub const MODEL_SCALE: f32 = 15.0;
/// Spotlight intensity in lumens
pub const SPOT_INTENSITY: f32 = 400_000.0;
pub const SPOT_OUTER_ANGLE: f32 = 0.4;

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_viewers)
            .add_systems(
                Update,
                (
                    track_pointer,
                    animate_models.after(track_pointer),
                    reset_cameras.run_if(resource_changed::<ResetGeneration>),
                    apply_orbit.after(reset_cameras),
                    propagate_render_layers,
                    deactivate_failed,
                ),
            );
    }
}

/// Entities making up one viewer, stored on its window entity
#[derive(Component, Debug)]
pub struct Viewer {
    pub camera: Entity,
    pub group: Entity,
    pub light: Entity,
    pub layer: usize,
}

#[derive(Component, Debug, Deref, DerefMut)]
pub struct ViewerStatus(pub ViewerState);

#[derive(Component, Debug, Deref, DerefMut)]
pub struct ViewerPose(pub ModelPose);

#[derive(Component, Debug, Deref, DerefMut)]
pub struct ViewerOrbit(pub OrbitCamera);

/// Parent of the spotlight and the model scene; receives the hover pose
#[derive(Component)]
pub struct ModelGroup;

/// Root of a spawned model scene; its descendants inherit its render layer
#[derive(Component)]
pub struct ModelRoot;

/// Base orientation of the product models (XYZ Euler)
pub fn model_base_rotation() -> Quat {
    let deg90 = PI / 2.0;
    Quat::from_euler(EulerRot::XYZ, deg90, -deg90, deg90 / 1.3)
}

/// Transform of a spawned model scene inside its group
pub fn model_transform() -> Transform {
    Transform::from_rotation(model_base_rotation()).with_scale(Vec3::splat(MODEL_SCALE))
}

/// Camera transform for an orbit state
pub fn orbit_transform(orbit: &OrbitCamera) -> Transform {
    Transform::from_translation(Vec3::from_array(orbit.eye())).looking_at(Vec3::from_array(orbit.target()), Vec3::Y)
}

/// Spotlight transform at a position, aimed at the group origin
pub fn light_transform(position: [f32; 3]) -> Transform {
    Transform::from_translation(Vec3::from_array(position)).looking_at(Vec3::ZERO, Vec3::Y)
}

/// Group transform for the current hover pose
pub fn group_transform(pose: &ModelPose) -> Transform {
    let [x, y, z] = pose.rotation();
    Transform::from_translation(Vec3::from_array(pose.position())).with_rotation(Quat::from_euler(EulerRot::XYZ, x, y, z))
}

fn spawn_viewers(mut commands: Commands, settings: Res<SiteSettings>) {
    let layout = PageLayout::from_config(&settings.0.grid);

    for (index, product) in layout.viewers() {
        // Layer 0 stays unused so nothing renders into a viewer by default
        let layer = index + 1;
        let layers = RenderLayers::layer(layer);

        let window = commands
            .spawn(Window {
                title: product.to_string(),
                canvas: Some(format!("#{}", canvas_id(product))),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: false,
                ..default()
            })
            .id();

        let orbit = OrbitCamera::new(CAMERA_EYE, [0.0; 3], OrbitLimits::default());
        let camera = commands
            .spawn((
                Camera3d::default(),
                Camera {
                    target: RenderTarget::Window(WindowRef::Entity(window)),
                    ..default()
                },
                Projection::Perspective(PerspectiveProjection {
                    fov: CAMERA_FOV_DEGREES.to_radians(),
                    ..default()
                }),
                orbit_transform(&orbit),
                layers.clone(),
            ))
            .id();

        let pose = ModelPose::neutral();
        let light = commands
            .spawn((
                SpotLight {
                    intensity: SPOT_INTENSITY,
                    outer_angle: SPOT_OUTER_ANGLE,
                    // Full penumbra
                    inner_angle: 0.0,
                    shadows_enabled: true,
                    ..default()
                },
                light_transform(pose.light()),
                layers.clone(),
            ))
            .id();

        let group = commands
            .spawn((
                ModelGroup,
                group_transform(&pose),
                Visibility::default(),
                layers,
            ))
            .add_child(light)
            .id();

        commands.entity(window).insert((
            Viewer {
                camera,
                group,
                light,
                layer,
            },
            ViewerStatus(ViewerState::new(product)),
            ViewerPose(pose),
            ViewerOrbit(orbit),
        ));

        tracing::info!("Viewer {} created on layer {}", product, layer);
    }
}

/// Hover and pointer position from the window event stream, in arrival order
fn track_pointer(
    mut events: MessageReader<WindowEvent>,
    windows: Query<&Window>,
    mut viewers: Query<&mut ViewerStatus>,
) {
    for event in events.read() {
        let (window, pointer_event) = match event {
            WindowEvent::CursorEntered(e) => (e.window, PointerEvent::Enter),
            WindowEvent::CursorLeft(e) => (e.window, PointerEvent::Leave),
            WindowEvent::CursorMoved(e) => {
                let Ok(surface) = windows.get(e.window) else {
                    continue;
                };
                let pointer = Pointer::from_cursor(e.position.x, e.position.y, surface.width(), surface.height());
                (e.window, PointerEvent::Move(pointer))
            }
            _ => continue,
        };
        if let Ok(mut status) = viewers.get_mut(window) {
            status.pointer_event(pointer_event);
        }
    }
}

/// Pull every loaded model toward its hover or neutral pose
fn animate_models(
    time: Res<Time>,
    mut viewers: Query<(&Viewer, &ViewerStatus, &mut ViewerPose)>,
    mut transforms: Query<&mut Transform>,
) {
    let delta = time.delta_secs();
    for (viewer, status, mut pose) in viewers.iter_mut() {
        if !status.animates() {
            continue;
        }
        pose.advance(status.is_hovered(), status.pointer(), delta);

        if let Ok(mut transform) = transforms.get_mut(viewer.group) {
            *transform = group_transform(&pose);
        }
        if let Ok(mut transform) = transforms.get_mut(viewer.light) {
            *transform = light_transform(pose.light());
        }
    }
}

/// Put every camera back to its initial placement when the page asks for it
fn reset_cameras(
    generation: Res<ResetGeneration>,
    mut viewers: Query<(&mut ViewerStatus, &mut ViewerOrbit)>,
) {
    for (mut status, mut orbit) in viewers.iter_mut() {
        if status.bypass_change_detection().take_reset(generation.0) {
            orbit.reset();
            tracing::info!("Camera reset for {} (generation {})", status.name(), generation.0);
        }
    }
}

fn apply_orbit(viewers: Query<(&Viewer, &ViewerOrbit), Changed<ViewerOrbit>>, mut transforms: Query<&mut Transform>) {
    for (viewer, orbit) in viewers.iter() {
        if let Ok(mut transform) = transforms.get_mut(viewer.camera) {
            *transform = orbit_transform(&orbit);
        }
    }
}

/// Scene instances spawn with the default layer; move them onto their viewer's
fn propagate_render_layers(
    mut commands: Commands,
    roots: Query<(Entity, &RenderLayers), With<ModelRoot>>,
    children: Query<&Children>,
    untagged: Query<(), Without<RenderLayers>>,
) {
    for (root, layers) in roots.iter() {
        for descendant in children.iter_descendants(root) {
            if untagged.contains(descendant) {
                commands.entity(descendant).insert(layers.clone());
            }
        }
    }
}

/// A failed viewer stops rendering; its canvas is hidden by the overlay
fn deactivate_failed(viewers: Query<(&Viewer, &ViewerStatus), Changed<ViewerStatus>>, mut cameras: Query<&mut Camera>) {
    for (viewer, status) in viewers.iter() {
        if !matches!(status.status(), LoadStatus::Failed(_)) {
            continue;
        }
        if let Ok(mut camera) = cameras.get_mut(viewer.camera) {
            if camera.is_active {
                camera.is_active = false;
                tracing::debug!("Camera disabled for {}", status.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_initial_camera_looks_at_origin() {
        let orbit = OrbitCamera::new(CAMERA_EYE, [0.0; 3], OrbitLimits::default());
        let transform = orbit_transform(&orbit);
        // Clamped onto the max distance along the (0, 2, 3) ray
        assert!((transform.translation.length() - 3.5).abs() < 1e-4);
        assert!(approx(transform.forward().as_vec3(), -transform.translation.normalize()));
    }

    #[test]
    fn test_neutral_group_is_identity() {
        let transform = group_transform(&ModelPose::neutral());
        assert!(approx(transform.translation, Vec3::ZERO));
        assert!(transform.rotation.angle_between(Quat::IDENTITY) < 1e-4);
    }

    #[test]
    fn test_model_transform() {
        let transform = model_transform();
        assert_eq!(transform.scale, Vec3::splat(15.0));
        // Rotations apply about X, then the new Y, then the new Z
        let expected = Quat::from_rotation_x(PI / 2.0) * Quat::from_rotation_y(-PI / 2.0) * Quat::from_rotation_z(PI / 2.6);
        assert!(transform.rotation.angle_between(expected) < 1e-4);
    }

    #[test]
    fn test_failed_viewer_leaves_sibling_camera_active() {
        let mut app = App::new();
        app.add_systems(Update, deactivate_failed);

        let spawn_viewer = |app: &mut App, product: &str, layer: usize| {
            let camera = app.world_mut().spawn(Camera::default()).id();
            let group = app.world_mut().spawn_empty().id();
            let light = app.world_mut().spawn_empty().id();
            let window = app
                .world_mut()
                .spawn((
                    Viewer {
                        camera,
                        group,
                        light,
                        layer,
                    },
                    ViewerStatus(ViewerState::new(product)),
                ))
                .id();
            (window, camera)
        };
        let (broken, broken_camera) = spawn_viewer(&mut app, "BigMuff", 1);
        let (sibling, sibling_camera) = spawn_viewer(&mut app, "FuzzFactory", 2);

        app.world_mut().get_mut::<ViewerStatus>(broken).unwrap().model_failed("asset load failed");
        app.world_mut().get_mut::<ViewerStatus>(sibling).unwrap().model_loaded();
        app.update();

        assert!(!app.world().get::<Camera>(broken_camera).unwrap().is_active);
        assert!(app.world().get::<Camera>(sibling_camera).unwrap().is_active);
        assert!(app.world().get::<ViewerStatus>(sibling).unwrap().animates());
    }

    #[test]
    fn test_rest_light_aims_at_group_origin() {
        let transform = light_transform(swanwoo_core::pose::REST_LIGHT);
        assert!(approx(transform.translation, Vec3::new(0.0, 4.0, 2.0)));
        assert!(approx(transform.forward().as_vec3(), -transform.translation.normalize()));
    }
}
