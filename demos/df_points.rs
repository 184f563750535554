use bevy::prelude::*;
use bevy_field_view::{FieldView, FieldViewPlugin, ViewKind, types::Point};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

const RESOLUTION: usize = 32;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            FieldViewPlugin::default(),
            PanOrbitCameraPlugin,
        ))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    bevy::log::info!("Distance field point cloud");

    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera::default(),
        Transform::from_xyz(-40.0, 45.0, -40.0).looking_at(Vec3::splat(RESOLUTION as f32 / 2.0), Vec3::Y),
    ));

    // Unsigned distance to a sphere shell.
    let center = (RESOLUTION / 2) as f32;
    let function = move |p: Point| {
        let distance = (p.x - center).hypot(p.y - center).hypot(p.z - center);
        (distance - RESOLUTION as f32 / 4.0).abs()
    };

    let view = FieldView::from_fn((RESOLUTION, RESOLUTION, RESOLUTION), &function);
    let field = view.field.clone();

    commands.spawn(view.with_kind(ViewKind::BoundaryPoints { threshold: 0.5 }));
    commands.spawn((
        FieldView::from_arc(field).with_kind(ViewKind::BoundaryVoxels { threshold: 0.5 }),
        Transform::from_xyz(RESOLUTION as f32 * 1.5, 0.0, 0.0),
    ));
}
