use bevy::prelude::*;
use bevy_field_view::{FieldView, FieldViewPlugin, ViewKind, types::Point};
use bevy_infinite_grid::{InfiniteGridBundle, InfiniteGridPlugin};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

const RESOLUTION: usize = 32;
const BAND: f32 = 3.0;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            FieldViewPlugin::default(),
            PanOrbitCameraPlugin,
            InfiniteGridPlugin,
        ))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(InfiniteGridBundle::default());

    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera::default(),
        Transform::from_xyz(-40.0, 45.0, -40.0).looking_at(Vec3::splat(RESOLUTION as f32 / 2.0), Vec3::Y),
    ));

    // Signed distance to a torus, only kept inside a narrow band around the surface.
    let center = (RESOLUTION / 2) as f32;
    let function = move |p: Point| {
        let q = (p.x - center).hypot(p.z - center) - 9.0;
        let distance = q.hypot(p.y - center) - 4.0;
        if distance.abs() <= BAND {
            distance
        } else {
            f32::INFINITY
        }
    };

    let view = FieldView::from_fn((RESOLUTION, RESOLUTION, RESOLUTION), &function);
    let field = view.field.clone();

    commands.spawn((
        view.with_kind(ViewKind::FinitePoints),
        Name::new("Finite SDF"),
    ));
    commands.spawn((
        FieldView::from_arc(field).with_kind(ViewKind::FiniteVoxels),
        Transform::from_xyz(0.0, 0.0, RESOLUTION as f32 * 1.5),
    ));
}
