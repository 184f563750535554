use bevy::prelude::*;
use bevy_field_view::{FieldView, FieldViewPlugin, ViewKind, types::ScalarField3D};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use noiz::prelude::*;

const RESOLUTION: usize = 32;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            FieldViewPlugin::default(),
            PanOrbitCameraPlugin,
        ))
        .add_systems(Startup, setup)
        .add_systems(Update, reseed)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            ..default()
        },
        Transform::from_xyz(-40.0, 45.0, -40.0).looking_at(Vec3::splat(RESOLUTION as f32 / 2.0), Vec3::Y),
    ));

    commands.spawn(
        FieldView::new(noise_field(0)).with_kind(ViewKind::BoundaryVoxels { threshold: 0.0 }),
    );
}

/// Press Space to regenerate the field; the plugin resamples changed views.
fn reseed(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut seed: Local<u32>,
    mut query: Query<&mut FieldView>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }
    *seed += 1;
    for mut view in query.iter_mut() {
        let field = noise_field(*seed);
        view.for_each_cell(|x, y, z, value| *value = field[[x, y, z]]);
    }
}

fn noise_field(seed: u32) -> ScalarField3D {
    let mut noise = Noise::<
        LayeredNoise<
            Normed<f32>,
            Persistence,
            Octave<MixCellGradients<OrthoGrid, Smoothstep, QuickGradients>>,
        >,
    >::default();
    noise.set_frequency(0.08);

    ScalarField3D::from_shape_fn(
        (RESOLUTION, RESOLUTION, RESOLUTION),
        |(x, y, z)| {
            // Each seed samples a different region of the same noise.
            let offset = seed as f32 * 1000.0;
            noise.sample_for(Vec3::new(x as f32 + offset, y as f32, z as f32))
        },
    )
}
