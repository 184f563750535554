use std::sync::Arc;

use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
    tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future},
};

use crate::{
    error::{FieldError, Result},
    mesh::{GeneratedMesh, build_view_mesh},
    sampler::{FieldSampler, ViewKind},
    types::{ScalarField3D, Value},
    view::FieldView,
};

/// System sets for the field view pipeline.
///
/// Use these to order your own systems relative to sampling:
///
/// ```rust,ignore
/// // Inspect or recolor geometry after sampling but before it's uploaded:
/// app.add_systems(Update, tint_mesh.after(FieldViewSet::Generate)
///                                  .before(FieldViewSet::Upload));
/// ```
///
/// ```text
/// FieldViewSet::Spawn   →  [async compute]  →  FieldViewSet::Generate  →  [your systems]  →  FieldViewSet::Upload
/// ```
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldViewSet {
    /// Spawns an async compute task for each queued view.
    Spawn,
    /// Polls async tasks and inserts [`GeneratedMesh`] on completion.
    Generate,
    /// Uploads [`GeneratedMesh`] data into a Bevy [`Mesh3d`] and removes [`GeneratedMesh`].
    Upload,
}

/// Marker component added to [`FieldView`] entities that are waiting to be sampled.
///
/// Removed once the view's mesh has been uploaded, or once sampling found nothing to draw.
#[derive(Component)]
pub struct QueuedView;

/// Holds the in-flight async compute task for a [`FieldView`].
#[derive(Component)]
pub struct ComputeTask(Task<Result<GeneratedMesh>>);

/// Runtime configuration for the field view pipeline.
///
/// Inserted as a resource by [`FieldViewPlugin`]. Changes apply to views sampled afterwards:
///
/// ```rust,ignore
/// fn my_system(mut config: ResMut<FieldViewConfig>) {
///     config.sampler.axis_convention = AxisConvention::Identity;
/// }
/// ```
#[derive(Resource, Clone)]
pub struct FieldViewConfig {
    /// Maximum number of sampling tasks spawned per frame. Default: `4`.
    pub max_tasks_per_frame: usize,
    /// Edge length of the cube drawn for each point, in cells. Default: `0.6`.
    pub point_size: Value,
    /// Gradients and axis convention used for every view.
    pub sampler: FieldSampler,
}

impl Default for FieldViewConfig {
    fn default() -> Self {
        Self {
            max_tasks_per_frame: 4,
            point_size: 0.6,
            sampler: FieldSampler::default(),
        }
    }
}

/// Bevy plugin that samples [`FieldView`]s and draws them as colored cube meshes.
///
/// With the `auto_queue` feature enabled, any added or modified [`FieldView`] is
/// (re)sampled on Bevy's `AsyncComputeTaskPool`:
///
/// ```text
/// FieldView added or changed
///   → Name + QueuedView inserted    (queue_changed_views)
///   → ComputeTask spawned           (FieldViewSet::Spawn)
///   → [async compute runs]
///   → GeneratedMesh inserted        (FieldViewSet::Generate, once task completes)
///   → Mesh3d inserted               (FieldViewSet::Upload)
///   → QueuedView + GeneratedMesh removed
/// ```
///
/// Without `auto_queue`, insert [`QueuedView`] yourself to request sampling.
#[derive(Default)]
pub struct FieldViewPlugin {
    /// Initial value for the [`FieldViewConfig`] resource.
    pub config: FieldViewConfig,
}

impl Plugin for FieldViewPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .configure_sets(
                Update,
                (
                    FieldViewSet::Spawn,
                    FieldViewSet::Generate,
                    FieldViewSet::Upload,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    spawn_view_tasks.in_set(FieldViewSet::Spawn),
                    poll_view_tasks.in_set(FieldViewSet::Generate),
                    upload_mesh.in_set(FieldViewSet::Upload),
                ),
            );

        #[cfg(feature = "auto_queue")]
        app.add_systems(Update, queue_changed_views.before(FieldViewSet::Spawn));
    }
}

/// Queues every added or modified [`FieldView`], cancelling a stale in-flight task.
///
/// Views without a [`Name`] are named after their [`ViewKind`].
#[cfg(feature = "auto_queue")]
fn queue_changed_views(
    mut commands: Commands,
    query: Query<(Entity, &FieldView, Has<Name>), Changed<FieldView>>,
) {
    for (entity, view, named) in query.iter() {
        let mut entity = commands.entity(entity);
        // Dropping the task cancels it.
        entity.remove::<ComputeTask>().insert(QueuedView);
        if !named {
            entity.insert(Name::new(view.title()));
        }
    }
}

/// Spawns sampling tasks for [`QueuedView`]s, up to [`FieldViewConfig::max_tasks_per_frame`] per frame.
fn spawn_view_tasks(
    mut commands: Commands,
    config: Res<FieldViewConfig>,
    query: Query<(Entity, &FieldView), (With<QueuedView>, Without<ComputeTask>)>,
) {
    let task_pool = AsyncComputeTaskPool::get();

    for (entity, view) in query.iter().take(config.max_tasks_per_frame) {
        let field: Arc<ScalarField3D> = Arc::clone(&view.field);
        let kind = view.kind;
        let sampler = config.sampler;
        let point_size = config.point_size;

        let task =
            task_pool.spawn(async move { run_sampling(&field, kind, sampler, point_size) });

        commands.entity(entity).insert(ComputeTask(task));
    }
}

/// Polls in-flight [`ComputeTask`]s and inserts [`GeneratedMesh`] on success.
///
/// A view that selected nothing is dequeued and loses the [`Mesh3d`] of its previous field.
fn poll_view_tasks(mut commands: Commands, mut query: Query<(Entity, &mut ComputeTask)>) {
    for (entity, mut compute_task) in query.iter_mut() {
        let Some(result) = block_on(future::poll_once(&mut compute_task.0)) else {
            continue;
        };

        let mut entity = commands.entity(entity);
        entity.remove::<ComputeTask>();
        match result {
            Ok(generated_mesh) => {
                entity.insert(generated_mesh);
            }
            Err(FieldError::EmptyMesh) => {
                debug!("Field view {:?} selected no cells", entity.id());
                entity.remove::<(QueuedView, Mesh3d)>();
            }
            Err(err) => {
                warn!("Field view {:?} could not be sampled: {err}", entity.id());
                entity.remove::<QueuedView>();
            }
        }
    }
}

/// Uploads a [`GeneratedMesh`] into a Bevy [`Mesh3d`], then removes [`GeneratedMesh`] and [`QueuedView`].
///
/// Views without a material get an unlit white one so vertex colors show as sampled.
fn upload_mesh(
    mut commands: Commands,
    mut query: Query<
        (Entity, &mut GeneratedMesh, Has<MeshMaterial3d<StandardMaterial>>),
        With<QueuedView>,
    >,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut generated, has_material) in query.iter_mut() {
        let generated = std::mem::take(&mut *generated);
        let mut bevy_mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        );

        bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, generated.vertices);
        bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, generated.normals);
        bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, generated.colors);
        bevy_mesh.insert_indices(Indices::U32(generated.indices));

        let mut entity = commands.entity(entity);
        entity
            .insert(Mesh3d(meshes.add(bevy_mesh)))
            .remove::<(GeneratedMesh, QueuedView)>();
        if !has_material {
            entity.insert(MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..default()
            })));
        }
    }
}

/// Samples `field` for `kind` and builds its cube mesh.
fn run_sampling(
    field: &ScalarField3D,
    kind: ViewKind,
    sampler: FieldSampler,
    point_size: Value,
) -> Result<GeneratedMesh> {
    let view = sampler.sample(kind, field)?;
    build_view_mesh(&view, sampler.axis_convention, point_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_builds_one_cube_per_finite_cell() {
        let mut field = ScalarField3D::from_elem((4, 4, 4), Value::INFINITY);
        field[[0, 0, 0]] = -1.0;
        field[[3, 3, 3]] = 2.0;
        let mesh =
            run_sampling(&field, ViewKind::FinitePoints, FieldSampler::default(), 0.6).unwrap();
        assert_eq!(mesh.vertices.len(), 2 * 24);
        assert_eq!(mesh.colors.len(), mesh.vertices.len());
    }

    #[test]
    fn sampling_nothing_is_an_empty_mesh() {
        let field = ScalarField3D::ones((3, 3, 3));
        let result = run_sampling(
            &field,
            ViewKind::BoundaryVoxels { threshold: 0.5 },
            FieldSampler::default(),
            0.6,
        );
        assert_eq!(result.unwrap_err(), FieldError::EmptyMesh);
    }

    /// Runs frames until `done` holds, giving async tasks time to finish.
    #[cfg(feature = "auto_queue")]
    fn update_until(app: &mut App, done: impl Fn(&World) -> bool) -> bool {
        for _ in 0..200 {
            app.update();
            if done(app.world()) {
                return true;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        false
    }

    #[cfg(feature = "auto_queue")]
    #[test]
    fn resample_to_empty_selection_drops_old_mesh() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), FieldViewPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>();

        let entity = app
            .world_mut()
            .spawn(
                FieldView::new(ScalarField3D::zeros((2, 2, 2)))
                    .with_kind(ViewKind::BoundaryVoxels { threshold: 0.5 }),
            )
            .id();

        assert!(update_until(&mut app, |world| {
            world.get::<Mesh3d>(entity).is_some() && world.get::<QueuedView>(entity).is_none()
        }));
        let world = app.world();
        let handle = &world.get::<Mesh3d>(entity).unwrap().0;
        let mesh = world.resource::<Assets<Mesh>>().get(handle).unwrap();
        assert_eq!(mesh.count_vertices(), 8 * 24);
        assert!(world.get::<MeshMaterial3d<StandardMaterial>>(entity).is_some());

        app.world_mut()
            .get_mut::<FieldView>(entity)
            .unwrap()
            .for_each_cell(|_, _, _, v| *v = 9.0);

        assert!(update_until(&mut app, |world| {
            world.get::<QueuedView>(entity).is_none() && world.get::<ComputeTask>(entity).is_none()
        }));
        assert!(app.world().get::<Mesh3d>(entity).is_none());
        assert!(app.world().get::<GeneratedMesh>(entity).is_none());
    }

    #[cfg(feature = "auto_queue")]
    #[test]
    fn added_view_is_named_and_queued() {
        let mut app = App::new();
        app.add_systems(Update, queue_changed_views);
        let entity = app
            .world_mut()
            .spawn(FieldView::new(ScalarField3D::zeros((2, 2, 2))).with_kind(ViewKind::FiniteVoxels))
            .id();

        app.update();

        let world = app.world();
        assert!(world.get::<QueuedView>(entity).is_some());
        assert_eq!(
            world.get::<Name>(entity).map(|n| n.as_str()),
            Some("Finite SDF with voxels")
        );
    }
}
