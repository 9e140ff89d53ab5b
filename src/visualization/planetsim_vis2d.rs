use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::simulation::engine::SimulationEngine;
use crate::simulation::states::{NVec2, SimulationState};

/// Engine as a bevy resource, shared by the viewer and the headless runner
#[derive(Resource)]
pub struct Simulation {
    pub engine: SimulationEngine,
    pub halted: bool, // set after a failed step until the next reset
}

#[derive(Component)]
struct BodyIndex(pub usize);

/// Visual diameter in simulation units; the core only knows the mass
pub fn body_diameter(mass: f64) -> f32 {
    10.0 * (mass.sqrt() as f32)
}

/// Canvas coordinates (origin top-left, y down) -> bevy world (origin centre, y up)
pub fn canvas_to_world(x: NVec2, extent: [f64; 2], scale: f32) -> Vec2 {
    Vec2::new(
        ((x.x - 0.5 * extent[0]) as f32) * scale,
        ((0.5 * extent[1] - x.y) as f32) * scale,
    )
}

pub fn run_2d(engine: SimulationEngine) {
    let fps = engine.config().driver.fps;
    let n = engine.state().map_or(0, SimulationState::len);
    info!("run_2d: starting Bevy 2D viewer with {n} bodies at {fps} steps/s");

    App::new()
        .insert_resource(Simulation { engine, halted: false })
        .insert_resource(Time::<Fixed>::from_hz(fps))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(Update, (reset_system, sync_transforms_system).chain())
        .run();
}

fn setup_bodies_system(mut commands: Commands, sim: Res<Simulation>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());
    spawn_body_meshes(&mut commands, &sim, &mut meshes, &mut materials);
}

fn spawn_body_meshes(commands: &mut Commands, sim: &Simulation, meshes: &mut Assets<Mesh>, materials: &mut Assets<ColorMaterial>) {
    let Some(state) = sim.engine.state() else {
        return;
    };
    let extent = sim.engine.config().simulation.spatial_extent;
    let scale = sim.engine.config().driver.scale;

    for (i, body) in state.bodies().iter().enumerate() {
        let radius_screen = 0.5 * body_diameter(body.mass()) * scale;
        let at = canvas_to_world(body.position(), extent, scale);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_xyz(at.x, at.y, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut sim: ResMut<Simulation>) {
    if sim.halted {
        return;
    }
    if let Err(e) = sim.engine.step().map(|_| ()) {
        error!("simulation halted: {e}; press R to reset");
        sim.halted = true;
    }
}

/// `R` or a left click throws the current bodies away and samples new ones
fn reset_system(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut sim: ResMut<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<Entity, With<BodyIndex>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) && !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    if let Err(e) = sim.engine.reset() {
        error!("reset failed: {e}");
        return;
    }
    sim.halted = false;

    for entity in &query {
        commands.entity(entity).despawn();
    }
    spawn_body_meshes(&mut commands, &sim, &mut meshes, &mut materials);
}

fn sync_transforms_system(sim: Res<Simulation>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let Some(state) = sim.engine.state() else {
        return;
    };
    let extent = sim.engine.config().simulation.spatial_extent;
    let scale = sim.engine.config().driver.scale;

    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = state.body(*i) {
            let at = canvas_to_world(b.position(), extent, scale);
            transform.translation.x = at.x;
            transform.translation.y = at.y;
        }
    }
}
