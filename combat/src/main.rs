//! Headless combat demo
//!
//! Runs the weapon simulation against stand-ins for the external layers:
//! a fixed aim point, a scripted trigger finger, and an animation layer that
//! simply plays every cue to completion. Useful for watching the fire loop,
//! ricochets, and a weapon switch in the logs.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use combat::{
    Actor, ActorPosition, AimTarget, AnimationRequest, AnimationState, ColliderShape, CombatPlugin,
    EquipRequest, LookOrientation, SceneColliders, TrailRegistry, WeaponChanged, WeaponSlots,
};
use shared::{ColliderId, WeaponKind};

const TICK_HZ: f64 = 60.0;
/// Stand-in animation layer plays everything at this speed (1 / seconds).
const ANIMATION_SPEED: f32 = 2.5;

fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}

/// Scripted inputs for the demo run
#[derive(Resource, Default)]
struct DemoScript {
    elapsed: f32,
    firing_started: bool,
    switch_requested: bool,
}

/// Register a shooting-range scene: a back wall and a target sphere.
fn setup_scene(mut commands: Commands) {
    let mut scene = SceneColliders::default();
    scene.add(
        ColliderId(1),
        ColliderShape::Aabb {
            min: Vec3::new(-20.0, 0.0, -41.0),
            max: Vec3::new(20.0, 10.0, -40.0),
        },
    );
    scene.add(
        ColliderId(2),
        ColliderShape::Sphere {
            center: Vec3::new(0.0, 1.4, -25.0),
            radius: 0.8,
        },
    );
    info!("scene ready: back wall and target sphere");
    commands.insert_resource(scene);
}

/// Spawn the actor and hand it a rifle.
fn spawn_actor(mut commands: Commands, mut requests: MessageWriter<EquipRequest>) {
    let actor = commands
        .spawn((
            Actor,
            ActorPosition(Vec3::ZERO),
            LookOrientation::default(),
            AimTarget(Vec3::new(0.0, 1.4, -25.0)),
            AnimationState::default(),
            WeaponSlots::default(),
        ))
        .id();

    requests.write(EquipRequest {
        actor,
        definition: Arc::new(WeaponKind::Rifle.definition()),
    });
}

/// Stand-in for the external animation layer: restart on every cue, then
/// advance playback toward completion.
fn drive_animation_layer(
    time: Res<Time>,
    mut requests: MessageReader<AnimationRequest>,
    mut actors: Query<&mut AnimationState>,
) {
    for request in requests.read() {
        if let Ok(mut state) = actors.get_mut(request.actor) {
            state.normalized_time = 0.0;
        }
        info!("animation cue for {:?}: {:?}", request.actor, request.cue);
    }

    for mut state in actors.iter_mut() {
        state.normalized_time =
            (state.normalized_time + time.delta_secs() * ANIMATION_SPEED).min(1.0);
    }
}

/// Scripted trigger finger: fire the rifle, then switch to the pistol.
fn run_script(
    time: Res<Time>,
    mut script: ResMut<DemoScript>,
    mut actors: Query<(Entity, &mut WeaponSlots)>,
    mut requests: MessageWriter<EquipRequest>,
    trails: Res<TrailRegistry>,
    mut exit: MessageWriter<AppExit>,
) {
    script.elapsed += time.delta_secs();

    let Ok((actor, mut slots)) = actors.single_mut() else {
        return;
    };

    if script.elapsed > 1.0 && !script.firing_started && !slots.is_switching() {
        info!("holding the trigger");
        slots.start_firing();
        script.firing_started = true;
    }

    if script.elapsed > 3.0 && !script.switch_requested {
        info!("switching to the pistol");
        slots.stop_firing();
        requests.write(EquipRequest {
            actor,
            definition: Arc::new(WeaponKind::Pistol.definition()),
        });
        script.switch_requested = true;
    }

    if script.elapsed > 6.0 {
        info!(
            "demo over: {} trails live, {} released",
            trails.live_count(),
            trails.released_count()
        );
        exit.write(AppExit::Success);
    }
}

fn log_weapon_changes(mut changed: MessageReader<WeaponChanged>) {
    for message in changed.read() {
        info!(
            "actor {:?} now carries {} ({:?})",
            message.actor, message.definition.name, message.definition.slot
        );
    }
}

fn main() {
    let mut app = App::new();

    // Headless: run the main loop at the fixed tick rate
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick_duration())));
    app.add_plugins(bevy::log::LogPlugin::default());
    app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    app.add_plugins(CombatPlugin);
    app.init_resource::<DemoScript>();

    app.add_systems(Startup, (setup_scene, spawn_actor));
    // Playback must advance before the switch sequence polls it, otherwise
    // a freshly cued animation could be read as already complete.
    app.add_systems(
        Update,
        (
            drive_animation_layer.before(combat::systems::drive_equip_transitions),
            run_script,
            log_weapon_changes,
        ),
    );

    info!("starting weapon demo at {} Hz", TICK_HZ);
    app.run();
}
