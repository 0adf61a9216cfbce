mod camera;
mod game_logic;
mod input;
mod simulation;
mod track;

use std::time::Duration;

use bevy::prelude::*;
use camera::{apply_view_transforms, camera_setup, handle_resize, Viewport, WIN_H, WIN_W};
use game_logic::{load_tuning, tuning_path, CarState, InputState, TICK_MILLIS};
use input::{
    read_control_buttons, read_keyboard, reveal_touch_controls, spawn_touch_controls,
    sync_touch_areas,
};
use simulation::{tick_car, CarSimulation, DriftMarksEmitted};
use track::{
    clear_drift_marks, paint_drift_marks, press_clear, setup_track, spawn_car, spawn_clear_button,
    ClearTrack, DriftTrail,
};

fn main() {
    let viewport = Vec2::new(WIN_W, WIN_H);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Drift Racer".into(),
                        resolution: (WIN_W, WIN_H).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(load_tuning(&tuning_path()))
        .insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(TICK_MILLIS))) // 50 Hz physics
        .init_resource::<InputState>()
        .init_resource::<DriftTrail>()
        .insert_resource(Viewport::new(viewport))
        .insert_resource(CarSimulation::new(CarState::new(viewport)))
        .add_event::<DriftMarksEmitted>()
        .add_event::<ClearTrack>()
        .add_systems(
            Startup,
            (camera_setup, setup_track, spawn_car, spawn_touch_controls, spawn_clear_button),
        )
        .add_systems(
            PreUpdate,
            (
                read_keyboard,
                (sync_touch_areas, read_control_buttons).chain(),
                reveal_touch_controls,
            )
                .after(bevy::input::InputSystem),
        )
        .add_systems(FixedUpdate, tick_car)
        .add_systems(
            Update,
            (
                handle_resize,
                press_clear,
                paint_drift_marks,
                clear_drift_marks,
                apply_view_transforms,
            )
                .chain(),
        )
        .run();
}
