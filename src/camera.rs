use bevy::prelude::*;
use bevy::window::WindowResized;
use crate::game_logic::{Car, TRACK_HEIGHT, TRACK_WIDTH, Track};
use crate::simulation::CarSimulation;

// Initial window size
pub const WIN_W: f32 = 1280.;
pub const WIN_H: f32 = 720.;

/// Last known window size, used to keep the car's apparent position when
/// the window changes size.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    /// Record the new size and return the shift to apply to the world offset.
    pub fn resize(&mut self, size: Vec2) -> Vec2 {
        let shift = -(size - self.size) / 2.0;
        self.size = size;
        shift
    }
}

/// Centre of the track layer in Bevy world coordinates, given a track
/// translated by `-world_offset` in screen space (top-left origin, y down).
pub fn track_translation(world_offset: Vec2, viewport: Vec2) -> Vec2 {
    let screen = -world_offset + Vec2::new(TRACK_WIDTH, TRACK_HEIGHT) / 2.0;
    Vec2::new(screen.x - viewport.x / 2.0, viewport.y / 2.0 - screen.y)
}

/// Track-space point to a translation local to the track layer.
pub fn track_to_local(point: Vec2) -> Vec2 {
    Vec2::new(point.x - TRACK_WIDTH / 2.0, TRACK_HEIGHT / 2.0 - point.y)
}

pub fn camera_setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn handle_resize(
    mut resized: EventReader<WindowResized>,
    mut viewport: ResMut<Viewport>,
    mut simulation: ResMut<CarSimulation>,
) {
    for event in resized.read() {
        let size = Vec2::new(event.width, event.height);
        if size == viewport.size {
            continue;
        }
        let shift = viewport.resize(size);
        simulation.shift_camera(shift);
        info!("Viewport resized to {}x{}", size.x, size.y);
    }
}

// The car stays in the middle of the screen; the track slides underneath it.
pub fn apply_view_transforms(
    simulation: Res<CarSimulation>,
    viewport: Res<Viewport>,
    mut track: Single<&mut Transform, (With<Track>, Without<Car>)>,
    mut car: Single<&mut Transform, (With<Car>, Without<Track>)>,
) {
    let state = simulation.state();

    let translation = track_translation(state.world_offset, viewport.size);
    track.translation.x = translation.x;
    track.translation.y = translation.y;

    car.translation.x = 0.;
    car.translation.y = 0.;
    // y points down in track space, so a clockwise heading is a negative z rotation
    car.rotation = Quat::from_rotation_z(-state.drift_heading);
}
