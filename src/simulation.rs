use bevy::prelude::*;
use crate::game_logic::{CarState, CarTuning, InputState, drift_marks, step_car};

/// Tyre marks produced by one tick, in track space.
#[derive(Event, Clone, Debug)]
pub struct DriftMarksEmitted {
    pub positions: [Vec2; 4],
}

/// Owns the car state and persists whatever `step_car` returns.
#[derive(Resource)]
pub struct CarSimulation {
    state: CarState,
}

impl CarSimulation {
    pub fn new(state: CarState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CarState {
        &self.state
    }

    /// Advance one tick. Marks are taken from the state entering the tick,
    /// so they land where the car was before it moved.
    pub fn tick(&mut self, input: &InputState, tuning: &CarTuning) -> Option<[Vec2; 4]> {
        let marks = drift_marks(&self.state, tuning);
        self.state = step_car(&self.state, input, tuning);
        marks
    }

    pub fn shift_camera(&mut self, delta: Vec2) {
        self.state.world_offset += delta;
    }
}

// Fixed 20 ms tick
pub fn tick_car(
    input: Res<InputState>,
    tuning: Res<CarTuning>,
    mut simulation: ResMut<CarSimulation>,
    mut marks: EventWriter<DriftMarksEmitted>,
) {
    if let Some(positions) = simulation.tick(&input, &tuning) {
        marks.write(DriftMarksEmitted { positions });
    }
}
