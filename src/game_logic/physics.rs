use crate::game_logic::{CarState, CarTuning, InputState, MARK_OFFSETS};
use bevy::prelude::*;

/// Advance the car by one fixed tick.
///
/// Pure: the caller owns persistence of the returned state. Steps run in
/// order and each sees the result of the one before:
/// 1. integrate position along `heading` with the current speed
/// 2. resolve steering (left, then right, then passive relaxation)
/// 3. resolve throttle (forward, backward, coasting decay, stop)
pub fn step_car(state: &CarState, input: &InputState, tuning: &CarTuning) -> CarState {
    let mut next = state.clone();

    let displacement = state.forward_vector() * state.speed;
    next.position += displacement;
    next.world_offset += displacement;

    steer(&mut next, input, tuning);
    apply_throttle(&mut next, input, tuning);

    next
}

fn steer(state: &mut CarState, input: &InputState, tuning: &CarTuning) {
    // -1 turns left (angles decrease), +1 turns right
    let direction = if input.left {
        -1.0
    } else if input.right {
        1.0
    } else {
        relax_heading(state, tuning);
        return;
    };

    if state.speed > tuning.min_drift_speed {
        // heading only follows while the sprite is already leaning into the turn
        if (state.drift_heading - state.heading) * direction > 0.0 {
            state.heading += direction * tuning.drift_turn_step;
        }

        let limit = state.heading + direction * tuning.max_drift_angle;
        if (limit - state.drift_heading) * direction > 0.0 {
            state.drift_heading += direction * tuning.drift_slide_step;
            if (state.drift_heading - limit) * direction > 0.0 {
                state.drift_heading = limit;
            }
        }
    } else {
        let turn = direction * state.speed.to_radians();
        state.heading += turn;
        state.drift_heading += turn;
    }
}

// Coasting without steering: heading creeps toward where the sprite points.
fn relax_heading(state: &mut CarState, tuning: &CarTuning) {
    let gap = state.drift_heading - state.heading;
    if gap.abs() <= tuning.relax_step {
        state.heading = state.drift_heading;
    } else {
        state.heading += tuning.relax_step.copysign(gap);
    }
}

fn apply_throttle(state: &mut CarState, input: &InputState, tuning: &CarTuning) {
    if input.forward && state.speed < tuning.max_speed {
        state.speed = (state.speed + tuning.forward_accel).min(tuning.max_speed);
    } else if input.backward && state.speed > tuning.max_backwards_speed {
        state.speed = (state.speed - tuning.backward_accel).max(tuning.max_backwards_speed);
    } else if state.speed > tuning.stop_threshold {
        state.speed -= tuning.inertia_decay;
    } else if state.speed < -tuning.stop_threshold {
        state.speed += tuning.inertia_decay;
    } else {
        state.speed = 0.0;
        state.heading = state.drift_heading;
    }
}

/// Track-space positions of the tyre marks left by `state`, or `None` when
/// the car is too slow to mark the track.
pub fn drift_marks(state: &CarState, tuning: &CarTuning) -> Option<[Vec2; 4]> {
    if state.speed <= tuning.mark_speed {
        return None;
    }

    let rotation = Vec2::from_angle(state.drift_heading);
    Some(MARK_OFFSETS.map(|(x, y)| state.position + rotation.rotate(Vec2::new(x, y))))
}
