use std::f32::consts::PI;

// Timing
pub const TICK_MILLIS: u64 = 20; // 50 Hz fixed update

// Track layer
pub const TRACK_WIDTH: f32 = 2000.0;
pub const TRACK_HEIGHT: f32 = 1000.0;

// Physics defaults, per tick
pub const MAX_SPEED: f32 = 8.0;
pub const MAX_BACKWARDS_SPEED: f32 = -4.0;
pub const MIN_DRIFT_SPEED: f32 = 3.0;
pub const FORWARD_ACCEL: f32 = 0.07;
pub const BACKWARD_ACCEL: f32 = 0.10;
pub const INERTIA_DECAY: f32 = 0.10;
pub const STOP_THRESHOLD: f32 = 0.5;
pub const DRIFT_TURN_STEP: f32 = 3.0 * PI / 180.0;
pub const DRIFT_SLIDE_STEP: f32 = 5.0 * PI / 180.0;
pub const MAX_DRIFT_ANGLE: f32 = PI / 3.0;
pub const RELAX_STEP: f32 = 0.01;

// Drift marks
pub const MARK_SPEED: f32 = 3.0;
pub const MARK_RADIUS: f32 = 1.0;
pub const MARK_OFFSETS: [(f32, f32); 4] = [(-15.0, -5.0), (-15.0, 5.0), (15.0, -5.0), (15.0, 5.0)];
pub const MAX_DRIFT_MARKS: usize = 20_000; // ~100 s of continuous drifting
