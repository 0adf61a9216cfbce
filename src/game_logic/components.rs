use bevy::prelude::*;
use crate::game_logic::{TRACK_HEIGHT, TRACK_WIDTH};

#[derive(Component)]
pub struct Car;

#[derive(Component)]
pub struct Track;

#[derive(Component)]
pub struct DriftMark;

/// Physical state of the car. Track space has its origin in the top-left
/// corner of the track image with y pointing down.
#[derive(Clone, Debug, PartialEq)]
pub struct CarState {
    pub position: Vec2,
    pub world_offset: Vec2,
    pub speed: f32,
    pub heading: f32,
    pub drift_heading: f32,
}

impl CarState {
    /// Car parked at the track centre, with the camera offset chosen so the
    /// centre lands in the middle of a viewport of the given size.
    pub fn new(viewport: Vec2) -> Self {
        let center = Vec2::new(TRACK_WIDTH / 2.0, TRACK_HEIGHT / 2.0);
        Self {
            position: center,
            world_offset: center - viewport / 2.0,
            speed: 0.0,
            heading: 0.0,
            drift_heading: 0.0,
        }
    }

    pub fn forward_vector(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveControl {
    Forward,
    Backward,
    Left,
    Right,
}

impl DriveControl {
    pub const ALL: [DriveControl; 4] = [
        DriveControl::Forward,
        DriveControl::Backward,
        DriveControl::Left,
        DriveControl::Right,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DriveControl::Forward => "^",
            DriveControl::Backward => "v",
            DriveControl::Left => "<",
            DriveControl::Right => ">",
        }
    }
}

/// Held status of the four controls. Written by the input systems only.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn set(&mut self, control: DriveControl, held: bool) {
        match control {
            DriveControl::Forward => self.forward = held,
            DriveControl::Backward => self.backward = held,
            DriveControl::Left => self.left = held,
            DriveControl::Right => self.right = held,
        }
    }
}
