use bevy::prelude::*;
use bevy::input::ButtonInput;
use std::collections::VecDeque;
use crate::camera::track_to_local;
use crate::game_logic::{
    Car, DriftMark, MARK_RADIUS, MAX_DRIFT_MARKS, TRACK_HEIGHT, TRACK_WIDTH, Track,
};
use crate::simulation::{CarSimulation, DriftMarksEmitted};

/// Request to wipe the drift marks off the track. The car is unaffected.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ClearTrack;

#[derive(Component)]
pub struct ClearButton;

#[derive(Resource)]
pub struct DriftMarkAssets {
    mesh: Handle<Mesh>,
    material: Handle<ColorMaterial>,
}

pub fn setup_track(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // a missing image just leaves the layer empty
    let mut sprite = Sprite::from_image(asset_server.load("track.png"));
    sprite.custom_size = Some(Vec2::new(TRACK_WIDTH, TRACK_HEIGHT));
    commands.spawn((sprite, Transform::from_xyz(0., 0., 0.), Track));

    commands.insert_resource(DriftMarkAssets {
        mesh: meshes.add(Circle::new(MARK_RADIUS)),
        material: materials.add(ColorMaterial::from_color(Color::srgb_u8(0x42, 0x42, 0x42))),
    });
}

pub fn spawn_car(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    simulation: Res<CarSimulation>,
) {
    commands.spawn((
        Sprite::from_image(asset_server.load("car.png")),
        Transform::from_xyz(0., 0., 50.),
        Car,
    ));

    let state = simulation.state();
    info!(
        "Car parked at ({:.0}, {:.0}), camera offset ({:.0}, {:.0})",
        state.position.x, state.position.y, state.world_offset.x, state.world_offset.y
    );
}

pub fn spawn_clear_button(mut commands: Commands) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                right: Val::Px(20.0),
                padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            ClearButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Clear"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn press_clear(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<ClearButton>)>,
    mut clear: EventWriter<ClearTrack>,
) {
    let clicked = buttons.iter().any(|interaction| *interaction == Interaction::Pressed);
    if clicked || keys.just_pressed(KeyCode::KeyC) {
        clear.write(ClearTrack);
    }
}

/// Mark entities currently on the track, oldest first. Once `capacity` is
/// reached each new mark evicts the oldest one.
#[derive(Resource)]
pub struct DriftTrail {
    marks: VecDeque<Entity>,
    capacity: usize,
}

impl DriftTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            marks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Record a new mark and return the ones that fell off the end.
    fn push(&mut self, mark: Entity) -> Vec<Entity> {
        self.marks.push_back(mark);
        let overflow = self.marks.len().saturating_sub(self.capacity);
        self.marks.drain(..overflow).collect()
    }
}

impl Default for DriftTrail {
    fn default() -> Self {
        Self::new(MAX_DRIFT_MARKS)
    }
}

pub fn paint_drift_marks(
    mut commands: Commands,
    mut emitted: EventReader<DriftMarksEmitted>,
    assets: Res<DriftMarkAssets>,
    mut trail: ResMut<DriftTrail>,
    track: Single<Entity, With<Track>>,
) {
    for marks in emitted.read() {
        for position in marks.positions {
            let mark = commands
                .spawn((
                    Mesh2d(assets.mesh.clone()),
                    MeshMaterial2d(assets.material.clone()),
                    Transform::from_translation(track_to_local(position).extend(1.0)),
                    DriftMark,
                    ChildOf(*track),
                ))
                .id();
            for expired in trail.push(mark) {
                commands.entity(expired).despawn();
            }
        }
    }
}

pub fn clear_drift_marks(
    mut commands: Commands,
    mut requests: EventReader<ClearTrack>,
    mut trail: ResMut<DriftTrail>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let cleared = trail.marks.len();
    for mark in trail.marks.drain(..) {
        commands.entity(mark).despawn();
    }
    info!("Cleared {} drift marks", cleared);
}
