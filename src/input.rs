use bevy::prelude::*;
use bevy::input::ButtonInput;
use crate::game_logic::{DriveControl, InputState};

/// On-screen button bound to one control. `touched` remembers whether a
/// finger was on it last frame so only changes reach the input state.
#[derive(Component)]
pub struct ControlButton {
    pub control: DriveControl,
    pub touched: bool,
}

impl ControlButton {
    pub fn new(control: DriveControl) -> Self {
        Self { control, touched: false }
    }
}

/// Screen rect of a button in logical pixels, top-left origin, the same
/// space touch positions are reported in.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct TouchArea(pub Rect);

/// Container for the on-screen buttons; hidden until a touch is seen.
#[derive(Component)]
pub struct TouchPad;

pub fn control_for_key(key: KeyCode) -> Option<DriveControl> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(DriveControl::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(DriveControl::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(DriveControl::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(DriveControl::Right),
        _ => None,
    }
}

// Edge triggered: the last press or release of any mapped key wins.
pub fn read_keyboard(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    for key in keys.get_just_pressed() {
        if let Some(control) = control_for_key(*key) {
            input.set(control, true);
        }
    }
    for key in keys.get_just_released() {
        if let Some(control) = control_for_key(*key) {
            input.set(control, false);
        }
    }
}

// UI layout is in physical pixels, touches are logical.
pub fn sync_touch_areas(
    mut buttons: Query<
        (&ComputedNode, &GlobalTransform, &mut TouchArea),
        Or<(Changed<ComputedNode>, Changed<GlobalTransform>)>,
    >,
) {
    for (node, transform, mut area) in buttons.iter_mut() {
        let scale = node.inverse_scale_factor();
        area.0 = Rect::from_center_size(
            transform.translation().truncate() * scale,
            node.size() * scale,
        );
    }
}

// Every finger is hit tested on its own, so one finger can hold forward
// while another steers.
pub fn read_control_buttons(
    touches: Res<Touches>,
    mut buttons: Query<(&mut ControlButton, &TouchArea)>,
    mut input: ResMut<InputState>,
) {
    for (mut button, area) in buttons.iter_mut() {
        let touched = touches.iter().any(|touch| area.0.contains(touch.position()));
        if touched != button.touched {
            button.touched = touched;
            input.set(button.control, touched);
        }
    }
}

pub fn reveal_touch_controls(
    touches: Res<Touches>,
    mut pad: Query<&mut Visibility, With<TouchPad>>,
) {
    if !touches.any_just_pressed() {
        return;
    }
    for mut visibility in pad.iter_mut() {
        if *visibility != Visibility::Visible {
            *visibility = Visibility::Visible;
            info!("Touch detected, showing on-screen controls");
        }
    }
}

pub fn spawn_touch_controls(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                left: Val::Px(20.0),
                right: Val::Px(20.0),
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            Visibility::Hidden,
            TouchPad,
        ))
        .with_children(|parent| {
            for control in DriveControl::ALL {
                parent
                    .spawn((
                        Node {
                            width: Val::Px(90.0),
                            height: Val::Px(90.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
                        ControlButton::new(control),
                        TouchArea::default(),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(control.label()),
                            TextFont {
                                font_size: 40.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(control_for_key(KeyCode::KeyW), Some(DriveControl::Forward));
        assert_eq!(control_for_key(KeyCode::ArrowUp), Some(DriveControl::Forward));
        assert_eq!(control_for_key(KeyCode::KeyS), Some(DriveControl::Backward));
        assert_eq!(control_for_key(KeyCode::ArrowDown), Some(DriveControl::Backward));
        assert_eq!(control_for_key(KeyCode::KeyA), Some(DriveControl::Left));
        assert_eq!(control_for_key(KeyCode::ArrowLeft), Some(DriveControl::Left));
        assert_eq!(control_for_key(KeyCode::KeyD), Some(DriveControl::Right));
        assert_eq!(control_for_key(KeyCode::ArrowRight), Some(DriveControl::Right));
        assert_eq!(control_for_key(KeyCode::Space), None);
    }

    #[test]
    fn test_keyboard_press_and_release() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<InputState>()
            .add_systems(Update, read_keyboard);

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyA);
        app.update();
        assert!(app.world().resource::<InputState>().left);

        // second key for the same control does not outlive its own release
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.clear();
            keys.press(KeyCode::ArrowLeft);
        }
        app.update();
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.clear();
            keys.release(KeyCode::ArrowLeft);
        }
        app.update();

        let input = app.world().resource::<InputState>();
        assert!(!input.left);
        assert!(!input.forward && !input.backward && !input.right);
    }

    use bevy::input::touch::{touch_screen_input_system, TouchInput, TouchPhase};

    fn touch_app() -> App {
        let mut app = App::new();
        app.add_event::<TouchInput>()
            .init_resource::<Touches>()
            .init_resource::<InputState>()
            .add_systems(PreUpdate, touch_screen_input_system)
            .add_systems(Update, (read_control_buttons, reveal_touch_controls));

        // forward pad at (0..100, 0..100), left pad at (200..300, 0..100)
        app.world_mut().spawn((
            ControlButton::new(DriveControl::Forward),
            TouchArea(Rect::new(0.0, 0.0, 100.0, 100.0)),
        ));
        app.world_mut().spawn((
            ControlButton::new(DriveControl::Left),
            TouchArea(Rect::new(200.0, 0.0, 300.0, 100.0)),
        ));
        app.world_mut().spawn((Visibility::Hidden, TouchPad));
        app
    }

    fn touch(app: &mut App, id: u64, phase: TouchPhase, position: Vec2) {
        app.world_mut().send_event(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
    }

    #[test]
    fn test_two_fingers_hold_two_controls() {
        let mut app = touch_app();

        touch(&mut app, 1, TouchPhase::Started, Vec2::new(50.0, 50.0));
        app.update();
        touch(&mut app, 2, TouchPhase::Started, Vec2::new(250.0, 50.0));
        app.update();
        {
            let input = app.world().resource::<InputState>();
            assert!(input.forward);
            assert!(input.left);
        }

        touch(&mut app, 2, TouchPhase::Ended, Vec2::new(250.0, 50.0));
        app.update();
        let input = app.world().resource::<InputState>();
        assert!(input.forward);
        assert!(!input.left);
    }

    #[test]
    fn test_finger_sliding_off_releases() {
        let mut app = touch_app();

        touch(&mut app, 7, TouchPhase::Started, Vec2::new(250.0, 50.0));
        app.update();
        assert!(app.world().resource::<InputState>().left);

        touch(&mut app, 7, TouchPhase::Moved, Vec2::new(150.0, 50.0));
        app.update();
        assert!(!app.world().resource::<InputState>().left);
    }

    #[test]
    fn test_touch_does_not_override_keyboard() {
        let mut app = touch_app();
        app.world_mut().resource_mut::<InputState>().right = true;

        touch(&mut app, 3, TouchPhase::Started, Vec2::new(500.0, 500.0));
        app.update();
        touch(&mut app, 3, TouchPhase::Ended, Vec2::new(500.0, 500.0));
        app.update();

        assert!(app.world().resource::<InputState>().right);
    }

    #[test]
    fn test_first_touch_reveals_pad() {
        let mut app = touch_app();
        app.update();
        let mut pads = app.world_mut().query_filtered::<&Visibility, With<TouchPad>>();
        assert_eq!(*pads.single(app.world()).unwrap(), Visibility::Hidden);

        touch(&mut app, 1, TouchPhase::Started, Vec2::new(500.0, 500.0));
        app.update();
        assert_eq!(*pads.single(app.world()).unwrap(), Visibility::Visible);
    }
}
