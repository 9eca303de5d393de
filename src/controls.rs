//! Keyboard commands.
//!
//! | key | action | variants |
//! |---|---|---|
//! | Enter | start / pause | all |
//! | C | stop and clear the board | all |
//! | R | fill the board randomly | all |
//! | F | next speed preset | classic, editable |
//! | 0-8 | toggle a birth count | editable |
//! | Shift + 0-8 | toggle a survival count | editable |
//! | P | next rule preset | palette |
//! | T | type a speed percentage, Enter to apply, Esc to cancel | palette |

use bevy::{input::common_conditions::input_just_pressed, prelude::*};

use crate::{
    automaton::{rule::MAX_NEIGHBORS, PresetCycle},
    config::{LifeConfig, SpeedControl},
    driver::{parse_speed_percentage, SpeedPreset, TickDriver},
    life::{clear_shading, Cell, CellMaterials, Hovered, Session, Shade},
    state::GameState,
};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Speed>()
            .init_resource::<Presets>()
            .init_resource::<SpeedEntry>()
            .add_systems(
                Update,
                (
                    (
                        toggle_running.run_if(
                            input_just_pressed(KeyCode::Enter).and(not(speed_entry_active)),
                        ),
                        handle_speed_entry.run_if(speed_control_is(SpeedControl::Percentage)),
                    )
                        .chain(),
                    reset_board
                        .run_if(input_just_pressed(KeyCode::KeyC).and(not(speed_entry_active))),
                    randomize_board
                        .run_if(input_just_pressed(KeyCode::KeyR).and(not(speed_entry_active))),
                    cycle_speed.run_if(
                        input_just_pressed(KeyCode::KeyF)
                            .and(speed_control_is(SpeedControl::Presets)),
                    ),
                    edit_rules.run_if(|config: Res<LifeConfig>| config.variant.editable_rules()),
                    cycle_rule_preset.run_if(
                        input_just_pressed(KeyCode::KeyP)
                            .and(not(speed_entry_active))
                            .and(|config: Res<LifeConfig>| config.variant.rule_presets()),
                    ),
                )
                    .run_if(not(in_state(GameState::Load))),
            );
    }
}

// ——> RESOURCES

/// Current speed preset.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct Speed(pub SpeedPreset);

/// Position in the rule preset palette.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct Presets(pub PresetCycle);

/// Speed percentage being typed, if any.
#[derive(Resource, Debug, Default)]
pub struct SpeedEntry(pub Option<String>);

// ——> CONDITIONS

fn speed_entry_active(entry: Res<SpeedEntry>) -> bool {
    entry.0.is_some()
}

fn speed_control_is(control: SpeedControl) -> impl Fn(Res<LifeConfig>) -> bool + Clone {
    move |config| config.variant.speed_control() == control
}

// ——> SYSTEMS

/// Pausing stops the driver at once. The state change only lands next frame.
fn toggle_running(
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut driver: ResMut<TickDriver>,
    session: Res<Session>,
) {
    match state.get() {
        GameState::Paused => next_state.set(GameState::Running),
        GameState::Running => {
            if driver.stop() {
                info!("paused at generation {}", session.generation());
            }
            next_state.set(GameState::Paused);
        }
        GameState::Load => (),
    }
}

fn reset_board(
    mut session: ResMut<Session>,
    mut driver: ResMut<TickDriver>,
    mut next_state: ResMut<NextState<GameState>>,
    mats: Res<CellMaterials>,
    mut cell_query: Query<
        (&mut Shade, &mut MeshMaterial2d<ColorMaterial>, Has<Hovered>),
        With<Cell>,
    >,
) {
    driver.stop();
    session.reset();
    next_state.set(GameState::Paused);
    clear_shading(&mats, &mut cell_query);
    info!("board cleared");
}

fn randomize_board(
    mut session: ResMut<Session>,
    mats: Res<CellMaterials>,
    mut cell_query: Query<
        (&mut Shade, &mut MeshMaterial2d<ColorMaterial>, Has<Hovered>),
        With<Cell>,
    >,
) {
    session.randomize(&mut fastrand::Rng::new());
    clear_shading(&mats, &mut cell_query);
    info!("board randomized, {} cells alive", session.grid().population());
}

fn cycle_speed(mut speed: ResMut<Speed>, mut driver: ResMut<TickDriver>) {
    **speed = speed.next();
    driver.set_period(speed.period());
    info!("speed set to {}", speed.label());
}

/// Digits toggle birth counts, shifted digits toggle survival counts.
fn edit_rules(keyboard_input: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    let shifted = keyboard_input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let counts = keyboard_input
        .get_just_pressed()
        .filter_map(|&key| digit(key))
        .filter(|&n| n <= MAX_NEIGHBORS);
    for count in counts {
        let rules = session.rules_mut();
        let (name, set) = if shifted {
            ("survival", &mut rules.survival)
        } else {
            ("birth", &mut rules.birth)
        };
        let present = set.toggle(count);
        info!(
            "{name} on {count} {}, rule is now {}",
            if present { "enabled" } else { "disabled" },
            session.rules()
        );
    }
}

fn cycle_rule_preset(mut presets: ResMut<Presets>, mut session: ResMut<Session>) {
    let preset = presets.advance();
    session.set_rules(preset.rules);
    info!("rule preset {} ({})", preset.name, preset.rules);
}

fn handle_speed_entry(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut entry: ResMut<SpeedEntry>,
    mut driver: ResMut<TickDriver>,
) {
    if entry.0.is_none() {
        if keyboard_input.just_pressed(KeyCode::KeyT) {
            entry.0 = Some(String::new());
        }
        return;
    }
    let Some(mut buffer) = entry.0.take() else {
        return;
    };

    for &key in keyboard_input.get_just_pressed() {
        match key {
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Minus | KeyCode::NumpadSubtract => buffer.push('-'),
            KeyCode::Escape => return,
            KeyCode::Enter | KeyCode::NumpadEnter => {
                // invalid input leaves the period as it was
                match parse_speed_percentage(&buffer) {
                    Ok(period) => {
                        driver.set_period(period);
                        info!("speed set to {buffer}%");
                    }
                    Err(err) => debug!("speed unchanged: {err}"),
                }
                return;
            }
            key => {
                if let Some(n) = digit(key) {
                    buffer.push(char::from(b'0' + n));
                }
            }
        }
    }
    entry.0 = Some(buffer);
}

/// Maps the number keys to their value.
fn digit(key: KeyCode) -> Option<u8> {
    use KeyCode::*;
    Some(match key {
        Digit0 | Numpad0 => 0,
        Digit1 | Numpad1 => 1,
        Digit2 | Numpad2 => 2,
        Digit3 | Numpad3 => 3,
        Digit4 | Numpad4 => 4,
        Digit5 | Numpad5 => 5,
        Digit6 | Numpad6 => 6,
        Digit7 | Numpad7 => 7,
        Digit8 | Numpad8 => 8,
        Digit9 | Numpad9 => 9,
        _ => return None,
    })
}
