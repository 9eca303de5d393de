use bevy::prelude::*;

use crate::{
    config::{LifeConfig, SpeedControl, Variant},
    controls::{Presets, Speed, SpeedEntry},
    driver::{speed_percentage, TickDriver},
    life::Session,
    prelude::*,
    state::GameState,
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud);
    }
}

#[derive(Component)]
struct HudText;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

#[allow(clippy::too_many_arguments)]
fn update_hud(
    mut text_query: Query<&mut Text, With<HudText>>,
    state: Res<State<GameState>>,
    session: Res<Session>,
    config: Res<LifeConfig>,
    driver: Res<TickDriver>,
    speed: Res<Speed>,
    presets: Res<Presets>,
    entry: Res<SpeedEntry>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let mut status = format!(
        "{}  generation {}  population {}\nrule {}",
        state.get().label(),
        session.generation(),
        session.grid().population(),
        session.rules(),
    );
    if config.variant.rule_presets() {
        status += &format!(" ({})", presets.current().name);
    }
    match config.variant.speed_control() {
        SpeedControl::Presets => status += &format!("\n{}", speed.label()),
        SpeedControl::Percentage => {
            status += &format!("\nspeed {}%", speed_percentage(driver.period()));
            if let Some(buffer) = &entry.0 {
                status += &format!("  new speed: {buffer}_%");
            }
        }
    }
    status += "\n";
    status += help_line(config.variant);

    if text.0 != status {
        text.0 = status;
    }
}

fn help_line(variant: Variant) -> &'static str {
    match variant {
        Variant::Classic => "Enter start/pause  C reset  R random  F speed",
        Variant::Editable => {
            "Enter start/pause  C reset  R random  F speed  0-8 birth  Shift+0-8 survival"
        }
        Variant::Palette => "Enter start/pause  C reset  R random  P next rule  T type speed",
    }
}
