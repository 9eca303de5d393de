use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::WindowResolution,
};
use lifelike_bevy::{
    camera::CamPlugin, config::LifeConfig, controls::ControlsPlugin, hud::HudPlugin,
    life::LifePlugin, paint::PaintPlugin, prelude::WINDOW_SIZE_PX, state::GameState,
};

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(ImagePlugin::default_nearest())
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Life".into(),
                    resizable: true,
                    focused: true,
                    present_mode: bevy::window::PresentMode::AutoNoVsync,
                    mode: bevy::window::WindowMode::Windowed,
                    resolution: WindowResolution::new(WINDOW_SIZE_PX, WINDOW_SIZE_PX),
                    ..default()
                }),
                ..default()
            }),
    )
    .add_plugins(MeshPickingPlugin)
    .add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()));

    // read after DefaultPlugins so configuration warnings reach the log
    let config = LifeConfig::from_env();
    info!(
        "{:?} variant, {}x{} board, rule {}",
        config.variant, config.board_size, config.board_size, config.rules
    );

    app.insert_resource(config)
        .init_state::<GameState>()
        .add_plugins((CamPlugin, LifePlugin, PaintPlugin, ControlsPlugin, HudPlugin))
        .run();
}
