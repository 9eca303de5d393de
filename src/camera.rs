use bevy::prelude::*;
use bevy_pancam::{PanCam, PanCamPlugin};

use crate::{life::Board, prelude::*, state::GameState};

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .insert_resource(ClearColor(BG_COLOR))
            .add_systems(OnEnter(GameState::Load), spawn_cam);
    }
}

/// Zoom level at which the whole board and its border fit the window.
fn fit_scale(board: &Board) -> f32 {
    let extent = board.pixel_size().max_element() + 4.0 * BORDER_WIDTH_PX;
    (extent / (WINDOW_SIZE_PX * 0.9)).max(f32::EPSILON)
}

// Init
fn spawn_cam(mut commands: Commands, board: Res<Board>) {
    commands.spawn((
        Camera2d,
        // left button paints, so only the right one pans
        PanCam {
            grab_buttons: vec![MouseButton::Right],
            ..default()
        },
        OrthographicProjection {
            scaling_mode: bevy::render::camera::ScalingMode::WindowSize,
            scale: fit_scale(&board),
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Msaa::Off,
    ));
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::LifeConfig;

    #[test]
    fn board_fits_window() {
        let board = Board::from_config(&LifeConfig::classic());
        let scale = fit_scale(&board);
        assert!(board.pixel_size().x / scale < WINDOW_SIZE_PX);
    }
}
