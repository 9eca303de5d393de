pub mod automaton;
pub mod camera;
pub mod config;
pub mod controls;
pub mod driver;
pub mod hud;
pub mod life;
pub mod paint;
pub mod state;

pub mod prelude {
    use std::time::Duration;

    use bevy::{color::Color, math::Vec2};

    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(200);
    pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    pub const WINDOW_SIZE_PX: f32 = 1000.0;
    pub const BG_COLOR: Color = Color::srgb(0.06, 0.06, 0.08);

    pub const CLASSIC_BOARD_SIZE: usize = 40;
    pub const LARGE_BOARD_SIZE: usize = 100;
    pub const BOARD_POS: Vec2 = Vec2::ZERO;
    pub const BOARD_PIXEL_SIZE: f32 = 800.0;
    pub const BORDER_WIDTH_PX: f32 = 4.0;
    pub const BORDER_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

    pub const CELL_SCALE: Vec2 = Vec2::splat(0.9);
    pub const CELL_DEAD_COLOR: Color = Color::srgb(0.13, 0.13, 0.16);
    pub const CELL_HAS_LIVED_COLOR: Color = Color::srgb(0.25, 0.2, 0.32);
    pub const CELL_HOVERED_ALIVE_COLOR: Color = Color::srgb(0.2, 0.4, 1.0);
    pub const CELL_HOVERED_DEAD_COLOR: Color = Color::srgb(0.7, 0.1, 0.1);
    /// Green and blue channels of the live cell gradient; red runs 0..=255
    /// across the board.
    pub const CELL_ALIVE_GREEN: u8 = 100;
    pub const CELL_ALIVE_BLUE: u8 = 150;

    pub const HUD_FONT_SIZE: f32 = 18.0;
    pub const HUD_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

    pub const VARIANT_ENV_VAR: &str = "LIFE_VARIANT";
    pub const RULE_ENV_VAR: &str = "LIFE_RULE";
}
