//! Click-and-drag cell painting.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::{
    life::{Board, Cell, CellMaterials, Hovered, Session, Shade},
    state::GameState,
};

pub struct PaintPlugin;

impl Plugin for PaintPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PaintSession>()
            .add_observer(begin_painting)
            .add_observer(hover_cell)
            .add_observer(unhover_cell)
            .add_systems(
                Update,
                end_painting.run_if(not(in_state(GameState::Load))),
            );
    }
}

/// Tracks a drag that toggles every cell it passes over.
///
/// The cell under the initial press is toggled, then each cell the pointer
/// moves onto is toggled once, until the button is released or the pointer
/// leaves the board.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct PaintSession {
    active: bool,
    last: Option<(usize, usize)>,
}

impl PaintSession {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Opens a session on `cell`. The caller toggles it.
    pub fn begin(&mut self, cell: (usize, usize)) {
        self.active = true;
        self.last = Some(cell);
    }

    /// Returns whether moving onto `cell` should toggle it.
    pub fn enter(&mut self, cell: (usize, usize)) -> bool {
        if !self.active || self.last == Some(cell) {
            return false;
        }
        self.last = Some(cell);
        true
    }

    /// Closes the session, returning whether one was open.
    pub fn end(&mut self) -> bool {
        self.last = None;
        std::mem::take(&mut self.active)
    }
}

// ——> OBSERVERS

fn begin_painting(
    trigger: Trigger<Pointer<Down>>,
    cell_query: Query<&Cell>,
    mut paint: ResMut<PaintSession>,
    mut session: ResMut<Session>,
) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    if let Ok(cell) = cell_query.get(trigger.entity()) {
        paint.begin(cell.pos());
        session.toggle_cell(cell.x, cell.y);
    }
}

fn hover_cell(
    trigger: Trigger<Pointer<Over>>,
    mut cell_query: Query<(&Cell, &mut MeshMaterial2d<ColorMaterial>)>,
    mats: Res<CellMaterials>,
    mut paint: ResMut<PaintSession>,
    mut session: ResMut<Session>,
    mut commands: Commands,
) {
    let entity = trigger.entity();
    if let Ok((cell, mut material)) = cell_query.get_mut(entity) {
        commands.entity(entity).insert(Hovered);
        if paint.enter(cell.pos()) {
            session.toggle_cell(cell.x, cell.y);
        }
        material.0 = mats.hovered(session.grid().get(cell.x, cell.y));
    }
}

fn unhover_cell(
    trigger: Trigger<Pointer<Out>>,
    mut cell_query: Query<(&Cell, &Shade, &mut MeshMaterial2d<ColorMaterial>)>,
    mats: Res<CellMaterials>,
    session: Res<Session>,
    mut commands: Commands,
) {
    let entity = trigger.entity();
    if let Ok((cell, shade, mut material)) = cell_query.get_mut(entity) {
        commands.entity(entity).remove::<Hovered>();
        let grid = session.grid();
        material.0 = mats.for_shade(*shade, grid.index_of(cell.x, cell.y), grid.size());
    }
}

// ——> SYSTEMS

/// Ends painting on button release or when the cursor is off the board.
fn end_painting(
    mut paint: ResMut<PaintSession>,
    buttons: Res<ButtonInput<MouseButton>>,
    board: Res<Board>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
) {
    if !paint.is_active() {
        return;
    }
    let on_board = window_query
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .zip(camera_query.get_single().ok())
        .and_then(|(cursor, (camera, transform))| {
            camera.viewport_to_world_2d(transform, cursor).ok()
        })
        .is_some_and(|pos| board.contains(pos));

    if !buttons.pressed(MouseButton::Left) || !on_board {
        paint.end();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paint_session() {
        let mut paint = PaintSession::default();
        assert!(!paint.enter((0, 0)));

        paint.begin((1, 1));
        assert!(paint.is_active());
        // the pressed cell was already toggled
        assert!(!paint.enter((1, 1)));
        assert!(paint.enter((1, 2)));
        assert!(!paint.enter((1, 2)));
        assert!(paint.enter((1, 1)));

        assert!(paint.end());
        assert!(!paint.end());
        assert!(!paint.enter((5, 5)));
    }
}
