#![allow(clippy::type_complexity)]

use bevy::{ecs::system::SystemState, math::vec2, prelude::*};

use crate::{
    automaton::Automaton,
    config::LifeConfig,
    driver::TickDriver,
    prelude::*,
    state::GameState,
};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<LifeConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(Board::from_config(&config))
            .insert_resource(Session(Automaton::new(config.board_size, config.rules)))
            .insert_resource(TickDriver::new(config.period))
            .insert_resource(config)
            .add_systems(
                OnEnter(GameState::Load),
                (load_cell_materials, load_cell_board).chain(),
            )
            .add_systems(OnEnter(GameState::Running), start_driver)
            .add_systems(OnExit(GameState::Running), stop_driver)
            .add_systems(
                Update,
                advance_generations.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                PostUpdate,
                shade_cells
                    .run_if(resource_changed::<Session>.and(not(in_state(GameState::Load)))),
            );
    }
}

// ——> SYSTEMS

/// initialize cell materials in a resource
fn load_cell_materials(
    world: &mut World,
    params: &mut SystemState<(
        ResMut<Assets<Mesh>>,
        ResMut<Assets<ColorMaterial>>,
        Res<Board>,
    )>,
) {
    let (mut meshes, mut materials, board) = params.get_mut(world);
    let cell = meshes.add(Rectangle::from_size(board.cell_size));
    let border_vert = meshes.add(Rectangle::new(
        BORDER_WIDTH_PX,
        board.pixel_size().y + 2.0 * BORDER_WIDTH_PX,
    ));
    let border_horiz = meshes.add(Rectangle::new(
        board.pixel_size().x + 2.0 * BORDER_WIDTH_PX,
        BORDER_WIDTH_PX,
    ));

    let mut add_color = |color: Color| materials.add(ColorMaterial::from_color(color));
    let alive = (0..=u8::MAX)
        .map(|red| add_color(Color::srgb_u8(red, CELL_ALIVE_GREEN, CELL_ALIVE_BLUE)))
        .collect();
    let cell_materials = CellMaterials {
        cell,
        border_vert,
        border_horiz,
        border: add_color(BORDER_COLOR),
        alive,
        dead: add_color(CELL_DEAD_COLOR),
        has_lived: add_color(CELL_HAS_LIVED_COLOR),
        hovered_alive: add_color(CELL_HOVERED_ALIVE_COLOR),
        hovered_dead: add_color(CELL_HOVERED_DEAD_COLOR),
    };
    world.insert_resource(cell_materials);
}

/// spawn the cell board and its border
fn load_cell_board(
    world: &mut World,
    params: &mut SystemState<(
        Res<CellMaterials>,
        Res<Board>,
        ResMut<NextState<GameState>>,
    )>,
) {
    let (mats, board, _) = params.get_mut(world);
    let board = *board;
    let mats = CellMaterials::clone(&mats);

    let cells_to_spawn = (0..board.size)
        .flat_map(|x| (0..board.size).map(move |y| Cell { x, y }))
        .map(|cell| {
            (
                cell,
                Mesh2d(mats.cell.clone()),
                MeshMaterial2d(mats.dead.clone()),
                Transform::from_translation(board.cell_to_translation(cell.x, cell.y))
                    .with_scale(board.cell_scale.extend(1.0)),
            )
        })
        .collect::<Vec<_>>();
    world.spawn_batch(cells_to_spawn);

    // left, right, top, bottom
    let half = board.pixel_size() * 0.5 + Vec2::splat(BORDER_WIDTH_PX * 0.5);
    let borders = [
        (mats.border_vert.clone(), vec2(-half.x, 0.0)),
        (mats.border_vert.clone(), vec2(half.x, 0.0)),
        (mats.border_horiz.clone(), vec2(0.0, half.y)),
        (mats.border_horiz.clone(), vec2(0.0, -half.y)),
    ]
    .map(|(mesh, offset)| {
        (
            Border,
            Mesh2d(mesh),
            MeshMaterial2d(mats.border.clone()),
            Transform::from_translation((board.center + offset).extend(0.0)),
        )
    });
    world.spawn_batch(borders);

    info!("spawned {}x{} board", board.size, board.size);
    let (_, _, mut game_state) = params.get_mut(world);
    game_state.set(GameState::Paused);
}

fn start_driver(mut driver: ResMut<TickDriver>) {
    if driver.start() {
        info!("running at {:?} per generation", driver.period());
    }
}

fn stop_driver(mut driver: ResMut<TickDriver>, session: Res<Session>) {
    if driver.stop() {
        info!("paused at generation {}", session.generation());
    }
}

fn advance_generations(
    time: Res<Time>,
    mut driver: ResMut<TickDriver>,
    mut session: ResMut<Session>,
) {
    let due = driver.tick(time.delta());
    for _ in 0..due {
        session.step();
    }
}

/// Follows the automaton's grid with cell shading and materials.
fn shade_cells(
    session: Res<Session>,
    mats: Res<CellMaterials>,
    mut cell_query: Query<(
        &Cell,
        &mut Shade,
        &mut MeshMaterial2d<ColorMaterial>,
        Has<Hovered>,
    )>,
) {
    let grid = session.grid();
    for (cell, mut shade, mut material, hovered) in cell_query.iter_mut() {
        let alive = grid.get(cell.x, cell.y);
        let next = shade.after(alive);
        if *shade != next {
            *shade = next;
            material.0 = if hovered {
                mats.hovered(alive)
            } else {
                mats.for_shade(next, grid.index_of(cell.x, cell.y), grid.size())
            };
        }
    }
}

/// Marks every cell dead and forgets which ones have lived. The cell under
/// the pointer keeps its highlight.
pub fn clear_shading(
    mats: &CellMaterials,
    cell_query: &mut Query<
        (&mut Shade, &mut MeshMaterial2d<ColorMaterial>, Has<Hovered>),
        With<Cell>,
    >,
) {
    for (mut shade, mut material, hovered) in cell_query.iter_mut() {
        *shade = Shade::Dead;
        material.0 = if hovered {
            mats.hovered(false)
        } else {
            mats.dead.clone()
        };
    }
}

/// Red channel of a live cell's colour, from 0 at the first cell to 255 at
/// the last.
pub fn gradient_red(index: usize, cell_count: usize) -> u8 {
    if cell_count == 0 {
        return 0;
    }
    (index * 255 / cell_count).min(255) as u8
}

// ——> COMPONENTS

/// A board cell at row `x`, column `y`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(Shade, Mesh2d)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub fn pos(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// How a cell is drawn. `HasLived` marks cells that were alive at some point
/// and are dead now.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    #[default]
    Dead,
    Alive,
    HasLived,
}

impl Shade {
    pub fn after(self, alive: bool) -> Self {
        match (self, alive) {
            (_, true) => Self::Alive,
            (Self::Alive, false) => Self::HasLived,
            (shade, false) => shade,
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct Hovered;

#[derive(Component)]
#[require(Mesh2d)]
struct Border;

// ——> RESOURCES

/// The running simulation.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct Session(pub Automaton);

/// hold handles for meshes and materials
#[derive(Resource, Clone)]
pub struct CellMaterials {
    cell: Handle<Mesh>,
    border_vert: Handle<Mesh>,
    border_horiz: Handle<Mesh>,
    border: Handle<ColorMaterial>,
    /// live cell gradient, indexed by red channel
    alive: Vec<Handle<ColorMaterial>>,
    dead: Handle<ColorMaterial>,
    has_lived: Handle<ColorMaterial>,
    hovered_alive: Handle<ColorMaterial>,
    hovered_dead: Handle<ColorMaterial>,
}

impl CellMaterials {
    pub fn for_shade(&self, shade: Shade, index: usize, size: usize) -> Handle<ColorMaterial> {
        match shade {
            Shade::Alive => self.alive[gradient_red(index, size * size) as usize].clone(),
            Shade::Dead => self.dead.clone(),
            Shade::HasLived => self.has_lived.clone(),
        }
    }

    pub fn hovered(&self, alive: bool) -> Handle<ColorMaterial> {
        if alive {
            self.hovered_alive.clone()
        } else {
            self.hovered_dead.clone()
        }
    }

    /// Distinct weak handles, for systems tested without an asset server.
    #[cfg(test)]
    pub(crate) fn placeholders() -> Self {
        Self {
            cell: Handle::weak_from_u128(1),
            border_vert: Handle::weak_from_u128(2),
            border_horiz: Handle::weak_from_u128(3),
            border: Handle::weak_from_u128(4),
            alive: (0..=u8::MAX as u128)
                .map(|red| Handle::weak_from_u128(0x100 + red))
                .collect(),
            dead: Handle::weak_from_u128(5),
            has_lived: Handle::weak_from_u128(6),
            hovered_alive: Handle::weak_from_u128(7),
            hovered_dead: Handle::weak_from_u128(8),
        }
    }
}

#[derive(Resource, Clone, Copy)]
pub struct Board {
    /// the center of the board
    center: Vec2,
    /// the amount of cells on each axis
    size: usize,
    /// the size of each individual cell
    cell_size: Vec2,
    /// scale of each individual cell (should be 0.0 - 1.0)
    cell_scale: Vec2,
}

impl Board {
    pub fn from_config(config: &LifeConfig) -> Self {
        Self {
            center: BOARD_POS,
            size: config.board_size,
            cell_size: Vec2::splat(config.cell_size),
            cell_scale: CELL_SCALE,
        }
    }

    /// computes full size of the board in pixels
    #[inline]
    pub fn pixel_size(&self) -> Vec2 {
        self.size as f32 * self.cell_size
    }

    /// Rows run top to bottom and columns left to right.
    #[inline]
    fn cell_to_translation(&self, x: usize, y: usize) -> Vec3 {
        let top_left = self.center + self.pixel_size() * vec2(-0.5, 0.5);
        let offset = vec2(y as f32, -(x as f32)) * self.cell_size
            + self.cell_size * vec2(0.5, -0.5);
        (top_left + offset).extend(10.0)
    }

    /// Whether a world position lies on the board.
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        let half = self.pixel_size() * 0.5;
        let rel = pos - self.center;
        rel.x.abs() <= half.x && rel.y.abs() <= half.y
    }
}
