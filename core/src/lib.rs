#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the platformer and its level editor.
//!
//! This crate defines the vocabulary every other crate speaks: the closed
//! [`TileCode`] enumeration, the fixed-size [`TileGrid`] authored by the
//! editor and consumed by the world builder, the integer [`Rect`] used for all
//! collision tests, and the small value types that flow between the player
//! controller, the session orchestrator and the adapters ([`PlayerInput`],
//! [`GameOutcome`], [`SoundEvent`]). Loading failures are described by
//! [`LevelFormatError`] and [`LevelLoadError`] so that only well-formed grids
//! ever reach the physics code.

use std::{fmt, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a single square tile expressed in world pixels.
pub const TILE_SIZE: i32 = 50;

/// Number of tile columns in every level grid.
pub const GRID_COLUMNS: usize = 20;

/// Number of tile rows in every level grid.
pub const GRID_ROWS: usize = 20;

/// Highest level index probed when enumerating level files.
pub const LEVEL_SCAN_LIMIT: u32 = 99;

/// Content of a single grid cell.
///
/// The enumeration is closed: values outside `0..=8` are rejected when a grid
/// is loaded, so downstream code can match exhaustively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileCode {
    /// Nothing; the cell is open air.
    #[default]
    Empty,
    /// Solid dirt block.
    Dirt,
    /// Solid grass-topped block.
    Grass,
    /// Spawn point for a patrolling enemy.
    EnemySpawn,
    /// Spawn point for a horizontally oscillating platform.
    PlatformHorizontal,
    /// Spawn point for a vertically oscillating platform.
    PlatformVertical,
    /// Lava hazard occupying the lower half of the cell.
    Lava,
    /// Collectible coin centred in the cell.
    Coin,
    /// Level exit, one and a half tiles tall.
    Exit,
}

impl TileCode {
    /// Every tile code ordered by its integer representation.
    pub const ALL: [TileCode; 9] = [
        TileCode::Empty,
        TileCode::Dirt,
        TileCode::Grass,
        TileCode::EnemySpawn,
        TileCode::PlatformHorizontal,
        TileCode::PlatformVertical,
        TileCode::Lava,
        TileCode::Coin,
        TileCode::Exit,
    ];

    /// Integer representation used by the level file format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Dirt => 1,
            Self::Grass => 2,
            Self::EnemySpawn => 3,
            Self::PlatformHorizontal => 4,
            Self::PlatformVertical => 5,
            Self::Lava => 6,
            Self::Coin => 7,
            Self::Exit => 8,
        }
    }

    /// Resolves an integer from the level file format into a tile code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        let index = usize::try_from(code).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Reports whether the code produces collidable static geometry.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Dirt | Self::Grass)
    }

    /// Next code in the enumeration, wrapping from [`TileCode::Exit`] to [`TileCode::Empty`].
    #[must_use]
    pub fn next(self) -> Self {
        let index = (usize::from(self.code()) + 1) % Self::ALL.len();
        Self::ALL[index]
    }

    /// Previous code in the enumeration, wrapping from [`TileCode::Empty`] to [`TileCode::Exit`].
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        let index = (usize::from(self.code()) + len - 1) % len;
        Self::ALL[index]
    }

    /// Short human readable label used by editor palettes and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Dirt => "Dirt",
            Self::Grass => "Grass",
            Self::EnemySpawn => "Enemy",
            Self::PlatformHorizontal => "Plat-H",
            Self::PlatformVertical => "Plat-V",
            Self::Lava => "Lava",
            Self::Coin => "Coin",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.label())
    }
}

/// Location of a single grid cell expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    column: usize,
    row: usize,
}

impl TileCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// World-space x coordinate of the cell's left edge.
    #[must_use]
    pub const fn world_x(&self) -> i32 {
        self.column as i32 * TILE_SIZE
    }

    /// World-space y coordinate of the cell's top edge.
    #[must_use]
    pub const fn world_y(&self) -> i32 {
        self.row as i32 * TILE_SIZE
    }

    /// Resolves the cell under a world-space pixel, if it lies on the grid.
    #[must_use]
    pub fn from_world(x: i32, y: i32) -> Option<Self> {
        if x < 0 || y < 0 {
            return None;
        }
        let column = usize::try_from(x / TILE_SIZE).ok()?;
        let row = usize::try_from(y / TILE_SIZE).ok()?;
        if column < GRID_COLUMNS && row < GRID_ROWS {
            Some(Self::new(column, row))
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle in integer world pixels.
///
/// Overlap follows the usual half-open convention: rectangles that merely
/// share an edge do not intersect, and a rectangle with zero width or height
/// never intersects anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a rectangle anchored at its top-left corner.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size centred on a point.
    ///
    /// Odd sizes round the top-left corner towards negative infinity by half a
    /// pixel, so a 25 pixel square centred at 25 starts at 13.
    #[must_use]
    pub const fn centered(center_x: i32, center_y: i32, width: i32, height: i32) -> Self {
        Self::new(center_x - width / 2, center_y - height / 2, width, height)
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Left edge, alias of [`Rect::x`].
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// One past the rightmost column.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge, alias of [`Rect::y`].
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// One past the lowest row.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Horizontal centre, truncated towards the left edge.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical centre, truncated towards the top edge.
    #[must_use]
    pub const fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Returns a copy shifted by the provided displacement.
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shifts the rectangle in place.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Moves the left edge while preserving the size.
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    /// Moves the top edge while preserving the size.
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    /// Moves the rectangle vertically so its bottom edge lands on `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Reports whether the two rectangles overlap by at least one pixel.
    #[must_use]
    pub const fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.x < other.right()
            && self.y < other.bottom()
            && self.right() > other.x
            && self.bottom() > other.y
    }
}

/// Ternary game-over signal reported by the player controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// The player is in play.
    #[default]
    Alive,
    /// The player touched an enemy or lava.
    Dead,
    /// The player reached the exit.
    Victorious,
}

impl GameOutcome {
    /// Maps the legacy integer signal (`0`, `-1`, `+1`) to an outcome.
    ///
    /// Any other value is treated as [`GameOutcome::Alive`].
    #[must_use]
    pub const fn from_signal(signal: i8) -> Self {
        match signal {
            -1 => Self::Dead,
            1 => Self::Victorious,
            _ => Self::Alive,
        }
    }

    /// Integer signal for the outcome.
    #[must_use]
    pub const fn signal(self) -> i8 {
        match self {
            Self::Alive => 0,
            Self::Dead => -1,
            Self::Victorious => 1,
        }
    }

    /// Reports whether the outcome is terminal until an external reset.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Alive)
    }
}

/// Level-sensitive directional input sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerInput {
    /// Jump key is held.
    pub up: bool,
    /// Move-left key is held.
    pub left: bool,
    /// Move-right key is held.
    pub right: bool,
}

impl PlayerInput {
    /// Input with no keys held.
    pub const IDLE: PlayerInput = PlayerInput {
        up: false,
        left: false,
        right: false,
    };

    /// Creates an input snapshot from explicit key states.
    #[must_use]
    pub const fn new(up: bool, left: bool, right: bool) -> Self {
        Self { up, left, right }
    }
}

/// Direction the player sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Facing towards decreasing x.
    Left,
    /// Facing towards increasing x.
    #[default]
    Right,
}

/// Discrete audio cue emitted by the simulation. Playback is external.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// The player left the ground.
    Jump,
    /// The player touched a hazard.
    Dead,
    /// A coin was picked up.
    CoinCollected,
}

/// One-based level number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelNumber(u32);

impl LevelNumber {
    /// The first level of every session.
    pub const FIRST: LevelNumber = LevelNumber(1);

    /// Creates a level number, clamping zero up to the first level.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The level that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed 20×20 matrix of tile codes describing one level.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct TileGrid {
    cells: Vec<TileCode>,
}

impl TileGrid {
    /// Creates a grid where every cell is [`TileCode::Empty`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: vec![TileCode::Empty; GRID_COLUMNS * GRID_ROWS],
        }
    }

    /// Validates a row-major integer matrix and converts it into a grid.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, LevelFormatError> {
        if rows.len() != GRID_ROWS {
            return Err(LevelFormatError::Dimensions {
                rows: rows.len(),
                columns: rows.first().map_or(0, Vec::len),
            });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != GRID_COLUMNS) {
            return Err(LevelFormatError::Dimensions {
                rows: rows.len(),
                columns: row.len(),
            });
        }

        let mut cells = Vec::with_capacity(GRID_COLUMNS * GRID_ROWS);
        for (row_index, row) in rows.iter().enumerate() {
            for (column_index, &code) in row.iter().enumerate() {
                let tile = TileCode::from_code(code).ok_or(LevelFormatError::InvalidTileCode {
                    row: row_index,
                    column: column_index,
                    code,
                })?;
                cells.push(tile);
            }
        }
        Ok(Self { cells })
    }

    /// Deserialises a grid from the JSON level file format.
    pub fn decode(bytes: &[u8]) -> Result<Self, LevelFormatError> {
        let rows: Vec<Vec<i64>> = serde_json::from_slice(bytes)?;
        Self::from_rows(&rows)
    }

    /// Serialises the grid into the JSON level file format, one row per line.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let lines: Vec<String> = self
            .to_rows()
            .iter()
            .map(|row| {
                let codes: Vec<String> = row.iter().map(i64::to_string).collect();
                format!("  [{}]", codes.join(", "))
            })
            .collect();
        format!("[\n{}\n]\n", lines.join(",\n")).into_bytes()
    }

    /// Row-major integer matrix representation of the grid.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells
            .chunks(GRID_COLUMNS)
            .map(|row| row.iter().map(|tile| i64::from(tile.code())).collect())
            .collect()
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        GRID_ROWS
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> usize {
        GRID_COLUMNS
    }

    /// Total width of the grid measured in world pixels.
    #[must_use]
    pub const fn width_px(&self) -> i32 {
        GRID_COLUMNS as i32 * TILE_SIZE
    }

    /// Total height of the grid measured in world pixels.
    #[must_use]
    pub const fn height_px(&self) -> i32 {
        GRID_ROWS as i32 * TILE_SIZE
    }

    /// Returns the code stored at the provided cell, if it lies on the grid.
    #[must_use]
    pub fn get(&self, coord: TileCoord) -> Option<TileCode> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// Overwrites a cell. Returns `false` when the coordinate is off the grid.
    pub fn set(&mut self, coord: TileCoord, code: TileCode) -> bool {
        match self.index(coord) {
            Some(index) => {
                self.cells[index] = code;
                true
            }
            None => false,
        }
    }

    /// Iterates every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TileCode)> + '_ {
        self.cells.iter().enumerate().map(|(index, &code)| {
            (
                TileCoord::new(index % GRID_COLUMNS, index / GRID_COLUMNS),
                code,
            )
        })
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.column() < GRID_COLUMNS && coord.row() < GRID_ROWS {
            Some(coord.row() * GRID_COLUMNS + coord.column())
        } else {
            None
        }
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Vec<i64>>> for TileGrid {
    type Error = LevelFormatError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<TileGrid> for Vec<Vec<i64>> {
    fn from(grid: TileGrid) -> Self {
        grid.to_rows()
    }
}

/// Reasons level bytes could not be turned into a [`TileGrid`].
#[derive(Debug, Error)]
pub enum LevelFormatError {
    /// The payload is not a JSON matrix of integers.
    #[error("level data is not an integer matrix: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The matrix is not exactly 20 rows by 20 columns.
    #[error("level must be 20x20 tiles, found {rows} rows with {columns} columns")]
    Dimensions {
        /// Number of rows present in the payload.
        rows: usize,
        /// Length of the first offending row.
        columns: usize,
    },
    /// A cell holds a value outside the tile enumeration.
    #[error("tile code {code} at row {row}, column {column} is not a known tile")]
    InvalidTileCode {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Raw value found in the payload.
        code: i64,
    },
}

/// Reasons a level could not be provided to the session.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    /// No data exists for the requested level.
    #[error("level {level} does not exist")]
    Missing {
        /// Level that was requested.
        level: LevelNumber,
    },
    /// The backing data exists but is malformed.
    #[error("level {level} is malformed")]
    Format {
        /// Level that was requested.
        level: LevelNumber,
        /// Underlying format problem.
        #[source]
        source: LevelFormatError,
    },
    /// The backing data could not be read.
    #[error("level {level} could not be read")]
    Io {
        /// Level that was requested.
        level: LevelNumber,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_filled_with(code: i64) -> Vec<Vec<i64>> {
        vec![vec![code; GRID_COLUMNS]; GRID_ROWS]
    }

    #[test]
    fn tile_codes_cycle_within_enumeration() {
        assert_eq!(TileCode::Exit.next(), TileCode::Empty);
        assert_eq!(TileCode::Empty.previous(), TileCode::Exit);
        assert_eq!(TileCode::Dirt.next(), TileCode::Grass);
        for code in TileCode::ALL {
            assert_eq!(code.next().previous(), code);
            assert_eq!(TileCode::from_code(i64::from(code.code())), Some(code));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(TileCode::from_code(9), None);
        assert_eq!(TileCode::from_code(-1), None);
    }

    #[test]
    fn only_dirt_and_grass_are_solid() {
        let solid: Vec<_> = TileCode::ALL.into_iter().filter(|c| c.is_solid()).collect();
        assert_eq!(solid, vec![TileCode::Dirt, TileCode::Grass]);
    }

    #[test]
    fn rect_edges_touching_do_not_intersect() {
        let left = Rect::new(0, 0, 50, 50);
        let right = Rect::new(50, 0, 50, 50);
        assert!(!left.intersects(&right));
        assert!(left.intersects(&right.translated(-1, 0)));
    }

    #[test]
    fn zero_sized_rect_never_intersects() {
        let area = Rect::new(0, 0, 100, 100);
        assert!(!Rect::new(10, 10, 0, 5).intersects(&area));
        assert!(!area.intersects(&Rect::new(10, 10, 5, 0)));
    }

    #[test]
    fn centered_rect_rounds_like_pixel_grids() {
        let coin = Rect::centered(25, 25, 25, 25);
        assert_eq!((coin.x(), coin.y()), (13, 13));
        assert_eq!(coin.center_x(), 25);
    }

    #[test]
    fn set_bottom_preserves_height() {
        let mut rect = Rect::new(10, 10, 40, 80);
        rect.set_bottom(500);
        assert_eq!(rect.bottom(), 500);
        assert_eq!(rect.top(), 420);
    }

    #[test]
    fn outcome_signal_round_trips() {
        for outcome in [GameOutcome::Alive, GameOutcome::Dead, GameOutcome::Victorious] {
            assert_eq!(GameOutcome::from_signal(outcome.signal()), outcome);
        }
        assert!(!GameOutcome::Alive.is_terminal());
        assert!(GameOutcome::Dead.is_terminal());
    }

    #[test]
    fn decode_accepts_well_formed_level() {
        let mut rows = rows_filled_with(0);
        rows[19][3] = 2;
        rows[10][19] = 8;
        let bytes = serde_json::to_vec(&rows).expect("serialize rows");

        let grid = TileGrid::decode(&bytes).expect("valid level decodes");
        assert_eq!(grid.get(TileCoord::new(3, 19)), Some(TileCode::Grass));
        assert_eq!(grid.get(TileCoord::new(19, 10)), Some(TileCode::Exit));
        assert_eq!(grid.get(TileCoord::new(20, 0)), None);
    }

    #[test]
    fn decode_rejects_wrong_dimensions() {
        let rows = vec![vec![0_i64; GRID_COLUMNS]; GRID_ROWS - 1];
        let bytes = serde_json::to_vec(&rows).expect("serialize rows");
        let error = TileGrid::decode(&bytes).expect_err("short level must fail");
        assert!(matches!(
            error,
            LevelFormatError::Dimensions { rows: 19, columns: 20 }
        ));

        let mut ragged = rows_filled_with(0);
        ragged[4].push(0);
        let error = TileGrid::from_rows(&ragged).expect_err("ragged level must fail");
        assert!(matches!(
            error,
            LevelFormatError::Dimensions { rows: 20, columns: 21 }
        ));
    }

    #[test]
    fn decode_rejects_out_of_enumeration_codes() {
        let mut rows = rows_filled_with(1);
        rows[2][5] = 9;
        let error = TileGrid::from_rows(&rows).expect_err("code 9 must fail");
        assert!(matches!(
            error,
            LevelFormatError::InvalidTileCode {
                row: 2,
                column: 5,
                code: 9
            }
        ));
    }

    #[test]
    fn decode_rejects_non_matrix_payload() {
        let error = TileGrid::decode(b"{\"not\": \"a grid\"}").expect_err("object must fail");
        assert!(matches!(error, LevelFormatError::Malformed(_)));
    }

    #[test]
    fn encode_produces_decodable_json() {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(0, 0), TileCode::Dirt));
        assert!(grid.set(TileCoord::new(7, 12), TileCode::Coin));
        assert!(!grid.set(TileCoord::new(0, 20), TileCode::Coin));

        let restored = TileGrid::decode(&grid.encode()).expect("encoded grid decodes");
        assert_eq!(restored, grid);
    }

    #[test]
    fn tile_grid_survives_binary_serialization() {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(5, 5), TileCode::Lava));
        let bytes = bincode::serialize(&grid).expect("serialize");
        let restored: TileGrid = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, grid);
    }

    #[test]
    fn iteration_is_row_major() {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(1, 0), TileCode::Dirt));
        assert!(grid.set(TileCoord::new(0, 1), TileCode::Grass));
        let solids: Vec<_> = grid
            .iter()
            .filter(|(_, code)| code.is_solid())
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(solids, vec![TileCoord::new(1, 0), TileCoord::new(0, 1)]);
    }

    #[test]
    fn world_coordinates_map_back_to_cells() {
        assert_eq!(TileCoord::from_world(149, 51), Some(TileCoord::new(2, 1)));
        assert_eq!(TileCoord::from_world(-1, 0), None);
        assert_eq!(TileCoord::from_world(1000, 0), None);
        assert_eq!(TileCoord::new(3, 4).world_x(), 150);
        assert_eq!(TileCoord::new(3, 4).world_y(), 200);
    }
}
