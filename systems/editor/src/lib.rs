#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level editor model: authoring grid, painting, history and preview.
//!
//! The editor owns the grid being authored together with a preview player
//! that walks on an authoring world in which every non-empty cell is solid.
//! Widgets, file dialogs and drawing stay in the adapters.

mod history;

use std::fmt;

use log::{debug, info};
use platformer_core::{PlayerInput, TileCode, TileCoord, TileGrid, GRID_COLUMNS, GRID_ROWS};
use platformer_system_player::{Obstacles, Player, PlayerConfig};
use platformer_world::{build, build_authoring, Entities, World};
use thiserror::Error;

pub use history::History;

/// Where the editor's preview player appears.
pub const EDITOR_SPAWN: (i32, i32) = (100, 700);

/// Depth below which the preview player reappears at the top.
pub const WRAP_DEPTH: i32 = 1000;

/// Maximum number of snapshots retained for undo.
pub const UNDO_LIMIT: usize = 50;

/// Maximum length of a save slot name.
pub const SLOT_NAME_MAX_LEN: usize = 30;

/// Grid shown when the editor starts: dirt boundary with a grass floor.
#[must_use]
pub fn default_grid() -> TileGrid {
    let mut grid = TileGrid::empty();
    for column in 0..GRID_COLUMNS {
        let _ = grid.set(TileCoord::new(column, GRID_ROWS - 1), TileCode::Grass);
        let _ = grid.set(TileCoord::new(column, 0), TileCode::Dirt);
    }
    for row in 0..GRID_ROWS {
        let _ = grid.set(TileCoord::new(0, row), TileCode::Dirt);
        let _ = grid.set(TileCoord::new(GRID_COLUMNS - 1, row), TileCode::Dirt);
    }
    grid
}

/// Direction a click or drag cycles the tile code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    /// Next code, bound to the primary button.
    Forward,
    /// Previous code, bound to the secondary button.
    Backward,
}

impl CycleDirection {
    fn apply(self, code: TileCode) -> TileCode {
        match self {
            Self::Forward => code.next(),
            Self::Backward => code.previous(),
        }
    }
}

/// Validated name of a save slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotName(String);

impl SlotName {
    /// Validates a slot name made of ASCII letters, digits, `_` and `-`.
    pub fn parse(name: &str) -> Result<Self, SlotNameError> {
        if name.is_empty() {
            return Err(SlotNameError::Empty);
        }
        if name.chars().count() > SLOT_NAME_MAX_LEN {
            return Err(SlotNameError::TooLong {
                length: name.chars().count(),
            });
        }
        if let Some(character) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(SlotNameError::InvalidCharacter { character });
        }
        Ok(Self(name.to_owned()))
    }

    /// Name of the slot for a numbered level.
    #[must_use]
    pub fn for_level(level: u32) -> Self {
        Self(format!("level{level}"))
    }

    /// The validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a slot name was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SlotNameError {
    /// The name is empty.
    #[error("slot name must not be empty")]
    Empty,
    /// The name exceeds the length limit.
    #[error("slot name has {length} characters, at most 30 are allowed")]
    TooLong {
        /// Number of characters supplied.
        length: usize,
    },
    /// The name contains a disallowed character.
    #[error("slot name contains {character:?}; only letters, digits, '_' and '-' are allowed")]
    InvalidCharacter {
        /// First offending character.
        character: char,
    },
}

#[derive(Clone, Copy, Debug)]
struct Stroke {
    direction: CycleDirection,
    last: TileCoord,
}

/// Kinematic entities spawned while previewing the level.
#[derive(Clone, Debug, Default)]
struct Preview {
    entities: Entities,
    active: bool,
}

/// State of the level editor.
#[derive(Clone, Debug)]
pub struct Editor {
    grid: TileGrid,
    authoring: World,
    history: History,
    stroke: Option<Stroke>,
    preview: Preview,
    player: Player,
}

impl Editor {
    /// Opens the editor on the provided grid.
    #[must_use]
    pub fn new(grid: TileGrid, player: PlayerConfig) -> Self {
        Self {
            authoring: build_authoring(&grid),
            history: History::new(grid.clone(), UNDO_LIMIT),
            grid,
            stroke: None,
            preview: Preview::default(),
            player: Player::new(player, EDITOR_SPAWN.0, EDITOR_SPAWN.1),
        }
    }

    /// Grid being authored.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The preview player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Entities spawned for preview, when preview mode is on.
    #[must_use]
    pub fn preview(&self) -> Option<&Entities> {
        self.preview.active.then_some(&self.preview.entities)
    }

    /// Whether preview mode is on.
    #[must_use]
    pub const fn is_previewing(&self) -> bool {
        self.preview.active
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of redo steps available.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Starts a paint stroke: cycles the clicked cell and records a snapshot.
    pub fn press(&mut self, coord: TileCoord, direction: CycleDirection) {
        if !self.cycle(coord, direction) {
            return;
        }
        self.history.record(&self.grid);
        self.stroke = Some(Stroke {
            direction,
            last: coord,
        });
    }

    /// Continues the active stroke onto a newly entered cell. The stroke stays
    /// a single undo step.
    pub fn drag(&mut self, coord: TileCoord) {
        let Some(stroke) = self.stroke else {
            return;
        };
        if stroke.last == coord {
            return;
        }
        if self.cycle(coord, stroke.direction) {
            self.history.amend(&self.grid);
            self.stroke = Some(Stroke {
                direction: stroke.direction,
                last: coord,
            });
        }
    }

    /// Ends the active stroke.
    pub fn release(&mut self) {
        self.stroke = None;
    }

    /// Reverts to the previous snapshot. Returns whether the grid changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.grid) {
            Some(grid) => {
                self.replace(grid);
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone snapshot. Returns whether the grid changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(grid) => {
                self.replace(grid);
                true
            }
            None => false,
        }
    }

    /// Replaces the grid with a loaded level, recording it for undo and
    /// returning the preview player to its spawn.
    pub fn load(&mut self, grid: TileGrid) {
        self.replace(grid);
        self.history.record(&self.grid);
        self.player.reset(EDITOR_SPAWN.0, EDITOR_SPAWN.1);
        info!("editor grid replaced by loaded level");
    }

    /// Switches preview mode. Entering spawns entities from the grid; leaving
    /// returns each entity to its spawn state.
    pub fn toggle_preview(&mut self) -> bool {
        if self.preview.active {
            self.preview.entities.reset();
            self.preview.active = false;
        } else {
            self.preview.entities = build(&self.grid).entities;
            self.preview.active = true;
        }
        debug!("preview mode {}", if self.preview.active { "on" } else { "off" });
        self.preview.active
    }

    /// Advances the preview entities and the preview player by one tick.
    pub fn tick(&mut self, input: PlayerInput) {
        if self.preview.active {
            self.preview.entities.tick();
        }

        let mut sounds = Vec::new();
        let _ = self
            .player
            .update(input, &Obstacles::solid(&self.authoring), &mut sounds);
        if self.player.rect().y() > WRAP_DEPTH {
            self.player.set_y(0);
        }
    }

    fn cycle(&mut self, coord: TileCoord, direction: CycleDirection) -> bool {
        let Some(code) = self.grid.get(coord) else {
            return false;
        };
        let _ = self.grid.set(coord, direction.apply(code));
        self.authoring = build_authoring(&self.grid);
        true
    }

    fn replace(&mut self, grid: TileGrid) {
        self.authoring = build_authoring(&grid);
        self.grid = grid;
        self.stroke = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_boundary_and_floor() {
        let grid = default_grid();
        assert_eq!(grid.get(TileCoord::new(0, 5)), Some(TileCode::Dirt));
        assert_eq!(grid.get(TileCoord::new(19, 5)), Some(TileCode::Dirt));
        assert_eq!(grid.get(TileCoord::new(7, 0)), Some(TileCode::Dirt));
        assert_eq!(grid.get(TileCoord::new(7, 19)), Some(TileCode::Grass));
        assert_eq!(grid.get(TileCoord::new(0, 19)), Some(TileCode::Dirt));
        assert_eq!(grid.get(TileCoord::new(7, 7)), Some(TileCode::Empty));
    }

    #[test]
    fn slot_names_are_validated() {
        assert!(SlotName::parse("level_3-b").is_ok());
        assert_eq!(SlotName::parse(""), Err(SlotNameError::Empty));
        assert_eq!(
            SlotName::parse(&"a".repeat(31)),
            Err(SlotNameError::TooLong { length: 31 })
        );
        assert_eq!(
            SlotName::parse("../evil"),
            Err(SlotNameError::InvalidCharacter { character: '.' })
        );
        assert_eq!(SlotName::for_level(4).as_str(), "level4");
    }
}
