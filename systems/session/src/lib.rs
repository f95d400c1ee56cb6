#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration: level sequencing, score, restarts and cheats.
//!
//! A [`Session`] owns every piece of per-level state in one [`SessionState`].
//! Level data comes from a [`LevelSource`]; load failures never escape the
//! session and instead fall back to a safe grid.

mod cheats;
mod clock;

use log::{debug, info, warn};
use platformer_core::{
    GameOutcome, LevelLoadError, LevelNumber, PlayerInput, SoundEvent, TileGrid, GRID_ROWS,
    TILE_SIZE,
};
use platformer_system_camera::Camera;
use platformer_system_player::{Obstacles, Player, PlayerConfig};
use platformer_world::{build, Entities, World};

pub use cheats::{Cheat, SecretCode};
pub use clock::TickClock;

/// Top-left corner where the player appears at the start of every level.
pub const LEVEL_SPAWN: (i32, i32) = (100, GRID_ROWS as i32 * TILE_SIZE - 80 - TILE_SIZE);

/// Provider of level grids, typically backed by files.
pub trait LevelSource {
    /// Loads the grid of the requested level.
    fn load_grid(&self, level: LevelNumber) -> Result<TileGrid, LevelLoadError>;

    /// Highest level number for which data exists, `0` when there is none.
    fn max_available_level(&self) -> u32;
}

/// Parameters fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Level loaded when the session starts.
    pub start_level: LevelNumber,
    /// Last level of the run before the available levels are considered.
    pub final_level: LevelNumber,
    /// Initial viewport size in pixels.
    pub viewport: (i32, i32),
    /// Player controller constants.
    pub player: PlayerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_level: LevelNumber::FIRST,
            final_level: LevelNumber::new(10),
            viewport: (800, 600),
            player: PlayerConfig::default(),
        }
    }
}

/// Coarse presentation state derived from the outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// The player is in play.
    Playing,
    /// The player died and may restart the level.
    GameOver,
    /// The final level was completed.
    Won,
}

/// All state owned by the orchestrator for the current level.
#[derive(Clone, Debug)]
pub struct SessionState {
    level: LevelNumber,
    score: u32,
    outcome: GameOutcome,
    grid: TileGrid,
    world: World,
    entities: Entities,
    player: Player,
    camera: Camera,
}

impl SessionState {
    /// Level currently loaded.
    #[must_use]
    pub const fn level(&self) -> LevelNumber {
        self.level
    }

    /// Coins collected since the last restart.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current game-over signal.
    #[must_use]
    pub const fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Grid the current level was built from.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Static geometry of the current level.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Entities of the current level.
    #[must_use]
    pub const fn entities(&self) -> &Entities {
        &self.entities
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Camera following the player.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    fn rebuild(&mut self, level: LevelNumber, grid: TileGrid) {
        let built = build(&grid);
        self.camera.set_world_size(built.world.width(), built.world.height());
        self.world = built.world;
        self.entities = built.entities;
        self.grid = grid;
        self.level = level;
        self.outcome = GameOutcome::Alive;
        self.player.reset(LEVEL_SPAWN.0, LEVEL_SPAWN.1);
        self.follow_player();
    }

    fn follow_player(&mut self) {
        let rect = self.player.rect();
        self.camera.update(rect.center_x(), rect.center_y());
    }
}

/// Grid used when a level fails to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fallback {
    Empty,
    Current,
}

/// Sequences levels and drives the simulation tick.
#[derive(Debug)]
pub struct Session<S> {
    source: S,
    state: SessionState,
    final_level: LevelNumber,
    last_available: LevelNumber,
    secret: SecretCode,
}

impl<S: LevelSource> Session<S> {
    /// Starts a session on the configured start level.
    pub fn new(source: S, config: SessionConfig) -> Self {
        let available = source.max_available_level();
        let final_level = LevelNumber::new(config.final_level.get().min(available));
        info!(
            "starting session at level {} with final level {} ({} available)",
            config.start_level, final_level, available
        );

        let (width, height) = config.viewport;
        let grid = TileGrid::empty();
        let built = build(&grid);
        let state = SessionState {
            level: config.start_level,
            score: 0,
            outcome: GameOutcome::Alive,
            camera: Camera::new(width, height, built.world.width(), built.world.height()),
            world: built.world,
            entities: built.entities,
            grid,
            player: Player::new(config.player, LEVEL_SPAWN.0, LEVEL_SPAWN.1),
        };

        let mut session = Self {
            source,
            state,
            final_level,
            last_available: LevelNumber::new(available),
            secret: SecretCode::default(),
        };
        let grid = session
            .fetch(config.start_level, Fallback::Empty)
            .unwrap_or_else(TileGrid::empty);
        session.state.rebuild(config.start_level, grid);
        session
    }

    /// Read-only access to the session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Last level of the run.
    #[must_use]
    pub const fn final_level(&self) -> LevelNumber {
        self.final_level
    }

    /// Presentation phase derived from the outcome.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        match self.state.outcome {
            GameOutcome::Alive => SessionPhase::Playing,
            GameOutcome::Dead => SessionPhase::GameOver,
            GameOutcome::Victorious => SessionPhase::Won,
        }
    }

    /// Changes the viewport size of the camera.
    pub fn resize_viewport(&mut self, width: i32, height: i32) {
        self.state.camera.resize(width, height);
        self.state.follow_player();
    }

    /// Advances the simulation by one fixed tick.
    pub fn tick(&mut self, input: PlayerInput, out: &mut Vec<SoundEvent>) {
        let state = &mut self.state;
        match state.outcome {
            GameOutcome::Alive => {
                let collected = state.entities.collect_coins(&state.player.rect());
                if collected > 0 {
                    state.score += collected as u32;
                    out.extend(std::iter::repeat(SoundEvent::CoinCollected).take(collected));
                }

                let obstacles = Obstacles::level(&state.world, &state.entities);
                state.outcome = state.player.update(input, &obstacles, out);
                state.entities.tick();

                match state.outcome {
                    GameOutcome::Alive => {}
                    GameOutcome::Dead => info!("player died on level {}", state.level),
                    GameOutcome::Victorious => self.complete_level(),
                }
            }
            GameOutcome::Dead => state.player.rise_as_ghost(),
            GameOutcome::Victorious => {}
        }
        self.state.follow_player();
    }

    /// Restarts after a game over or a completed run. Returns whether anything changed.
    pub fn restart(&mut self) -> bool {
        match self.phase() {
            SessionPhase::Playing => false,
            SessionPhase::GameOver => {
                let level = self.state.level;
                info!("restarting level {level}");
                let grid = self
                    .fetch(level, Fallback::Current)
                    .unwrap_or_else(|| self.state.grid.clone());
                self.state.score = 0;
                self.state.rebuild(level, grid);
                true
            }
            SessionPhase::Won => {
                info!("starting a new run");
                let grid = self
                    .fetch(LevelNumber::FIRST, Fallback::Empty)
                    .unwrap_or_else(TileGrid::empty);
                self.state.score = 0;
                self.state.rebuild(LevelNumber::FIRST, grid);
                true
            }
        }
    }

    /// Feeds a typed character into the cheat code buffer.
    pub fn type_char(&mut self, typed: char) -> Option<Cheat> {
        let cheat = self.secret.push(typed)?;
        let target = match cheat {
            Cheat::JumpToFinal => self.final_level,
            Cheat::SkipLevel if self.state.level >= self.last_available => LevelNumber::FIRST,
            Cheat::SkipLevel => self.state.level.next(),
        };
        debug!("cheat {cheat:?} selects level {target}");
        match self.fetch(target, Fallback::Empty) {
            Some(grid) => self.state.rebuild(target, grid),
            None => {
                warn!("cheat target level {target} does not exist");
                self.state.outcome = GameOutcome::Alive;
            }
        }
        Some(cheat)
    }

    fn complete_level(&mut self) {
        let finished = self.state.level;
        if finished >= self.final_level {
            info!("final level {finished} completed with score {}", self.state.score);
            return;
        }

        let next = finished.next();
        match self.fetch(next, Fallback::Empty) {
            Some(grid) => {
                info!("level {finished} completed, advancing to level {next}");
                self.state.rebuild(next, grid);
            }
            None => info!("level {finished} completed and no further levels exist"),
        }
    }

    /// Loads a grid, applying the fallback on format or I/O failures.
    ///
    /// Returns `None` only when the level does not exist.
    fn fetch(&self, level: LevelNumber, fallback: Fallback) -> Option<TileGrid> {
        match self.source.load_grid(level) {
            Ok(grid) => Some(grid),
            Err(LevelLoadError::Missing { .. }) => None,
            Err(error) => {
                warn!("{error}; falling back to {fallback:?} grid");
                Some(match fallback {
                    Fallback::Empty => TileGrid::empty(),
                    Fallback::Current => self.state.grid.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoLevels;

    impl LevelSource for NoLevels {
        fn load_grid(&self, level: LevelNumber) -> Result<TileGrid, LevelLoadError> {
            Err(LevelLoadError::Missing { level })
        }

        fn max_available_level(&self) -> u32 {
            0
        }
    }

    #[test]
    fn missing_start_level_uses_empty_grid() {
        let session = Session::new(NoLevels, SessionConfig::default());
        assert_eq!(session.state().grid(), &TileGrid::empty());
        assert_eq!(session.final_level(), LevelNumber::FIRST);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn spawn_sits_one_tile_above_the_bottom_row() {
        assert_eq!(LEVEL_SPAWN, (100, 870));
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut session = Session::new(NoLevels, SessionConfig::default());
        assert!(!session.restart());
    }
}
