#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player controller: input handling, gravity and axis-separated collision.
//!
//! Horizontal motion is immediate while vertical motion integrates a velocity
//! under gravity. Each tick resolves the proposed displacement against static
//! tiles first, then tests hazards against the pre-movement rectangle, then
//! resolves against moving platforms, and finally applies the displacement.

use platformer_core::{Facing, GameOutcome, PlayerInput, Rect, SoundEvent};
use platformer_world::{Enemy, Entities, Exit, Kinematic, Lava, Platform, StaticTile, World};

/// Tunable constants of the player controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Width of the player's collision box.
    pub width: i32,
    /// Height of the player's collision box.
    pub height: i32,
    /// Horizontal displacement per tick while a direction is held.
    pub step: i32,
    /// Vertical velocity applied when a jump starts.
    pub jump_impulse: i32,
    /// Velocity gained per tick while falling.
    pub gravity: i32,
    /// Maximum downward velocity.
    pub terminal_velocity: i32,
    /// Ticks spent on a walk frame before advancing.
    pub walk_cooldown: u32,
    /// Number of frames in the walk cycle, idle frame included.
    pub walk_frames: u32,
    /// Distance under which a platform contact counts as a head-bonk or landing.
    pub platform_threshold: i32,
    /// Height above which a ghost stops rising.
    pub ghost_ceiling: i32,
    /// Pixels a ghost rises per tick.
    pub ghost_rise: i32,
    /// Initial health value.
    pub health: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 80,
            step: 5,
            jump_impulse: -15,
            gravity: 1,
            terminal_velocity: 10,
            walk_cooldown: 5,
            walk_frames: 17,
            platform_threshold: 20,
            ghost_ceiling: 200,
            ghost_rise: 5,
            health: 100,
        }
    }
}

/// Everything the player collides with during a tick.
#[derive(Clone, Copy, Debug)]
pub struct Obstacles<'a> {
    /// Solid static tiles.
    pub tiles: &'a [StaticTile],
    /// Patrolling enemies.
    pub enemies: &'a [Enemy],
    /// Lava hazards.
    pub lava: &'a [Lava],
    /// Exit regions.
    pub exits: &'a [Exit],
    /// Moving platforms.
    pub platforms: &'a [Platform],
}

impl<'a> Obstacles<'a> {
    /// Obstacles of a playable level.
    #[must_use]
    pub fn level(world: &'a World, entities: &'a Entities) -> Self {
        Self {
            tiles: world.tiles(),
            enemies: entities.enemies(),
            lava: entities.lava(),
            exits: entities.exits(),
            platforms: entities.platforms(),
        }
    }

    /// Static geometry only, with no hazards or platforms.
    #[must_use]
    pub fn solid(world: &'a World) -> Self {
        Self {
            tiles: world.tiles(),
            enemies: &[],
            lava: &[],
            exits: &[],
            platforms: &[],
        }
    }
}

/// Visual state of the player derived from its animation counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPose {
    /// Walk frame to display, `0` when idle.
    pub frame: u32,
    /// Direction the sprite faces.
    pub facing: Facing,
}

/// The single moving body of the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    config: PlayerConfig,
    rect: Rect,
    velocity_y: i32,
    facing: Facing,
    airborne: bool,
    jumped: bool,
    walk_counter: u32,
    frame: u32,
    health: i32,
}

impl Player {
    /// Creates a player standing at the provided top-left corner.
    #[must_use]
    pub fn new(config: PlayerConfig, x: i32, y: i32) -> Self {
        Self {
            config,
            rect: Rect::new(x, y, config.width, config.height),
            velocity_y: 0,
            facing: Facing::Right,
            airborne: true,
            jumped: false,
            walk_counter: 0,
            frame: 0,
            health: config.health,
        }
    }

    /// Returns the player to a spawn point, clearing motion and animation.
    pub fn reset(&mut self, x: i32, y: i32) {
        *self = Self::new(self.config, x, y);
    }

    /// Current collision box.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Current vertical velocity, negative when rising.
    #[must_use]
    pub const fn velocity_y(&self) -> i32 {
        self.velocity_y
    }

    /// Whether the last tick ended without ground support.
    #[must_use]
    pub const fn airborne(&self) -> bool {
        self.airborne
    }

    /// Stored health value.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Animation state for rendering.
    #[must_use]
    pub const fn pose(&self) -> PlayerPose {
        PlayerPose {
            frame: self.frame,
            facing: self.facing,
        }
    }

    /// Teleports the player vertically, keeping every other field.
    pub fn set_y(&mut self, y: i32) {
        self.rect.set_y(y);
    }

    /// Moves the ghost of a dead player towards the top of the level.
    pub fn rise_as_ghost(&mut self) {
        if self.rect.y() > self.config.ghost_ceiling {
            self.rect.translate(0, -self.config.ghost_rise);
        }
    }

    /// Advances the player by a single tick and reports the resulting outcome.
    ///
    /// Only meaningful while the player is alive. Hazards are evaluated against
    /// the rectangle the player occupied at the start of the tick; the last
    /// matching hazard decides the outcome.
    pub fn update(
        &mut self,
        input: PlayerInput,
        obstacles: &Obstacles<'_>,
        out: &mut Vec<SoundEvent>,
    ) -> GameOutcome {
        let mut dx = self.read_input(input, out);
        self.animate();

        self.velocity_y = (self.velocity_y + self.config.gravity).min(self.config.terminal_velocity);
        let mut dy = self.velocity_y;

        self.airborne = true;
        self.resolve_static(obstacles.tiles, &mut dx, &mut dy);

        let outcome = self.hazard_outcome(obstacles, out);

        self.resolve_platforms(obstacles.platforms, &mut dx, &mut dy);

        self.rect.translate(dx, dy);
        outcome
    }

    fn read_input(&mut self, input: PlayerInput, out: &mut Vec<SoundEvent>) -> i32 {
        if input.up && !self.jumped && !self.airborne {
            self.velocity_y = self.config.jump_impulse;
            self.jumped = true;
            out.push(SoundEvent::Jump);
        }
        if !input.up {
            self.jumped = false;
        }

        let mut dx = 0;
        if input.left {
            dx -= self.config.step;
            self.walk_counter += 1;
            self.facing = Facing::Left;
        }
        if input.right {
            dx += self.config.step;
            self.walk_counter += 1;
            self.facing = Facing::Right;
        }
        if !input.left && !input.right {
            self.walk_counter = 0;
            self.frame = 0;
        }
        dx
    }

    fn animate(&mut self) {
        if self.walk_counter > self.config.walk_cooldown {
            self.walk_counter = 0;
            self.frame = (self.frame + 1) % self.config.walk_frames.max(1);
        }
    }

    /// Axis-separated resolution against solid tiles.
    ///
    /// Exposed so the editor preview and tests can drive it directly.
    pub fn resolve_static(&mut self, tiles: &[StaticTile], dx: &mut i32, dy: &mut i32) {
        for tile in tiles {
            let bounds = tile.rect();
            if bounds.intersects(&self.rect.translated(*dx, 0)) {
                *dx = 0;
            }
            if bounds.intersects(&self.rect.translated(0, *dy)) {
                if self.velocity_y < 0 {
                    *dy = bounds.bottom() - self.rect.top();
                    self.velocity_y = 0;
                } else {
                    *dy = bounds.top() - self.rect.bottom();
                    self.velocity_y = 0;
                    self.airborne = false;
                }
            }
        }
    }

    /// Touching a hazard sounds even when an exit overrides the outcome.
    fn hazard_outcome(&self, obstacles: &Obstacles<'_>, out: &mut Vec<SoundEvent>) -> GameOutcome {
        let mut outcome = GameOutcome::Alive;
        let bitten = obstacles
            .enemies
            .iter()
            .any(|enemy| enemy.bounds().intersects(&self.rect));
        let burnt = obstacles
            .lava
            .iter()
            .any(|lava| lava.rect().intersects(&self.rect));
        if bitten || burnt {
            outcome = GameOutcome::Dead;
            out.push(SoundEvent::Dead);
        }
        if obstacles
            .exits
            .iter()
            .any(|exit| exit.rect().intersects(&self.rect))
        {
            outcome = GameOutcome::Victorious;
        }
        outcome
    }

    fn resolve_platforms(&mut self, platforms: &[Platform], dx: &mut i32, dy: &mut i32) {
        let threshold = self.config.platform_threshold;
        for platform in platforms {
            let bounds = platform.bounds();
            if bounds.intersects(&self.rect.translated(*dx, 0)) {
                *dx = 0;
            }
            if !bounds.intersects(&self.rect.translated(0, *dy)) {
                continue;
            }
            if (self.rect.top() + *dy - bounds.bottom()).abs() < threshold {
                self.velocity_y = 0;
                *dy = bounds.bottom() - self.rect.top();
            } else if (self.rect.bottom() + *dy - bounds.top()).abs() < threshold {
                self.rect.set_bottom(bounds.top() - 1);
                self.airborne = false;
                *dy = 0;
                self.rect.translate(platform.carry_x(), 0);
            }
        }
    }
}
