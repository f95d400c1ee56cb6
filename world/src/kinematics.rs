//! Scripted back-and-forth motion shared by enemies and moving platforms.

use platformer_core::Rect;

/// Number of ticks an oscillating entity travels before reversing.
pub const OSCILLATION_BOUND: i32 = 50;

/// Number of frames in the enemy walk strip.
pub const ENEMY_FRAME_COUNT: u32 = 36;

/// Ticks each enemy frame is held before advancing.
pub const ENEMY_FRAME_COOLDOWN: u32 = 3;

/// Per-tick speed of enemies along the x axis.
pub const ENEMY_SPEED: i32 = 1;

/// Per-tick speed of moving platforms along their axis.
pub const PLATFORM_SPEED: i32 = 1;

/// Capability set shared by every scripted-motion entity.
pub trait Kinematic {
    /// Advances the entity by a single simulation tick.
    fn tick(&mut self);

    /// Current world-space bounds of the entity.
    fn bounds(&self) -> Rect;

    /// Restores the entity to the state it was spawned in.
    fn reset(&mut self);
}

/// Bounded oscillation phase.
///
/// Each step increments the counter. Once its magnitude exceeds
/// [`OSCILLATION_BOUND`] the direction reverses and the counter changes sign,
/// then the entity moves one step in the current direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Oscillator {
    direction: i32,
    counter: i32,
}

impl Oscillator {
    /// Fresh phase moving in the positive direction.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            direction: 1,
            counter: 0,
        }
    }

    /// Signed unit direction of travel, either `-1` or `+1`.
    #[must_use]
    pub const fn direction(&self) -> i32 {
        self.direction
    }

    /// Signed tick counter of the current half-cycle.
    #[must_use]
    pub const fn counter(&self) -> i32 {
        self.counter
    }

    /// Advances the phase and returns the direction to travel this tick.
    pub fn step(&mut self) -> i32 {
        self.counter += 1;
        if self.counter.abs() > OSCILLATION_BOUND {
            self.direction = -self.direction;
            self.counter = -self.counter;
        }
        self.direction
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cosmetic frame index that holds every frame for a fixed number of ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationCycle {
    index: u32,
    frame_count: u32,
    cooldown: u32,
}

impl AnimationCycle {
    /// Creates a cycle over `frame_count` frames held `cooldown` ticks each.
    ///
    /// Zero arguments are raised to one so the cycle is always well defined.
    #[must_use]
    pub fn new(frame_count: u32, cooldown: u32) -> Self {
        Self {
            index: 0,
            frame_count: frame_count.max(1),
            cooldown: cooldown.max(1),
        }
    }

    /// Advances by one tick, wrapping after the final frame.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % (self.frame_count * self.cooldown);
    }

    /// Frame that should currently be displayed.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.index / self.cooldown
    }

    /// Returns to the first frame.
    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

/// Patrolling enemy that kills the player on contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    rect: Rect,
    origin: Rect,
    phase: Oscillator,
    animation: AnimationCycle,
}

impl Enemy {
    /// Width and height of an enemy in world pixels.
    pub const SIZE: i32 = 60;

    /// Spawns an enemy with its top-left corner at the provided point.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        let rect = Rect::new(x, y, Self::SIZE, Self::SIZE);
        Self {
            rect,
            origin: rect,
            phase: Oscillator::new(),
            animation: AnimationCycle::new(ENEMY_FRAME_COUNT, ENEMY_FRAME_COOLDOWN),
        }
    }

    /// Current oscillation phase.
    #[must_use]
    pub const fn phase(&self) -> Oscillator {
        self.phase
    }

    /// Animation frame to display.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.animation.frame()
    }
}

impl Kinematic for Enemy {
    fn tick(&mut self) {
        let direction = self.phase.step();
        self.rect.translate(direction * ENEMY_SPEED, 0);
        self.animation.advance();
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn reset(&mut self) {
        self.rect = self.origin;
        self.phase = Oscillator::new();
        self.animation.rewind();
    }
}

/// Axis a moving platform travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformAxis {
    /// Sweeps left and right.
    Horizontal,
    /// Sweeps up and down.
    Vertical,
}

/// Moving platform the player can stand on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    rect: Rect,
    origin: Rect,
    axis: PlatformAxis,
    phase: Oscillator,
}

impl Platform {
    /// Width of a platform in world pixels.
    pub const WIDTH: i32 = 50;
    /// Height of a platform in world pixels.
    pub const HEIGHT: i32 = 25;

    /// Spawns a platform with its top-left corner at the provided point.
    #[must_use]
    pub fn new(x: i32, y: i32, axis: PlatformAxis) -> Self {
        let rect = Rect::new(x, y, Self::WIDTH, Self::HEIGHT);
        Self {
            rect,
            origin: rect,
            axis,
            phase: Oscillator::new(),
        }
    }

    /// Axis of travel.
    #[must_use]
    pub const fn axis(&self) -> PlatformAxis {
        self.axis
    }

    /// Current oscillation phase.
    #[must_use]
    pub const fn phase(&self) -> Oscillator {
        self.phase
    }

    /// Speed vector of the platform, `(1, 0)` or `(0, 1)`.
    #[must_use]
    pub const fn speed(&self) -> (i32, i32) {
        match self.axis {
            PlatformAxis::Horizontal => (PLATFORM_SPEED, 0),
            PlatformAxis::Vertical => (0, PLATFORM_SPEED),
        }
    }

    /// Signed horizontal displacement applied to riders standing on the platform.
    #[must_use]
    pub const fn carry_x(&self) -> i32 {
        match self.axis {
            PlatformAxis::Horizontal => self.phase.direction() * PLATFORM_SPEED,
            PlatformAxis::Vertical => 0,
        }
    }
}

impl Kinematic for Platform {
    fn tick(&mut self) {
        let direction = self.phase.step();
        let (speed_x, speed_y) = self.speed();
        self.rect.translate(direction * speed_x, direction * speed_y);
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn reset(&mut self) {
        self.rect = self.origin;
        self.phase = Oscillator::new();
    }
}
