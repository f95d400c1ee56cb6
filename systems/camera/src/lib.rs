#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Viewport that follows a target through the level.

use platformer_core::Rect;

/// Maps world coordinates into screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    x: i32,
    y: i32,
    viewport_width: i32,
    viewport_height: i32,
    world_width: i32,
    world_height: i32,
}

impl Camera {
    /// Creates a camera at the world origin.
    #[must_use]
    pub const fn new(viewport_width: i32, viewport_height: i32, world_width: i32, world_height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            viewport_width,
            viewport_height,
            world_width,
            world_height,
        }
    }

    /// Horizontal offset of the viewport.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical offset of the viewport.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Visible area in world coordinates.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        Rect::new(self.x, self.y, self.viewport_width, self.viewport_height)
    }

    /// Changes the size of the visible area, e.g. after a window resize.
    pub fn resize(&mut self, viewport_width: i32, viewport_height: i32) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
    }

    /// Changes the bounds the viewport is clamped to.
    pub fn set_world_size(&mut self, world_width: i32, world_height: i32) {
        self.world_width = world_width;
        self.world_height = world_height;
    }

    /// Centres the viewport on the target, then clamps it inside the world.
    ///
    /// When the world is smaller than the viewport the offset settles at zero.
    pub fn update(&mut self, target_x: i32, target_y: i32) {
        self.x = clamp_axis(target_x - self.viewport_width / 2, self.world_width - self.viewport_width);
        self.y = clamp_axis(target_y - self.viewport_height / 2, self.world_height - self.viewport_height);
    }

    /// Translates a world position into screen space.
    #[must_use]
    pub const fn apply(&self, world_x: i32, world_y: i32) -> (i32, i32) {
        (world_x - self.x, world_y - self.y)
    }

    /// Translates a world rectangle into screen space.
    #[must_use]
    pub const fn apply_rect(&self, rect: &Rect) -> Rect {
        rect.translated(-self.x, -self.y)
    }

    /// Reports whether any part of the rectangle touches the viewport.
    #[must_use]
    pub const fn is_in_view(&self, rect: &Rect) -> bool {
        !(rect.right() < self.x
            || rect.left() > self.x + self.viewport_width
            || rect.bottom() < self.y
            || rect.top() > self.y + self.viewport_height)
    }
}

fn clamp_axis(offset: i32, upper: i32) -> i32 {
    offset.min(upper).max(0)
}
