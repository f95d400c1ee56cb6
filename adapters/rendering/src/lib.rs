#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for platformer adapters.
//!
//! Scenes are expressed in screen-space pixels: the composer applies the
//! camera before handing sprites to a backend, so backends never see world
//! coordinates or simulation types beyond the input and sound contracts.

use anyhow::Result as AnyResult;
use glam::Vec2;
use platformer_core::{PlayerInput, SoundEvent};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Common palette shared by composers and backends.
pub mod palette {
    use super::Color;

    /// Opaque white.
    pub const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
    /// Score and banner blue.
    pub const BLUE: Color = Color::from_rgb_u8(0, 0, 255);
    /// Editor toolbar green.
    pub const GREEN: Color = Color::from_rgb_u8(144, 201, 120);
    /// Active state indicator.
    pub const ON: Color = Color::from_rgb_u8(0, 255, 0);
    /// Inactive state indicator.
    pub const OFF: Color = Color::from_rgb_u8(255, 0, 0);
    /// Sky tints cycled by the background deck when no background texture exists.
    pub const SKIES: [Color; 4] = [
        Color::from_rgb_u8(135, 206, 235),
        Color::from_rgb_u8(250, 214, 165),
        Color::from_rgb_u8(176, 196, 222),
        Color::from_rgb_u8(72, 61, 139),
    ];
}

/// Identifier of a texture family stored in the sprite atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// Decorative sun drawn over the sky.
    Sun,
    /// Dirt block.
    Dirt,
    /// Grass-topped block.
    Grass,
    /// Patrolling enemy, animated.
    Enemy,
    /// Horizontally moving platform.
    PlatformHorizontal,
    /// Vertically moving platform.
    PlatformVertical,
    /// Lava pool.
    Lava,
    /// Collectible coin, also used as the score icon.
    Coin,
    /// Level exit.
    Exit,
    /// Player walk cycle, frame `0` is the idle pose.
    PlayerWalk,
    /// Ghost shown after the player dies.
    Ghost,
}

impl SpriteKey {
    /// Every key in canonical order.
    pub const ALL: [SpriteKey; 11] = [
        SpriteKey::Sun,
        SpriteKey::Dirt,
        SpriteKey::Grass,
        SpriteKey::Enemy,
        SpriteKey::PlatformHorizontal,
        SpriteKey::PlatformVertical,
        SpriteKey::Lava,
        SpriteKey::Coin,
        SpriteKey::Exit,
        SpriteKey::PlayerWalk,
        SpriteKey::Ghost,
    ];

    /// Color used when the atlas has no texture for the key.
    #[must_use]
    pub const fn fallback_color(self) -> Color {
        match self {
            Self::Sun => Color::from_rgb_u8(255, 215, 0),
            Self::Dirt => Color::from_rgb_u8(121, 85, 58),
            Self::Grass => Color::from_rgb_u8(76, 153, 0),
            Self::Enemy => Color::from_rgb_u8(153, 50, 204),
            Self::PlatformHorizontal | Self::PlatformVertical => Color::from_rgb_u8(160, 160, 160),
            Self::Lava => Color::from_rgb_u8(255, 69, 0),
            Self::Coin => Color::from_rgb_u8(255, 200, 0),
            Self::Exit => Color::from_rgb_u8(64, 64, 64),
            Self::PlayerWalk => Color::from_rgb_u8(200, 30, 30),
            Self::Ghost => Color::new(1.0, 1.0, 1.0, 0.6),
        }
    }
}

/// Sprite placed on screen for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Texture family to draw.
    pub key: SpriteKey,
    /// Animation frame within the family.
    pub frame: u32,
    /// Mirror the texture horizontally.
    pub flip_x: bool,
    /// Top-left corner in screen pixels.
    pub position: Vec2,
    /// Destination size in screen pixels.
    pub size: Vec2,
}

impl SpriteInstance {
    /// Creates an unanimated, unmirrored sprite.
    #[must_use]
    pub const fn new(key: SpriteKey, position: Vec2, size: Vec2) -> Self {
        Self {
            key,
            frame: 0,
            flip_x: false,
            position,
            size,
        }
    }

    /// Selects an animation frame.
    #[must_use]
    pub const fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    /// Mirrors the sprite horizontally.
    #[must_use]
    pub const fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }
}

/// Filled rectangle drawn above sprites, used for panels and banners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePanel {
    /// Top-left corner in screen pixels.
    pub position: Vec2,
    /// Size in screen pixels.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

/// Screen edge a HUD text is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudAnchor {
    /// Offset from the top-left corner.
    TopLeft,
    /// Offset from the top-right corner, text grows leftwards.
    TopRight,
    /// Offset from the screen centre, text centred horizontally.
    Center,
    /// Offset from the bottom-left corner.
    BottomLeft,
    /// Offset from the bottom-right corner, text grows leftwards.
    BottomRight,
}

/// Line of text drawn over the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    /// Text content.
    pub text: String,
    /// Screen edge the offset is measured from.
    pub anchor: HudAnchor,
    /// Offset of the text baseline from the anchor.
    pub offset: Vec2,
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub color: Color,
}

impl HudText {
    /// Creates a text element.
    #[must_use]
    pub fn new(text: impl Into<String>, anchor: HudAnchor, offset: Vec2, size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            offset,
            size,
            color,
        }
    }

    /// Resolves the baseline origin of the text on a screen of the given size.
    ///
    /// `text_width` is the rendered width reported by the backend.
    #[must_use]
    pub fn origin(&self, screen: Vec2, text_width: f32) -> Vec2 {
        match self.anchor {
            HudAnchor::TopLeft => self.offset,
            HudAnchor::TopRight => Vec2::new(screen.x - text_width - self.offset.x, self.offset.y),
            HudAnchor::Center => Vec2::new(
                (screen.x - text_width) / 2.0 + self.offset.x,
                screen.y / 2.0 + self.offset.y,
            ),
            HudAnchor::BottomLeft => Vec2::new(self.offset.x, screen.y - self.offset.y),
            HudAnchor::BottomRight => {
                Vec2::new(screen.x - text_width - self.offset.x, screen.y - self.offset.y)
            }
        }
    }
}

/// Grid lines drawn over the editor canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOverlay {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Side length of a cell in screen pixels.
    pub cell_size: f32,
    /// Line color.
    pub color: Color,
}

/// Everything drawn during a frame, in screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Index into the background deck.
    pub background: usize,
    /// Sprites in draw order.
    pub sprites: Vec<SpriteInstance>,
    /// Editor grid lines, if any.
    pub grid: Option<GridOverlay>,
    /// Panels drawn above sprites and below text.
    pub panels: Vec<ScenePanel>,
    /// Text drawn last.
    pub hud: Vec<HudText>,
}

impl Scene {
    /// Creates an empty scene using the provided background.
    #[must_use]
    pub fn new(background: usize) -> Self {
        Self {
            background,
            sprites: Vec::new(),
            grid: None,
            panels: Vec::new(),
            hud: Vec::new(),
        }
    }

    /// Removes all frame content while keeping the background and allocations.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.grid = None;
        self.panels.clear();
        self.hud.clear();
    }

    /// Sky tint to use when no background texture is available.
    #[must_use]
    pub fn sky_color(&self) -> Color {
        palette::SKIES[self.background % palette::SKIES.len()]
    }
}

/// Edge-triggered and held state of a mouse button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame.
    pub pressed: bool,
    /// Is down.
    pub held: bool,
    /// Went up this frame.
    pub released: bool,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Level-sensitive movement keys.
    pub movement: PlayerInput,
    /// Restart requested this frame.
    pub restart: bool,
    /// Characters typed this frame.
    pub typed: Vec<char>,
    /// Current drawable size in pixels.
    pub viewport: Vec2,
    /// Cursor position in screen pixels.
    pub cursor: Option<Vec2>,
    /// Primary mouse button.
    pub primary: ButtonState,
    /// Secondary mouse button.
    pub secondary: ButtonState,
    /// Undo shortcut pressed.
    pub undo: bool,
    /// Redo shortcut pressed.
    pub redo: bool,
    /// Save shortcut pressed.
    pub save: bool,
    /// Preview toggle pressed.
    pub toggle_preview: bool,
    /// Background textures the backend has loaded, zero when drawing plain skies.
    pub backgrounds: usize,
}

/// Work reported by the scene update closure for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Sounds emitted by the simulation during the frame.
    pub sounds: Vec<SoundEvent>,
    /// Fixed ticks simulated during the frame.
    pub ticks: u32,
    /// Wall-clock time spent simulating.
    pub simulation: Duration,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Initial window size in pixels.
    pub window_size: (u32, u32),
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, window_size: (u32, u32), scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            window_size,
            scene,
        }
    }
}

/// Rendering backend capable of presenting platformer scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// the input captured by the adapter, rebuilds the scene and reports what
    /// the simulation did so the backend can dispatch sounds.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameReport + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_anchors_resolve_against_screen() {
        let screen = Vec2::new(800.0, 600.0);
        let text = |anchor| HudText::new("x", anchor, Vec2::new(10.0, 20.0), 30.0, palette::WHITE);

        assert_eq!(text(HudAnchor::TopLeft).origin(screen, 100.0), Vec2::new(10.0, 20.0));
        assert_eq!(text(HudAnchor::TopRight).origin(screen, 100.0), Vec2::new(690.0, 20.0));
        assert_eq!(text(HudAnchor::Center).origin(screen, 100.0), Vec2::new(360.0, 320.0));
        assert_eq!(text(HudAnchor::BottomLeft).origin(screen, 100.0), Vec2::new(10.0, 580.0));
        assert_eq!(text(HudAnchor::BottomRight).origin(screen, 100.0), Vec2::new(690.0, 580.0));
    }

    #[test]
    fn scene_clear_keeps_background() {
        let mut scene = Scene::new(3);
        scene.sprites.push(SpriteInstance::new(SpriteKey::Coin, Vec2::ZERO, Vec2::splat(25.0)));
        scene.hud.push(HudText::new("SCORE: 1", HudAnchor::TopLeft, Vec2::ZERO, 30.0, palette::WHITE));
        scene.clear();
        assert!(scene.sprites.is_empty());
        assert!(scene.hud.is_empty());
        assert_eq!(scene.background, 3);
        assert_eq!(scene.sky_color(), palette::SKIES[3]);
    }

    #[test]
    fn sky_color_wraps_background_index() {
        assert_eq!(Scene::new(5).sky_color(), palette::SKIES[1]);
    }

    #[test]
    fn lighten_moves_towards_white() {
        let color = Color::new(0.0, 0.5, 1.0, 0.4).lighten(0.5);
        assert_eq!(color, Color::new(0.5, 0.75, 1.0, 0.4));
    }

    #[test]
    fn sprite_builders_set_frame_and_flip() {
        let sprite = SpriteInstance::new(SpriteKey::PlayerWalk, Vec2::ZERO, Vec2::new(40.0, 80.0))
            .with_frame(7)
            .flipped(true);
        assert_eq!(sprite.frame, 7);
        assert!(sprite.flip_x);
    }
}
