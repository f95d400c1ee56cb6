#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the platformer.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature, so sound events are logged instead of played.

mod sprites;
mod ui;

use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, info, warn};
use macroquad::{
    input::{
        get_char_pressed, is_key_down, is_key_pressed, is_mouse_button_down,
        is_mouse_button_pressed, is_mouse_button_released, mouse_position, KeyCode, MouseButton,
    },
    shapes::draw_rectangle,
};
use platformer_core::{PlayerInput, SoundEvent};
use platformer_rendering::{
    ButtonState, Color, FrameInput, FrameReport, Presentation, RenderingBackend, Scene,
    SpriteInstance,
};
use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::mpsc,
    time::{Duration, Instant},
};

use self::sprites::SpriteAtlas;

/// Keys observed during a single frame, before they are mapped to actions.
#[derive(Clone, Copy, Debug, Default)]
struct KeyObservations {
    /// `Escape` quits the loop.
    quit: bool,
    up: bool,
    left: bool,
    right: bool,
    /// `R` or `Enter`.
    restart: bool,
    control: bool,
    shift: bool,
    z: bool,
    y: bool,
    s: bool,
    /// `Tab` toggles the editor preview.
    tab: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        Self {
            quit: is_key_pressed(KeyCode::Escape),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) || is_key_down(KeyCode::Space),
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            restart: is_key_pressed(KeyCode::R) || is_key_pressed(KeyCode::Enter),
            control: is_key_down(KeyCode::LeftControl)
                || is_key_down(KeyCode::RightControl)
                || is_key_down(KeyCode::LeftSuper)
                || is_key_down(KeyCode::RightSuper),
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            z: is_key_pressed(KeyCode::Z),
            y: is_key_pressed(KeyCode::Y),
            s: is_key_pressed(KeyCode::S),
            tab: is_key_pressed(KeyCode::Tab),
        }
    }
}

/// Mouse state observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct MouseObservations {
    cursor: Vec2,
    primary: ButtonState,
    secondary: ButtonState,
}

impl MouseObservations {
    fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            cursor: Vec2::new(x, y),
            primary: button_state(MouseButton::Left),
            secondary: button_state(MouseButton::Right),
        }
    }
}

fn button_state(button: MouseButton) -> ButtonState {
    ButtonState {
        pressed: is_mouse_button_pressed(button),
        held: is_mouse_button_down(button),
        released: is_mouse_button_released(button),
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
            manifest_path: PathBuf::from("assets/manifest.toml"),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }

    /// Sets the sprite manifest consulted when sprite loading is enabled.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    ticks: u32,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    ticks: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    ticks_per_second: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.ticks = self.ticks.saturating_add(breakdown.ticks);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let window_seconds = self.window_duration.as_secs_f32();
        let per_second = frames as f32 / seconds;
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            ticks_per_second: self.ticks as f32 / seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.ticks = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameReport + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            window_size,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(window_size.0).unwrap_or(i32::MAX),
            window_height: i32::try_from(window_size.1).unwrap_or(i32::MAX),
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let sprite_atlas = if load_sprites {
                match SpriteAtlas::from_manifest_path(&manifest_path)
                    .context("failed to initialise sprite atlas")
                {
                    Ok(atlas) => Some(atlas),
                    Err(error) => {
                        let _ = atlas_init_sender.send(Err(error));
                        return;
                    }
                }
            } else {
                info!("sprite loading disabled; drawing placeholders");
                None
            };
            let _ = atlas_init_sender.send(Ok(()));

            let clear = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keys = KeyObservations::poll();
                if keys.quit {
                    info!("quit requested");
                    break;
                }

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let typed = drain_typed_characters();
                let mut frame_input = frame_input_from_observations(
                    keys,
                    MouseObservations::poll(),
                    typed,
                    screen,
                );
                frame_input.backgrounds = sprite_atlas
                    .as_ref()
                    .map_or(0, SpriteAtlas::background_count);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let report = update_scene(frame_dt, frame_input, &mut scene);
                dispatch_sounds(&report.sounds);

                let render_start = Instant::now();
                macroquad::window::clear_background(clear);
                draw_scene(&scene, sprite_atlas.as_ref(), screen);
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation: report.simulation,
                    ticks: report.ticks,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        ticks_per_second,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            "FPS: {:.2} (10s avg: {:.2}) | ticks/s: {:.1} sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            ticks_per_second,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn drain_typed_characters() -> Vec<char> {
    let mut typed = Vec::new();
    while let Some(character) = get_char_pressed() {
        typed.push(character);
    }
    typed
}

fn frame_input_from_observations(
    keys: KeyObservations,
    mouse: MouseObservations,
    typed: Vec<char>,
    viewport: Vec2,
) -> FrameInput {
    let inside = mouse.cursor.x >= 0.0
        && mouse.cursor.y >= 0.0
        && mouse.cursor.x < viewport.x
        && mouse.cursor.y < viewport.y;

    FrameInput {
        movement: PlayerInput::new(keys.up, keys.left, keys.right),
        restart: keys.restart,
        typed: typed
            .into_iter()
            .filter(|character| !character.is_control())
            .collect(),
        viewport,
        cursor: inside.then_some(mouse.cursor),
        primary: mouse.primary,
        secondary: mouse.secondary,
        undo: keys.control && keys.z && !keys.shift,
        redo: keys.control && (keys.y || (keys.z && keys.shift)),
        save: keys.control && keys.s,
        toggle_preview: keys.tab,
        backgrounds: 0,
    }
}

fn dispatch_sounds(sounds: &[SoundEvent]) {
    for sound in sounds {
        debug!("sound event {sound:?}");
    }
}

fn draw_scene(scene: &Scene, sprite_atlas: Option<&SpriteAtlas>, screen: Vec2) {
    let drew_background = sprite_atlas
        .map(|atlas| atlas.draw_background(scene.background, screen.x, screen.y))
        .unwrap_or(false);
    if !drew_background {
        let sky = to_macroquad_color(scene.sky_color());
        draw_rectangle(0.0, 0.0, screen.x, screen.y, sky);
    }

    for sprite in &scene.sprites {
        let drawn = sprite_atlas
            .map(|atlas| atlas.draw(sprite))
            .unwrap_or(false);
        if !drawn {
            draw_placeholder(sprite);
        }
    }

    if let Some(grid) = &scene.grid {
        ui::draw_grid(grid);
    }
    ui::draw_panels(&scene.panels);
    ui::draw_hud(&scene.hud, screen);
}

fn draw_placeholder(sprite: &SpriteInstance) {
    if sprite.size.x <= 0.0 || sprite.size.y <= 0.0 {
        warn!("skipping degenerate sprite {:?}", sprite.key);
        return;
    }
    draw_rectangle(
        sprite.position.x,
        sprite.position.y,
        sprite.size.x,
        sprite.size.y,
        to_macroquad_color(sprite.key.fallback_color()),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn movement_keys_are_level_sensitive() {
        let keys = KeyObservations {
            up: true,
            right: true,
            ..KeyObservations::default()
        };
        let input =
            frame_input_from_observations(keys, MouseObservations::default(), Vec::new(), screen());
        assert_eq!(input.movement, PlayerInput::new(true, false, true));
        assert!(!input.restart);
    }

    #[test]
    fn shortcuts_require_control_modifier() {
        let plain = KeyObservations {
            z: true,
            s: true,
            ..KeyObservations::default()
        };
        let input =
            frame_input_from_observations(plain, MouseObservations::default(), Vec::new(), screen());
        assert!(!input.undo && !input.save);

        let undo = KeyObservations {
            control: true,
            z: true,
            ..KeyObservations::default()
        };
        let input =
            frame_input_from_observations(undo, MouseObservations::default(), Vec::new(), screen());
        assert!(input.undo);
        assert!(!input.redo);

        let redo = KeyObservations {
            control: true,
            shift: true,
            z: true,
            ..KeyObservations::default()
        };
        let input =
            frame_input_from_observations(redo, MouseObservations::default(), Vec::new(), screen());
        assert!(input.redo);
        assert!(!input.undo);
    }

    #[test]
    fn typed_characters_drop_control_codes() {
        let input = frame_input_from_observations(
            KeyObservations::default(),
            MouseObservations::default(),
            vec!['4', '\r', '3', '\u{8}'],
            screen(),
        );
        assert_eq!(input.typed, vec!['4', '3']);
    }

    #[test]
    fn cursor_outside_window_is_dropped() {
        let mouse = MouseObservations {
            cursor: Vec2::new(900.0, 10.0),
            ..MouseObservations::default()
        };
        let input =
            frame_input_from_observations(KeyObservations::default(), mouse, Vec::new(), screen());
        assert_eq!(input.cursor, None);

        let mouse = MouseObservations {
            cursor: Vec2::new(120.0, 10.0),
            ..MouseObservations::default()
        };
        let input =
            frame_input_from_observations(KeyObservations::default(), mouse, Vec::new(), screen());
        assert_eq!(input.cursor, Some(Vec2::new(120.0, 10.0)));
        assert_eq!(input.viewport, screen());
    }

    #[test]
    fn fps_counter_reports_after_one_second() {
        let mut counter = FpsCounter::default();
        let frame = FrameBreakdown {
            frame: Duration::from_millis(250),
            simulation: Duration::from_millis(2),
            ticks: 15,
            render: Duration::from_millis(4),
        };
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());
        let metrics = counter.record_frame(frame).expect("one second elapsed");

        assert!((metrics.per_second - 4.0).abs() < 1e-3);
        assert!((metrics.ticks_per_second - 60.0).abs() < 1e-3);
        assert_eq!(metrics.avg_simulation, Duration::from_millis(2));
        assert_eq!(metrics.avg_render, Duration::from_millis(4));
        assert!(counter.record_frame(frame).is_none());
    }
}
