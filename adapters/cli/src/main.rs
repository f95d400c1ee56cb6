#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the platformer and its level editor.

mod backgrounds;
mod config;
mod level_store;
mod level_transfer;
mod scene;

use std::{
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use glam::Vec2;
use log::{debug, info, warn};
use platformer_core::{LevelNumber, TileCoord};
use platformer_rendering::{
    palette, Color, FrameInput, FrameReport, Presentation, RenderingBackend, Scene,
};
use platformer_rendering_macroquad::MacroquadBackend;
use platformer_system_editor::{default_grid, CycleDirection, Editor, SlotName};
use platformer_system_player::PlayerConfig;
use platformer_system_session::{LevelSource, Session, SessionConfig, TickClock};

use self::{
    backgrounds::BackgroundDeck,
    config::{Config, Overrides},
    level_store::{LevelStore, LevelStoreError},
};

/// Ticks simulated at most per rendered frame before the clock drops time.
const MAX_TICKS_PER_FRAME: u32 = 5;
/// Size of the editor window: the whole 20x20 grid at one pixel per world unit.
const EDITOR_WINDOW: (u32, u32) = (1000, 1000);
/// Slot edited when none is named.
const DEFAULT_EDIT_SLOT: &str = "custom";

#[derive(Debug, Parser)]
#[command(
    name = "platformer",
    version,
    about = "Tile platformer with a built-in level editor"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Configuration file, defaults to `platformer.toml` when present.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Directory holding `level{N}.json` files and editor slots.
    #[arg(long, value_name = "DIR", global = true)]
    levels_dir: Option<PathBuf>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL", global = true)]
    vsync: Option<bool>,
    /// Log frame timing once per second.
    #[arg(long, global = true)]
    show_fps: bool,
    /// Skip sprite loading and draw coloured placeholders.
    #[arg(long, global = true)]
    no_sprites: bool,
    /// Seed for the background shuffle.
    #[arg(long, value_name = "SEED", global = true)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play the levels in order (default).
    Play(PlayArgs),
    /// Open the level editor on a save slot.
    Edit(EditArgs),
    /// Print a slot as a single-line share string.
    Export(SlotArgs),
    /// Store a share string into a slot.
    Import(ImportArgs),
    /// List the saved slots and playable levels.
    List,
}

#[derive(Debug, Default, Args)]
struct PlayArgs {
    /// Level to start from.
    #[arg(long, value_name = "N")]
    level: Option<u32>,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Slot to edit; created on first save.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_EDIT_SLOT)]
    slot: String,
}

#[derive(Debug, Args)]
struct SlotArgs {
    /// Slot name, e.g. `level3`.
    #[arg(long, value_name = "NAME")]
    slot: String,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Slot receiving the level.
    #[arg(long, value_name = "NAME")]
    slot: String,
    /// Share string; read from stdin when omitted or `-`.
    code: Option<String>,
    /// Replace an existing slot.
    #[arg(long)]
    force: bool,
}

/// Entry point for the platformer command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let command = cli.command.unwrap_or(Command::Play(PlayArgs::default()));
    let start_level = match &command {
        Command::Play(args) => args.level,
        _ => None,
    };
    let mut config = Config::load(cli.global.config.as_deref())?;
    config.apply(&Overrides {
        levels_dir: cli.global.levels_dir,
        start_level,
        vsync: cli.global.vsync,
        show_fps: cli.global.show_fps,
        no_sprites: cli.global.no_sprites,
        seed: cli.global.seed,
    });
    let store = LevelStore::new(config.game.levels_dir.clone());

    match command {
        Command::Play(_) => play(&config, store),
        Command::Edit(args) => edit(&config, store, parse_slot(&args.slot)?),
        Command::Export(args) => {
            let slot = parse_slot(&args.slot)?;
            let grid = store.load(&slot)?;
            println!("{}", level_transfer::encode(&grid));
            Ok(())
        }
        Command::Import(args) => import(&store, args),
        Command::List => list(&store),
    }
}

fn parse_slot(name: &str) -> Result<SlotName> {
    SlotName::parse(name).with_context(|| format!("invalid slot name `{name}`"))
}

fn backend(config: &Config) -> MacroquadBackend {
    MacroquadBackend::new()
        .with_vsync(config.window.vsync)
        .with_show_fps(config.window.show_fps)
        .with_sprite_loading(config.assets.load_sprites)
        .with_manifest_path(config.assets.manifest.clone())
}

fn play(config: &Config, store: LevelStore) -> Result<()> {
    if store.max_available_level() == 0 {
        warn!(
            "no level files found in {}; starting on an empty level",
            store.root().display()
        );
    }
    let (width, height) = (config.window.width, config.window.height);
    let mut session = Session::new(
        store,
        SessionConfig {
            start_level: LevelNumber::new(config.game.start_level),
            final_level: LevelNumber::new(config.game.final_level),
            viewport: (to_pixels(width as f32), to_pixels(height as f32)),
            player: PlayerConfig::default(),
        },
    );
    let mut clock = TickClock::new(config.game.ticks_per_second, MAX_TICKS_PER_FRAME);
    let mut deck = BackgroundDeck::new(config.assets.background_seed, palette::SKIES.len());
    let mut shown_level = session.state().level();
    let mut scene = Scene::new(deck.current());
    scene::compose_play(&session, deck.current(), &mut scene);

    let presentation = Presentation::new(
        "Platformer",
        Color::from_rgb_u8(0, 0, 0),
        (width, height),
        scene,
    );
    backend(config).run(presentation, move |dt, input, scene| {
        let started = Instant::now();
        resize(&mut session, &input);
        deck.fit(input.backgrounds);

        let mut reloaded = false;
        for typed in &input.typed {
            if let Some(cheat) = session.type_char(*typed) {
                debug!("cheat {cheat:?} applied");
                reloaded = true;
            }
        }
        if input.restart && session.restart() {
            reloaded = true;
        }

        let ticks = clock.advance(dt);
        let mut sounds = Vec::new();
        for _ in 0..ticks {
            session.tick(input.movement, &mut sounds);
        }

        if reloaded || session.state().level() != shown_level {
            shown_level = session.state().level();
            let _ = deck.advance();
        }
        scene::compose_play(&session, deck.current(), scene);
        FrameReport {
            sounds,
            ticks,
            simulation: started.elapsed(),
        }
    })
}

fn resize<S: LevelSource>(session: &mut Session<S>, input: &FrameInput) {
    let width = to_pixels(input.viewport.x);
    let height = to_pixels(input.viewport.y);
    let viewport = session.state().camera().viewport();
    if width > 0 && height > 0 && (width, height) != (viewport.width(), viewport.height()) {
        session.resize_viewport(width, height);
    }
}

fn to_pixels(value: f32) -> i32 {
    if value.is_finite() {
        value.round().clamp(0.0, i32::MAX as f32) as i32
    } else {
        0
    }
}

fn edit(config: &Config, store: LevelStore, slot: SlotName) -> Result<()> {
    let grid = match store.load(&slot) {
        Ok(grid) => {
            info!("editing slot `{slot}`");
            grid
        }
        Err(LevelStoreError::Missing { .. }) => {
            info!("slot `{slot}` is new; starting from the default grid");
            default_grid()
        }
        Err(error) => return Err(error).context("failed to open slot for editing"),
    };
    let mut editor = Editor::new(grid, PlayerConfig::default());
    let mut clock = TickClock::new(config.game.ticks_per_second, MAX_TICKS_PER_FRAME);
    let mut deck = BackgroundDeck::new(config.assets.background_seed, palette::SKIES.len());
    let mut scene = Scene::new(deck.current());
    scene::compose_editor(&editor, &slot, deck.current(), &mut scene);

    let presentation = Presentation::new(
        format!("Platformer editor - {slot}"),
        Color::from_rgb_u8(0, 0, 0),
        EDITOR_WINDOW,
        scene,
    );
    backend(config).run(presentation, move |dt, input, scene| {
        let started = Instant::now();
        deck.fit(input.backgrounds);
        apply_editor_input(&mut editor, &input);
        if input.save {
            if let Err(error) = store.save(&slot, editor.grid()) {
                warn!("{:#}", anyhow::Error::new(error));
            }
        }

        let ticks = clock.advance(dt);
        for _ in 0..ticks {
            editor.tick(input.movement);
        }
        scene::compose_editor(&editor, &slot, deck.current(), scene);
        FrameReport {
            sounds: Vec::new(),
            ticks,
            simulation: started.elapsed(),
        }
    })
}

fn apply_editor_input(editor: &mut Editor, input: &FrameInput) {
    if input.toggle_preview {
        let _ = editor.toggle_preview();
    }
    if input.undo {
        let _ = editor.undo();
    }
    if input.redo {
        let _ = editor.redo();
    }

    let hovered = input.cursor.and_then(cell_under);
    if let Some(coord) = hovered {
        if input.primary.pressed {
            editor.press(coord, CycleDirection::Forward);
        } else if input.secondary.pressed {
            editor.press(coord, CycleDirection::Backward);
        } else if input.primary.held || input.secondary.held {
            editor.drag(coord);
        }
    }
    if input.primary.released || input.secondary.released {
        editor.release();
    }
}

fn cell_under(cursor: Vec2) -> Option<TileCoord> {
    TileCoord::from_world(cursor.x.floor() as i32, cursor.y.floor() as i32)
}

fn import(store: &LevelStore, args: ImportArgs) -> Result<()> {
    let slot = parse_slot(&args.slot)?;
    if store.contains(&slot) && !args.force {
        bail!("slot `{slot}` already exists; pass --force to replace it");
    }
    let code = match args.code.as_deref() {
        Some(code) if code != "-" => code.to_owned(),
        _ => {
            let mut buffer = String::new();
            let _ = io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read share string from stdin")?;
            buffer
        }
    };
    let grid = level_transfer::decode(&code).context("share string could not be decoded")?;
    let path = store.save(&slot, &grid)?;
    println!("imported level into {}", path.display());
    Ok(())
}

fn list(store: &LevelStore) -> Result<()> {
    let slots = store.slots()?;
    if slots.is_empty() {
        println!("no levels in {}", store.root().display());
    }
    for slot in &slots {
        println!("{slot}");
    }
    println!(
        "{} playable levels in {}",
        store.max_available_level(),
        store.root().display()
    );
    Ok(())
}
