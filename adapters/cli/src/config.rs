use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

/// Config file consulted when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "platformer.toml";

/// Settings read from `platformer.toml`, each section falling back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) window: WindowConfig,
    pub(crate) game: GameConfig,
    pub(crate) assets: AssetsConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
            show_fps: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) levels_dir: PathBuf,
    pub(crate) start_level: u32,
    pub(crate) final_level: u32,
    pub(crate) ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("levels"),
            start_level: 1,
            final_level: 10,
            ticks_per_second: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AssetsConfig {
    pub(crate) manifest: PathBuf,
    pub(crate) load_sprites: bool,
    pub(crate) background_seed: u64,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("assets/manifest.toml"),
            load_sprites: true,
            background_seed: 0,
        }
    }
}

/// Values given on the command line that take precedence over the file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) levels_dir: Option<PathBuf>,
    pub(crate) start_level: Option<u32>,
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: bool,
    pub(crate) no_sprites: bool,
    pub(crate) seed: Option<u64>,
}

impl Config {
    /// Reads the config file. A missing file yields defaults unless the path
    /// was requested explicitly.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };
        match fs::read_to_string(path) {
            Ok(contents) => {
                info!("using config {}", path.display());
                Self::from_toml_str(&contents)
                    .with_context(|| format!("invalid config file {}", path.display()))
            }
            Err(error) if error.kind() == ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(error) => Err(error)
                .with_context(|| format!("failed to read config file {}", path.display())),
        }
    }

    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }

    /// Applies command-line overrides on top of the file values.
    pub(crate) fn apply(&mut self, overrides: &Overrides) {
        if let Some(levels_dir) = &overrides.levels_dir {
            self.game.levels_dir = levels_dir.clone();
        }
        if let Some(level) = overrides.start_level {
            self.game.start_level = level;
        }
        if let Some(vsync) = overrides.vsync {
            self.window.vsync = vsync;
        }
        if overrides.show_fps {
            self.window.show_fps = true;
        }
        if overrides.no_sprites {
            self.assets.load_sprites = false;
        }
        if let Some(seed) = overrides.seed {
            self.assets.background_seed = seed;
        }
    }
}
