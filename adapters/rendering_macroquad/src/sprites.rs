use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use macroquad::{
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use platformer_rendering::{Color, SpriteInstance, SpriteKey};

use crate::to_macroquad_color;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Texture slot requested by the manifest: the backgrounds deck or a sprite family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TextureSlot {
    Background,
    Sprite(SpriteKey),
}

/// Cache of textures loaded from the sprite manifest.
///
/// Every family is optional; keys without textures are drawn as primitives.
#[derive(Debug, Default)]
pub(crate) struct SpriteAtlas {
    frames: HashMap<SpriteKey, Vec<Texture2D>>,
    backgrounds: Vec<Texture2D>,
}

impl SpriteAtlas {
    /// Loads sprites from the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Draws the sprite if a texture exists for its key. Returns whether anything was drawn.
    pub(crate) fn draw(&self, sprite: &SpriteInstance) -> bool {
        let Some(texture) = self.frame(sprite.key, sprite.frame) else {
            return false;
        };
        let Some(params) = texture_params(sprite) else {
            return true;
        };
        texture::draw_texture_ex(
            texture,
            sprite.position.x,
            sprite.position.y,
            to_macroquad_color(Color::new(1.0, 1.0, 1.0, 1.0)),
            params,
        );
        true
    }

    /// Stretches the selected background over the screen. Returns whether a texture was drawn.
    pub(crate) fn draw_background(&self, index: usize, width: f32, height: f32) -> bool {
        if self.backgrounds.is_empty() {
            return false;
        }
        let texture = self.backgrounds[index % self.backgrounds.len()];
        texture::draw_texture_ex(
            texture,
            0.0,
            0.0,
            to_macroquad_color(Color::new(1.0, 1.0, 1.0, 1.0)),
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(width, height)),
                ..DrawTextureParams::default()
            },
        );
        true
    }

    /// Number of frames stored for the key.
    #[must_use]
    pub(crate) fn frame_count(&self, key: SpriteKey) -> usize {
        self.frames.get(&key).map_or(0, Vec::len)
    }

    /// Number of background textures.
    #[must_use]
    pub(crate) fn background_count(&self) -> usize {
        self.backgrounds.len()
    }

    /// Frame of an animated family; indices wrap around the loaded frames.
    fn frame(&self, key: SpriteKey, frame: u32) -> Option<Texture2D> {
        let frames = self.frames.get(&key)?;
        if frames.is_empty() {
            return None;
        }
        frames.get(frame as usize % frames.len()).copied()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(TextureSlot, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        let atlas = Self::from_entries(entries, &mut loader)?;
        info!(
            "sprite atlas loaded {} families and {} backgrounds from {}",
            atlas.frames.len(),
            atlas.background_count(),
            manifest_path.display()
        );
        for key in SpriteKey::ALL {
            if atlas.frame_count(key) == 0 {
                warn!("no texture for {key:?}; drawing a placeholder");
            }
        }
        Ok(atlas)
    }

    fn from_entries(
        entries: Vec<(TextureSlot, PathBuf)>,
        loader: &mut impl FnMut(TextureSlot, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut atlas = Self::default();
        for (slot, path) in entries {
            let texture = loader(slot, &path).with_context(|| {
                format!("failed to load texture {slot:?} from {}", path.display())
            })?;
            match slot {
                TextureSlot::Background => atlas.backgrounds.push(texture),
                TextureSlot::Sprite(key) => atlas.frames.entry(key).or_default().push(texture),
            }
        }
        Ok(atlas)
    }
}

/// Destination parameters for a sprite, `None` when the size is degenerate.
pub(crate) fn texture_params(sprite: &SpriteInstance) -> Option<DrawTextureParams> {
    let size = sprite.size;
    if !(size.x.is_finite() && size.y.is_finite()) || size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    Some(DrawTextureParams {
        dest_size: Some(MacroquadVec2::new(size.x, size.y)),
        flip_x: sprite.flip_x,
        ..DrawTextureParams::default()
    })
}

fn default_loader(_slot: TextureSlot, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Single(String),
    Frames(Vec<String>),
}

impl ManifestEntry {
    fn into_paths(self) -> Vec<String> {
        match self {
            Self::Single(path) => vec![path],
            Self::Frames(paths) => paths,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default)]
    backgrounds: Vec<String>,
    #[serde(default)]
    sprites: HashMap<String, ManifestEntry>,
}

/// Parses the manifest into load requests ordered backgrounds first, then
/// sprite families in canonical key order with frames in listed order.
fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(TextureSlot, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, entry) in manifest.sprites {
        let key = parse_sprite_key(&name)
            .with_context(|| format!("unknown sprite key `{name}` in manifest"))?;
        let paths = entry.into_paths();
        if paths.is_empty() {
            bail!("sprite manifest lists no frames for {key:?}");
        }
        if resolved.insert(key, paths).is_some() {
            bail!("sprite manifest contains duplicate entry for {key:?}");
        }
    }

    let mut ordered: Vec<_> = manifest
        .backgrounds
        .into_iter()
        .map(|path| (TextureSlot::Background, base_path.join(path)))
        .collect();
    for key in SpriteKey::ALL {
        if let Some(paths) = resolved.remove(&key) {
            ordered.extend(
                paths
                    .into_iter()
                    .map(|path| (TextureSlot::Sprite(key), base_path.join(path))),
            );
        }
    }
    Ok(ordered)
}

fn parse_sprite_key(name: &str) -> Result<SpriteKey> {
    match name {
        "Sun" => Ok(SpriteKey::Sun),
        "Dirt" => Ok(SpriteKey::Dirt),
        "Grass" => Ok(SpriteKey::Grass),
        "Enemy" => Ok(SpriteKey::Enemy),
        "PlatformHorizontal" => Ok(SpriteKey::PlatformHorizontal),
        "PlatformVertical" => Ok(SpriteKey::PlatformVertical),
        "Lava" => Ok(SpriteKey::Lava),
        "Coin" => Ok(SpriteKey::Coin),
        "Exit" => Ok(SpriteKey::Exit),
        "PlayerWalk" => Ok(SpriteKey::PlayerWalk),
        "Ghost" => Ok(SpriteKey::Ghost),
        _ => bail!("unknown sprite key `{name}`"),
    }
}
