use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use platformer_core::{LevelFormatError, LevelLoadError, LevelNumber, TileGrid, LEVEL_SCAN_LIMIT};
use platformer_system_editor::SlotName;
use platformer_system_session::LevelSource;
use thiserror::Error;

const LEVEL_EXTENSION: &str = "json";

/// Directory of JSON level files. Numbered levels are the slots `level1`,
/// `level2`, and so on; any other valid slot name is an editor save.
#[derive(Clone, Debug)]
pub(crate) struct LevelStore {
    root: PathBuf,
}

/// Failures reading or writing level slots.
#[derive(Debug, Error)]
pub(crate) enum LevelStoreError {
    #[error("no level saved under `{slot}` in {root}")]
    Missing { slot: SlotName, root: PathBuf },
    #[error("could not access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a valid level")]
    Format {
        path: PathBuf,
        #[source]
        source: LevelFormatError,
    },
}

impl LevelStore {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn slot_path(&self, slot: &SlotName) -> PathBuf {
        self.root.join(format!("{slot}.{LEVEL_EXTENSION}"))
    }

    pub(crate) fn contains(&self, slot: &SlotName) -> bool {
        self.slot_path(slot).is_file()
    }

    /// Writes the grid through a temporary file so a crash never leaves a
    /// half-written level behind.
    pub(crate) fn save(&self, slot: &SlotName, grid: &TileGrid) -> Result<PathBuf, LevelStoreError> {
        fs::create_dir_all(&self.root).map_err(|source| LevelStoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.slot_path(slot);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, grid.encode()).map_err(|source| LevelStoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| LevelStoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!("saved level slot `{slot}` to {}", path.display());
        Ok(path)
    }

    pub(crate) fn load(&self, slot: &SlotName) -> Result<TileGrid, LevelStoreError> {
        let path = self.slot_path(slot);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(LevelStoreError::Missing {
                    slot: slot.clone(),
                    root: self.root.clone(),
                })
            }
            Err(source) => return Err(LevelStoreError::Io { path, source }),
        };
        let grid =
            TileGrid::decode(&bytes).map_err(|source| LevelStoreError::Format {
                path: path.clone(),
                source,
            })?;
        debug!("loaded level slot `{slot}` from {}", path.display());
        Ok(grid)
    }

    /// Every slot present in the directory, sorted by name.
    pub(crate) fn slots(&self) -> Result<Vec<SlotName>, LevelStoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LevelStoreError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut slots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LevelStoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEVEL_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if let Ok(slot) = SlotName::parse(stem) {
                slots.push(slot);
            }
        }
        slots.sort();
        Ok(slots)
    }
}

impl LevelSource for LevelStore {
    fn load_grid(&self, level: LevelNumber) -> Result<TileGrid, LevelLoadError> {
        match self.load(&SlotName::for_level(level.get())) {
            Ok(grid) => Ok(grid),
            Err(LevelStoreError::Missing { .. }) => Err(LevelLoadError::Missing { level }),
            Err(LevelStoreError::Io { source, .. }) => Err(LevelLoadError::Io { level, source }),
            Err(LevelStoreError::Format { source, .. }) => {
                Err(LevelLoadError::Format { level, source })
            }
        }
    }

    fn max_available_level(&self) -> u32 {
        (1..=LEVEL_SCAN_LIMIT)
            .take_while(|&level| self.contains(&SlotName::for_level(level)))
            .last()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::{TileCode, TileCoord};

    fn sample_grid() -> TileGrid {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(3, 19), TileCode::Grass));
        assert!(grid.set(TileCoord::new(4, 18), TileCode::Coin));
        grid
    }

    fn slot(name: &str) -> SlotName {
        SlotName::parse(name).expect("valid slot name")
    }

    #[test]
    fn saved_slots_load_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path().join("levels"));
        let grid = sample_grid();

        let path = store.save(&slot("castle"), &grid).expect("save succeeds");
        assert_eq!(path, store.root().join("castle.json"));
        assert_eq!(store.load(&slot("castle")).expect("load succeeds"), grid);
        assert!(!store.root().join("castle.json.tmp").exists());
    }

    #[test]
    fn missing_slot_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path());
        assert!(matches!(
            store.load(&slot("nothing")),
            Err(LevelStoreError::Missing { .. })
        ));
    }

    #[test]
    fn level_count_stops_at_first_gap() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path());
        assert_eq!(store.max_available_level(), 0);

        for level in [1, 2, 4] {
            let _ = store
                .save(&SlotName::for_level(level), &TileGrid::empty())
                .expect("save succeeds");
        }
        assert_eq!(store.max_available_level(), 2);
    }

    #[test]
    fn load_errors_map_to_level_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path());
        fs::write(dir.path().join("level1.json"), b"[[1, 2], [3]]").expect("write level");

        assert!(matches!(
            store.load_grid(LevelNumber::FIRST),
            Err(LevelLoadError::Format {
                source: LevelFormatError::Dimensions { .. },
                ..
            })
        ));
        assert!(matches!(
            store.load_grid(LevelNumber::new(2)),
            Err(LevelLoadError::Missing { .. })
        ));
    }

    #[test]
    fn out_of_range_codes_are_format_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path());
        let mut rows = TileGrid::empty().to_rows();
        rows[5][7] = 12;
        let json = serde_json::to_vec(&rows).expect("rows serialise");
        fs::write(dir.path().join("level1.json"), json).expect("write level");

        assert!(matches!(
            store.load_grid(LevelNumber::FIRST),
            Err(LevelLoadError::Format {
                source: LevelFormatError::InvalidTileCode {
                    row: 5,
                    column: 7,
                    code: 12
                },
                ..
            })
        ));
    }

    #[test]
    fn slots_list_only_valid_level_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path());
        let _ = store.save(&slot("level1"), &TileGrid::empty()).expect("save");
        let _ = store.save(&slot("arena"), &TileGrid::empty()).expect("save");
        fs::write(dir.path().join("notes.txt"), b"hello").expect("write");
        fs::write(dir.path().join("bad name.json"), b"[]").expect("write");

        assert_eq!(
            store.slots().expect("listing succeeds"),
            vec![slot("arena"), slot("level1")]
        );
    }

    #[test]
    fn listing_a_missing_directory_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LevelStore::new(dir.path().join("absent"));
        assert!(store.slots().expect("listing succeeds").is_empty());
    }
}
