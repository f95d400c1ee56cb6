use std::collections::VecDeque;

use platformer_core::TileGrid;

/// Bounded stack of full-grid snapshots supporting undo and redo.
///
/// The newest undo entry always mirrors the last recorded grid, so undo is
/// only possible while more than one snapshot is held.
#[derive(Clone, Debug)]
pub struct History {
    undo: VecDeque<TileGrid>,
    redo: Vec<TileGrid>,
    limit: usize,
}

impl History {
    /// Creates a history seeded with the initial grid.
    #[must_use]
    pub fn new(initial: TileGrid, limit: usize) -> Self {
        let mut undo = VecDeque::with_capacity(limit.max(1));
        undo.push_back(initial);
        Self {
            undo,
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records the grid after an edit, discarding any redo entries.
    pub fn record(&mut self, grid: &TileGrid) {
        self.undo.push_back(grid.clone());
        while self.undo.len() > self.limit {
            let _ = self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Overwrites the newest snapshot with the grid, leaving depth unchanged.
    pub fn amend(&mut self, grid: &TileGrid) {
        match self.undo.back_mut() {
            Some(newest) => newest.clone_from(grid),
            None => self.undo.push_back(grid.clone()),
        }
    }

    /// Steps back one snapshot, returning the grid to restore.
    pub fn undo(&mut self, current: &TileGrid) -> Option<TileGrid> {
        if self.undo.len() <= 1 {
            return None;
        }
        self.redo.push(current.clone());
        let _ = self.undo.pop_back();
        self.undo.back().cloned()
    }

    /// Re-applies the most recently undone grid.
    pub fn redo(&mut self) -> Option<TileGrid> {
        let restored = self.redo.pop()?;
        self.undo.push_back(restored.clone());
        while self.undo.len() > self.limit {
            let _ = self.undo.pop_front();
        }
        Some(restored)
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len().saturating_sub(1)
    }

    /// Number of redo steps available.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::{TileCode, TileCoord};

    fn grid_with(code: TileCode) -> TileGrid {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(0, 0), code));
        grid
    }

    #[test]
    fn undo_requires_more_than_initial_snapshot() {
        let initial = TileGrid::empty();
        let mut history = History::new(initial.clone(), 50);
        assert_eq!(history.undo(&initial), None);
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn undo_then_redo_restores_edit() {
        let initial = TileGrid::empty();
        let edited = grid_with(TileCode::Dirt);
        let mut history = History::new(initial.clone(), 50);
        history.record(&edited);

        assert_eq!(history.undo(&edited), Some(initial.clone()));
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.redo(), Some(edited));
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn recording_clears_redo() {
        let initial = TileGrid::empty();
        let mut history = History::new(initial, 50);
        let first = grid_with(TileCode::Dirt);
        history.record(&first);
        let _ = history.undo(&first);
        history.record(&grid_with(TileCode::Grass));
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn redone_grid_becomes_newest_snapshot() {
        let initial = TileGrid::empty();
        let edited = grid_with(TileCode::Dirt);
        let mut history = History::new(initial.clone(), 50);
        history.record(&edited);
        let _ = history.undo(&edited);
        assert_eq!(history.redo(), Some(edited.clone()));

        let later = grid_with(TileCode::Grass);
        history.record(&later);
        assert_eq!(history.undo(&later), Some(edited));
        assert_eq!(history.undo(&initial), Some(initial));
    }

    #[test]
    fn amend_replaces_newest_snapshot() {
        let initial = TileGrid::empty();
        let mut history = History::new(initial.clone(), 50);
        history.record(&grid_with(TileCode::Dirt));
        let stroke = grid_with(TileCode::Lava);
        history.amend(&stroke);
        assert_eq!(history.undo_depth(), 1);

        let later = grid_with(TileCode::Coin);
        history.record(&later);
        assert_eq!(history.undo(&later), Some(stroke));
    }

    #[test]
    fn history_is_bounded() {
        let mut history = History::new(TileGrid::empty(), 3);
        for code in [TileCode::Dirt, TileCode::Grass, TileCode::Lava, TileCode::Coin] {
            history.record(&grid_with(code));
        }
        assert_eq!(history.undo_depth(), 2);
    }
}
