use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use platformer_rendering::palette;

/// Background indices shuffled once from a seed and dealt in a cycle, one per
/// level load.
#[derive(Clone, Debug)]
pub(crate) struct BackgroundDeck {
    seed: u64,
    order: Vec<usize>,
    cursor: usize,
}

impl BackgroundDeck {
    pub(crate) fn new(seed: u64, size: usize) -> Self {
        Self {
            seed,
            order: shuffled(seed, size),
            cursor: 0,
        }
    }

    /// Reshuffles the deck for the backgrounds actually loaded. Without any
    /// textures the sky palette is dealt instead.
    pub(crate) fn fit(&mut self, loaded: usize) {
        let size = if loaded == 0 {
            palette::SKIES.len()
        } else {
            loaded
        };
        if size != self.order.len() {
            self.order = shuffled(self.seed, size);
            self.cursor = 0;
        }
    }

    pub(crate) fn current(&self) -> usize {
        self.order[self.cursor]
    }

    pub(crate) fn advance(&mut self) -> usize {
        self.cursor = (self.cursor + 1) % self.order.len();
        self.current()
    }
}

fn shuffled(seed: u64, size: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..size.max(1)).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_deals_same_order() {
        let mut first = BackgroundDeck::new(7, 6);
        let mut second = BackgroundDeck::new(7, 6);
        for _ in 0..12 {
            assert_eq!(first.advance(), second.advance());
        }
    }

    #[test]
    fn deck_cycles_through_every_background() {
        let mut deck = BackgroundDeck::new(3, 4);
        let mut seen: Vec<usize> = (0..4).map(|_| deck.advance()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        let start = deck.current();
        for _ in 0..4 {
            let _ = deck.advance();
        }
        assert_eq!(deck.current(), start);
    }

    #[test]
    fn fitting_deals_every_loaded_background() {
        let mut deck = BackgroundDeck::new(5, palette::SKIES.len());
        deck.fit(10);
        assert_eq!(deck.order.len(), 10);
        let mut seen: Vec<usize> = (0..10).map(|_| deck.advance()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());

        deck.fit(3);
        assert_eq!(deck.order.len(), 3);
        let mut seen: Vec<usize> = (0..3).map(|_| deck.advance()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn fitting_without_textures_uses_skies() {
        let mut deck = BackgroundDeck::new(5, 7);
        deck.fit(0);
        assert_eq!(deck.order.len(), palette::SKIES.len());
    }

    #[test]
    fn fitting_same_size_keeps_position() {
        let mut deck = BackgroundDeck::new(9, 6);
        let _ = deck.advance();
        let current = deck.current();
        deck.fit(6);
        assert_eq!(deck.current(), current);
    }

    #[test]
    fn empty_deck_still_deals() {
        let mut deck = BackgroundDeck::new(0, 0);
        assert_eq!(deck.current(), 0);
        assert_eq!(deck.advance(), 0);
    }
}
