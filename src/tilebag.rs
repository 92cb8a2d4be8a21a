use rand::seq::SliceRandom;
use rand::Rng;

use crate::letters::Letters;

/// The number of each letter present in regular Bananagrams
const STANDARD_COUNTS: Letters = [
    13, 3, 3, 6, 18, 3, 4, 3, 12, 2, 2, 5, 3, 8, 11, 3, 2, 9, 6, 9, 6, 3, 3, 2, 3, 2,
];

/// The pool of tiles a hand is drawn from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBag {
    counts: Letters,
}

impl TileBag {
    /// The standard 144-tile bag
    pub fn standard() -> TileBag {
        TileBag { counts: STANDARD_COUNTS }
    }

    /// The double-Bananagrams 288-tile bag
    pub fn double() -> TileBag {
        let mut counts = STANDARD_COUNTS;
        for count in counts.iter_mut() {
            *count *= 2;
        }
        TileBag { counts }
    }

    /// The number of each letter in the bag
    pub fn counts(&self) -> &Letters {
        &self.counts
    }

    /// The total number of tiles in the bag
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Draws a hand of `n` tiles from the bag without replacement
    /// # Arguments
    /// * `n` - Number of tiles to draw (capped at the size of the bag)
    /// * `rng` - Source of randomness
    /// # Returns
    /// `Letters` - length-26 array of the number of each letter drawn
    pub fn draw_hand<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Letters {
        let mut pool: Vec<usize> = Vec::with_capacity(self.total());
        for (letter, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                pool.push(letter);
            }
        }
        let mut hand = [0usize; 26];
        for &letter in pool.choose_multiple(rng, n) {
            hand[letter] += 1;
        }
        hand
    }
}
