use std::cmp;
use std::time::Instant;

use hashbrown::HashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{board_to_vec, is_board_valid_horizontal, Board, Direction};
use crate::dictionary::{fingerprint, Dictionary};
use crate::error::Error;
use crate::letters::{
    check_filter_after_play, compare_letters, convert_array_to_word, is_makeable,
    LetterComparison, Letters, Word,
};
use crate::solver::{play_further, Placement, PlaySequence};
use crate::{BOARD_SIZE, EMPTY_VALUE, UPPERCASE};

/// How many seed words get a fresh word budget before it carries over
const SEEDS_WITH_OWN_BUDGET: usize = 6;

/// Knobs controlling a single solve
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Whether to solve against the long word list instead of the short one
    pub use_long_dictionary: bool,
    /// Maximum number of board letters a candidate word may use beyond the hand
    pub filter_letters_on_board: usize,
    /// Bound on candidate words tried before the search gives up
    pub maximum_words_to_check: usize,
}

impl Default for SolveConfig {
    fn default() -> SolveConfig {
        SolveConfig { use_long_dictionary: false, filter_letters_on_board: 1, maximum_words_to_check: 50_000 }
    }
}

/// A completed arrangement of every tile in the hand
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// The full board (empty cells hold `EMPTY_VALUE`)
    pub board: Board,
    /// Minimum occupied column index
    pub min_col: usize,
    /// Maximum occupied column index
    pub max_col: usize,
    /// Minimum occupied row index
    pub min_row: usize,
    /// Maximum occupied row index
    pub max_row: usize,
    /// The hand the board was built from
    pub letters: Letters,
    /// The placements that produced the board, seed word first
    pub play_sequence: PlaySequence,
    /// Wall-clock time the solve took
    pub elapsed_ms: u64,
}

impl Solution {
    /// Builds a `Solution` by scanning `board` for its tight bounding box
    fn from_board(board: Board, letters: Letters, play_sequence: PlaySequence, started: Instant) -> Solution {
        let (min_col, max_col, min_row, max_row) = board
            .occupied_bounds()
            .unwrap_or((BOARD_SIZE / 2, BOARD_SIZE / 2, BOARD_SIZE / 2, BOARD_SIZE / 2));
        Solution {
            board,
            min_col,
            max_col,
            min_row,
            max_row,
            letters,
            play_sequence,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// The board as display cells over the bounding box
    ///
    /// Each cell is `" "`, a letter, or a letter followed by `"*"` when the
    /// cell was already present in `previous`. Carried-over cells are those
    /// covered by the placements the two play sequences share, compared
    /// index-by-index until the first divergence.
    /// # Arguments
    /// * `previous` - The solution this one extended, if any
    /// # Returns
    /// `Vec<Vec<String>>` - the trimmed display form of the board
    pub fn display(&self, previous: Option<&Solution>) -> Vec<Vec<String>> {
        let mut previous_idxs: HashSet<u32> = HashSet::new();
        if let Some(previous) = previous {
            for (current, prior) in self.play_sequence.iter().zip(previous.play_sequence.iter()) {
                if current != prior {
                    break;
                }
                for (row, col) in current.cells() {
                    previous_idxs.insert(fingerprint(&[row, col]));
                }
            }
        }
        board_to_vec(&self.board, self.min_col, self.max_col, self.min_row, self.max_row, &previous_idxs)
    }

    /// Serializes the solution to a JSON string for the host boundary
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Checks that a hand is within the limits the engine accepts
fn validate_letters(letters: &Letters) -> Result<(), Error> {
    let mut total = 0usize;
    for (i, &count) in letters.iter().enumerate() {
        if count > 255 {
            return Err(Error::CountTooLarge { letter: UPPERCASE.as_bytes()[i] as char, count });
        }
        total += count;
    }
    if total < 2 {
        return Err(Error::NotEnoughLetters(total));
    }
    Ok(())
}

/// The solve engine, holding the two read-only dictionaries
pub struct Engine {
    words_short: Dictionary,
    words_long: Dictionary,
}

impl Engine {
    /// Builds an engine from the two word-list texts (one word per line)
    /// # Arguments
    /// * `short_words` - Text of the short word list
    /// * `long_words` - Text of the long word list
    /// # Returns
    /// `Engine`, or an `Error` if either list holds an invalid word
    pub fn new(short_words: &str, long_words: &str) -> Result<Engine, Error> {
        Ok(Engine { words_short: Dictionary::new(short_words)?, words_long: Dictionary::new(long_words)? })
    }

    /// Builds an engine from already-constructed dictionaries
    pub fn with_dictionaries(words_short: Dictionary, words_long: Dictionary) -> Engine {
        Engine { words_short, words_long }
    }

    /// The dictionary selected by `config`
    fn dictionary(&self, config: &SolveConfig) -> &Dictionary {
        if config.use_long_dictionary {
            &self.words_long
        } else {
            &self.words_short
        }
    }

    /// Builds a board from nothing, trying each makeable word as the seed
    ///
    /// Seed words are laid horizontally, centered at the middle row of the
    /// board; each of the first six seeds gets the full word budget, after
    /// which the budget carries over across the remaining seeds.
    /// # Arguments
    /// * `letters` - Length-26 array of the number of each letter in the hand
    /// * `config` - The `SolveConfig` for this solve
    /// # Returns
    /// `Solution`, or `Error::Dump` when no full placement was found within
    /// the budget (or no word is makeable at all)
    pub fn play_from_scratch(&self, letters: Letters, config: &SolveConfig) -> Result<Solution, Error> {
        validate_letters(&letters)?;
        let started = Instant::now();
        let dictionary = self.dictionary(config);
        // Get a vector of all words makeable from the hand alone
        let valid_words_vec: Vec<Word> =
            dictionary.words().iter().filter(|word| is_makeable(word, &letters)).cloned().collect();
        if valid_words_vec.is_empty() {
            return Err(Error::Dump);
        }
        debug!("{} of {} words are playable with the given hand", valid_words_vec.len(), dictionary.len());
        let mut words_checked = 0usize;
        for (seed_idx, word) in valid_words_vec.iter().enumerate() {
            if seed_idx < SEEDS_WITH_OWN_BUDGET {
                words_checked = 0;
            } else if words_checked >= config.maximum_words_to_check {
                break;
            }
            // Play the seed word in the middle of the board
            let mut board = Board::new();
            let col_start = BOARD_SIZE / 2 - word.len() / 2;
            let row = BOARD_SIZE / 2;
            let mut use_letters = letters;
            for (i, &letter) in word.iter().enumerate() {
                board.set_val(row, col_start + i, letter);
                use_letters[letter] -= 1;
            }
            let min_col = col_start;
            let max_col = col_start + (word.len() - 1);
            let min_row = row;
            let max_row = row;
            let mut play_sequence: PlaySequence =
                vec![Placement { word: word.clone(), row, col: col_start, direction: Direction::Horizontal }];
            if use_letters.iter().all(|&count| count == 0) {
                return Ok(Solution::from_board(board, letters, play_sequence, started));
            }
            // Reduce the candidates to words playable with the remaining letters plus the board
            let word_letters: HashSet<usize> = word.iter().copied().collect();
            let new_valid_words_vec: Vec<Word> = valid_words_vec
                .iter()
                .filter(|w| check_filter_after_play(use_letters, w, &word_letters, config.filter_letters_on_board))
                .cloned()
                .collect();
            match play_further(
                &mut board, min_col, max_col, min_row, max_row, &new_valid_words_vec, dictionary,
                use_letters, 0, &mut play_sequence, &[], &mut words_checked,
                config.maximum_words_to_check,
            ) {
                Ok(Some(_)) => {
                    debug!(
                        "solved from seed \"{}\" after checking {} words",
                        convert_array_to_word(word),
                        words_checked
                    );
                    return Ok(Solution::from_board(board, letters, play_sequence, started));
                }
                Ok(None) => {}
                // The search strayed off the grid; abandon this seed
                Err(_) => {}
            }
        }
        Err(Error::Dump)
    }

    /// Extends a previous solution by placing a single new tile
    ///
    /// Scans the one-cell halo of the previous bounding box for an empty cell
    /// bordering an occupied one where `letter` leaves every run valid.
    /// # Arguments
    /// * `previous` - The solution being extended
    /// * `letter` - The added letter, 0 ('A') to 25 ('Z')
    /// * `config` - The `SolveConfig` for this solve
    /// # Returns
    /// `Option<Solution>` - the extended solution, or `None` if no single-cell
    /// placement keeps the board valid
    pub fn play_one_letter(&self, previous: &Solution, letter: usize, config: &SolveConfig) -> Option<Solution> {
        if letter > 25 {
            return None;
        }
        let started = Instant::now();
        let dictionary = self.dictionary(config);
        let mut board = previous.board.clone();
        for row_idx in previous.min_row.saturating_sub(1)..cmp::min(previous.max_row + 2, BOARD_SIZE) {
            for col_idx in previous.min_col.saturating_sub(1)..cmp::min(previous.max_col + 2, BOARD_SIZE) {
                if board.get_val(row_idx, col_idx) != EMPTY_VALUE {
                    continue;
                }
                let borders_letter = (row_idx > 0 && board.get_val(row_idx - 1, col_idx) != EMPTY_VALUE)
                    || (row_idx < BOARD_SIZE - 1 && board.get_val(row_idx + 1, col_idx) != EMPTY_VALUE)
                    || (col_idx > 0 && board.get_val(row_idx, col_idx - 1) != EMPTY_VALUE)
                    || (col_idx < BOARD_SIZE - 1 && board.get_val(row_idx, col_idx + 1) != EMPTY_VALUE);
                if !borders_letter {
                    continue;
                }
                board.set_val(row_idx, col_idx, letter);
                let new_min_col = cmp::min(previous.min_col, col_idx);
                let new_max_col = cmp::max(previous.max_col, col_idx);
                let new_min_row = cmp::min(previous.min_row, row_idx);
                let new_max_row = cmp::max(previous.max_row, row_idx);
                // A single cell only changes one row and one column, which the
                // horizontal validator covers in one pass
                if is_board_valid_horizontal(
                    &board, new_min_col, new_max_col, new_min_row, new_max_row, row_idx, col_idx,
                    col_idx, dictionary,
                ) {
                    debug!("placed the new letter at ({}, {})", row_idx, col_idx);
                    let mut play_sequence = previous.play_sequence.clone();
                    play_sequence.push(Placement {
                        word: vec![letter],
                        row: row_idx,
                        col: col_idx,
                        direction: Direction::Horizontal,
                    });
                    let mut letters = previous.letters;
                    letters[letter] += 1;
                    return Some(Solution::from_board(board, letters, play_sequence, started));
                }
                board.set_val(row_idx, col_idx, EMPTY_VALUE);
            }
        }
        None
    }

    /// Rebuilds a previous solution's board and keeps playing with the new hand
    ///
    /// The prior sequence is replayed placement by placement; once it is
    /// spent, the search continues for the letters the prior board did not
    /// hold. Returns `None` when the replay cannot complete under the new
    /// hand, or when the continued search fails.
    fn replay_and_continue(&self, letters: Letters, previous: &Solution, config: &SolveConfig) -> Option<Solution> {
        let started = Instant::now();
        let dictionary = self.dictionary(config);
        let seed = previous.play_sequence.first()?;
        let mut board = Board::new();
        let mut use_letters = letters;
        for (i, &letter) in seed.word.iter().enumerate() {
            if use_letters[letter] == 0 {
                // The new hand cannot even cover the prior seed word
                return None;
            }
            use_letters[letter] -= 1;
            match seed.direction {
                Direction::Horizontal => board.set_val(seed.row, seed.col + i, letter),
                Direction::Vertical => board.set_val(seed.row + i, seed.col, letter),
            }
        }
        let (min_col, max_col, min_row, max_row) = match seed.direction {
            Direction::Horizontal => (seed.col, seed.col + seed.word.len() - 1, seed.row, seed.row),
            Direction::Vertical => (seed.col, seed.col, seed.row, seed.row + seed.word.len() - 1),
        };
        let mut play_sequence: PlaySequence = vec![seed.clone()];
        if use_letters.iter().all(|&count| count == 0) {
            return Some(Solution::from_board(board, letters, play_sequence, started));
        }
        let valid_words_vec: Vec<Word> =
            dictionary.words().iter().filter(|word| is_makeable(word, &letters)).cloned().collect();
        let word_letters: HashSet<usize> = seed.word.iter().copied().collect();
        let new_valid_words_vec: Vec<Word> = valid_words_vec
            .iter()
            .filter(|w| check_filter_after_play(use_letters, w, &word_letters, config.filter_letters_on_board))
            .cloned()
            .collect();
        let mut words_checked = 0usize;
        match play_further(
            &mut board, min_col, max_col, min_row, max_row, &new_valid_words_vec, dictionary,
            use_letters, 0, &mut play_sequence, &previous.play_sequence, &mut words_checked,
            config.maximum_words_to_check,
        ) {
            Ok(Some(_)) => Some(Solution::from_board(board, letters, play_sequence, started)),
            _ => None,
        }
    }

    /// Builds a board for a hand that changed from a previous solve
    ///
    /// How the new hand compares to the previous one picks the strategy:
    /// * `Same` - the previous solution is returned unchanged
    /// * `GreaterByOne` - the single new tile is squeezed in; failing that the
    ///   prior sequence is replayed and extended
    /// * `GreaterByMoreThanOne` - the prior sequence is replayed and extended
    /// * `SomeLess` - `None`; the caller should fall back to
    ///   `play_from_scratch`
    ///
    /// A replay that cannot complete also returns `None` so the caller can
    /// fall back.
    /// # Arguments
    /// * `letters` - Length-26 array of the number of each letter in the new hand
    /// * `previous` - The most recent successful solution
    /// * `config` - The `SolveConfig` for this solve
    /// # Returns
    /// *`Result` with:*
    /// * `Option<Solution>` - the new solution, or `None` when the caller should start from scratch
    ///
    /// *or an `Error` if the hand is invalid*
    pub fn play_from_existing(
        &self,
        letters: Letters,
        previous: &Solution,
        config: &SolveConfig,
    ) -> Result<Option<Solution>, Error> {
        validate_letters(&letters)?;
        match compare_letters(&letters, &previous.letters) {
            LetterComparison::Same => {
                debug!("hand unchanged; returning the previous board");
                Ok(Some(previous.clone()))
            }
            LetterComparison::SomeLess => Ok(None),
            LetterComparison::GreaterByOne => {
                let letter = (0..26).find(|&i| letters[i] > previous.letters[i]);
                if let Some(letter) = letter {
                    if let Some(solution) = self.play_one_letter(previous, letter, config) {
                        return Ok(Some(solution));
                    }
                }
                Ok(self.replay_and_continue(letters, previous, config))
            }
            LetterComparison::GreaterByMoreThanOne => Ok(self.replay_and_continue(letters, previous, config)),
        }
    }
}
