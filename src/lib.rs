//! A backtracking Bananagrams board constructor.
//!
//! Given a hand of up to ~288 letter tiles and a dictionary, the engine
//! arranges *every* tile into a single connected crossword-style grid in
//! which each maximal horizontal or vertical run of two or more letters is a
//! dictionary word, or reports that no arrangement was found within the
//! configured search budget.
//!
//! The engine is synchronous and single-threaded; it is driven through an
//! [`Engine`] holding the two dictionaries, with [`Engine::play_from_scratch`]
//! for a fresh solve and [`Engine::play_from_existing`] to extend a previous
//! [`Solution`] after the hand changed.
//!
//! # Basic usage
//! ```
//! # use bananagrams_engine::{count_letters, Dictionary, Engine, Error, SolveConfig};
//! let words = Dictionary::from_words(&["BAN", "NAB"])?;
//! let engine = Engine::with_dictionaries(words.clone(), words);
//! let solution = engine.play_from_scratch(count_letters("BAN"), &SolveConfig::default())?;
//! assert_eq!(solution.min_row, 72);
//! assert_eq!(solution.max_row, 72);
//! # Ok::<(), Error>(())
//! ```

mod board;
mod dictionary;
mod engine;
mod error;
mod letters;
mod solver;
mod tilebag;

pub use crate::board::{
    board_to_string, board_to_vec, is_board_valid_horizontal, is_board_valid_vertical, play_word,
    undo_play, Board, Direction, OutOfBounds, PlayedWord,
};
pub use crate::dictionary::{fingerprint, Dictionary};
pub use crate::engine::{Engine, SolveConfig, Solution};
pub use crate::error::Error;
pub use crate::letters::{
    check_filter_after_play, compare_letters, convert_array_to_word, convert_word_to_array,
    count_letters, is_makeable, LetterComparison, Letters, Word,
};
pub use crate::solver::{Placement, PlaySequence};
pub use crate::tilebag::TileBag;

/// The maximum length of any word in the dictionary
pub const MAX_WORD_LENGTH: usize = 15;
/// Value of an empty cell on the board
pub const EMPTY_VALUE: usize = 30;
/// Number of rows/columns in the board
pub const BOARD_SIZE: usize = 144;
/// The letters of the alphabet, in order
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
