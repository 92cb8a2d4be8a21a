use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::dictionary::{fingerprint, Dictionary};
use crate::letters::{Letters, Word};
use crate::{BOARD_SIZE, EMPTY_VALUE, MAX_WORD_LENGTH};

/// A thin wrapper for handling the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The underlying vector of the board (as in optimization level 0 the array overflows the stack)
    arr: Vec<usize>,
}

impl Board {
    /// Creates a new board of dimensions `BOARD_SIZE`x`BOARD_SIZE` filled with the `EMPTY_VALUE`
    pub fn new() -> Board {
        Board { arr: vec![EMPTY_VALUE; BOARD_SIZE * BOARD_SIZE] }
    }

    /// Unsafely gets a value from the board at the given index
    /// # Arguments
    /// * `row` - Row index of the value to get (must be less than `BOARD_SIZE`)
    /// * `col` - Column index of the value to get (must be less than `BOARD_SIZE`)
    /// # Returns
    /// `usize` - The value in the board at `(row, col)` (if either `row` or `col` are greater than `BOARD_SIZE` this will be undefined behavior)
    pub fn get_val(&self, row: usize, col: usize) -> usize {
        unsafe { *self.arr.get_unchecked(row * BOARD_SIZE + col) }
    }

    /// Unsafely sets a value in the board at the given index
    /// # Arguments
    /// * `row` - Row index of the value to set (must be less than `BOARD_SIZE`)
    /// * `col` - Column index of the value to set (must be less than `BOARD_SIZE`)
    /// * `val` - Value to set at `(row, col)` in the board (if either `row` or `col` are greater than `BOARD_SIZE` this will be undefined behavior)
    pub fn set_val(&mut self, row: usize, col: usize, val: usize) {
        let v = unsafe { self.arr.get_unchecked_mut(row * BOARD_SIZE + col) };
        *v = val;
    }

    /// Scans the whole board for the tight bounding box of its occupied cells
    /// # Returns
    /// `Option<(usize, usize, usize, usize)>` - `(min_col, max_col, min_row, max_row)`, or `None` if the board is empty
    pub fn occupied_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.get_val(row, col) == EMPTY_VALUE {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (col, col, row, row),
                    Some((min_col, max_col, min_row, max_row)) => (
                        min_col.min(col),
                        max_col.max(col),
                        min_row.min(row),
                        max_row.max(row),
                    ),
                });
            }
        }
        bounds
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

/// Enumeration of the direction a word is played
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// The word was played horizontally
    Horizontal,
    /// The word was played vertically
    Vertical,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Horizontal => write!(f, "Horizontal"),
            Direction::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Signal that a placement would cross the edge of the grid
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutOfBounds;

/// Classification of an attempted play. One of:
/// * `Finished` - the word was placed and every hand letter is now used
/// * `Remaining` - the word was placed and letters remain in the hand
/// * `Rejected` - the placement was not accepted; any cells in `played_indices` were written before the rejection and must be undone by the caller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayedWord {
    Finished { played_indices: Vec<(usize, usize)>, remaining_letters: Letters },
    Remaining { played_indices: Vec<(usize, usize)>, remaining_letters: Letters },
    Rejected { played_indices: Vec<(usize, usize)> },
}

/// Plays a word on the board
/// # Arguments
/// * `word` - The word to be played
/// * `row_idx` - The starting row at which to play the word
/// * `col_idx` - The starting column at which to play the word
/// * `board` - The current board (is modified in-place)
/// * `direction` - The `Direction` in which to play the word
/// * `letters` - Length-26 array of the letters available before this play
/// # Returns
/// *`Result` with:*
/// * `PlayedWord` - classification of the attempt, with the indices played in `board` and the remaining letters
///
/// *or `OutOfBounds` if the word would cross the edge of the grid*
pub fn play_word(
    word: &Word,
    row_idx: usize,
    col_idx: usize,
    board: &mut Board,
    direction: Direction,
    letters: &Letters,
) -> Result<PlayedWord, OutOfBounds> {
    let mut played_indices: Vec<(usize, usize)> = Vec::with_capacity(MAX_WORD_LENGTH);
    match direction {
        Direction::Horizontal => {
            if row_idx >= BOARD_SIZE || col_idx + word.len() >= BOARD_SIZE {
                return Err(OutOfBounds);
            }
            let mut remaining_letters = *letters;
            // Check if the word will start or end at a letter
            let mut valid_loc = (col_idx != 0 && board.get_val(row_idx, col_idx - 1) != EMPTY_VALUE)
                || board.get_val(row_idx, col_idx + word.len()) != EMPTY_VALUE;
            // Check if the word will border any letters on the top or bottom
            valid_loc |= (col_idx..col_idx + word.len()).any(|c_idx| {
                (row_idx < BOARD_SIZE - 1 && board.get_val(row_idx + 1, c_idx) != EMPTY_VALUE)
                    || (row_idx > 0 && board.get_val(row_idx - 1, c_idx) != EMPTY_VALUE)
            });
            if !valid_loc {
                return Ok(PlayedWord::Rejected { played_indices });
            }
            let mut entirely_overlaps = true;
            for i in 0..word.len() {
                if board.get_val(row_idx, col_idx + i) == EMPTY_VALUE {
                    let elem = unsafe { remaining_letters.get_unchecked_mut(word[i]) };
                    if *elem == 0 {
                        return Ok(PlayedWord::Rejected { played_indices });
                    }
                    *elem -= 1;
                    board.set_val(row_idx, col_idx + i, word[i]);
                    played_indices.push((row_idx, col_idx + i));
                    entirely_overlaps = false;
                } else if board.get_val(row_idx, col_idx + i) != word[i] {
                    return Ok(PlayedWord::Rejected { played_indices });
                }
            }
            if entirely_overlaps {
                return Ok(PlayedWord::Rejected { played_indices });
            }
            if remaining_letters.iter().all(|&count| count == 0) {
                Ok(PlayedWord::Finished { played_indices, remaining_letters })
            } else {
                Ok(PlayedWord::Remaining { played_indices, remaining_letters })
            }
        }
        Direction::Vertical => {
            if col_idx >= BOARD_SIZE || row_idx + word.len() >= BOARD_SIZE {
                return Err(OutOfBounds);
            }
            let mut remaining_letters = *letters;
            // Check if the word will start or end at a letter
            let mut valid_loc = (row_idx != 0 && board.get_val(row_idx - 1, col_idx) != EMPTY_VALUE)
                || board.get_val(row_idx + word.len(), col_idx) != EMPTY_VALUE;
            // Check if the word will border any letters on the right or left
            valid_loc |= (row_idx..row_idx + word.len()).any(|r_idx| {
                (col_idx < BOARD_SIZE - 1 && board.get_val(r_idx, col_idx + 1) != EMPTY_VALUE)
                    || (col_idx > 0 && board.get_val(r_idx, col_idx - 1) != EMPTY_VALUE)
            });
            if !valid_loc {
                return Ok(PlayedWord::Rejected { played_indices });
            }
            let mut entirely_overlaps = true;
            for i in 0..word.len() {
                if board.get_val(row_idx + i, col_idx) == EMPTY_VALUE {
                    let elem = unsafe { remaining_letters.get_unchecked_mut(word[i]) };
                    if *elem == 0 {
                        return Ok(PlayedWord::Rejected { played_indices });
                    }
                    *elem -= 1;
                    board.set_val(row_idx + i, col_idx, word[i]);
                    played_indices.push((row_idx + i, col_idx));
                    entirely_overlaps = false;
                } else if board.get_val(row_idx + i, col_idx) != word[i] {
                    return Ok(PlayedWord::Rejected { played_indices });
                }
            }
            if entirely_overlaps {
                return Ok(PlayedWord::Rejected { played_indices });
            }
            if remaining_letters.iter().all(|&count| count == 0) {
                Ok(PlayedWord::Finished { played_indices, remaining_letters })
            } else {
                Ok(PlayedWord::Remaining { played_indices, remaining_letters })
            }
        }
    }
}

/// Undoes a play on the `board`
/// # Arguments
/// * `board` - `Board` being undone (is modified in-place)
/// * `played_indices` - Vector of the indices in `board` that need to be reset
pub fn undo_play(board: &mut Board, played_indices: &[(usize, usize)]) {
    for index in played_indices.iter() {
        board.set_val(index.0, index.1, EMPTY_VALUE);
    }
}

/// Checks that a `board` is valid after a word is played horizontally
/// Note that this does not check if all words are contiguous; this condition must be enforced elsewhere.
/// # Arguments
/// * `board` - `Board` being checked
/// * `min_col` - Minimum x (column) index of the subsection of the `board` to be checked
/// * `max_col` - Maximum x (column) index of the subsection of the `board` to be checked
/// * `min_row` - Minimum y (row) index of the subsection of the `board` to be checked
/// * `max_row` - Maximum y (row) index of the subsection of the `board` to be checked
/// * `row` - Row of the word played
/// * `start_col` - Starting column of the word played
/// * `end_col` - Ending column of the word played (inclusive)
/// * `dictionary` - The dictionary to check run membership against
/// # Returns
/// `bool` - whether the checked region is made only of valid words
pub fn is_board_valid_horizontal(
    board: &Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    row: usize,
    start_col: usize,
    end_col: usize,
    dictionary: &Dictionary,
) -> bool {
    let mut current_letters: Vec<usize> = Vec::with_capacity(MAX_WORD_LENGTH);
    // Check across the row where the word was played
    for col_idx in min_col..max_col + 1 {
        if board.get_val(row, col_idx) != EMPTY_VALUE {
            current_letters.push(board.get_val(row, col_idx));
        } else {
            if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
                return false;
            }
            current_letters.clear();
        }
    }
    if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
        return false;
    }
    // Check down each column where a letter was played
    for col_idx in start_col..end_col + 1 {
        current_letters.clear();
        for row_idx in min_row..max_row + 1 {
            if board.get_val(row_idx, col_idx) != EMPTY_VALUE {
                current_letters.push(board.get_val(row_idx, col_idx));
            } else {
                if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
                    return false;
                }
                current_letters.clear();
            }
        }
        if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
            return false;
        }
    }
    true
}

/// Checks that a `board` is valid after a word is played vertically
/// Note that this does not check if all words are contiguous; this condition must be enforced elsewhere.
/// # Arguments
/// * `board` - `Board` being checked
/// * `min_col` - Minimum x (column) index of the subsection of the `board` to be checked
/// * `max_col` - Maximum x (column) index of the subsection of the `board` to be checked
/// * `min_row` - Minimum y (row) index of the subsection of the `board` to be checked
/// * `max_row` - Maximum y (row) index of the subsection of the `board` to be checked
/// * `start_row` - Starting row of the word played
/// * `end_row` - Ending row of the word played (inclusive)
/// * `col` - Column of the word played
/// * `dictionary` - The dictionary to check run membership against
/// # Returns
/// `bool` - whether the checked region is made only of valid words
pub fn is_board_valid_vertical(
    board: &Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    start_row: usize,
    end_row: usize,
    col: usize,
    dictionary: &Dictionary,
) -> bool {
    let mut current_letters: Vec<usize> = Vec::with_capacity(MAX_WORD_LENGTH);
    // Check down the column where the word was played
    for row_idx in min_row..max_row + 1 {
        if board.get_val(row_idx, col) != EMPTY_VALUE {
            current_letters.push(board.get_val(row_idx, col));
        } else {
            if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
                return false;
            }
            current_letters.clear();
        }
    }
    if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
        return false;
    }
    // Check across each row where a letter was played
    for row_idx in start_row..end_row + 1 {
        current_letters.clear();
        for col_idx in min_col..max_col + 1 {
            if board.get_val(row_idx, col_idx) != EMPTY_VALUE {
                current_letters.push(board.get_val(row_idx, col_idx));
            } else {
                if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
                    return false;
                }
                current_letters.clear();
            }
        }
        if current_letters.len() > 1 && !dictionary.contains(&current_letters) {
            return false;
        }
    }
    true
}

/// Converts a `board` to a `String`
/// # Arguments
/// * `board` - Board to display
/// * `min_col` - Minimum occupied column index
/// * `max_col` - Maximum occupied column index
/// * `min_row` - Minimum occupied row index
/// * `max_row` - Maximum occupied row index
/// # Returns
/// * `String` - `board` in string form (with all numbers converted to letters)
pub fn board_to_string(
    board: &Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
) -> String {
    let mut board_string: Vec<char> = Vec::with_capacity((max_row - min_row) * (max_col - min_col));
    for row in min_row..max_row + 1 {
        for col in min_col..max_col + 1 {
            if board.get_val(row, col) == EMPTY_VALUE {
                board_string.push(' ');
            } else {
                board_string.push((board.get_val(row, col) as u8 + 65) as char);
            }
        }
        board_string.push('\n');
    }
    let s: String = board_string.iter().collect();
    s.trim_end().to_owned()
}

/// Converts a `board` to a vector of vectors of display cells
///
/// Each cell is `" "`, a single letter, or a letter followed by `"*"` when
/// the cell carried over from the previous play.
/// # Arguments
/// * `board` - Board to display
/// * `min_col` - Minimum occupied column index
/// * `max_col` - Maximum occupied column index
/// * `min_row` - Minimum occupied row index
/// * `max_row` - Maximum occupied row index
/// * `previous_idxs` - Fingerprints of the `[row, col]` pairs that were already present in the previous play
/// # Returns
/// * `Vec<Vec<String>>` - `board` in display form
pub fn board_to_vec(
    board: &Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    previous_idxs: &HashSet<u32>,
) -> Vec<Vec<String>> {
    let mut board_vec: Vec<Vec<String>> = Vec::with_capacity(max_row - min_row + 1);
    for row in min_row..max_row + 1 {
        let mut row_vec: Vec<String> = Vec::with_capacity(max_col - min_col + 1);
        for col in min_col..max_col + 1 {
            if board.get_val(row, col) == EMPTY_VALUE {
                row_vec.push(" ".to_owned());
            } else {
                let letter = (board.get_val(row, col) as u8 + 65) as char;
                if previous_idxs.contains(&fingerprint(&[row, col])) {
                    row_vec.push(format!("{}*", letter));
                } else {
                    row_vec.push(letter.to_string());
                }
            }
        }
        board_vec.push(row_vec);
    }
    board_vec
}
