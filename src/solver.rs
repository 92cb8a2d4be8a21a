use std::cmp;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::board::{
    is_board_valid_horizontal, is_board_valid_vertical, play_word, undo_play, Board, Direction,
    OutOfBounds, PlayedWord,
};
use crate::dictionary::Dictionary;
use crate::letters::{Letters, Word};

/// A single word placed on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The word in numeric form
    pub word: Word,
    /// Row of the first letter
    pub row: usize,
    /// Column of the first letter
    pub col: usize,
    /// The `Direction` the word was played in
    pub direction: Direction,
}

impl Placement {
    /// The `(row, col)` cells covered by this placement
    pub fn cells(&self) -> Vec<(usize, usize)> {
        match self.direction {
            Direction::Horizontal => (0..self.word.len()).map(|i| (self.row, self.col + i)).collect(),
            Direction::Vertical => (0..self.word.len()).map(|i| (self.row + i, self.col)).collect(),
        }
    }
}

/// The ordered record of placements that produced a board, seed word first
pub type PlaySequence = Vec<Placement>;

/// The bounding box of the occupied region as `(min_col, max_col, min_row, max_row)`
type Bounds = (usize, usize, usize, usize);

/// Attempts a single placement at a fixed cell, recursing on success
///
/// Any cells the attempt writes are restored before returning on every
/// non-success path.
#[allow(clippy::too_many_arguments)]
fn attempt_placement(
    board: &mut Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    word: &Word,
    row_idx: usize,
    col_idx: usize,
    direction: Direction,
    valid_words_vec: &[Word],
    dictionary: &Dictionary,
    letters: &Letters,
    depth: usize,
    play_sequence: &mut PlaySequence,
    prior_play_sequence: &[Placement],
    words_checked: &mut usize,
    maximum_words_to_check: usize,
) -> Result<Option<Bounds>, OutOfBounds> {
    let res = play_word(word, row_idx, col_idx, board, direction, letters)?;
    // A Finished play carries no remaining letters; a Remaining play recurses with them
    let (played_indices, remaining_letters) = match res {
        PlayedWord::Rejected { played_indices } => {
            undo_play(board, &played_indices);
            return Ok(None);
        }
        PlayedWord::Finished { played_indices, .. } => (played_indices, None),
        PlayedWord::Remaining { played_indices, remaining_letters } => {
            (played_indices, Some(remaining_letters))
        }
    };
    let (new_min_col, new_max_col, new_min_row, new_max_row) = match direction {
        Direction::Horizontal => (
            cmp::min(min_col, col_idx),
            cmp::max(max_col, col_idx + word.len() - 1),
            cmp::min(min_row, row_idx),
            cmp::max(max_row, row_idx),
        ),
        Direction::Vertical => (
            cmp::min(min_col, col_idx),
            cmp::max(max_col, col_idx),
            cmp::min(min_row, row_idx),
            cmp::max(max_row, row_idx + word.len() - 1),
        ),
    };
    let valid = match direction {
        Direction::Horizontal => is_board_valid_horizontal(
            board, new_min_col, new_max_col, new_min_row, new_max_row, row_idx, col_idx,
            col_idx + word.len() - 1, dictionary,
        ),
        Direction::Vertical => is_board_valid_vertical(
            board, new_min_col, new_max_col, new_min_row, new_max_row, row_idx,
            row_idx + word.len() - 1, col_idx, dictionary,
        ),
    };
    if !valid {
        undo_play(board, &played_indices);
        return Ok(None);
    }
    play_sequence.push(Placement { word: word.clone(), row: row_idx, col: col_idx, direction });
    match remaining_letters {
        None => Ok(Some((new_min_col, new_max_col, new_min_row, new_max_row))),
        Some(remaining_letters) => {
            let res2 = play_further(
                board, new_min_col, new_max_col, new_min_row, new_max_row, valid_words_vec,
                dictionary, remaining_letters, depth + 1, play_sequence, prior_play_sequence,
                words_checked, maximum_words_to_check,
            )?;
            if res2.is_some() {
                return Ok(res2);
            }
            play_sequence.pop();
            undo_play(board, &played_indices);
            Ok(None)
        }
    }
}

/// Tries every candidate word at every halo cell in one direction
/// # Arguments
/// * `direction` - The `Direction` to try placements in
/// * `board` - The `Board` to modify in-place
/// * `min_col` - Minimum occupied column index in `board`
/// * `max_col` - Maximum occupied column index in `board`
/// * `min_row` - Minimum occupied row index in `board`
/// * `max_row` - Maximum occupied row index in `board`
/// * `valid_words_vec` - Candidate words, longest first
/// * `dictionary` - The dictionary runs are validated against
/// * `letters` - Length-26 array of the number of each letter remaining
/// * `depth` - Depth of the current recursive call
/// * `play_sequence` - The placements made so far (pushed and popped in step with the recursion)
/// * `prior_play_sequence` - A previous solution's placements to replay, if any
/// * `words_checked` - Running count of candidate words tried
/// * `maximum_words_to_check` - Bound on `words_checked` before the search gives up
/// # Returns
/// *`Result` with:*
/// * `Option<Bounds>` - the bounding box on success, or `None` if no placement in this direction worked
///
/// *or `OutOfBounds` if the search crossed the edge of the grid*
#[allow(clippy::too_many_arguments)]
fn try_direction(
    direction: Direction,
    board: &mut Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    valid_words_vec: &[Word],
    dictionary: &Dictionary,
    letters: &Letters,
    depth: usize,
    play_sequence: &mut PlaySequence,
    prior_play_sequence: &[Placement],
    words_checked: &mut usize,
    maximum_words_to_check: usize,
) -> Result<Option<Bounds>, OutOfBounds> {
    for word in valid_words_vec.iter() {
        if *words_checked >= maximum_words_to_check {
            trace!("word budget spent at depth {}", depth);
            return Ok(None);
        }
        *words_checked += 1;
        match direction {
            Direction::Horizontal => {
                // Try across all rows (starting from one before to one after)
                for row_idx in min_row.saturating_sub(1)..max_row + 2 {
                    // For each row, try across all columns (starting from the farthest out the word could be played)
                    for col_idx in min_col.saturating_sub(word.len())..max_col + 2 {
                        let res = attempt_placement(
                            board, min_col, max_col, min_row, max_row, word, row_idx, col_idx,
                            direction, valid_words_vec, dictionary, letters, depth, play_sequence,
                            prior_play_sequence, words_checked, maximum_words_to_check,
                        )?;
                        if res.is_some() {
                            return Ok(res);
                        }
                    }
                }
            }
            Direction::Vertical => {
                // Try down all columns
                for col_idx in min_col.saturating_sub(1)..max_col + 2 {
                    for row_idx in min_row.saturating_sub(word.len())..max_row + 2 {
                        let res = attempt_placement(
                            board, min_col, max_col, min_row, max_row, word, row_idx, col_idx,
                            direction, valid_words_vec, dictionary, letters, depth, play_sequence,
                            prior_play_sequence, words_checked, maximum_words_to_check,
                        )?;
                        if res.is_some() {
                            return Ok(res);
                        }
                    }
                }
            }
        }
    }
    Ok(None)
}

/// Replays one placement from a previous solution instead of searching
///
/// Runs formed by a replayed placement were already validated when the prior
/// board was built, so no validator pass is needed here.
#[allow(clippy::too_many_arguments)]
fn replay_placement(
    board: &mut Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    valid_words_vec: &[Word],
    dictionary: &Dictionary,
    letters: Letters,
    depth: usize,
    play_sequence: &mut PlaySequence,
    prior_play_sequence: &[Placement],
    words_checked: &mut usize,
    maximum_words_to_check: usize,
) -> Result<Option<Bounds>, OutOfBounds> {
    let placement = &prior_play_sequence[depth + 1];
    let res = play_word(&placement.word, placement.row, placement.col, board, placement.direction, &letters)?;
    let (new_min_col, new_max_col, new_min_row, new_max_row) = match placement.direction {
        Direction::Horizontal => (
            cmp::min(min_col, placement.col),
            cmp::max(max_col, placement.col + placement.word.len() - 1),
            cmp::min(min_row, placement.row),
            cmp::max(max_row, placement.row),
        ),
        Direction::Vertical => (
            cmp::min(min_col, placement.col),
            cmp::max(max_col, placement.col),
            cmp::min(min_row, placement.row),
            cmp::max(max_row, placement.row + placement.word.len() - 1),
        ),
    };
    match res {
        PlayedWord::Finished { .. } => {
            play_sequence.push(placement.clone());
            Ok(Some((new_min_col, new_max_col, new_min_row, new_max_row)))
        }
        PlayedWord::Remaining { played_indices, remaining_letters } => {
            play_sequence.push(placement.clone());
            let res2 = play_further(
                board, new_min_col, new_max_col, new_min_row, new_max_row, valid_words_vec,
                dictionary, remaining_letters, depth + 1, play_sequence, prior_play_sequence,
                words_checked, maximum_words_to_check,
            )?;
            if res2.is_some() {
                return Ok(res2);
            }
            play_sequence.pop();
            undo_play(board, &played_indices);
            Ok(None)
        }
        PlayedWord::Rejected { played_indices } => {
            trace!("replay diverged at placement {}", depth + 1);
            undo_play(board, &played_indices);
            Ok(None)
        }
    }
}

/// Recursively builds the board
///
/// While `prior_play_sequence` still has placements beyond the current depth
/// they are replayed exactly, with no alternatives tried on failure. Once the
/// prior sequence is spent the search alternates its primary direction by
/// depth - odd depths try horizontal first - since crossings form more easily
/// when successive words are perpendicular.
/// # Arguments
/// * `board` - The `Board` to modify in-place
/// * `min_col` - Minimum occupied column index in `board`
/// * `max_col` - Maximum occupied column index in `board`
/// * `min_row` - Minimum occupied row index in `board`
/// * `max_row` - Maximum occupied row index in `board`
/// * `valid_words_vec` - Candidate words, longest first
/// * `dictionary` - The dictionary runs are validated against
/// * `letters` - Length-26 array of the number of each letter remaining
/// * `depth` - Depth of the current recursive call
/// * `play_sequence` - The placements made so far (pushed and popped in step with the recursion)
/// * `prior_play_sequence` - A previous solution's placements to replay, or empty
/// * `words_checked` - Running count of candidate words tried
/// * `maximum_words_to_check` - Bound on `words_checked` before the search gives up
/// # Returns
/// *`Result` with:*
/// * `Option<Bounds>` - `(min_col, max_col, min_row, max_row)` on success, `None` when every option is exhausted or the budget is spent
///
/// *or `OutOfBounds` if the search crossed the edge of the grid*
#[allow(clippy::too_many_arguments)]
pub(crate) fn play_further(
    board: &mut Board,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
    valid_words_vec: &[Word],
    dictionary: &Dictionary,
    letters: Letters,
    depth: usize,
    play_sequence: &mut PlaySequence,
    prior_play_sequence: &[Placement],
    words_checked: &mut usize,
    maximum_words_to_check: usize,
) -> Result<Option<Bounds>, OutOfBounds> {
    if depth + 1 < prior_play_sequence.len() {
        return replay_placement(
            board, min_col, max_col, min_row, max_row, valid_words_vec, dictionary, letters, depth,
            play_sequence, prior_play_sequence, words_checked, maximum_words_to_check,
        );
    }
    let (first, second) = if depth % 2 == 1 {
        (Direction::Horizontal, Direction::Vertical)
    } else {
        (Direction::Vertical, Direction::Horizontal)
    };
    let res = try_direction(
        first, board, min_col, max_col, min_row, max_row, valid_words_vec, dictionary, &letters,
        depth, play_sequence, prior_play_sequence, words_checked, maximum_words_to_check,
    )?;
    if res.is_some() {
        return Ok(res);
    }
    try_direction(
        second, board, min_col, max_col, min_row, max_row, valid_words_vec, dictionary, &letters,
        depth, play_sequence, prior_play_sequence, words_checked, maximum_words_to_check,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::{convert_word_to_array, count_letters};

    /// Seeds a word horizontally and returns the board, its bounds, and the sequence
    fn seed(word: &str, letters: &mut Letters) -> (Board, Bounds, PlaySequence) {
        let word = convert_word_to_array(word);
        let mut board = Board::new();
        let col_start = crate::BOARD_SIZE / 2 - word.len() / 2;
        let row = crate::BOARD_SIZE / 2;
        for (i, &letter) in word.iter().enumerate() {
            board.set_val(row, col_start + i, letter);
            letters[letter] -= 1;
        }
        let bounds = (col_start, col_start + word.len() - 1, row, row);
        let sequence = vec![Placement { word, row, col: col_start, direction: Direction::Horizontal }];
        (board, bounds, sequence)
    }

    #[test]
    fn test_play_further_completes_a_crossing() {
        let dictionary = Dictionary::from_words(&["CAT", "RAT", "CAR", "AT"]).unwrap();
        let mut letters = count_letters("CAATR");
        let (mut board, (min_col, max_col, min_row, max_row), mut play_sequence) = seed("CAT", &mut letters);
        let candidates: Vec<Word> = dictionary.words().to_vec();
        let mut words_checked = 0;
        let res = play_further(
            &mut board, min_col, max_col, min_row, max_row, &candidates, &dictionary, letters, 0,
            &mut play_sequence, &[], &mut words_checked, 50_000,
        )
        .unwrap();
        assert!(res.is_some());
        assert_eq!(play_sequence.len(), 2);
        // Both words are on the board and every tile was consumed
        let (min_col, max_col, min_row, max_row) = board.occupied_bounds().unwrap();
        let mut on_board = [0usize; 26];
        for row in min_row..max_row + 1 {
            for col in min_col..max_col + 1 {
                if board.get_val(row, col) != crate::EMPTY_VALUE {
                    on_board[board.get_val(row, col)] += 1;
                }
            }
        }
        assert_eq!(on_board, count_letters("CAATR"));
    }

    #[test]
    fn test_play_further_budget_exhaustion() {
        let dictionary = Dictionary::from_words(&["CAT", "RAT", "CAR", "AT"]).unwrap();
        let mut letters = count_letters("CAATR");
        let (mut board, (min_col, max_col, min_row, max_row), mut play_sequence) = seed("CAT", &mut letters);
        let candidates: Vec<Word> = dictionary.words().to_vec();
        let mut words_checked = 0;
        let res = play_further(
            &mut board, min_col, max_col, min_row, max_row, &candidates, &dictionary, letters, 0,
            &mut play_sequence, &[], &mut words_checked, 0,
        )
        .unwrap();
        assert!(res.is_none());
        assert_eq!(play_sequence.len(), 1);
    }

    #[test]
    fn test_play_further_failure_restores_board() {
        // No candidate can use the leftover letters, so the search must unwind cleanly
        let dictionary = Dictionary::from_words(&["CAT", "ZOO"]).unwrap();
        let mut letters = count_letters("CATZZ");
        let (mut board, (min_col, max_col, min_row, max_row), mut play_sequence) = seed("CAT", &mut letters);
        let before = board.clone();
        let candidates: Vec<Word> = dictionary.words().to_vec();
        let mut words_checked = 0;
        let res = play_further(
            &mut board, min_col, max_col, min_row, max_row, &candidates, &dictionary, letters, 0,
            &mut play_sequence, &[], &mut words_checked, 50_000,
        )
        .unwrap();
        assert!(res.is_none());
        assert_eq!(board, before);
        assert_eq!(play_sequence.len(), 1);
    }

    #[test]
    fn test_play_further_replays_prior_sequence() {
        let dictionary = Dictionary::from_words(&["CAT", "RAT", "CAR", "AT"]).unwrap();
        // First solve from scratch
        let mut letters = count_letters("CAATR");
        let (mut board, (min_col, max_col, min_row, max_row), mut play_sequence) = seed("CAT", &mut letters);
        let candidates: Vec<Word> = dictionary.words().to_vec();
        let mut words_checked = 0;
        play_further(
            &mut board, min_col, max_col, min_row, max_row, &candidates, &dictionary, letters, 0,
            &mut play_sequence, &[], &mut words_checked, 50_000,
        )
        .unwrap()
        .unwrap();
        let prior_board = board.clone();
        let prior_sequence = play_sequence.clone();
        // Then replay the recorded sequence on a fresh board
        let mut letters = count_letters("CAATR");
        let (mut replay_board, (min_col, max_col, min_row, max_row), mut replay_sequence) = seed("CAT", &mut letters);
        let mut words_checked = 0;
        let res = play_further(
            &mut replay_board, min_col, max_col, min_row, max_row, &candidates, &dictionary,
            letters, 0, &mut replay_sequence, &prior_sequence, &mut words_checked, 50_000,
        )
        .unwrap();
        assert!(res.is_some());
        assert_eq!(replay_board, prior_board);
        assert_eq!(replay_sequence, prior_sequence);
    }
}
