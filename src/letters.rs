use std::mem;

use hashbrown::HashSet;

use crate::UPPERCASE;

/// A numeric representation of a word
pub type Word = Vec<usize>;
/// Represents a hand of letters
pub type Letters = [usize; 26];

/// Converts a word into a numeric vector representation
/// # Arguments
/// * `word` - String word to convert
/// # Returns
/// `Word` - numeric representation of `word`, with each letter converted from 0 ('A') to 25 ('Z')
/// # See also
/// `convert_array_to_word`
pub fn convert_word_to_array(word: &str) -> Word {
    word.chars().filter(|c| c.is_ascii_uppercase()).map(|c| (c as usize) - 65).collect()
}

/// Converts a numeric vector representation into a word
/// # Arguments
/// * `word` - Numeric vector representation of the word, with each element from 0 ('A') to 25 ('Z')
/// # Returns
/// `String` - `word` in letter form
/// # See also
/// `convert_word_to_array`
pub fn convert_array_to_word(word: &[usize]) -> String {
    word.iter().map(|&n| UPPERCASE.as_bytes()[n] as char).collect()
}

/// Counts the tiles in a string of letters into a hand
/// # Arguments
/// * `tiles` - String of the tiles in the hand, e.g. `"CEEHHKL"`
/// # Returns
/// `Letters` - length-26 array of the number of each letter in `tiles`
pub fn count_letters(tiles: &str) -> Letters {
    let mut letters = [0usize; 26];
    for c in tiles.chars().filter(|c| c.is_ascii_uppercase()) {
        letters[(c as usize) - 65] += 1;
    }
    letters
}

/// Checks whether a `word` can be made using the given `letters`
/// # Arguments
/// * `word` - The vector form of the word to check
/// * `letters` - Length-26 array of the number of each letter in the hand
/// # Returns
/// * `bool` - Whether `word` can be made using `letters`
pub fn is_makeable(word: &Word, letters: &Letters) -> bool {
    let mut available_letters = *letters;
    for letter in word.iter() {
        if unsafe { available_letters.get_unchecked(*letter) } == &0 {
            return false;
        }
        let elem = unsafe { available_letters.get_unchecked_mut(*letter) };
        *elem -= 1;
    }
    true
}

/// Checks which words can be played after the first
/// # Arguments
/// * `letters` - Length-26 array of the letters remaining after the first word was played
/// * `word_being_checked` - Word that is being checked if playable
/// * `played_on_board` - Set of the letters already played on the board
/// * `filter_letters_on_board` - Maximum number of board letters the word may use beyond the hand
/// # Returns
/// * `bool` - Whether the `word_being_checked` is playable
pub fn check_filter_after_play(
    letters: Letters,
    word_being_checked: &Word,
    played_on_board: &HashSet<usize>,
    filter_letters_on_board: usize,
) -> bool {
    let mut available_letters: [isize; 26] = unsafe { mem::transmute(letters) };
    let mut letters_from_board = 0usize;
    for letter in word_being_checked.iter() {
        let elem = unsafe { available_letters.get_unchecked_mut(*letter) };
        if *elem == 0 {
            if !played_on_board.contains(letter) {
                return false;
            }
            letters_from_board += 1;
            if letters_from_board > filter_letters_on_board {
                return false;
            }
        }
        *elem -= 1;
    }
    true
}

/// Enumeration of how a new hand compares to the previous one
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LetterComparison {
    /// Every letter count is the same
    Same,
    /// At least one letter count decreased
    SomeLess,
    /// Exactly one letter count increased, by exactly one
    GreaterByOne,
    /// Any other increase
    GreaterByMoreThanOne,
}

/// Compares a new hand against the previous one
/// # Arguments
/// * `new_letters` - Length-26 array of the number of each letter in the new hand
/// * `previous_letters` - Length-26 array of the number of each letter in the previous hand
/// # Returns
/// `LetterComparison` - how `new_letters` compares to `previous_letters`
pub fn compare_letters(new_letters: &Letters, previous_letters: &Letters) -> LetterComparison {
    let mut num_greater_by_one = 0usize;
    let mut any_greater_by_more = false;
    for i in 0..26 {
        if new_letters[i] < previous_letters[i] {
            return LetterComparison::SomeLess;
        } else if new_letters[i] == previous_letters[i] + 1 {
            num_greater_by_one += 1;
        } else if new_letters[i] > previous_letters[i] + 1 {
            any_greater_by_more = true;
        }
    }
    if any_greater_by_more || num_greater_by_one > 1 {
        LetterComparison::GreaterByMoreThanOne
    } else if num_greater_by_one == 1 {
        LetterComparison::GreaterByOne
    } else {
        LetterComparison::Same
    }
}
