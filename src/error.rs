use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned from the engine
pub enum Error {
    /// No board can be built from the hand, or the search budget ran out
    #[error("No valid words can be formed from the current letters")]
    Dump,

    /// A letter count above what fits in a byte
    #[error("Count of {count} for letter '{letter}' is above the maximum of 255")]
    CountTooLarge { letter: char, count: usize },

    /// The hand is too small to form any word
    #[error("At least 2 letters are needed, but only {0} were provided")]
    NotEnoughLetters(usize),

    /// A dictionary entry with characters outside A-Z
    #[error("Invalid word \"{0}\" in the dictionary")]
    InvalidWord(String),
}
