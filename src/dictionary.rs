use std::fmt;

use hashbrown::HashSet;

use crate::error::Error;
use crate::letters::{convert_word_to_array, Word};
use crate::MAX_WORD_LENGTH;

/// Hashes a sequence of small integers into a 32-bit fingerprint
///
/// The same function is used for dictionary words and for ad-hoc
/// cell-coordinate pairs.
/// # Arguments
/// * `seq` - Slice of values to hash (letter indices, or a `[row, col]` pair)
/// # Returns
/// `u32` - fingerprint of `seq`
pub fn fingerprint(seq: &[usize]) -> u32 {
    let mut seed = seq.len() as u32;
    for &n in seq.iter() {
        let x = ((n as u32 >> 16) ^ n as u32).wrapping_mul(0x45d9f3b);
        let y = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
        let z = (y >> 16) ^ y;
        seed ^= z
            .wrapping_add(0x9e3779b9)
            .wrapping_add(seed << 6)
            .wrapping_add(seed >> 2);
    }
    seed
}

/// The dictionary of playable words
#[derive(Clone, Debug)]
pub struct Dictionary {
    /// Every word in numeric form, sorted by descending length
    words: Vec<Word>,
    /// Fingerprints of every word, for O(1) membership checks
    fingerprints: HashSet<u32>,
}

impl Dictionary {
    /// Builds a dictionary from word-list text
    ///
    /// One word per line; lines are trimmed and upper-cased, blank lines and
    /// words shorter than two letters are skipped.
    /// # Arguments
    /// * `text` - The word list, one word per line
    /// # Returns
    /// `Dictionary`, or an `Error` if a word holds a character outside A-Z
    pub fn new(text: &str) -> Result<Dictionary, Error> {
        let mut words: Vec<Word> = Vec::new();
        let mut fingerprints: HashSet<u32> = HashSet::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let upper = trimmed.to_ascii_uppercase();
            if !upper.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(Error::InvalidWord(trimmed.to_owned()));
            }
            if upper.len() < 2 || upper.len() > MAX_WORD_LENGTH {
                continue;
            }
            let word = convert_word_to_array(&upper);
            fingerprints.insert(fingerprint(&word));
            words.push(word);
        }
        words.sort_by(|w1, w2| w2.len().cmp(&w1.len()));
        Ok(Dictionary { words, fingerprints })
    }

    /// Builds a dictionary from a slice of words; meant for tests and examples
    pub fn from_words(words: &[&str]) -> Result<Dictionary, Error> {
        Dictionary::new(&words.join("\n"))
    }

    /// All words in numeric form, longest first
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Whether the given run of letters is a dictionary word
    ///
    /// Membership is a fingerprint lookup; two same-length words colliding
    /// would produce a false positive, which the supplied word lists do not.
    pub fn contains(&self, run: &[usize]) -> bool {
        self.fingerprints.contains(&fingerprint(run))
    }

    /// The number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Dictionary: {} words>", self.words.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_determinism() {
        let cat = convert_word_to_array("CAT");
        assert_eq!(fingerprint(&cat), fingerprint(&cat));
        assert_ne!(fingerprint(&cat), fingerprint(&convert_word_to_array("CAR")));
        // Length is mixed into the seed, so a prefix hashes differently
        assert_ne!(fingerprint(&cat), fingerprint(&convert_word_to_array("CATS")));
        // The same function works on coordinate pairs
        assert_ne!(fingerprint(&[72, 71]), fingerprint(&[71, 72]));
    }

    #[test]
    fn test_parsing() {
        let dictionary = Dictionary::new("cat\n\n  rat  \nA\nCATS\n").unwrap();
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.contains(&convert_word_to_array("CAT")));
        assert!(dictionary.contains(&convert_word_to_array("RAT")));
        assert!(dictionary.contains(&convert_word_to_array("CATS")));
        assert!(!dictionary.contains(&convert_word_to_array("CAR")));
        // Single letters are never dictionary words
        assert!(!dictionary.contains(&convert_word_to_array("A")));
    }

    #[test]
    fn test_invalid_word() {
        assert!(matches!(Dictionary::new("cat\nc4t"), Err(Error::InvalidWord(_))));
    }

    #[test]
    fn test_descending_length_order() {
        let dictionary = Dictionary::from_words(&["AT", "CATS", "CAT", "RAT"]).unwrap();
        let lengths: Vec<usize> = dictionary.words().iter().map(|w| w.len()).collect();
        assert_eq!(lengths, vec![4, 3, 3, 2]);
        // The sort is stable, so file order is kept within a length
        assert_eq!(dictionary.words()[1], convert_word_to_array("CAT"));
        assert_eq!(dictionary.words()[2], convert_word_to_array("RAT"));
    }
}
