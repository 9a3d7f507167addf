// ABOUTME: Palindrome and anagram classification over a set of unique words.
// ABOUTME: Implements the validating Palindrome constructor and character-multiset anagram pairing.

use std::collections::{HashMap, HashSet};

/// A word whose lowercase form reads the same in both directions.
///
/// Construction validates the input; a non-palindromic word yields `None`.
/// The original spelling is preserved inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palindrome {
    word: String,
}

impl Palindrome {
    /// Validates `word` and wraps it if its lowercase form equals its own
    /// reversal. Case-insensitive, full string, no punctuation stripping.
    pub fn new(word: impl Into<String>) -> Option<Self> {
        let word = word.into();
        let lower = word.to_lowercase();
        if lower == wordglass_strings::mirror(&lower) {
            Some(Self { word })
        } else {
            None
        }
    }

    /// The original spelling of the word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Consumes the wrapper, returning the original spelling.
    pub fn into_word(self) -> String {
        self.word
    }
}

/// Character frequency map of `s`.
fn char_counts(s: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_insert(0usize) += 1;
    }
    counts
}

/// Returns true if `a` and `b` are anagrams of one another, ignoring case.
///
/// Strings that are identical ignoring case are not anagrams of each other.
pub fn is_anagram_pair(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return false;
    }

    // Cheap screen: the sets of distinct characters must match before
    // repetitions are counted.
    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();
    if set_a != set_b {
        return false;
    }

    char_counts(&a) == char_counts(&b)
}

/// Checks every word in `words` independently, collecting the palindromes.
///
/// Membership in `words` is case-sensitive, so spellings that differ only by
/// case are each checked and reported on their own.
pub fn find_palindromes(words: &HashSet<String>) -> Vec<Palindrome> {
    words
        .iter()
        .filter_map(|w| Palindrome::new(w.as_str()))
        .collect()
}

/// Finds every anagram pair among `words`.
///
/// Each confirmed pair is stored once: ordered by comparing the original
/// spellings, then lowercased.
pub fn find_anagram_pairs(words: &HashSet<String>) -> HashSet<(String, String)> {
    let mut pairs = HashSet::new();
    for word in words {
        for other in words {
            if is_anagram_pair(word, other) {
                if word < other {
                    pairs.insert((word.to_lowercase(), other.to_lowercase()));
                } else {
                    pairs.insert((other.to_lowercase(), word.to_lowercase()));
                }
            }
        }
    }
    pairs
}
