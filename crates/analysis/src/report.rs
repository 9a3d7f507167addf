// ABOUTME: WordReport struct holding the palindrome and anagram findings for a page.
// ABOUTME: Includes the plain-text section renderer used by the CLI.

use serde::{Deserialize, Serialize};

/// Banner line preceding the palindrome section.
pub const PALINDROME_BANNER: &str = "==================Palindromes==================";

/// Banner line preceding the anagram section.
pub const ANAGRAM_BANNER: &str = "==================Anagrams==================";

/// The result of analyzing a page: which of its unique words are palindromes
/// and which pairs are anagrams of one another.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WordReport {
    pub url: String,
    pub domain: String,
    /// Number of unique words extracted (case-sensitive set).
    pub unique_words: usize,
    /// Palindromic words in their original spelling, sorted.
    pub palindromes: Vec<String>,
    /// Canonically ordered, lowercased anagram pairs, sorted.
    pub anagram_pairs: Vec<(String, String)>,
}

impl WordReport {
    /// Renders the two labeled sections printed by the CLI.
    ///
    /// Each section is a fixed banner line followed by one finding per line;
    /// pairs render as `(first, second)`.
    pub fn format_text(&self) -> String {
        let mut lines =
            Vec::with_capacity(2 + self.palindromes.len() + self.anagram_pairs.len());
        lines.push(PALINDROME_BANNER.to_string());
        lines.extend(self.palindromes.iter().cloned());
        lines.push(ANAGRAM_BANNER.to_string());
        lines.extend(
            self.anagram_pairs
                .iter()
                .map(|(first, second)| format!("({}, {})", first, second)),
        );
        lines.join("\n")
    }

    /// Returns true if the page produced neither palindromes nor anagram pairs.
    pub fn is_empty(&self) -> bool {
        self.palindromes.is_empty() && self.anagram_pairs.is_empty()
    }
}
