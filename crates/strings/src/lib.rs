// ABOUTME: General-purpose string manipulation library for wordglass.
// ABOUTME: Provides substring removal, concatenation, mirroring, and file-backed load/save.

pub mod error;

pub use error::StringsError;

use std::fs;
use std::path::Path;

/// Removes the first occurrence of `substring` from `s`.
///
/// Returns the input unchanged if `substring` does not occur.
pub fn remove_first(s: &str, substring: &str) -> String {
    match s.find(substring) {
        Some(i) => {
            let mut out = String::with_capacity(s.len() - substring.len());
            out.push_str(&s[..i]);
            out.push_str(&s[i + substring.len()..]);
            out
        }
        None => s.to_string(),
    }
}

/// Appends `suffix` to `s`, returning the concatenated string.
pub fn append(s: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(s.len() + suffix.len());
    out.push_str(s);
    out.push_str(suffix);
    out
}

/// Mirrors (reverses) the character sequence of `s`.
pub fn mirror(s: &str) -> String {
    s.chars().rev().collect()
}

/// Loads the contents of the file at `path` as a UTF-8 string.
///
/// The file handle is released before this returns.
pub fn load_string(path: impl AsRef<Path>) -> Result<String, StringsError> {
    Ok(fs::read_to_string(path)?)
}

/// Writes `contents` to the file at `path`, creating or truncating it.
///
/// The file handle is released before this returns.
pub fn save_string(path: impl AsRef<Path>, contents: &str) -> Result<(), StringsError> {
    fs::write(path, contents)?;
    Ok(())
}
