//! Text preprocessing before synthesis
//!
//! These are pure string transforms. Note that shortening changes the
//! number of characters, so shortened speech no longer lines up slot for
//! slot with the original text.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z]").unwrap());
static NON_LETTERS_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z ]").unwrap());

/// Reduce a word to its first and last letter
pub fn shorten_word(word: &str) -> String {
    let mut chars = word.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => [first, last].iter().collect(),
        (Some(first), None) => first.to_string(),
        _ => String::new(),
    }
}

/// Shorten every word and join them without separators
///
/// Anything that is not an ASCII letter separates words.
pub fn shorten_words(text: &str) -> String {
    let letters_only = NON_LETTERS.replace_all(text, " ");
    letters_only.split(' ').filter(|w| !w.is_empty()).map(shorten_word).collect()
}

/// Drop everything except ASCII letters and spaces
pub fn strip_non_letters(text: &str) -> String {
    NON_LETTERS_OR_SPACE.replace_all(text, "").into_owned()
}

/// Apply the configured preprocessing to `text`
///
/// Unshortened text passes through untouched so every character still gets
/// its own slot, including punctuation pauses.
pub fn prepare(text: &str, shorten: bool) -> String {
    if shorten {
        shorten_words(text)
    } else {
        text.to_string()
    }
}
