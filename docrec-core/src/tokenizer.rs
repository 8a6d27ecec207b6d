//! Text normalization into content words.

use crate::stopwords::is_stop_word;

/// Tokens of this many characters or fewer are dropped.
const MIN_TOKEN_CHARS: usize = 3;

fn is_separator(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_ascii_digit() || matches!(c, '\r' | '\t' | '\n')
}

/// Split `text` into lowercase content words.
///
/// ASCII punctuation, ASCII digits, `\r`, `\t` and `\n` act as word breaks.
/// Words of fewer than three characters and English stop words are dropped.
/// Other whitespace (non-breaking spaces, form feeds) stays inside a word.
///
/// # Example
///
/// ```rust
/// use docrec_core::tokenizer::tokens;
///
/// assert_eq!(tokens("The Dog and the Cat."), vec!["dog", "cat"]);
/// ```
pub fn tokens(text: &str) -> Vec<String> {
    let spaced: String = text.chars().map(|c| if is_separator(c) { ' ' } else { c }).collect();
    spaced
        .split(' ')
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|word| !is_stop_word(word))
        .collect()
}

/// Normalize `text` into a single space-joined string of content words.
///
/// Returns an empty string when no word survives.
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}
