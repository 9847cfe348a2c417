/// Characters that close a sentence when they end a word.
const SENTENCE_ENDERS: [char; 3] = ['.', '!', '?'];

/// Characters separating two words of a corpus.
const DELIMITERS: [char; 4] = [' ', '\t', '\n', '\r'];

/// Returns `true` if `word` ends a sentence.
///
/// A word ends a sentence when its last character is `.`, `!` or `?`.
/// The empty word never does.
pub fn is_sentence_ender(word: &str) -> bool {
	word.ends_with(SENTENCE_ENDERS)
}

/// Splits a corpus into words, in corpus order.
///
/// Only space, tab, newline and carriage return separate words.
/// Case and punctuation are kept: `"Sat."` and `"sat"` are distinct words.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
	text.split(DELIMITERS).filter(|word| !word.is_empty())
}
