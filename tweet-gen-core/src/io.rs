use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use log::warn;

/// Reads a whole corpus file into memory.
///
/// - Any readable file is accepted: byte sequences that are not valid
///   UTF-8 become `U+FFFD`, the rest of the word is kept
/// - No normalization is applied, tokenization is left to the caller
pub(crate) fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let bytes = fs::read(&filename)?;
	match String::from_utf8_lossy(&bytes) {
		Cow::Borrowed(text) => Ok(text.to_owned()),
		Cow::Owned(text) => {
			warn!("{} is not valid UTF-8, invalid bytes replaced", filename.as_ref().display());
			Ok(text)
		}
	}
}
