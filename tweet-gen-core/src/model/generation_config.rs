use crate::error::{ChainError, Result};

/// Default cap on the number of words of a sentence.
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Input parameters for generating a batch of sentences.
///
/// # Responsibilities
/// - Track how many sentences a batch produces (`sentence_count`)
/// - Track the length cap of a single sentence (`max_length`)
///
/// # Invariants
/// - `max_length` is always >= 2
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
	/// Number of sentences produced by [`Generator::generate`](super::generator::Generator::generate).
	pub sentence_count: usize,

	/// Maximum number of words in a sentence, closing word included.
	max_length: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			sentence_count: 1,
			max_length: DEFAULT_MAX_LENGTH,
		}
	}
}

impl GenerationConfig {
	/// Creates a configuration producing `sentence_count` sentences of at
	/// most `max_length` words.
	///
	/// # Errors
	/// Returns an error if `max_length` is below 2.
	pub fn new(sentence_count: usize, max_length: usize) -> Result<Self> {
		let mut config = Self { sentence_count, ..Self::default() };
		config.set_max_length(max_length)?;
		Ok(config)
	}

	/// Returns the current length cap.
	pub fn max_length(&self) -> usize {
		self.max_length
	}

	/// Sets the length cap.
	///
	/// # Errors
	/// Returns an error if `max_length` is below 2: a sentence must hold
	/// its starting word and a closing word.
	pub fn set_max_length(&mut self, max_length: usize) -> Result<()> {
		if max_length < 2 {
			return Err(ChainError::InvalidConfig(format!("max length must be at least 2, got {max_length}")));
		}
		self.max_length = max_length;
		Ok(())
	}
}
