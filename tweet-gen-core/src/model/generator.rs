use std::fmt;

use log::{debug, trace};

use crate::error::{ChainError, Result};
use super::chain::Chain;
use super::generation_config::GenerationConfig;
use super::node::NodeId;
use super::random::UniformSource;
use super::selector::select;
use super::token::is_sentence_ender;

/// How a generated sentence came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
	/// The walk drew a sentence-ender.
	Natural,
	/// The walk stopped early and the chain's first sentence-ender was appended.
	Forced,
	/// The walk stopped early and the chain holds no sentence-ender.
	Unterminated,
}

/// A generated sentence.
///
/// Words are borrowed from the chain that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence<'c> {
	words: Vec<&'c str>,
	ending: Ending,
}

impl<'c> Sentence<'c> {
	/// Returns the words, in emission order.
	pub fn words(&self) -> &[&'c str] {
		&self.words
	}

	pub fn ending(&self) -> Ending {
		self.ending
	}

	/// Number of words.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

impl fmt::Display for Sentence<'_> {
	/// Words joined by single spaces.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.words.join(" "))
	}
}

/// Step of the per-sentence walk.
#[derive(Clone, Copy)]
enum Walk {
	Walking(NodeId),
	Done(Ending),
	Stuck,
}

/// High-level generator walking a learned [`Chain`].
///
/// # Responsibilities
/// - Pick a starting word that does not end a sentence
/// - Walk the transitions with weighted random sampling
/// - Stop on a sentence-ender, on a dead end, or on the length cap
/// - Close sentences that stopped early with the chain's first sentence-ender
///
/// The chain is borrowed immutably: it cannot change while a generator
/// exists. Every random draw goes through the owned `source`, so the
/// same source state and chain always give the same sentences.
#[derive(Debug)]
pub struct Generator<'c, S> {
	chain: &'c Chain,
	source: S,
}

impl<'c, S: UniformSource> Generator<'c, S> {
	/// Creates a generator over `chain`, drawing from `source`.
	pub fn new(chain: &'c Chain, source: S) -> Self {
		Self { chain, source }
	}

	pub fn chain(&self) -> &'c Chain {
		self.chain
	}

	/// Gives the random source back.
	pub fn into_source(self) -> S {
		self.source
	}

	/// Generates `config.sentence_count` sentences.
	///
	/// # Errors
	/// Returns `ChainError::NoStartingWord` before generating anything if
	/// no word of the chain can start a sentence.
	pub fn generate(&mut self, config: &GenerationConfig) -> Result<Vec<Sentence<'c>>> {
		if !self.chain.has_starting_word() {
			return Err(ChainError::NoStartingWord);
		}

		let mut sentences = Vec::with_capacity(config.sentence_count);
		for _ in 0..config.sentence_count {
			sentences.push(self.generate_sentence(config)?);
		}
		Ok(sentences)
	}

	/// Generates a single sentence of at most `config.max_length()` words.
	///
	/// # Behavior
	/// - Starts from a uniformly random word that does not end a sentence.
	/// - While under the cap, draws a successor weighted by its occurrence
	///   count and emits it. Drawing a sentence-ender ends the sentence.
	/// - A dead end (word without successor) or the cap stops the walk.
	///   The first sentence-ender of the chain, in insertion order, is
	///   then appended. If the sentence is already full, it takes the
	///   place of the last word.
	///
	/// # Errors
	/// Returns `ChainError::NoStartingWord` if no word can start a sentence.
	pub fn generate_sentence(&mut self, config: &GenerationConfig) -> Result<Sentence<'c>> {
		let chain = self.chain;
		let max_length = config.max_length();

		let start = chain
			.pick_random_start(&mut self.source)
			.ok_or(ChainError::NoStartingWord)?;
		let mut words = vec![chain.text(start)];
		trace!("Start: {}", chain.text(start));

		let mut walk = Walk::Walking(start);
		while let Walk::Walking(current) = walk {
			walk = if words.len() >= max_length {
				Walk::Stuck
			} else {
				self.step(current, &mut words)
			};
		}

		let ending = match walk {
			Walk::Done(ending) => ending,
			_ => self.force_end(&mut words, max_length),
		};

		debug!("Generated {} words ({:?})", words.len(), ending);
		Ok(Sentence { words, ending })
	}

	/// Draws and emits the successor of `current`.
	fn step(&mut self, current: NodeId, words: &mut Vec<&'c str>) -> Walk {
		let chain = self.chain;
		let node = chain.node(current);
		if !node.has_edges() {
			trace!("Dead end: {}", node.text());
			return Walk::Stuck;
		}

		let Some(next) = select(node.transitions(), &mut self.source) else {
			return Walk::Stuck;
		};

		let word = chain.text(next);
		words.push(word);
		trace!("{} -> {}", node.text(), word);

		if is_sentence_ender(word) {
			Walk::Done(Ending::Natural)
		} else {
			Walk::Walking(next)
		}
	}

	/// Closes a sentence that stopped without a sentence-ender.
	fn force_end(&self, words: &mut Vec<&'c str>, max_length: usize) -> Ending {
		match self.chain.first_sentence_ender() {
			Some(ender) => {
				words.truncate(max_length - 1);
				words.push(self.chain.text(ender));
				Ending::Forced
			}
			None => {
				debug!("No sentence-ender in the chain, sentence left open");
				Ending::Unterminated
			}
		}
	}
}
