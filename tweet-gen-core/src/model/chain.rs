use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::io::read_corpus;
use super::node::{NodeId, WordNode};
use super::random::UniformSource;
use super::token::{is_sentence_ender, split_words};

/// First-order Markov chain over the words of a corpus.
///
/// The `Chain` is the registry of every distinct word seen during
/// learning. It owns the nodes in an arena; transitions refer to other
/// nodes by [`NodeId`].
///
/// # Responsibilities
/// - Build the chain from a corpus, a word at a time
/// - Deduplicate words by their exact text
/// - Provide a uniformly random starting word
/// - Locate the fallback sentence-ender used to close a sentence
///
/// # Invariants
/// - Each node in `nodes` has a unique text
/// - `index` maps every text in `nodes` to its position, and nothing else
/// - Nodes are never removed, so every `NodeId` stays valid
#[derive(Clone, Debug, Default)]
pub struct Chain {
	/// Nodes in insertion order
	nodes: Vec<WordNode>,

	/// Mapping from a word to its node
	index: HashMap<String, NodeId>,
}

impl Chain {
	/// Creates an empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a chain from a corpus already in memory.
	///
	/// `word_limit` caps the number of words read, `0` reads everything.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the chain cannot grow.
	pub fn from_corpus(text: &str, word_limit: usize) -> Result<Self> {
		let mut chain = Self::new();
		chain.learn(split_words(text), word_limit)?;
		Ok(chain)
	}

	/// Loads a corpus file and builds the chain from it.
	///
	/// # Errors
	/// - Returns `ChainError::Io` if the file cannot be read.
	/// - Returns `ChainError::Allocation` if the chain cannot grow.
	pub fn from_file<P: AsRef<Path>>(filepath: P, word_limit: usize) -> Result<Self> {
		let text = read_corpus(&filepath)?;
		debug!("Read {} bytes from {}", text.len(), filepath.as_ref().display());
		Self::from_corpus(&text, word_limit)
	}

	/// Feeds words to the chain, in corpus order.
	///
	/// Each word is registered, then recorded as a successor of the
	/// previous word of this pass. The first word of a pass has no
	/// predecessor, even if the chain already holds words.
	///
	/// Returns the number of words read.
	///
	/// # Notes
	/// - `word_limit == 0` means no limit.
	/// - On error the chain keeps every word registered so far.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the chain cannot grow.
	pub fn learn<'w, I>(&mut self, words: I, word_limit: usize) -> Result<usize>
	where
		I: IntoIterator<Item = &'w str>,
	{
		let mut read = 0;
		let mut previous: Option<NodeId> = None;

		for word in words {
			if word_limit > 0 && read >= word_limit {
				break;
			}

			let current = self.lookup_or_insert(word)?;
			read += 1;

			if let Some(previous) = previous {
				self.nodes[previous.0].record_transition(current)?;
			}
			previous = Some(current);
		}

		debug!("Learned {} words: {} distinct, {} transitions", read, self.len(), self.edge_count());
		Ok(read)
	}

	/// Returns the node registered for `text`, creating it if needed.
	///
	/// New nodes start with no transitions and are appended at the end
	/// of the insertion order.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the registry cannot grow.
	/// The chain is left unchanged in that case.
	pub fn lookup_or_insert(&mut self, text: &str) -> Result<NodeId> {
		if let Some(id) = self.index.get(text) {
			return Ok(*id);
		}

		// The node and the index each own a copy of the word
		let node_text = try_to_owned(text)?;
		let key = try_to_owned(text)?;
		self.nodes.try_reserve(1)?;
		self.index.try_reserve(1)?;

		let id = NodeId(self.nodes.len());
		self.nodes.push(WordNode::new(node_text));
		self.index.insert(key, id);
		Ok(id)
	}

	/// Returns the node registered for `text`, if any.
	pub fn find(&self, text: &str) -> Option<NodeId> {
		self.index.get(text).copied()
	}

	/// Returns the node behind `id`.
	///
	/// # Panics
	/// Panics if `id` was issued by another chain.
	pub fn node(&self, id: NodeId) -> &WordNode {
		&self.nodes[id.0]
	}

	/// Returns the word behind `id`.
	pub fn text(&self, id: NodeId) -> &str {
		self.node(id).text()
	}

	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of distinct (word, successor) pairs.
	pub fn edge_count(&self) -> usize {
		self.nodes.iter().map(|node| node.transitions().len()).sum()
	}

	/// Iterates over the nodes in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &WordNode)> {
		self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
	}

	/// Returns `true` if at least one word can start a sentence.
	pub fn has_starting_word(&self) -> bool {
		self.nodes.iter().any(|node| !is_sentence_ender(node.text()))
	}

	/// Returns a random word that does not end a sentence.
	///
	/// Every eligible word has the same probability, whatever its
	/// position or frequency in the corpus. The eligible words are
	/// counted first, then the drawn one is located in insertion order.
	///
	/// Returns `None` (without drawing) if no word is eligible.
	pub fn pick_random_start<S: UniformSource + ?Sized>(&self, source: &mut S) -> Option<NodeId> {
		let eligible = self.nodes.iter().filter(|node| !is_sentence_ender(node.text())).count();
		if eligible == 0 {
			return None;
		}

		let drawn = source.uniform(eligible);
		self.iter()
			.filter(|(_, node)| !is_sentence_ender(node.text()))
			.nth(drawn)
			.map(|(id, _)| id)
	}

	/// Returns the first word, in insertion order, that ends a sentence.
	///
	/// This is the word appended to a sentence that did not reach an
	/// end on its own.
	pub fn first_sentence_ender(&self) -> Option<NodeId> {
		self.iter()
			.find(|(_, node)| is_sentence_ender(node.text()))
			.map(|(id, _)| id)
	}

	/// Builds a serializable view of the chain, in insertion order.
	pub fn dump(&self) -> ChainDump<'_> {
		let nodes = self
			.nodes
			.iter()
			.map(|node| NodeDump {
				word: node.text(),
				successors: node
					.transitions()
					.iter()
					.map(|transition| EdgeDump {
						word: self.text(transition.target),
						count: transition.count,
					})
					.collect(),
			})
			.collect();

		ChainDump {
			words: self.len(),
			transitions: self.edge_count(),
			nodes,
		}
	}
}

/// Copies `text`, reporting allocation failure instead of aborting.
fn try_to_owned(text: &str) -> Result<String> {
	let mut owned = String::new();
	owned.try_reserve_exact(text.len())?;
	owned.push_str(text);
	Ok(owned)
}

/// Serializable view of a [`Chain`], used for debugging output.
#[derive(Serialize, Debug)]
pub struct ChainDump<'a> {
	pub words: usize,
	pub transitions: usize,
	pub nodes: Vec<NodeDump<'a>>,
}

#[derive(Serialize, Debug)]
pub struct NodeDump<'a> {
	pub word: &'a str,
	pub successors: Vec<EdgeDump<'a>>,
}

#[derive(Serialize, Debug)]
pub struct EdgeDump<'a> {
	pub word: &'a str,
	pub count: usize,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::random::ScriptedSource;

	const CORPUS: &str = "the cat sat. the dog ran.";

	fn words(chain: &Chain) -> Vec<&str> {
		chain.iter().map(|(_, node)| node.text()).collect()
	}

	fn successors<'c>(chain: &'c Chain, word: &str) -> Vec<(&'c str, usize)> {
		let id = chain.find(word).unwrap();
		chain
			.node(id)
			.transitions()
			.iter()
			.map(|t| (chain.text(t.target), t.count))
			.collect()
	}

	#[test]
	fn lookup_or_insert_is_idempotent() {
		let mut chain = Chain::new();
		let a = chain.lookup_or_insert("cat").unwrap();
		let b = chain.lookup_or_insert("dog").unwrap();
		let c = chain.lookup_or_insert("cat").unwrap();

		assert_eq!(a, c);
		assert_ne!(a, b);
		assert_eq!(chain.len(), 2);
		assert_eq!(words(&chain), vec!["cat", "dog"]);
	}

	#[test]
	fn node_text_and_index_key_agree() {
		let mut chain = Chain::new();
		for word in ["caf\u{e9}", "au", "lait.", "au"] {
			let id = chain.lookup_or_insert(word).unwrap();
			assert_eq!(chain.text(id), word);
			assert_eq!(chain.find(word), Some(id));
		}
		assert_eq!(chain.len(), 3);
	}

	#[test]
	fn identity_is_case_and_punctuation_sensitive() {
		let chain = Chain::from_corpus("sat sat. Sat sat", 0).unwrap();
		assert_eq!(words(&chain), vec!["sat", "sat.", "Sat"]);
	}

	#[test]
	fn scenario_registry_and_edges() {
		let chain = Chain::from_corpus(CORPUS, 0).unwrap();

		assert_eq!(words(&chain), vec!["the", "cat", "sat.", "dog", "ran."]);
		assert_eq!(successors(&chain, "the"), vec![("cat", 1), ("dog", 1)]);
		assert_eq!(successors(&chain, "cat"), vec![("sat.", 1)]);
		assert_eq!(successors(&chain, "sat."), vec![("the", 1)]);
		assert_eq!(successors(&chain, "dog"), vec![("ran.", 1)]);
		assert!(successors(&chain, "ran.").is_empty());
		assert_eq!(chain.edge_count(), 5);
	}

	#[test]
	fn repeated_pairs_accumulate() {
		let chain = Chain::from_corpus("a b a b a c", 0).unwrap();
		assert_eq!(successors(&chain, "a"), vec![("b", 2), ("c", 1)]);
		assert_eq!(successors(&chain, "b"), vec![("a", 2)]);
	}

	#[test]
	fn word_limit_truncates_corpus() {
		let mut chain = Chain::new();
		let read = chain.learn(split_words(CORPUS), 1).unwrap();

		assert_eq!(read, 1);
		assert_eq!(words(&chain), vec!["the"]);
		assert_eq!(chain.edge_count(), 0);

		let chain = Chain::from_corpus(CORPUS, 4).unwrap();
		assert_eq!(words(&chain), vec!["the", "cat", "sat."]);
		assert_eq!(successors(&chain, "sat."), vec![("the", 1)]);
	}

	#[test]
	fn zero_limit_reads_everything() {
		let mut chain = Chain::new();
		assert_eq!(chain.learn(split_words(CORPUS), 0).unwrap(), 6);
		let mut chain = Chain::new();
		assert_eq!(chain.learn(split_words(CORPUS), 100).unwrap(), 6);
	}

	#[test]
	fn separate_passes_are_not_linked() {
		let mut chain = Chain::new();
		chain.learn(["a", "b"], 0).unwrap();
		chain.learn(["c", "a"], 0).unwrap();

		assert!(successors(&chain, "b").is_empty());
		assert_eq!(successors(&chain, "c"), vec![("a", 1)]);
	}

	#[test]
	fn start_skips_sentence_enders() {
		let chain = Chain::from_corpus(CORPUS, 0).unwrap();

		// Eligible, in insertion order: the, cat, dog
		let expected = ["the", "cat", "dog"];
		for (drawn, want) in expected.iter().enumerate() {
			let mut source = ScriptedSource::new(&[drawn]);
			let id = chain.pick_random_start(&mut source).unwrap();
			assert_eq!(chain.text(id), *want);
			assert_eq!(source.bounds, vec![3]);
		}
	}

	#[test]
	fn no_start_without_eligible_word() {
		let mut source = ScriptedSource::new(&[]);

		let empty = Chain::new();
		assert_eq!(empty.pick_random_start(&mut source), None);
		assert!(!empty.has_starting_word());

		let enders = Chain::from_corpus("stop. go! why?", 0).unwrap();
		assert_eq!(enders.pick_random_start(&mut source), None);
		assert!(!enders.has_starting_word());
		assert!(source.bounds.is_empty());
	}

	#[test]
	fn fallback_is_first_ender_in_insertion_order() {
		let chain = Chain::from_corpus("go now! then stop. now!", 0).unwrap();
		let id = chain.first_sentence_ender().unwrap();
		assert_eq!(chain.text(id), "now!");

		let chain = Chain::from_corpus("no ender here", 0).unwrap();
		assert_eq!(chain.first_sentence_ender(), None);
	}

	#[test]
	fn dump_lists_nodes_and_counts() {
		let chain = Chain::from_corpus("a b a b", 0).unwrap();
		let json = serde_json::to_value(chain.dump()).unwrap();

		assert_eq!(
			json,
			serde_json::json!({
				"words": 2,
				"transitions": 2,
				"nodes": [
					{ "word": "a", "successors": [{ "word": "b", "count": 2 }] },
					{ "word": "b", "successors": [{ "word": "a", "count": 1 }] },
				]
			})
		);
	}
}
