use crate::error::Result;

/// Index of a word node inside its [`Chain`](super::chain::Chain).
///
/// Ids are only meaningful for the chain that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the node in the chain's insertion order.
	pub fn index(self) -> usize {
		self.0
	}
}

/// A weighted edge toward a word that followed the source word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	/// The successor word.
	pub target: NodeId,
	/// How many times the successor was observed right after the source.
	pub count: usize,
}

/// Represents a distinct word of the corpus.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Keep the exact word text, which is the node identity
/// - Accumulate transition occurrences during learning
///
/// ## Invariants
/// - `text` never changes once the node exists
/// - At most one transition per target
/// - Each transition occurrence count is strictly positive
/// - Transitions are kept in first-observed order
#[derive(Clone, Debug)]
pub struct WordNode {
	/// The word, punctuation included.
	text: String,
	/// Outgoing transitions in first-observed order.
	transitions: Vec<Transition>,
}

impl WordNode {
	pub(crate) fn new(text: String) -> Self {
		Self {
			text,
			transitions: Vec::new(),
		}
	}

	/// Returns the word of this node.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the outgoing transitions, in first-observed order.
	pub fn transitions(&self) -> &[Transition] {
		&self.transitions
	}

	/// Returns `true` if at least one word followed this one.
	pub fn has_edges(&self) -> bool {
		!self.transitions.is_empty()
	}

	/// Sum of all outgoing occurrence counts.
	pub fn total_weight(&self) -> usize {
		self.transitions.iter().map(|transition| transition.count).sum()
	}

	/// Records an occurrence of a transition toward `target`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is appended with an initial count of 1.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the table cannot grow.
	pub(crate) fn record_transition(&mut self, target: NodeId) -> Result<()> {
		if let Some(existing) = self.transitions.iter_mut().find(|transition| transition.target == target) {
			existing.count += 1;
			return Ok(());
		}

		self.transitions.try_reserve(1)?;
		self.transitions.push(Transition { target, count: 1 });
		Ok(())
	}
}
