use super::node::{NodeId, Transition};
use super::random::UniformSource;

/// Picks the next word using weighted random sampling.
///
/// The probability of selecting a target is proportional to its
/// occurrence count.
///
/// This function performs:
/// - an O(n) scan to compute the total weight
/// - a single draw `r` in `[0, total)`
/// - a cumulative walk over the transitions, in stored order
///
/// Returns `None` if `transitions` is empty, without drawing.
pub fn select<S: UniformSource + ?Sized>(transitions: &[Transition], source: &mut S) -> Option<NodeId> {
	let last = transitions.last()?;

	let total: usize = transitions.iter().map(|transition| transition.count).sum();
	if total == 0 {
		// Should not happen due to invariants
		return None;
	}

	let r = source.uniform(total);

	let mut cumulative = 0;
	for transition in transitions {
		cumulative += transition.count;
		if r < cumulative {
			return Some(transition.target);
		}
	}

	// Unreachable while `total` is the sum of all counts
	Some(last.target)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::random::{seeded_source, ScriptedSource};

	fn edges(counts: &[usize]) -> Vec<Transition> {
		counts
			.iter()
			.enumerate()
			.map(|(i, &count)| Transition { target: NodeId(i), count })
			.collect()
	}

	#[test]
	fn empty_table_draws_nothing() {
		let mut source = ScriptedSource::new(&[]);
		assert_eq!(select(&[], &mut source), None);
		assert!(source.bounds.is_empty());
	}

	#[test]
	fn draw_maps_onto_cumulative_buckets() {
		// Buckets: [0, 2) -> 0, [2, 3) -> 1, [3, 6) -> 2
		let table = edges(&[2, 1, 3]);
		let expected = [0, 0, 1, 2, 2, 2];
		for (r, want) in expected.iter().enumerate() {
			let mut source = ScriptedSource::new(&[r]);
			assert_eq!(select(&table, &mut source), Some(NodeId(*want)));
			assert_eq!(source.bounds, vec![6]);
		}
	}

	#[test]
	fn single_edge_always_wins() {
		let table = edges(&[5]);
		let mut source = seeded_source(1);
		for _ in 0..100 {
			assert_eq!(select(&table, &mut source), Some(NodeId(0)));
		}
	}

	#[test]
	fn frequent_successor_is_favoured() {
		// {A:1, B:9}
		let table = edges(&[1, 9]);
		let mut source = seeded_source(2024);
		let draws = 10_000;
		let hits = (0..draws)
			.filter(|_| select(&table, &mut source) == Some(NodeId(1)))
			.count();

		let ratio = hits as f64 / draws as f64;
		assert!((ratio - 0.9).abs() < 0.02, "B selected {ratio}");
	}

	#[test]
	fn zero_total_draws_nothing() {
		let table = edges(&[0, 0]);
		let mut source = ScriptedSource::new(&[]);
		assert_eq!(select(&table, &mut source), None);
	}
}
