use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
///
/// The chain and the generator never reach for a global generator: the
/// caller owns the source and passes it in, so a fixed source gives a
/// reproducible output.
pub trait UniformSource {
	/// Returns an integer uniformly drawn in `[0, upper)`.
	///
	/// Callers never pass `upper == 0`.
	fn uniform(&mut self, upper: usize) -> usize;
}

impl UniformSource for StdRng {
	fn uniform(&mut self, upper: usize) -> usize {
		self.random_range(0..upper)
	}
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
	fn uniform(&mut self, upper: usize) -> usize {
		(**self).uniform(upper)
	}
}

/// Builds the deterministic source used by the command line, seeded once.
pub fn seeded_source(seed: u64) -> StdRng {
	StdRng::seed_from_u64(seed)
}

/// Replays a fixed list of draws and records every requested bound.
#[cfg(test)]
pub(crate) struct ScriptedSource {
	values: std::collections::VecDeque<usize>,
	pub(crate) bounds: Vec<usize>,
}

#[cfg(test)]
impl ScriptedSource {
	pub(crate) fn new(values: &[usize]) -> Self {
		Self { values: values.iter().copied().collect(), bounds: Vec::new() }
	}
}

#[cfg(test)]
impl UniformSource for ScriptedSource {
	fn uniform(&mut self, upper: usize) -> usize {
		self.bounds.push(upper);
		let value = self.values.pop_front().expect("script exhausted");
		assert!(value < upper, "scripted {value} out of [0, {upper})");
		value
	}
}
