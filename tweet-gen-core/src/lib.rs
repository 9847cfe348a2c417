//! Word-level Markov chain text generation library.
//!
//! This crate builds a first-order Markov chain over the words of a
//! corpus and walks it to produce short sentences ("tweets"):
//! - Deduplicated word registry with weighted transitions
//! - Weighted random selection of the next word
//! - Bounded-length generation closing on terminal punctuation
//! - Explicit, seedable random source for reproducible output
//!
//! ```
//! use tweet_gen_core::model::chain::Chain;
//! use tweet_gen_core::model::generation_config::GenerationConfig;
//! use tweet_gen_core::model::generator::Generator;
//! use tweet_gen_core::model::random::seeded_source;
//!
//! let chain = Chain::from_corpus("the cat sat. the dog ran.", 0)?;
//! let mut generator = Generator::new(&chain, seeded_source(42));
//! for sentence in generator.generate(&GenerationConfig::new(3, 20)?)? {
//!     assert!(sentence.to_string().ends_with('.'));
//! }
//! # Ok::<(), tweet_gen_core::ChainError>(())
//! ```

/// Word chain model and generation logic.
pub mod model;

/// Error types shared by the chain and the generator.
pub mod error;

/// I/O utilities (corpus loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{ChainError, Result};
