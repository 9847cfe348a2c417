//! Top-level module for the word chain and sentence generation.
//!
//! This module provides a first-order Markov chain over words, including:
//! - Sentence boundary detection and corpus tokenization (`token`)
//! - Word nodes and their weighted transitions (`node`)
//! - The deduplicated word registry (`Chain`)
//! - Weighted next-word selection (`selector`)
//! - A high-level generation interface (`Generator`)

/// High-level interface walking a chain to produce sentences.
///
/// Handles start selection, weighted walking, the length cap,
/// and the closing of sentences that stop early.
pub mod generator;

/// Registry of every distinct word of a corpus.
///
/// Supports building from text or from a file, uniform start
/// selection, and a serializable dump.
pub mod chain;

/// Word nodes and weighted transitions.
pub mod node;

/// Weighted random selection over a transition table.
pub mod selector;

/// Uniform integer sources feeding every random draw.
pub mod random;

/// Sentence-ender detection and whitespace tokenization.
pub mod token;

/// Generation parameters (sentence count, length cap).
pub mod generation_config;
