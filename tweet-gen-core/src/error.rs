//! Error types for chain construction and generation.

use std::collections::TryReserveError;

use thiserror::Error;

/// Main error type for chain and generator operations.
#[derive(Debug, Error)]
pub enum ChainError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The registry or a transition table could not grow.
	#[error("Allocation failed: {0}")]
	Allocation(#[from] TryReserveError),

	/// Every registered word is a sentence-ender (or the chain is empty),
	/// so no sentence can be started.
	#[error("No word available to start a sentence")]
	NoStartingWord,

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Result type alias for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
