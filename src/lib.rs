
use thiserror::Error;

pub mod config;
pub mod gnss;
pub mod io;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum DigSigProcErr {
	#[error("invalid PRN {0}, expected 1-32 or 120-138")]
	InvalidPrn(usize),

	#[error("invalid buffer length {actual}, expected {expected}")]
	InvalidBufferLength{ expected: usize, actual: usize },

	#[error("not enough symbols for correlation: need {needed}, got {actual}")]
	InsufficientSymbols{ needed: usize, actual: usize },

	#[error("invalid configuration: {0}")]
	InvalidConfig(&'static str),

	#[error("{0}")]
	Other(&'static str),
}
