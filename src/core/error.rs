//! Errors raised by the filename clustering routines

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClusterError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
	/// The input cannot be clustered with the requested parameters
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A parameter is outside its accepted range
	#[error("invalid parameter '{name}': {message}")]
	InvalidParameter { name: &'static str, message: String },

	/// Numerical failure while clustering
	#[error("{algorithm} failed on {n_items} names: {reason}")]
	Computation {
		algorithm: &'static str,
		n_items: usize,
		reason: String,
	},
}

impl ClusterError {
	pub(crate) fn parameter(name: &'static str, message: impl Into<String>) -> Self {
		Self::InvalidParameter {
			name,
			message: message.into(),
		}
	}
}
