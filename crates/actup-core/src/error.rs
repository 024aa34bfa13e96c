//! Error types for memory operations.

/// Errors that can occur while configuring or using a [`Memory`](crate::Memory).
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
	/// A parameter that must be non-negative was given a negative value.
	#[error("The {name}, {value}, must not be negative")]
	NegativeParameter {
		/// Parameter name
		name: &'static str,
		/// Rejected value
		value: f64,
	},

	/// A parameter was given a value that is not a usable real number.
	#[error("The {name}, {value}, is not a valid value")]
	InvalidParameter {
		/// Parameter name
		name: &'static str,
		/// Rejected value
		value: f64,
	},

	/// The effective blending temperature would fall under the floor.
	#[error("The temperature, {value}, must not be less than {minimum}")]
	TemperatureTooLow {
		/// Effective temperature that was rejected
		value: f64,
		/// Smallest allowed temperature
		minimum: f64,
	},

	/// Optimized learning needs `decay < 1`.
	#[error("The decay, {decay}, must be less than one if optimized learning is enabled")]
	DecayTooLargeForOptimizedLearning {
		/// Offending decay
		decay: f64,
	},

	/// Time can only move forward.
	#[error("Time cannot be advanced backward ({amount})")]
	NegativeTimeAdvance {
		/// Rejected amount
		amount: f64,
	},

	/// `learn`, `forget` and `spread` need at least one attribute.
	#[error("No attributes to {operation}")]
	NoAttributes {
		/// Operation that was called
		operation: &'static str,
	},

	/// The same attribute name was supplied twice.
	#[error("Attribute {0:?} was supplied more than once")]
	DuplicateAttribute(String),

	/// A blended outcome attribute held something other than a real number.
	#[error("Chunk {chunk} has a non-numeric value for {attribute:?}")]
	NonNumericOutcome {
		/// Chunk name
		chunk: String,
		/// Outcome attribute
		attribute: String,
	},

	/// Activation was requested at or before a chunk's creation time.
	#[error("Can't compute activation of chunk {chunk} at time {time}, at or before its creation at {created}")]
	ActivationBeforeCreation {
		/// Chunk name
		chunk: String,
		/// Creation time of the chunk
		created: f64,
		/// Current memory time
		time: f64,
	},

	/// Base-level activation evaluated to a non-finite number.
	#[error("Base-level activation of chunk {chunk} at time {time} is not finite")]
	NonFiniteActivation {
		/// Chunk name
		chunk: String,
		/// Current memory time
		time: f64,
	},

	/// The spreading computation produced output inconsistent with the store.
	///
	/// This is not recoverable: it means an installed matching, weighting or
	/// sji strategy returned data of the wrong shape.
	#[error("Failed to spread: {what} has length {actual}, expected {expected}")]
	SpreadingInvariant {
		/// Which intermediate result was malformed
		what: &'static str,
		/// Expected length
		expected: usize,
		/// Actual length
		actual: usize,
	},
}

impl MemoryError {
	/// Check if this error came from an invalid parameter assignment.
	#[must_use]
	pub const fn is_configuration(&self) -> bool {
		matches!(
			self,
			Self::NegativeParameter { .. }
				| Self::InvalidParameter { .. }
				| Self::TemperatureTooLow { .. }
				| Self::DecayTooLargeForOptimizedLearning { .. }
				| Self::NegativeTimeAdvance { .. }
		)
	}

	/// Check if this error means time was not advanced past a chunk's creation.
	#[must_use]
	pub const fn is_temporal(&self) -> bool {
		matches!(self, Self::ActivationBeforeCreation { .. })
	}
}

/// Failure reported by a user-supplied strategy.
///
/// Never escapes a [`Memory`](crate::Memory): the caller logs it and falls back
/// to the built-in algorithm.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PluginError(pub String);

impl PluginError {
	/// Build a plugin error from any message.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// Result type alias for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_classification() {
		let err = MemoryError::NegativeParameter {
			name: "noise",
			value: -1.0,
		};
		assert!(err.is_configuration());
		assert!(!err.is_temporal());

		let err = MemoryError::ActivationBeforeCreation {
			chunk: "0000".into(),
			created: 1.0,
			time: 1.0,
		};
		assert!(err.is_temporal());
		assert!(!err.is_configuration());
	}

	#[test]
	fn test_error_messages() {
		let err = MemoryError::NoAttributes { operation: "learn" };
		assert_eq!(err.to_string(), "No attributes to learn");

		let err = MemoryError::TemperatureTooLow {
			value: 0.0,
			minimum: 0.01,
		};
		assert!(err.to_string().contains("0.01"));
	}
}
