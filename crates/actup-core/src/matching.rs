//! Matching and Similarity
//!
//! Exact matching requires every cue slot to be present in a chunk with an
//! equal value. Partial matching only requires the slots to be present and
//! charges a mismatch penalty for every differing value:
//!
//! ```text
//! M = P × Σ sim(cue_k, chunk_k)
//! ```
//!
//! `sim` comes from a similarity function registered for the slot. In the
//! default *natural* mode those functions return `1` for identical and `0`
//! for completely different values, and one is subtracted before use, so
//! every term is `≤ 0`. In *ACT-R* mode functions already return values in
//! `[-1, 0]`. Slots without a function contribute `-1` unless the values are
//! equal.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::error::PluginError;
use crate::value::{Attributes, Value};

/// Similarity of two values of the same slot.
///
/// Should be commutative and stateless; neither is checked.
pub trait Similarity: Send + Sync {
	/// Similarity of `x` and `y`.
	///
	/// # Errors
	///
	/// Any error makes the caller treat the pair as having no similarity
	/// function.
	fn similarity(&self, x: &Value, y: &Value) -> Result<f64, PluginError>;
}

impl<F> Similarity for F
where
	F: Fn(&Value, &Value) -> Result<f64, PluginError> + Send + Sync,
{
	fn similarity(&self, x: &Value, y: &Value) -> Result<f64, PluginError> {
		self(x, y)
	}
}

/// Which range similarity functions are expected to return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMode {
	/// `[0, 1]`, identical = 1
	#[default]
	Natural,
	/// `[-1, 0]`, identical = 0 (traditional ACT-R)
	ActR,
}

impl SimilarityMode {
	/// Allowed `(minimum, maximum)` of a similarity function result.
	#[must_use]
	pub const fn range(self) -> (f64, f64) {
		match self {
			Self::Natural => (0.0, 1.0),
			Self::ActR => (-1.0, 0.0),
		}
	}
}

/// Similarity functions keyed by slot name.
#[derive(Clone, Default)]
pub struct SimilarityRegistry {
	functions: HashMap<String, Arc<dyn Similarity>>,
	mode: SimilarityMode,
}

impl SimilarityRegistry {
	/// Use `function` for every slot in `attributes`.
	pub fn register(&mut self, function: Arc<dyn Similarity>, attributes: &[&str]) {
		for &attribute in attributes {
			let _ = self
				.functions
				.insert(attribute.to_owned(), Arc::clone(&function));
		}
	}

	/// Remove the function for a slot. Returns whether one was registered.
	pub fn unregister(&mut self, attribute: &str) -> bool {
		self.functions.remove(attribute).is_some()
	}

	/// Current similarity mode.
	#[must_use]
	pub const fn mode(&self) -> SimilarityMode {
		self.mode
	}

	/// Switch similarity mode.
	pub fn set_mode(&mut self, mode: SimilarityMode) {
		self.mode = mode;
	}

	/// Similarity term for one slot, ready to be scaled by the mismatch
	/// penalty: `0` for equal values, otherwise `≤ 0` in either mode.
	#[must_use]
	pub fn similarity(&self, x: &Value, y: &Value, attribute: &str) -> f64 {
		if x == y {
			return 0.0;
		}
		let Some(function) = self.functions.get(attribute) else {
			return -1.0;
		};

		let raw = match function.similarity(x, y) {
			Ok(value) if !value.is_nan() => value,
			Ok(_) => {
				warn!(attribute, "Similarity function returned NaN, treating values as dissimilar");
				return -1.0;
			}
			Err(e) => {
				warn!(attribute, error = %e, "Similarity function failed, treating values as dissimilar");
				return -1.0;
			}
		};

		let (minimum, maximum) = self.mode.range();
		let clamped = if raw < minimum {
			warn!(attribute, raw, minimum, "Similarity below the allowed minimum, using the minimum");
			minimum
		} else if raw > maximum {
			warn!(attribute, raw, maximum, "Similarity above the allowed maximum, using the maximum");
			maximum
		} else {
			raw
		};

		match self.mode {
			SimilarityMode::Natural => clamped - 1.0,
			SimilarityMode::ActR => clamped,
		}
	}
}

impl fmt::Debug for SimilarityRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut attributes: Vec<&str> = self.functions.keys().map(String::as_str).collect();
		attributes.sort_unstable();
		f.debug_struct("SimilarityRegistry")
			.field("attributes", &attributes)
			.field("mode", &self.mode)
			.finish()
	}
}

/// Whether every cue slot is present in `chunk` with an equal value.
#[must_use]
pub fn matches_exactly(chunk: &Attributes, cue: &Attributes) -> bool {
	cue.iter()
		.all(|(name, value)| chunk.get(name) == Some(value))
}

/// Whether a chunk takes part in partial matching and blending.
///
/// With mismatch disabled this is exact matching; otherwise only the cue's
/// slots need to be present.
#[must_use]
pub fn qualifies(chunk: &Attributes, cue: &Attributes, mismatch: Option<f64>) -> bool {
	if mismatch.is_some() {
		chunk.has_slots_of(cue)
	} else {
		matches_exactly(chunk, cue)
	}
}

/// Mismatch term `P × Σ sim(cue_k, chunk_k)` over the cue's slots.
///
/// Slots missing from the chunk are skipped; [`qualifies`] rules such
/// chunks out beforehand.
#[must_use]
pub fn mismatch_penalty(
	registry: &SimilarityRegistry,
	penalty: f64,
	chunk: &Attributes,
	cue: &Attributes,
) -> f64 {
	let total: f64 = cue
		.iter()
		.filter_map(|(name, wanted)| {
			chunk
				.get(name)
				.map(|actual| registry.similarity(wanted, actual, name))
		})
		.sum();
	penalty * total
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
	use super::*;
	use crate::attrs;

	fn attributes(slots: Vec<(String, Value)>) -> Attributes {
		Attributes::new(slots).unwrap()
	}

	fn half(_: &Value, _: &Value) -> Result<f64, PluginError> {
		Ok(0.5)
	}

	fn constant(value: f64) -> Arc<dyn Similarity> {
		Arc::new(move |_: &Value, _: &Value| -> Result<f64, PluginError> { Ok(value) })
	}

	#[test]
	fn test_exact_match() {
		let chunk = attributes(attrs! { "color" => "red", "size" => 2 });
		assert!(matches_exactly(&chunk, &attributes(attrs! { "color" => "red" })));
		assert!(matches_exactly(&chunk, &Attributes::default()));
		assert!(!matches_exactly(&chunk, &attributes(attrs! { "color" => "blue" })));
		assert!(!matches_exactly(&chunk, &attributes(attrs! { "shape" => "round" })));
	}

	#[test]
	fn test_qualifies_depends_on_mismatch() {
		let chunk = attributes(attrs! { "color" => "red", "size" => 2 });
		let cue = attributes(attrs! { "color" => "blue" });
		assert!(!qualifies(&chunk, &cue, None));
		assert!(qualifies(&chunk, &cue, Some(1.0)));
		let cue = attributes(attrs! { "shape" => "round" });
		assert!(!qualifies(&chunk, &cue, Some(1.0)));
	}

	#[test]
	fn test_similarity_defaults() {
		let registry = SimilarityRegistry::default();
		let (a, b) = (Value::from("a"), Value::from("b"));
		assert_eq!(registry.similarity(&a, &a, "letter"), 0.0);
		assert_eq!(registry.similarity(&a, &b, "letter"), -1.0);
	}

	#[test]
	fn test_natural_similarity_shifted() {
		let mut registry = SimilarityRegistry::default();
		registry.register(Arc::new(half), &["letter"]);
		let (a, b) = (Value::from("a"), Value::from("b"));
		assert_eq!(registry.similarity(&a, &b, "letter"), -0.5);
		// Other slots are unaffected
		assert_eq!(registry.similarity(&a, &b, "digit"), -1.0);
	}

	#[test]
	fn test_similarity_clamped_to_mode_range() {
		let mut registry = SimilarityRegistry::default();
		registry.register(constant(3.0), &["x"]);
		registry.register(constant(-3.0), &["y"]);
		let (a, b) = (Value::from(1), Value::from(2));

		assert_eq!(registry.similarity(&a, &b, "x"), 0.0);
		assert_eq!(registry.similarity(&a, &b, "y"), -1.0);

		registry.set_mode(SimilarityMode::ActR);
		assert_eq!(registry.similarity(&a, &b, "x"), 0.0);
		assert_eq!(registry.similarity(&a, &b, "y"), -1.0);
	}

	#[test]
	fn test_actr_similarity_not_shifted() {
		let mut registry = SimilarityRegistry::default();
		registry.set_mode(SimilarityMode::ActR);
		registry.register(constant(-0.25), &["x"]);
		assert_eq!(registry.similarity(&Value::from(1), &Value::from(2), "x"), -0.25);
	}

	#[test]
	fn test_failing_similarity_falls_back() {
		let mut registry = SimilarityRegistry::default();
		registry.register(
			Arc::new(|_: &Value, _: &Value| -> Result<f64, PluginError> {
				Err(PluginError::new("boom"))
			}),
			&["x"],
		);
		registry.register(constant(f64::NAN), &["y"]);
		let (a, b) = (Value::from(1), Value::from(2));
		assert_eq!(registry.similarity(&a, &b, "x"), -1.0);
		assert_eq!(registry.similarity(&a, &b, "y"), -1.0);
	}

	#[test]
	fn test_unregister() {
		let mut registry = SimilarityRegistry::default();
		registry.register(Arc::new(half), &["x", "y"]);
		assert!(registry.unregister("x"));
		assert!(!registry.unregister("x"));
		let (a, b) = (Value::from(1), Value::from(2));
		assert_eq!(registry.similarity(&a, &b, "x"), -1.0);
		assert_eq!(registry.similarity(&a, &b, "y"), -0.5);
	}

	#[test]
	fn test_mismatch_penalty() {
		let mut registry = SimilarityRegistry::default();
		registry.register(Arc::new(half), &["size"]);
		let chunk = attributes(attrs! { "color" => "red", "size" => 2 });

		let cue = attributes(attrs! { "color" => "red", "size" => 3 });
		assert_eq!(mismatch_penalty(&registry, 1.0, &chunk, &cue), -0.5);

		let cue = attributes(attrs! { "color" => "blue", "size" => 3 });
		assert_eq!(mismatch_penalty(&registry, 2.0, &chunk, &cue), -3.0);

		let cue = attributes(attrs! { "color" => "red", "size" => 2 });
		assert_eq!(mismatch_penalty(&registry, 5.0, &chunk, &cue), 0.0);
	}
}
