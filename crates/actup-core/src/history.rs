//! Activation History
//!
//! When enabled on a memory, every activation computed by a retrieval or a
//! blend appends one record describing how it was assembled. Blends also
//! fill in each contributing chunk's retrieval probability once all weights
//! are known.
//!
//! Records pile up quickly in a loop; drain them with
//! [`Memory::take_activation_history`](crate::Memory::take_activation_history).

use serde::{Deserialize, Serialize};

use crate::activation::ActivationBreakdown;
use crate::chunk::{Chunk, References};
use crate::value::Value;

/// Reference history as recorded: times, or a count under optimized learning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceRecord {
	/// Times the chunk was learned
	Times(Vec<f64>),
	/// Number of times the chunk was learned
	Count(u64),
}

impl From<&References> for ReferenceRecord {
	fn from(references: &References) -> Self {
		match references {
			References::Times(times) => Self::Times(times.to_vec()),
			References::Count(n) => Self::Count(*n),
		}
	}
}

/// How one chunk's activation was computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationRecord {
	/// Chunk name
	pub name: String,
	/// Time the chunk was created
	pub creation_time: f64,
	/// Chunk slots
	pub attributes: Vec<(String, Value)>,
	/// Reference history
	pub references: ReferenceRecord,
	/// Base-level activation
	pub base_activation: f64,
	/// Noise sample
	pub activation_noise: f64,
	/// Spreading activation, if any was spread to the chunk
	pub spreading_activation: Option<f64>,
	/// Importance term
	pub importance: f64,
	/// Mismatch penalty (partial matching only)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mismatch: Option<f64>,
	/// Final activation, including any mismatch penalty
	pub activation: f64,
	/// Share of the blend's total weight (blending only)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retrieval_probability: Option<f64>,
}

impl ActivationRecord {
	pub(crate) fn new(chunk: &Chunk, breakdown: &ActivationBreakdown, mismatch: Option<f64>) -> Self {
		Self {
			name: chunk.name(),
			creation_time: chunk.created(),
			attributes: chunk.attributes().to_vec(),
			references: chunk.references().into(),
			base_activation: breakdown.base_level,
			activation_noise: breakdown.noise,
			spreading_activation: breakdown.spreading,
			importance: breakdown.importance,
			mismatch,
			activation: breakdown.total + mismatch.unwrap_or(0.0),
			retrieval_probability: None,
		}
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use crate::activation::combine_activations;
	use crate::attrs;
	use crate::chunk::ChunkId;
	use crate::value::Attributes;

	fn chunk() -> Chunk {
		let attributes = Attributes::new(attrs! { "color" => "red", "size" => 3 }).unwrap();
		let mut chunk = Chunk::new(ChunkId(2), attributes, 0.0, false);
		chunk.reinforce(0.0);
		chunk
	}

	#[test]
	fn test_record_includes_mismatch_in_activation() {
		let breakdown = combine_activations(-0.25, Some(0.5), 0.0, 0.0);
		let record = ActivationRecord::new(&chunk(), &breakdown, Some(-1.0));
		assert_eq!(record.name, "0002");
		assert_eq!(record.references, ReferenceRecord::Times(vec![0.0]));
		assert!((record.activation - (-0.75)).abs() < 1e-12);
	}

	#[test]
	fn test_record_serializes() {
		let breakdown = combine_activations(-0.346_573_590_279_972_6, None, 0.0, 0.1);
		let record = ActivationRecord::new(&chunk(), &breakdown, None);
		let json = serde_json::to_value(&record).unwrap();

		assert_eq!(json["name"], "0002");
		assert_eq!(json["attributes"][0][0], "color");
		assert_eq!(json["attributes"][0][1], "red");
		assert_eq!(json["references"], serde_json::json!([0.0]));
		assert!(json["spreading_activation"].is_null());
		assert!(json.get("mismatch").is_none());
		assert!(json.get("retrieval_probability").is_none());

		let back: ActivationRecord = serde_json::from_value(json).unwrap();
		assert_eq!(back, record);
	}

	#[test]
	fn test_count_references() {
		let record = ReferenceRecord::from(&References::Count(4));
		assert_eq!(serde_json::to_string(&record).unwrap(), "4");
	}
}
