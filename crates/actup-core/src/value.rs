//! Attribute Values and Signatures
//!
//! A chunk is a set of `name → value` slots. Two `learn` calls describe the
//! same chunk when they carry the same slots, whatever order they were
//! written in, so every attribute set is canonicalized into sorted order
//! before it is used as a key.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{MemoryError, Result};

/// A hashable attribute value.
///
/// Floats compare by value for identity purposes: `-0.0` equals `0.0`, and
/// NaN equals NaN so that a chunk learned with NaN can be found again.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Boolean
	Bool(bool),
	/// Signed integer
	Int(i64),
	/// Real number
	Float(f64),
	/// String
	Str(String),
}

impl Value {
	/// Numeric view of the value, used when blending.
	#[must_use]
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			#[allow(clippy::cast_precision_loss)]
			Self::Int(i) => Some(*i as f64),
			Self::Float(f) => Some(*f),
			Self::Bool(_) | Self::Str(_) => None,
		}
	}

	/// String view of the value, if it is one.
	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			#[allow(clippy::float_cmp)]
			(Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
			(Self::Str(a), Self::Str(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::Bool(b) => b.hash(state),
			Self::Int(i) => i.hash(state),
			Self::Float(f) => {
				// Keep hashing consistent with `eq`
				let bits = if *f == 0.0 {
					0.0_f64.to_bits()
				} else if f.is_nan() {
					f64::NAN.to_bits()
				} else {
					f.to_bits()
				};
				bits.hash(state);
			}
			Self::Str(s) => s.hash(state),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(i) => write!(f, "{i}"),
			Self::Float(x) => write!(f, "{x}"),
			Self::Str(s) => write!(f, "{s:?}"),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

/// Storage for attribute slots; most chunks have only a handful.
type Slots = SmallVec<[(String, Value); 4]>;

/// A canonical, order-independent set of attribute slots.
///
/// Used both as the identity of a chunk and as a retrieval cue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes(Slots);

impl Attributes {
	/// Canonicalize slots by sorting on attribute name.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::DuplicateAttribute`] if a name appears twice.
	pub fn new<I, K>(slots: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let mut slots: Slots = slots
			.into_iter()
			.map(|(name, value)| (name.into(), value))
			.collect();
		slots.sort_by(|a, b| a.0.cmp(&b.0));

		if let Some(pair) = slots.windows(2).find(|pair| pair[0].0 == pair[1].0) {
			return Err(MemoryError::DuplicateAttribute(pair[0].0.clone()));
		}

		Ok(Self(slots))
	}

	/// Value of the named slot.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0
			.binary_search_by(|(slot, _)| slot.as_str().cmp(name))
			.ok()
			.map(|i| &self.0[i].1)
	}

	/// Whether the named slot is present.
	#[must_use]
	pub fn contains_key(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Whether every slot name of `other` is present here.
	#[must_use]
	pub fn has_slots_of(&self, other: &Self) -> bool {
		other.names().all(|name| self.contains_key(name))
	}

	/// Whether `value` occurs in any slot, regardless of slot name.
	#[must_use]
	pub fn contains_value(&self, value: &Value) -> bool {
		self.0.iter().any(|(_, v)| v == value)
	}

	/// Slots in canonical order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Slot names in canonical order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(name, _)| name.as_str())
	}

	/// Number of slots.
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no slots.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Owned copy of the slots, for diagnostics.
	#[must_use]
	pub fn to_vec(&self) -> Vec<(String, Value)> {
		self.0.to_vec()
	}
}

impl fmt::Display for Attributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (name, value)) in self.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{name:?}: {value}")?;
		}
		write!(f, "}}")
	}
}

/// Build a list of attribute slots.
///
/// ```rust
/// use actup_core::{attrs, Value};
///
/// let slots = attrs! { "color" => "red", "size" => 2 };
/// assert_eq!(slots[1], ("size".to_string(), Value::Int(2)));
/// ```
#[macro_export]
macro_rules! attrs {
	($($name:expr => $value:expr),* $(,)?) => {
		::std::vec![$((::std::string::String::from($name), $crate::Value::from($value))),*]
	};
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use std::collections::hash_map::DefaultHasher;

	fn hash_of(value: &Value) -> u64 {
		let mut hasher = DefaultHasher::new();
		value.hash(&mut hasher);
		hasher.finish()
	}

	#[test]
	fn test_signature_is_order_independent() {
		let a = Attributes::new(attrs! { "color" => "red", "size" => 2 }).unwrap();
		let b = Attributes::new(attrs! { "size" => 2, "color" => "red" }).unwrap();
		assert_eq!(a, b);
		assert_eq!(a.names().collect::<Vec<_>>(), vec!["color", "size"]);
	}

	#[test]
	fn test_duplicate_attribute_rejected() {
		let err = Attributes::new(attrs! { "size" => 1, "size" => 2 }).unwrap_err();
		assert!(matches!(err, MemoryError::DuplicateAttribute(name) if name == "size"));
	}

	#[test]
	fn test_float_identity() {
		assert_eq!(Value::Float(0.0), Value::Float(-0.0));
		assert_eq!(hash_of(&Value::Float(0.0)), hash_of(&Value::Float(-0.0)));
		assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
		assert_ne!(Value::Int(1), Value::Float(1.0));
	}

	#[test]
	fn test_lookup_and_containment() {
		let chunk = Attributes::new(attrs! { "widget" => "snackleizer", "color" => "blue" }).unwrap();
		let cue = Attributes::new(attrs! { "color" => "red" }).unwrap();

		assert_eq!(chunk.get("color"), Some(&Value::from("blue")));
		assert!(chunk.get("size").is_none());
		assert!(chunk.has_slots_of(&cue));
		assert!(chunk.contains_value(&Value::from("snackleizer")));
		assert!(!chunk.contains_value(&Value::from("red")));
	}

	#[test]
	fn test_numeric_view() {
		assert_eq!(Value::Int(3).as_f64(), Some(3.0));
		assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
		assert_eq!(Value::from("x").as_f64(), None);
		assert_eq!(Value::from(true).as_f64(), None);
	}
}
