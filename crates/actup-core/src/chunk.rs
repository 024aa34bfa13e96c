//! Chunks
//!
//! A chunk is one learned item: a fixed set of attribute slots plus the
//! bookkeeping that drives its activation: when it was created, when (or how
//! often) it was reinforced, a memoized base-level activation, an accumulated
//! spreading term and an importance term.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::value::{Attributes, Value};

/// Identity of a chunk within one memory, assigned in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkId(pub u64);

impl fmt::Display for ChunkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}", self.0)
	}
}

/// Reinforcement history of a chunk.
#[derive(Clone, Debug, PartialEq)]
pub enum References {
	/// Every time the chunk was learned, oldest first.
	Times(SmallVec<[f64; 8]>),
	/// Only the number of times it was learned (optimized learning).
	Count(u64),
}

impl References {
	/// Number of references.
	#[must_use]
	pub fn count(&self) -> u64 {
		match self {
			Self::Times(times) => times.len() as u64,
			Self::Count(n) => *n,
		}
	}

	/// Whether no reference remains.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.count() == 0
	}
}

/// A single learned item.
#[derive(Clone, Debug)]
pub struct Chunk {
	id: ChunkId,
	attributes: Attributes,
	created: f64,
	references: References,
	/// `(time, base_activation)` of the last base-level computation
	base_memo: Option<(f64, f64)>,
	spreading: Option<f64>,
	importance: f64,
}

impl Chunk {
	pub(crate) fn new(id: ChunkId, attributes: Attributes, created: f64, optimized: bool) -> Self {
		let references = if optimized {
			References::Count(0)
		} else {
			References::Times(SmallVec::new())
		};

		Self {
			id,
			attributes,
			created,
			references,
			base_memo: None,
			spreading: None,
			importance: 0.0,
		}
	}

	/// Chunk identity.
	#[must_use]
	pub const fn id(&self) -> ChunkId {
		self.id
	}

	/// Printable name, e.g. `0007`.
	#[must_use]
	pub fn name(&self) -> String {
		self.id.to_string()
	}

	/// The chunk's slots.
	#[must_use]
	pub const fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	/// Value of one slot.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.attributes.get(name)
	}

	/// Memory time at which the chunk was first learned.
	#[must_use]
	pub const fn created(&self) -> f64 {
		self.created
	}

	/// Reinforcement history.
	#[must_use]
	pub const fn references(&self) -> &References {
		&self.references
	}

	/// Accumulated spreading activation, `None` when unset.
	#[must_use]
	pub const fn spreading_activation(&self) -> Option<f64> {
		self.spreading
	}

	/// Current importance (emotional salience) term.
	#[must_use]
	pub const fn importance(&self) -> f64 {
		self.importance
	}

	pub(crate) fn reinforce(&mut self, time: f64) {
		match &mut self.references {
			References::Times(times) => times.push(time),
			References::Count(n) => *n += 1,
		}
		self.base_memo = None;
	}

	/// Remove one reference made at `when`. Under optimized learning the
	/// time is not tracked and the count is decremented instead.
	pub(crate) fn unreinforce(&mut self, when: f64) -> bool {
		let removed = match &mut self.references {
			References::Times(times) => {
				#[allow(clippy::float_cmp)]
				let position = times.iter().position(|&t| t == when);
				position.map(|i| times.remove(i)).is_some()
			}
			References::Count(n) => {
				*n = n.saturating_sub(1);
				true
			}
		};
		if removed {
			self.base_memo = None;
		}
		removed
	}

	pub(crate) fn set_importance(&mut self, importance: f64) {
		self.importance = importance;
	}

	pub(crate) fn add_spreading(&mut self, amount: f64) {
		self.spreading = Some(self.spreading.unwrap_or(0.0) + amount);
	}

	pub(crate) fn clear_spreading(&mut self) {
		self.spreading = None;
	}

	#[allow(clippy::float_cmp)]
	pub(crate) fn memoized_base(&self, time: f64) -> Option<f64> {
		self.base_memo
			.and_then(|(at, value)| (at == time).then_some(value))
	}

	pub(crate) fn memoize_base(&mut self, time: f64, value: f64) {
		self.base_memo = Some((time, value));
	}

	pub(crate) fn invalidate_base(&mut self) {
		self.base_memo = None;
	}
}

impl fmt::Display for Chunk {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<Chunk {} {}>", self.id, self.attributes)
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
	use super::*;
	use crate::attrs;

	fn chunk(optimized: bool) -> Chunk {
		let attributes = Attributes::new(attrs! { "color" => "red", "size" => 4 }).unwrap();
		Chunk::new(ChunkId(3), attributes, 0.0, optimized)
	}

	#[test]
	fn test_display() {
		let c = chunk(false);
		assert_eq!(c.name(), "0003");
		assert_eq!(c.to_string(), r#"<Chunk 0003 {"color": "red", "size": 4}>"#);
	}

	#[test]
	fn test_reference_times() {
		let mut c = chunk(false);
		c.reinforce(0.0);
		c.reinforce(2.0);
		assert_eq!(c.references().count(), 2);

		assert!(!c.unreinforce(1.0));
		assert!(c.unreinforce(0.0));
		assert_eq!(c.references(), &References::Times(SmallVec::from_slice(&[2.0])));
		assert!(c.unreinforce(2.0));
		assert!(c.references().is_empty());
	}

	#[test]
	fn test_reference_count() {
		let mut c = chunk(true);
		c.reinforce(0.0);
		c.reinforce(5.0);
		assert_eq!(c.references(), &References::Count(2));
		assert!(c.unreinforce(123.0));
		assert_eq!(c.references(), &References::Count(1));
	}

	#[test]
	fn test_spreading_accumulates() {
		let mut c = chunk(false);
		assert_eq!(c.spreading_activation(), None);
		c.add_spreading(0.5);
		c.add_spreading(0.25);
		assert_eq!(c.spreading_activation(), Some(0.75));
		c.clear_spreading();
		assert_eq!(c.spreading_activation(), None);
	}

	#[test]
	fn test_memo_keyed_by_time() {
		let mut c = chunk(false);
		c.memoize_base(3.0, -0.5);
		assert_eq!(c.memoized_base(3.0), Some(-0.5));
		assert_eq!(c.memoized_base(4.0), None);

		c.reinforce(3.0);
		assert_eq!(c.memoized_base(3.0), None);
	}
}
