//! Transcendental Cache
//!
//! Base-level activation evaluates `t^(-d)` and `ln(n)` over and over, almost
//! always at small integral arguments when time is advanced in whole steps.
//! These tables memoize those evaluations per memory.
//!
//! The `t^(-d)` table depends on the decay, so the whole cache must be
//! rebuilt through [`TranscendentalCache::reset`] whenever decay changes.

/// Number of integral arguments memoized per table.
pub const TRANSCENDENTAL_CACHE_SIZE: usize = 1000;

/// Lookup tables for `t^(-d)` and `ln(n)` at integral arguments.
#[derive(Clone, Debug)]
pub struct TranscendentalCache {
	decay: f64,
	ln_one_minus_decay: f64,
	expt: Vec<Option<f64>>,
	ln: Vec<Option<f64>>,
}

impl TranscendentalCache {
	/// Empty tables for the given decay.
	#[must_use]
	pub fn new(decay: f64) -> Self {
		Self {
			decay,
			ln_one_minus_decay: (1.0 - decay).ln(),
			expt: vec![None; TRANSCENDENTAL_CACHE_SIZE],
			ln: vec![None; TRANSCENDENTAL_CACHE_SIZE],
		}
	}

	/// Drop every cached entry and switch to a new decay.
	pub fn reset(&mut self, decay: f64) {
		self.decay = decay;
		// Not finite when decay >= 1; only read under optimized learning, which forbids that
		self.ln_one_minus_decay = (1.0 - decay).ln();
		self.expt.fill(None);
		self.ln.fill(None);
	}

	/// Decay the tables were built for.
	#[must_use]
	pub const fn decay(&self) -> f64 {
		self.decay
	}

	/// `ln(1 - d)`, used by optimized learning.
	#[must_use]
	pub const fn ln_one_minus_decay(&self) -> f64 {
		self.ln_one_minus_decay
	}

	/// `t^(-d)`.
	pub fn expt(&mut self, t: f64) -> f64 {
		let decay = self.decay;
		match slot(t) {
			Some(i) => *self.expt[i].get_or_insert_with(|| t.powf(-decay)),
			None => t.powf(-decay),
		}
	}

	/// `ln(x)`.
	pub fn ln(&mut self, x: f64) -> f64 {
		match slot(x) {
			Some(i) => *self.ln[i].get_or_insert_with(|| x.ln()),
			None => x.ln(),
		}
	}

	/// Number of populated entries across both tables.
	#[must_use]
	pub fn populated(&self) -> usize {
		self.expt.iter().chain(&self.ln).filter(|e| e.is_some()).count()
	}
}

/// Table index for `x`, if it is a small non-negative integer.
#[inline]
#[allow(
	clippy::cast_precision_loss,
	clippy::cast_possible_truncation,
	clippy::cast_sign_loss
)]
fn slot(x: f64) -> Option<usize> {
	let in_range = x >= 0.0 && x < TRANSCENDENTAL_CACHE_SIZE as f64;
	(in_range && x.fract() == 0.0).then_some(x as usize)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
	use super::*;

	#[test]
	fn test_expt_matches_powf() {
		let mut cache = TranscendentalCache::new(0.5);
		assert!((cache.expt(4.0) - 0.5).abs() < 1e-12);
		// Served from the table the second time
		assert!((cache.expt(4.0) - 0.5).abs() < 1e-12);
		assert_eq!(cache.populated(), 1);

		// Fractional and out-of-range arguments bypass the table
		assert!((cache.expt(2.25) - 2.25_f64.powf(-0.5)).abs() < 1e-12);
		assert!((cache.expt(4096.0) - 4096_f64.powf(-0.5)).abs() < 1e-12);
		assert_eq!(cache.populated(), 1);
	}

	#[test]
	fn test_ln() {
		let mut cache = TranscendentalCache::new(0.5);
		assert_eq!(cache.ln(1.0), 0.0);
		assert!((cache.ln(10.0) - 10_f64.ln()).abs() < 1e-12);
		assert_eq!(cache.ln(0.0), f64::NEG_INFINITY);
		assert!(cache.ln(-1.0).is_nan());
	}

	#[test]
	fn test_reset_invalidates_decay_dependent_entries() {
		let mut cache = TranscendentalCache::new(0.5);
		let before = cache.expt(4.0);
		cache.reset(1.0);
		assert_eq!(cache.populated(), 0);
		let after = cache.expt(4.0);
		assert!((before - 0.5).abs() < 1e-12);
		assert!((after - 0.25).abs() < 1e-12);
		assert!(cache.ln_one_minus_decay().is_infinite());
	}

	#[test]
	fn test_ln_one_minus_decay() {
		let cache = TranscendentalCache::new(0.5);
		assert!((cache.ln_one_minus_decay() - 0.5_f64.ln()).abs() < 1e-12);
	}
}
