//! Activation Calculation
//!
//! The mathematics of remembering.
//!
//! A chunk's activation is the sum of four terms:
//! 1. **Base-level activation** (recency/frequency): `B = ln[Σ(t - t_k)^(-d)]`
//! 2. **Spreading activation** accumulated from cues: `S = Σ W_j × S_ji`
//! 3. **Importance** (emotional salience)
//! 4. **Noise**, a logistic sample with scale `s`
//!
//! Under *optimized learning* the reference times are not kept and the
//! base level is approximated from the reference count `n` and the
//! chunk's lifetime `L`:
//!
//! ```text
//! B = ln(n) - ln(1 - d) - d × ln(L)
//! ```
//!
//! Partial matching adds a fifth, mismatch term; see [`crate::matching`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cache::TranscendentalCache;
use crate::chunk::{Chunk, References};
use crate::error::{MemoryError, Result};

/// Breakdown of activation components for a single chunk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationBreakdown {
	/// From reference history and decay
	pub base_level: f64,
	/// Accumulated spreading activation, `None` when never spread to
	pub spreading: Option<f64>,
	/// Importance term
	pub importance: f64,
	/// Logistic noise sample
	pub noise: f64,
	/// Combined total (before any mismatch penalty)
	pub total: f64,
}

/// Combine activation sources into total activation.
///
/// `A = B + S + I + ε`, with an unset spreading term counting as zero.
#[must_use]
pub fn combine_activations(
	base_level: f64,
	spreading: Option<f64>,
	importance: f64,
	noise: f64,
) -> ActivationBreakdown {
	ActivationBreakdown {
		base_level,
		spreading,
		importance,
		noise,
		total: base_level + spreading.unwrap_or(0.0) + importance + noise,
	}
}

// ============================================================================
// Base-Level Activation
// ============================================================================

/// Compute the base-level activation of `chunk` at `time`.
///
/// Uses the full reference history when the chunk keeps one, and the
/// optimized-learning approximation when it only keeps a count. Decay is
/// taken from the cache, which is always kept in step with the memory.
///
/// # Errors
///
/// - [`MemoryError::ActivationBeforeCreation`] if `time` is not after the
///   chunk's creation time.
/// - [`MemoryError::NonFiniteActivation`] if the result is not finite, e.g.
///   a reference made at exactly `time` with a positive decay.
pub fn compute_base_level(
	chunk: &Chunk,
	time: f64,
	cache: &mut TranscendentalCache,
) -> Result<f64> {
	if time <= chunk.created() {
		return Err(MemoryError::ActivationBeforeCreation {
			chunk: chunk.name(),
			created: chunk.created(),
			time,
		});
	}

	let base = match chunk.references() {
		References::Times(times) => {
			let sum: f64 = times.iter().map(|&r| cache.expt(time - r)).sum();
			sum.ln()
		}
		References::Count(n) => {
			#[allow(clippy::cast_precision_loss)]
			let count = *n as f64;
			let decay = cache.decay();
			cache.ln(count) - cache.ln_one_minus_decay() - decay * cache.ln(time - chunk.created())
		}
	};

	if base.is_finite() {
		Ok(base)
	} else {
		Err(MemoryError::NonFiniteActivation {
			chunk: chunk.name(),
			time,
		})
	}
}

/// Base-level activation, reusing the chunk's memo when it was computed
/// for the same `time`.
///
/// # Errors
///
/// See [`compute_base_level`].
pub fn memoized_base_level(
	chunk: &mut Chunk,
	time: f64,
	cache: &mut TranscendentalCache,
) -> Result<f64> {
	if let Some(base) = chunk.memoized_base(time) {
		return Ok(base);
	}
	let base = compute_base_level(chunk, time, cache)?;
	chunk.memoize_base(time, base);
	Ok(base)
}

// ============================================================================
// Noise and Importance
// ============================================================================

/// How `learn` fills in importance when the caller gives none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultImportance {
	/// Importance is zero.
	#[default]
	Zero,
	/// Importance is `ln(p)` with `p` uniform on `(ε, 2 - ε)`.
	Sampled,
}

/// Seedable source of activation noise and sampled importance.
#[derive(Clone, Debug)]
pub struct NoiseSource {
	rng: ChaCha8Rng,
}

impl NoiseSource {
	/// Deterministic source for a given seed.
	#[must_use]
	pub fn seeded(seed: u64) -> Self {
		Self {
			rng: ChaCha8Rng::seed_from_u64(seed),
		}
	}

	/// Source seeded from the operating system.
	#[must_use]
	pub fn from_entropy() -> Self {
		Self {
			rng: ChaCha8Rng::from_entropy(),
		}
	}

	/// Seeded when `seed` is given, otherwise from entropy.
	#[must_use]
	pub fn new(seed: Option<u64>) -> Self {
		seed.map_or_else(Self::from_entropy, Self::seeded)
	}

	/// Logistic noise with scale `s`: `s × ln((1 - p) / p)`.
	///
	/// `p` is drawn away from 0 and 1 so the sample is always finite.
	/// Returns exactly zero when `s` is zero, without consuming randomness.
	pub fn logistic(&mut self, scale: f64) -> f64 {
		if scale == 0.0 {
			return 0.0;
		}
		let p: f64 = self.rng.gen_range(f64::EPSILON..1.0 - f64::EPSILON);
		scale * ((1.0 - p) / p).ln()
	}

	/// A log-transformed salience draw: `ln(p)`, `p ~ U(ε, 2 - ε)`.
	pub fn salience(&mut self) -> f64 {
		let p: f64 = self.rng.gen_range(f64::EPSILON..2.0 - f64::EPSILON);
		p.ln()
	}

	/// Importance for a `learn` call.
	pub fn importance(&mut self, explicit: Option<f64>, default: DefaultImportance) -> f64 {
		match (explicit, default) {
			(Some(value), _) => value,
			(None, DefaultImportance::Zero) => 0.0,
			(None, DefaultImportance::Sampled) => self.salience(),
		}
	}
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used, clippy::suboptimal_flops)]
mod tests {
	use super::*;
	use crate::attrs;
	use crate::chunk::ChunkId;
	use crate::value::Attributes;

	fn chunk_with(references: &[f64], optimized: bool) -> Chunk {
		let attributes = Attributes::new(attrs! { "color" => "red" }).unwrap();
		let created = references.first().copied().unwrap_or(0.0);
		let mut chunk = Chunk::new(ChunkId(0), attributes, created, optimized);
		for &r in references {
			chunk.reinforce(r);
		}
		chunk
	}

	#[test]
	fn test_single_reference_decay() {
		for &d in &[0.0, 0.1, 0.5, 0.9] {
			let mut cache = TranscendentalCache::new(d);
			let chunk = chunk_with(&[0.0], false);
			for &t in &[1.0, 2.0, 3.5, 10.0, 2500.0] {
				let base = compute_base_level(&chunk, t, &mut cache).unwrap();
				assert!(
					(base - (-d * f64::ln(t))).abs() < 1e-12,
					"d={d} t={t} base={base}"
				);
			}
		}
	}

	#[test]
	fn test_multiple_references() {
		let mut cache = TranscendentalCache::new(0.5);
		let chunk = chunk_with(&[0.0, 2.0], false);
		let base = compute_base_level(&chunk, 3.0, &mut cache).unwrap();
		let expected = (3.0_f64.powf(-0.5) + 1.0).ln();
		assert!((base - expected).abs() < 1e-12);
	}

	#[test]
	fn test_optimized_single_reference() {
		// ln(1) - ln(1 - d) - d ln(t): differs from the exact form only by -ln(1 - d)
		for &d in &[0.0, 0.25, 0.5, 0.75] {
			let mut cache = TranscendentalCache::new(d);
			let exact = compute_base_level(&chunk_with(&[0.0], false), 4.0, &mut cache).unwrap();
			let optimized =
				compute_base_level(&chunk_with(&[0.0], true), 4.0, &mut cache).unwrap();
			assert!((optimized - exact - (-(1.0 - d).ln())).abs() < 1e-12);
		}

		let mut cache = TranscendentalCache::new(0.0);
		let exact = compute_base_level(&chunk_with(&[0.0], false), 7.0, &mut cache).unwrap();
		let optimized = compute_base_level(&chunk_with(&[0.0], true), 7.0, &mut cache).unwrap();
		assert!((exact - optimized).abs() < 1e-12);
	}

	#[test]
	fn test_optimized_counts_references() {
		let mut cache = TranscendentalCache::new(0.5);
		let chunk = chunk_with(&[0.0, 1.0, 2.0], true);
		let base = compute_base_level(&chunk, 4.0, &mut cache).unwrap();
		let expected = 3.0_f64.ln() - 0.5_f64.ln() - 0.5 * 4.0_f64.ln();
		assert!((base - expected).abs() < 1e-12);
	}

	#[test]
	fn test_activation_at_creation_is_temporal_error() {
		for optimized in [false, true] {
			let mut cache = TranscendentalCache::new(0.5);
			let chunk = chunk_with(&[2.0], optimized);
			let err = compute_base_level(&chunk, 2.0, &mut cache).unwrap_err();
			assert!(err.is_temporal());
			let err = compute_base_level(&chunk, 1.0, &mut cache).unwrap_err();
			assert!(err.is_temporal());
		}
	}

	#[test]
	fn test_reference_at_current_time_is_not_finite() {
		let mut cache = TranscendentalCache::new(0.5);
		let chunk = chunk_with(&[0.0, 3.0], false);
		let err = compute_base_level(&chunk, 3.0, &mut cache).unwrap_err();
		assert!(matches!(err, MemoryError::NonFiniteActivation { .. }));

		// Without decay every reference weighs one
		let mut cache = TranscendentalCache::new(0.0);
		let base = compute_base_level(&chunk, 3.0, &mut cache).unwrap();
		assert!((base - 2.0_f64.ln()).abs() < 1e-12);
	}

	#[test]
	fn test_memo_reused_until_time_changes() {
		let mut cache = TranscendentalCache::new(0.5);
		let mut chunk = chunk_with(&[0.0], false);
		let first = memoized_base_level(&mut chunk, 4.0, &mut cache).unwrap();
		assert_eq!(chunk.memoized_base(4.0), Some(first));
		let later = memoized_base_level(&mut chunk, 9.0, &mut cache).unwrap();
		assert!((later - (-0.5 * 9.0_f64.ln())).abs() < 1e-12);
	}

	#[test]
	fn test_combine_activations() {
		let breakdown = combine_activations(-0.5, None, 0.25, 0.1);
		assert!((breakdown.total - (-0.15)).abs() < 1e-12);
		let breakdown = combine_activations(-0.5, Some(1.0), 0.0, 0.0);
		assert_eq!(breakdown.total, 0.5);
	}

	#[test]
	fn test_zero_noise() {
		let mut noise = NoiseSource::seeded(7);
		assert_eq!(noise.logistic(0.0), 0.0);
	}

	#[test]
	fn test_noise_is_finite_and_centered() {
		let mut noise = NoiseSource::seeded(42);
		let samples: Vec<f64> = (0..20_000).map(|_| noise.logistic(0.25)).collect();
		assert!(samples.iter().all(|s| s.is_finite()));
		let mean = samples.iter().sum::<f64>() / samples.len() as f64;
		assert!(mean.abs() < 0.02, "mean={mean}");
		// Logistic variance is s²π²/3
		let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
		let expected = 0.25_f64.powi(2) * std::f64::consts::PI.powi(2) / 3.0;
		assert!((var - expected).abs() / expected < 0.1, "var={var}");
	}

	#[test]
	fn test_seeded_noise_is_reproducible() {
		let mut a = NoiseSource::seeded(3);
		let mut b = NoiseSource::seeded(3);
		for _ in 0..10 {
			assert_eq!(a.logistic(0.5), b.logistic(0.5));
		}
	}

	#[test]
	fn test_importance_defaults() {
		let mut noise = NoiseSource::seeded(11);
		assert_eq!(noise.importance(Some(1.5), DefaultImportance::Sampled), 1.5);
		assert_eq!(noise.importance(None, DefaultImportance::Zero), 0.0);
		for _ in 0..1000 {
			let sampled = noise.importance(None, DefaultImportance::Sampled);
			assert!(sampled.is_finite());
			assert!(sampled < 2.0_f64.ln());
		}
	}
}
