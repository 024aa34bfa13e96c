//! Blending
//!
//! A blend is a softmax-weighted average of one numeric slot across every
//! chunk matching a cue:
//!
//! ```text
//! w_i = e^((A_i - A_max) / t)
//! V = Σ w_i × v_i / Σ w_i
//! ```
//!
//! Where `t` is the blending temperature. Shifting every activation by the
//! largest one leaves the ratios unchanged. The most active contribution
//! weighs exactly 1 at any temperature, so the sum is never 0 or infinite.
//! The weights, and with them the retrieval probabilities `w_i / Σ w`, are
//! only known once every contribution has been collected.

/// Softmax weight of an activation at a temperature.
#[inline]
#[must_use]
pub fn blend_weight(activation: f64, temperature: f64) -> f64 {
	(activation / temperature).exp()
}

/// Contributions to a blend, weighted once all are in.
#[derive(Clone, Debug)]
pub struct BlendAccumulator {
	temperature: f64,
	/// `(activation, outcome, history record index)` of each contribution
	contributions: Vec<(f64, f64, Option<usize>)>,
}

impl BlendAccumulator {
	/// Empty blend at `temperature`.
	#[must_use]
	pub const fn new(temperature: f64) -> Self {
		Self {
			temperature,
			contributions: Vec::new(),
		}
	}

	/// Add one chunk's outcome `value` at the given `activation`.
	///
	/// `record` is the index of the chunk's activation-history record, if
	/// history is being collected.
	pub fn add(&mut self, activation: f64, value: f64, record: Option<usize>) {
		self.contributions.push((activation, value, record));
	}

	/// Number of contributions so far.
	#[must_use]
	pub fn len(&self) -> usize {
		self.contributions.len()
	}

	/// Whether nothing has contributed.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.contributions.is_empty()
	}

	fn max_activation(&self) -> f64 {
		self.contributions
			.iter()
			.map(|&(activation, _, _)| activation)
			.fold(f64::NEG_INFINITY, f64::max)
	}

	/// Weight of each contribution relative to the most active one, which
	/// weighs exactly 1.
	fn weights(&self) -> impl Iterator<Item = (f64, f64, Option<usize>)> + '_ {
		let max = self.max_activation();
		let temperature = self.temperature;
		self.contributions.iter().map(move |&(activation, value, record)| {
			let weight = if activation >= max {
				1.0
			} else {
				blend_weight(activation - max, temperature)
			};
			(weight, value, record)
		})
	}

	/// Sum of the relative weights: at least 1 once anything has contributed,
	/// 0 before.
	#[must_use]
	pub fn total_weight(&self) -> f64 {
		self.weights().map(|(weight, _, _)| weight).sum()
	}

	/// Blended value, or `None` when nothing contributed.
	#[must_use]
	pub fn value(&self) -> Option<f64> {
		if self.is_empty() {
			return None;
		}
		let (total, weighted) = self
			.weights()
			.fold((0.0, 0.0), |(total, weighted), (weight, value, _)| {
				(total + weight, weighted + weight * value)
			});
		Some(weighted / total)
	}

	/// Retrieval probability of each contribution that has a history record.
	pub fn probabilities(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
		let total = self.total_weight();
		self.weights()
			.filter_map(move |(weight, _, record)| record.map(|index| (index, weight / total)))
	}
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_blend_has_no_value() {
		let acc = BlendAccumulator::new(1.0);
		assert!(acc.is_empty());
		assert_eq!(acc.total_weight(), 0.0);
		assert_eq!(acc.value(), None);
	}

	#[test]
	fn test_single_contribution_is_exact() {
		for temperature in [0.01, 0.35, 1.0, 50.0] {
			for activation in [-1e6, -1.3, 0.0, 8.0, 1e6] {
				let mut acc = BlendAccumulator::new(temperature);
				acc.add(activation, 7.0, Some(0));
				assert_eq!(acc.value(), Some(7.0));
				assert_eq!(acc.probabilities().collect::<Vec<_>>(), vec![(0, 1.0)]);
			}
		}
	}

	#[test]
	fn test_weighted_average() {
		let temperature = 0.5;
		let mut acc = BlendAccumulator::new(temperature);
		acc.add(0.0, 2.0, Some(0));
		acc.add(1.0, 6.0, Some(1));
		acc.add(-1.0, 0.0, None);
		assert_eq!(acc.len(), 3);

		let w = [blend_weight(0.0, 0.5), blend_weight(1.0, 0.5), blend_weight(-1.0, 0.5)];
		let total: f64 = w.iter().sum();
		let expected = (2.0 * w[0] + 6.0 * w[1]) / total;
		assert!((acc.value().unwrap() - expected).abs() < 1e-12);

		let probabilities: Vec<_> = acc.probabilities().collect();
		assert_eq!(probabilities.len(), 2);
		assert_eq!(probabilities[0].0, 0);
		assert!((probabilities[0].1 - w[0] / total).abs() < 1e-12);
		assert!((probabilities[1].1 - w[1] / total).abs() < 1e-12);
	}

	#[test]
	fn test_extreme_activations_stay_finite() {
		// e^(±800) alone is outside f64
		let mut acc = BlendAccumulator::new(0.01);
		acc.add(8.0, 7.0, Some(0));
		acc.add(-8.0, 1.0, Some(1));
		assert_eq!(acc.value(), Some(7.0));
		assert_eq!(acc.total_weight(), 1.0);

		let mut acc = BlendAccumulator::new(0.01);
		acc.add(-8.0, 3.0, Some(0));
		acc.add(-8.0, 5.0, Some(1));
		assert_eq!(acc.value(), Some(4.0));
		assert_eq!(
			acc.probabilities().collect::<Vec<_>>(),
			vec![(0, 0.5), (1, 0.5)]
		);
	}

	#[test]
	fn test_infinite_activation_takes_everything() {
		let mut acc = BlendAccumulator::new(1.0);
		acc.add(f64::INFINITY, 2.0, None);
		acc.add(3.0, 10.0, None);
		assert_eq!(acc.value(), Some(2.0));
	}

	#[test]
	fn test_blend_weight() {
		assert!((blend_weight(0.0, 0.5) - 1.0).abs() < 1e-12);
		assert!((blend_weight(1.0, 0.5) - 2.0_f64.exp()).abs() < 1e-12);
	}
}
