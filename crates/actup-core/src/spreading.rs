//! Spreading Activation
//!
//! Chunks don't exist in isolation. The values in a cue spread activation
//! to every chunk that contains them, in any slot.
//!
//! `S_i = Σ_j W_j × S_ji × m_ij`
//!
//! Where:
//! - `m_ij` = whether cue value `j` occurs among chunk `i`'s values
//! - `W_j` = source weight of cue slot `j` (default `W / M`)
//! - `S_ji` = associative strength into chunk `i` (default `mas - ln(fan_i)`)
//! - `fan_i` = number of cue values chunk `i` contains, plus one
//!
//! Each of the three ingredients can be replaced by a strategy. A strategy
//! that fails falls back to the built-in computation for that call; a
//! strategy that succeeds with data of the wrong shape is a defect and is
//! reported as [`MemoryError::SpreadingInvariant`].

use ndarray::{Array1, Array2};
use std::fmt;
use tracing::warn;

use crate::chunk::Chunk;
use crate::error::{MemoryError, PluginError};
use crate::value::Attributes;

/// Builds the chunk × cue-slot matching matrix.
pub trait MatchingMatrix: Send + Sync {
	/// An `N × M` matrix for `N` chunks (in store order) and the `M` cue slots.
	///
	/// # Errors
	///
	/// Any error makes the caller use [`default_matching_matrix`].
	fn matching_matrix(
		&self,
		chunks: &[&Chunk],
		cue: &Attributes,
	) -> Result<Array2<bool>, PluginError>;
}

impl<F> MatchingMatrix for F
where
	F: Fn(&[&Chunk], &Attributes) -> Result<Array2<bool>, PluginError> + Send + Sync,
{
	fn matching_matrix(
		&self,
		chunks: &[&Chunk],
		cue: &Attributes,
	) -> Result<Array2<bool>, PluginError> {
		self(chunks, cue)
	}
}

/// Weights each cue slot as a source of activation.
pub trait SourceWeighting: Send + Sync {
	/// One weight per cue slot, given the total source activation `w`.
	///
	/// # Errors
	///
	/// Any error makes the caller use [`uniform_weights`].
	fn weights(&self, cue: &Attributes, w: f64) -> Result<Array1<f64>, PluginError>;
}

impl<F> SourceWeighting for F
where
	F: Fn(&Attributes, f64) -> Result<Array1<f64>, PluginError> + Send + Sync,
{
	fn weights(&self, cue: &Attributes, w: f64) -> Result<Array1<f64>, PluginError> {
		self(cue, w)
	}
}

/// Derives associative strengths from the matching matrix.
pub trait AssociativeStrength: Send + Sync {
	/// One strength per chunk (matrix row), given the maximum associative
	/// strength `mas`.
	///
	/// # Errors
	///
	/// Any error makes the caller use [`fan_sji`].
	fn sji(&self, matching: &Array2<bool>, mas: f64) -> Result<Array1<f64>, PluginError>;
}

impl<F> AssociativeStrength for F
where
	F: Fn(&Array2<bool>, f64) -> Result<Array1<f64>, PluginError> + Send + Sync,
{
	fn sji(&self, matching: &Array2<bool>, mas: f64) -> Result<Array1<f64>, PluginError> {
		self(matching, mas)
	}
}

/// Intermediate and final values of one spreading computation.
#[derive(Clone, Debug)]
pub struct SpreadingResult {
	/// Chunk × cue-slot matching matrix
	pub matching: Array2<bool>,
	/// Source weight per cue slot
	pub weights: Array1<f64>,
	/// Associative strength per chunk
	pub sji: Array1<f64>,
	/// Spreading activation per chunk
	pub activations: Array1<f64>,
}

/// `m_ij`: whether cue slot `j`'s value occurs anywhere in chunk `i`.
#[must_use]
pub fn default_matching_matrix(chunks: &[&Chunk], cue: &Attributes) -> Array2<bool> {
	let values: Vec<_> = cue.iter().map(|(_, value)| value).collect();
	Array2::from_shape_fn((chunks.len(), values.len()), |(i, j)| {
		chunks[i].attributes().contains_value(values[j])
	})
}

/// `W_j = W / M` for each of the `M` cue slots.
#[must_use]
pub fn uniform_weights(slots: usize, w: f64) -> Array1<f64> {
	#[allow(clippy::cast_precision_loss)]
	let share = w / slots as f64;
	Array1::from_elem(slots, share)
}

/// `S_ji = mas - ln(fan_i)` with `fan_i` = row sum + 1.
#[must_use]
pub fn fan_sji(matching: &Array2<bool>, mas: f64) -> Array1<f64> {
	matching.map_axis(ndarray::Axis(1), |row| {
		#[allow(clippy::cast_precision_loss)]
		let fan = row.iter().filter(|&&hit| hit).count() as f64 + 1.0;
		mas - fan.ln()
	})
}

/// Installed replacements for the built-in spreading computations.
#[derive(Default)]
pub struct SpreadingStrategies {
	matching: Option<Box<dyn MatchingMatrix>>,
	weighting: Option<Box<dyn SourceWeighting>>,
	sji: Option<Box<dyn AssociativeStrength>>,
}

impl SpreadingStrategies {
	/// Replace (or, with `None`, restore) the matching-matrix computation.
	pub fn set_matching(&mut self, strategy: Option<Box<dyn MatchingMatrix>>) {
		self.matching = strategy;
	}

	/// Replace (or, with `None`, restore) the source weighting.
	pub fn set_weighting(&mut self, strategy: Option<Box<dyn SourceWeighting>>) {
		self.weighting = strategy;
	}

	/// Replace (or, with `None`, restore) the associative strength computation.
	pub fn set_sji(&mut self, strategy: Option<Box<dyn AssociativeStrength>>) {
		self.sji = strategy;
	}

	/// Compute the spreading activation each chunk receives from `cue`.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::SpreadingInvariant`] if a strategy produced a
	/// matrix or vector whose shape doesn't match the chunks and cue.
	pub fn compute(
		&self,
		chunks: &[&Chunk],
		cue: &Attributes,
		w: f64,
		mas: f64,
	) -> Result<SpreadingResult, MemoryError> {
		let (n, m) = (chunks.len(), cue.len());

		let matching = match self.matching.as_ref().map(|s| s.matching_matrix(chunks, cue)) {
			Some(Ok(matrix)) => matrix,
			Some(Err(e)) => {
				warn!(error = %e, "Matching matrix strategy failed, using default");
				default_matching_matrix(chunks, cue)
			}
			None => default_matching_matrix(chunks, cue),
		};
		check_len("matching matrix rows", n, matching.nrows())?;
		check_len("matching matrix columns", m, matching.ncols())?;

		let weights = match self.weighting.as_ref().map(|s| s.weights(cue, w)) {
			Some(Ok(weights)) => weights,
			Some(Err(e)) => {
				warn!(error = %e, "Source weighting strategy failed, using default");
				uniform_weights(m, w)
			}
			None => uniform_weights(m, w),
		};
		check_len("source weights", m, weights.len())?;

		let sji = match self.sji.as_ref().map(|s| s.sji(&matching, mas)) {
			Some(Ok(sji)) => sji,
			Some(Err(e)) => {
				warn!(error = %e, "Sji strategy failed, using default");
				fan_sji(&matching, mas)
			}
			None => fan_sji(&matching, mas),
		};
		check_len("sji vector", n, sji.len())?;

		let activations = Array1::from_shape_fn(n, |i| {
			let received: f64 = matching
				.row(i)
				.iter()
				.zip(weights.iter())
				.filter(|&(&hit, _)| hit)
				.map(|(_, &weight)| weight)
				.sum();
			received * sji[i]
		});

		Ok(SpreadingResult {
			matching,
			weights,
			sji,
			activations,
		})
	}
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), MemoryError> {
	if expected == actual {
		Ok(())
	} else {
		Err(MemoryError::SpreadingInvariant {
			what,
			expected,
			actual,
		})
	}
}

impl fmt::Debug for SpreadingStrategies {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SpreadingStrategies")
			.field("custom_matching", &self.matching.is_some())
			.field("custom_weighting", &self.weighting.is_some())
			.field("custom_sji", &self.sji.is_some())
			.finish()
	}
}
