//! Declarative Memory
//!
//! A [`Memory`] owns a store of chunks, a clock, and the parameters that
//! turn a chunk's history into an activation. Everything else in the crate
//! is a piece of that computation; this module puts the pieces in order.
//!
//! ```rust
//! use actup_core::{attrs, Memory, MemoryConfig};
//!
//! let mut memory = Memory::new(MemoryConfig {
//!     noise: 0.0,
//!     temperature: Some(1.0),
//!     ..Default::default()
//! })?;
//!
//! memory.learn(attrs! { "color" => "red", "size" => 4 })?;
//! memory.advance(1.0)?;
//!
//! let chunk = memory.retrieve(attrs! { "color" => "red" })?.expect("retrievable");
//! assert_eq!(chunk.get("size"), Some(&4.into()));
//! assert_eq!(memory.blend("size", attrs! { "color" => "red" })?, Some(4.0));
//! # Ok::<(), actup_core::MemoryError>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::activation::{
	combine_activations, memoized_base_level, DefaultImportance, NoiseSource,
};
use crate::blending::BlendAccumulator;
use crate::cache::TranscendentalCache;
use crate::chunk::{Chunk, ChunkId};
use crate::config::{
	effective_temperature, non_negative, real, temperature_for, MemoryConfig,
};
use crate::error::{MemoryError, Result};
use crate::history::ActivationRecord;
use crate::matching::{mismatch_penalty, qualifies, Similarity, SimilarityMode, SimilarityRegistry};
use crate::spreading::{AssociativeStrength, MatchingMatrix, SourceWeighting, SpreadingStrategies};
use crate::value::{Attributes, Value};

/// A store of chunks with ACT-R retrieval and blending.
pub struct Memory {
	time: f64,
	noise: f64,
	temperature: Option<f64>,
	effective_temperature: f64,
	threshold: Option<f64>,
	mismatch: Option<f64>,
	optimized_learning: bool,
	w: f64,
	mas: f64,
	default_importance: DefaultImportance,

	/// Signature → chunk
	index: HashMap<Attributes, ChunkId>,
	/// Chunks in creation order
	chunks: BTreeMap<ChunkId, Chunk>,
	next_id: u64,

	/// Holds the decay
	cache: TranscendentalCache,
	rng: NoiseSource,
	similarity: SimilarityRegistry,
	spreading: SpreadingStrategies,
	history: Option<Vec<ActivationRecord>>,
}

/// Borrowed state needed to compute one chunk's activation while the chunk
/// store itself is being iterated.
struct Activator<'a> {
	time: f64,
	noise: f64,
	mismatch: Option<f64>,
	cache: &'a mut TranscendentalCache,
	rng: &'a mut NoiseSource,
	similarity: &'a SimilarityRegistry,
	history: Option<&'a mut Vec<ActivationRecord>>,
}

impl Activator<'_> {
	/// Activation of `chunk`, with the mismatch penalty against `cue` when
	/// partial matching is on. Also returns the index of the history record
	/// written, if any.
	fn activate(&mut self, chunk: &mut Chunk, cue: &Attributes) -> Result<(f64, Option<usize>)> {
		let base = memoized_base_level(chunk, self.time, self.cache)?;
		let noise = self.rng.logistic(self.noise);
		let breakdown =
			combine_activations(base, chunk.spreading_activation(), chunk.importance(), noise);
		let mismatch = self
			.mismatch
			.map(|penalty| mismatch_penalty(self.similarity, penalty, chunk.attributes(), cue));

		let record = self.history.as_deref_mut().map(|history| {
			history.push(ActivationRecord::new(chunk, &breakdown, mismatch));
			history.len() - 1
		});
		Ok((breakdown.total + mismatch.unwrap_or(0.0), record))
	}
}

impl Memory {
	/// Create an empty memory at time zero.
	///
	/// # Errors
	///
	/// Returns a configuration error if any parameter is invalid, including
	/// a derived temperature (`√2 × noise`) under the minimum.
	pub fn new(config: MemoryConfig) -> Result<Self> {
		config.validate()?;
		let effective = temperature_for(config.temperature, config.noise)?;
		Ok(Self::build(&config, effective))
	}

	fn build(config: &MemoryConfig, effective_temperature: f64) -> Self {
		Self {
			time: 0.0,
			noise: config.noise,
			temperature: config.temperature,
			effective_temperature,
			threshold: config.threshold,
			mismatch: config.mismatch,
			optimized_learning: config.optimized_learning,
			w: config.w,
			mas: config.mas,
			default_importance: config.default_importance,
			index: HashMap::new(),
			chunks: BTreeMap::new(),
			next_id: 0,
			cache: TranscendentalCache::new(config.decay),
			rng: NoiseSource::new(config.seed),
			similarity: SimilarityRegistry::default(),
			spreading: SpreadingStrategies::default(),
			history: None,
		}
	}

	fn activator(
		&mut self,
		mismatch: Option<f64>,
	) -> (Activator<'_>, &mut BTreeMap<ChunkId, Chunk>) {
		(
			Activator {
				time: self.time,
				noise: self.noise,
				mismatch,
				cache: &mut self.cache,
				rng: &mut self.rng,
				similarity: &self.similarity,
				history: self.history.as_mut(),
			},
			&mut self.chunks,
		)
	}

	// ========================================================================
	// Clock
	// ========================================================================

	/// Current time.
	#[must_use]
	pub const fn time(&self) -> f64 {
		self.time
	}

	/// Move the clock forward by `amount` and return the new time.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::NegativeTimeAdvance`] for a negative amount and
	/// [`MemoryError::InvalidParameter`] for a non-finite one.
	pub fn advance(&mut self, amount: f64) -> Result<f64> {
		if !amount.is_finite() {
			return Err(MemoryError::InvalidParameter {
				name: "time advance",
				value: amount,
			});
		}
		if amount < 0.0 {
			return Err(MemoryError::NegativeTimeAdvance { amount });
		}
		self.time += amount;
		Ok(self.time)
	}

	/// Forget every chunk and set the clock back to zero.
	///
	/// Parameters, strategies and history are kept. `optimized_learning`, when
	/// given, switches how newly learned chunks keep their references.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::DecayTooLargeForOptimizedLearning`] when turning
	/// optimized learning on with a decay of 1 or more.
	pub fn reset(&mut self, optimized_learning: Option<bool>) -> Result<()> {
		let optimized = optimized_learning.unwrap_or(self.optimized_learning);
		if optimized && self.decay() >= 1.0 {
			return Err(MemoryError::DecayTooLargeForOptimizedLearning {
				decay: self.decay(),
			});
		}
		let removed = self.chunks.len();
		self.chunks.clear();
		self.index.clear();
		self.time = 0.0;
		self.optimized_learning = optimized;
		debug!(removed, optimized_learning = optimized, "Reset memory");
		Ok(())
	}

	// ========================================================================
	// Parameters
	// ========================================================================

	/// Activation noise scale.
	#[must_use]
	pub const fn noise(&self) -> f64 {
		self.noise
	}

	/// Set the activation noise.
	///
	/// Without an explicit temperature, a noise too small to derive one from
	/// pins the temperature to 1.
	///
	/// # Errors
	///
	/// Rejects negative or NaN values.
	pub fn set_noise(&mut self, noise: f64) -> Result<()> {
		let noise = non_negative("noise", noise)?;
		if self.temperature.is_none() {
			if let Some(t) = effective_temperature(None, noise) {
				self.effective_temperature = t;
			} else {
				warn!(noise, "Noise too low to derive a temperature, setting temperature to 1.0");
				self.temperature = Some(1.0);
				self.effective_temperature = 1.0;
			}
		}
		self.noise = noise;
		Ok(())
	}

	/// Base-level decay.
	#[must_use]
	pub const fn decay(&self) -> f64 {
		self.cache.decay()
	}

	/// Set the decay. Cached powers and every chunk's base-level memo are
	/// discarded.
	///
	/// # Errors
	///
	/// Rejects negative or NaN values, and values of 1 or more while
	/// optimized learning is on.
	pub fn set_decay(&mut self, decay: f64) -> Result<()> {
		let decay = non_negative("decay", decay)?;
		if self.optimized_learning && decay >= 1.0 {
			return Err(MemoryError::DecayTooLargeForOptimizedLearning { decay });
		}
		self.cache.reset(decay);
		for chunk in self.chunks.values_mut() {
			chunk.invalidate_base();
		}
		Ok(())
	}

	/// Explicit blending temperature, `None` when derived from the noise.
	#[must_use]
	pub const fn temperature(&self) -> Option<f64> {
		self.temperature
	}

	/// Temperature blends actually use.
	#[must_use]
	pub const fn effective_temperature(&self) -> f64 {
		self.effective_temperature
	}

	/// Set the blending temperature, or derive it from the noise with `None`.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::TemperatureTooLow`] if the resulting temperature
	/// is under [`MINIMUM_TEMPERATURE`](crate::config::MINIMUM_TEMPERATURE).
	pub fn set_temperature(&mut self, temperature: Option<f64>) -> Result<()> {
		self.effective_temperature = temperature_for(temperature, self.noise)?;
		self.temperature = temperature;
		Ok(())
	}

	/// Retrieval threshold.
	#[must_use]
	pub const fn threshold(&self) -> Option<f64> {
		self.threshold
	}

	/// Set the retrieval threshold; `None` removes it.
	///
	/// # Errors
	///
	/// Rejects NaN.
	pub fn set_threshold(&mut self, threshold: Option<f64>) -> Result<()> {
		self.threshold = threshold.map(|t| real("threshold", t)).transpose()?;
		Ok(())
	}

	/// Mismatch penalty; `None` when partial matching is off.
	#[must_use]
	pub const fn mismatch(&self) -> Option<f64> {
		self.mismatch
	}

	/// Set the mismatch penalty; `None` turns partial matching off.
	///
	/// # Errors
	///
	/// Rejects negative or NaN values.
	pub fn set_mismatch(&mut self, mismatch: Option<f64>) -> Result<()> {
		self.mismatch = mismatch
			.map(|p| non_negative("mismatch penalty", p))
			.transpose()?;
		Ok(())
	}

	/// Whether new chunks keep a reference count instead of times.
	#[must_use]
	pub const fn optimized_learning(&self) -> bool {
		self.optimized_learning
	}

	/// Total source activation of a spreading cue.
	#[must_use]
	pub const fn w(&self) -> f64 {
		self.w
	}

	/// Set the total source activation.
	///
	/// # Errors
	///
	/// Rejects negative or NaN values.
	pub fn set_w(&mut self, w: f64) -> Result<()> {
		self.w = non_negative("W", w)?;
		Ok(())
	}

	/// Maximum associative strength.
	#[must_use]
	pub const fn mas(&self) -> f64 {
		self.mas
	}

	/// Set the maximum associative strength.
	///
	/// # Errors
	///
	/// Rejects negative or NaN values.
	pub fn set_mas(&mut self, mas: f64) -> Result<()> {
		self.mas = non_negative("maximum associative strength", mas)?;
		Ok(())
	}

	/// Importance given when `learn` is called without one.
	#[must_use]
	pub const fn default_importance(&self) -> DefaultImportance {
		self.default_importance
	}

	/// Change the importance given when `learn` is called without one.
	pub fn set_default_importance(&mut self, default: DefaultImportance) {
		self.default_importance = default;
	}

	// ========================================================================
	// Strategies
	// ========================================================================

	/// Use `function` for the similarity of values in each of `attributes`.
	pub fn set_similarity_function<S>(&mut self, function: S, attributes: &[&str])
	where
		S: Similarity + 'static,
	{
		self.similarity.register(Arc::new(function), attributes);
	}

	/// Remove the similarity function of an attribute. Returns whether one was set.
	pub fn clear_similarity_function(&mut self, attribute: &str) -> bool {
		self.similarity.unregister(attribute)
	}

	/// Range similarity functions are expected to return.
	#[must_use]
	pub const fn similarity_mode(&self) -> SimilarityMode {
		self.similarity.mode()
	}

	/// Switch the range similarity functions are expected to return.
	pub fn set_similarity_mode(&mut self, mode: SimilarityMode) {
		self.similarity.set_mode(mode);
	}

	/// Replace the chunk × cue matching matrix used by [`spread`](Self::spread).
	pub fn set_matching_matrix<S>(&mut self, strategy: S)
	where
		S: MatchingMatrix + 'static,
	{
		self.spreading.set_matching(Some(Box::new(strategy)));
	}

	/// Replace the per-slot source weighting used by [`spread`](Self::spread).
	pub fn set_source_weighting<S>(&mut self, strategy: S)
	where
		S: SourceWeighting + 'static,
	{
		self.spreading.set_weighting(Some(Box::new(strategy)));
	}

	/// Replace the associative strength computation used by [`spread`](Self::spread).
	pub fn set_associative_strength<S>(&mut self, strategy: S)
	where
		S: AssociativeStrength + 'static,
	{
		self.spreading.set_sji(Some(Box::new(strategy)));
	}

	/// Go back to the built-in spreading computations.
	pub fn use_default_spreading(&mut self) {
		self.spreading = SpreadingStrategies::default();
	}

	// ========================================================================
	// Chunk Store
	// ========================================================================

	/// Number of chunks.
	#[must_use]
	pub fn len(&self) -> usize {
		self.chunks.len()
	}

	/// Whether no chunks are stored.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}

	/// All chunks, in creation order.
	pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
		self.chunks.values()
	}

	/// The chunk with exactly these attributes, if any.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::DuplicateAttribute`] if a name is repeated.
	pub fn chunk<I, K>(&self, attributes: I) -> Result<Option<&Chunk>>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let attributes = Attributes::new(attributes)?;
		Ok(self
			.index
			.get(&attributes)
			.and_then(|id| self.chunks.get(id)))
	}

	/// Learn a chunk at the current time with the default importance.
	///
	/// Returns `true` if a new chunk was created, `false` if an existing one
	/// was reinforced.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::NoAttributes`] or
	/// [`MemoryError::DuplicateAttribute`] for a malformed chunk.
	pub fn learn<I, K>(&mut self, attributes: I) -> Result<bool>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		self.learn_inner(attributes, None)
	}

	/// Learn a chunk at the current time, replacing its importance.
	///
	/// # Errors
	///
	/// As [`learn`](Self::learn), plus [`MemoryError::InvalidParameter`] for
	/// a NaN importance.
	pub fn learn_with_importance<I, K>(&mut self, attributes: I, importance: f64) -> Result<bool>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let importance = real("importance", importance)?;
		self.learn_inner(attributes, Some(importance))
	}

	fn learn_inner<I, K>(&mut self, attributes: I, importance: Option<f64>) -> Result<bool>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let attributes = signature(attributes, "learn")?;
		let importance = self.rng.importance(importance, self.default_importance);

		let (id, created) = match self.index.get(&attributes) {
			Some(&id) => (id, false),
			None => {
				let id = ChunkId(self.next_id);
				self.next_id += 1;
				let chunk = Chunk::new(id, attributes.clone(), self.time, self.optimized_learning);
				debug!(chunk = %chunk, time = self.time, "Created chunk");
				let _ = self.index.insert(attributes, id);
				let _ = self.chunks.insert(id, chunk);
				(id, true)
			}
		};

		if let Some(chunk) = self.chunks.get_mut(&id) {
			chunk.reinforce(self.time);
			chunk.set_importance(importance);
		}
		Ok(created)
	}

	/// Undo one `learn` of a chunk made at time `when`.
	///
	/// Under optimized learning `when` is ignored and the reference count is
	/// decremented. A chunk left without references is removed. Returns
	/// `false`, changing nothing, if there is no such chunk or reference.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::NoAttributes`] or
	/// [`MemoryError::DuplicateAttribute`] for a malformed chunk.
	pub fn forget<I, K>(&mut self, attributes: I, when: f64) -> Result<bool>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let attributes = signature(attributes, "forget")?;
		let Some(&id) = self.index.get(&attributes) else {
			return Ok(false);
		};
		let Some(chunk) = self.chunks.get_mut(&id) else {
			return Ok(false);
		};
		if !chunk.unreinforce(when) {
			return Ok(false);
		}
		if chunk.references().is_empty() {
			let _ = self.chunks.remove(&id);
			let _ = self.index.remove(&attributes);
			debug!(chunk = %id, "Removed chunk with no references left");
		}
		Ok(true)
	}

	// ========================================================================
	// Retrieval
	// ========================================================================

	/// The most active chunk whose slots equal every slot of `cue`, if its
	/// activation reaches the threshold.
	///
	/// Ties go to the chunk created first.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::ActivationBeforeCreation`] if a matching chunk
	/// was learned at the current time, and
	/// [`MemoryError::DuplicateAttribute`] for a malformed cue.
	pub fn retrieve<I, K>(&mut self, cue: I) -> Result<Option<&Chunk>>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let cue = Attributes::new(cue)?;
		let best = self.most_active(&cue, None)?;
		Ok(best.and_then(|id| self.chunks.get(&id)))
	}

	/// Like [`retrieve`](Self::retrieve), but chunks with differing values
	/// still compete, penalized by the mismatch penalty times their summed
	/// similarity. With partial matching off this is exact retrieval.
	///
	/// # Errors
	///
	/// As [`retrieve`](Self::retrieve).
	pub fn retrieve_partial<I, K>(&mut self, cue: I) -> Result<Option<&Chunk>>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let cue = Attributes::new(cue)?;
		let best = self.most_active(&cue, self.mismatch)?;
		Ok(best.and_then(|id| self.chunks.get(&id)))
	}

	fn most_active(&mut self, cue: &Attributes, mismatch: Option<f64>) -> Result<Option<ChunkId>> {
		let threshold = self.threshold;
		let (mut activator, chunks) = self.activator(mismatch);

		let mut best: Option<(ChunkId, f64)> = None;
		for chunk in chunks.values_mut() {
			if !qualifies(chunk.attributes(), cue, mismatch) {
				continue;
			}
			let (activation, _) = activator.activate(chunk, cue)?;
			if threshold.is_some_and(|t| activation < t) {
				continue;
			}
			if best.map_or(true, |(_, a)| activation > a) {
				best = Some((chunk.id(), activation));
			}
		}
		Ok(best.map(|(id, _)| id))
	}

	/// Blend the `outcome` slot over every chunk matching `cue`.
	///
	/// Chunks qualify as in [`retrieve_partial`](Self::retrieve_partial) and
	/// must have an `outcome` slot. Returns `None` only when no chunk
	/// qualifies; a single qualifying chunk blends to its own outcome at any
	/// temperature.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::NonNumericOutcome`] if a qualifying chunk's
	/// outcome is not a number, and temporal errors as
	/// [`retrieve`](Self::retrieve).
	#[instrument(level = "debug", skip(self, cue))]
	pub fn blend<I, K>(&mut self, outcome: &str, cue: I) -> Result<Option<f64>>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let cue = Attributes::new(cue)?;
		let temperature = self.effective_temperature;
		let mismatch = self.mismatch;

		let mut blend = BlendAccumulator::new(temperature);
		{
			let (mut activator, chunks) = self.activator(mismatch);
			for chunk in chunks.values_mut() {
				if !qualifies(chunk.attributes(), &cue, mismatch) {
					continue;
				}
				let Some(value) = chunk.get(outcome) else {
					continue;
				};
				let value = value.as_f64().ok_or_else(|| MemoryError::NonNumericOutcome {
					chunk: chunk.name(),
					attribute: outcome.to_owned(),
				})?;
				let (activation, record) = activator.activate(chunk, &cue)?;
				blend.add(activation, value, record);
			}
		}

		if let Some(history) = self.history.as_mut() {
			for (index, probability) in blend.probabilities() {
				if let Some(record) = history.get_mut(index) {
					record.retrieval_probability = Some(probability);
				}
			}
		}

		let value = blend.value();
		debug!(contributors = blend.len(), ?value, "Blended");
		Ok(value)
	}

	// ========================================================================
	// Spreading Activation
	// ========================================================================

	/// Spread activation from the values of `cue` to every chunk containing
	/// them, adding to what earlier calls spread unless `auto_clear` is set.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::NoAttributes`] for an empty cue and
	/// [`MemoryError::SpreadingInvariant`] if an installed strategy returned
	/// data of the wrong shape. Nothing is changed on error.
	#[instrument(level = "debug", skip(self, cue))]
	pub fn spread<I, K>(&mut self, cue: I, auto_clear: bool) -> Result<()>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let cue = signature(cue, "spread")?;
		let result = {
			let chunks: Vec<&Chunk> = self.chunks.values().collect();
			self.spreading.compute(&chunks, &cue, self.w, self.mas)?
		};

		if auto_clear {
			self.clear_spread();
		}
		for (chunk, &amount) in self.chunks.values_mut().zip(result.activations.iter()) {
			chunk.add_spreading(amount);
		}

		debug!(
			chunks = self.chunks.len(),
			sources = cue.len(),
			reached = result.activations.iter().filter(|&&a| a != 0.0).count(),
			"Spread activation"
		);
		Ok(())
	}

	/// Remove all spreading activation.
	pub fn clear_spread(&mut self) {
		for chunk in self.chunks.values_mut() {
			chunk.clear_spreading();
		}
	}

	// ========================================================================
	// Activation History
	// ========================================================================

	/// Start recording activation computations. Keeps any existing records.
	///
	/// Every activation computed by a retrieval or blend is recorded, one
	/// record per candidate chunk. A blend computes no activation for a
	/// chunk that matches the cue but lacks the outcome slot, so such chunks
	/// leave no record.
	pub fn enable_activation_history(&mut self) {
		if self.history.is_none() {
			self.history = Some(Vec::new());
		}
	}

	/// Stop recording and drop the records.
	pub fn disable_activation_history(&mut self) {
		self.history = None;
	}

	/// Records so far, `None` when not recording.
	#[must_use]
	pub fn activation_history(&self) -> Option<&[ActivationRecord]> {
		self.history.as_deref()
	}

	/// Remove and return the records so far, recording on.
	pub fn take_activation_history(&mut self) -> Vec<ActivationRecord> {
		self.history.as_mut().map(std::mem::take).unwrap_or_default()
	}
}

impl Default for Memory {
	fn default() -> Self {
		let config = MemoryConfig::default();
		let effective = effective_temperature(config.temperature, config.noise)
			.unwrap_or(crate::config::MINIMUM_TEMPERATURE);
		Self::build(&config, effective)
	}
}

impl fmt::Debug for Memory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memory")
			.field("time", &self.time)
			.field("chunks", &self.chunks.len())
			.field("noise", &self.noise)
			.field("decay", &self.decay())
			.field("temperature", &self.temperature)
			.field("threshold", &self.threshold)
			.field("mismatch", &self.mismatch)
			.field("optimized_learning", &self.optimized_learning)
			.field("w", &self.w)
			.field("mas", &self.mas)
			.field("similarity", &self.similarity)
			.field("spreading", &self.spreading)
			.field("history", &self.history.as_ref().map(Vec::len))
			.finish_non_exhaustive()
	}
}

/// Canonical attributes for an operation that needs at least one.
fn signature<I, K>(attributes: I, operation: &'static str) -> Result<Attributes>
where
	I: IntoIterator<Item = (K, Value)>,
	K: Into<String>,
{
	let attributes = Attributes::new(attributes)?;
	if attributes.is_empty() {
		return Err(MemoryError::NoAttributes { operation });
	}
	Ok(attributes)
}
