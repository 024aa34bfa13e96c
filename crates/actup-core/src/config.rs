//! Memory Configuration
//!
//! Initial parameter values for a [`Memory`](crate::Memory). Every field has
//! the conventional ACT-R default, so configs are usually written as
//!
//! ```rust
//! use actup_core::MemoryConfig;
//!
//! let config = MemoryConfig {
//!     noise: 0.0,
//!     temperature: Some(1.0),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::activation::DefaultImportance;
use crate::error::{MemoryError, Result};

/// Default activation noise `s`.
pub const DEFAULT_NOISE: f64 = 0.25;
/// Default decay `d`.
pub const DEFAULT_DECAY: f64 = 0.5;
/// Default retrieval threshold `τ`.
pub const DEFAULT_THRESHOLD: f64 = -10.0;
/// Smallest allowed blending temperature.
pub const MINIMUM_TEMPERATURE: f64 = 0.01;
/// Default total source activation `W`.
pub const DEFAULT_W: f64 = 1.0;
/// Default maximum associative strength.
pub const DEFAULT_MAS: f64 = 1.6;

/// Initial parameters of a memory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
	/// `s` - logistic noise scale; zero disables noise
	pub noise: f64,
	/// `d` - base-level decay; must be below 1 with optimized learning
	pub decay: f64,
	/// Blending temperature; `None` derives `√2 × noise`
	pub temperature: Option<f64>,
	/// `τ` - minimum activation for a retrieval; `None` for no minimum
	pub threshold: Option<f64>,
	/// Mismatch penalty; `None` disables partial matching
	pub mismatch: Option<f64>,
	/// Keep reference counts instead of reference times
	pub optimized_learning: bool,
	/// `W` - total source activation of a spreading cue
	pub w: f64,
	/// Maximum associative strength
	pub mas: f64,
	/// Importance given to chunks learned without an explicit one
	pub default_importance: DefaultImportance,
	/// Seed for noise and sampled importance; `None` seeds from the OS
	pub seed: Option<u64>,
}

impl Default for MemoryConfig {
	fn default() -> Self {
		Self {
			noise: DEFAULT_NOISE,
			decay: DEFAULT_DECAY,
			temperature: None,
			threshold: Some(DEFAULT_THRESHOLD),
			mismatch: None,
			optimized_learning: false,
			w: DEFAULT_W,
			mas: DEFAULT_MAS,
			default_importance: DefaultImportance::Zero,
			seed: None,
		}
	}
}

impl MemoryConfig {
	/// Check every parameter.
	///
	/// # Errors
	///
	/// Returns the first configuration error found: a negative or NaN
	/// parameter, a decay of 1 or more with optimized learning, or a
	/// temperature (explicit or derived) under [`MINIMUM_TEMPERATURE`].
	pub fn validate(&self) -> Result<()> {
		let _ = non_negative("noise", self.noise)?;
		let _ = non_negative("decay", self.decay)?;
		if self.optimized_learning && self.decay >= 1.0 {
			return Err(MemoryError::DecayTooLargeForOptimizedLearning { decay: self.decay });
		}
		let _ = temperature_for(self.temperature, self.noise)?;
		if let Some(threshold) = self.threshold {
			let _ = real("threshold", threshold)?;
		}
		if let Some(mismatch) = self.mismatch {
			let _ = non_negative("mismatch penalty", mismatch)?;
		}
		let _ = non_negative("W", self.w)?;
		let _ = non_negative("maximum associative strength", self.mas)?;
		Ok(())
	}
}

/// Reject NaN.
pub(crate) fn real(name: &'static str, value: f64) -> Result<f64> {
	if value.is_nan() {
		Err(MemoryError::InvalidParameter { name, value })
	} else {
		Ok(value)
	}
}

/// Reject NaN and negative values.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
	if real(name, value)? < 0.0 {
		Err(MemoryError::NegativeParameter { name, value })
	} else {
		Ok(value)
	}
}

/// Effective temperature: the explicit one, or `√2 × noise`.
///
/// Returns `None` when it would be under [`MINIMUM_TEMPERATURE`].
#[must_use]
pub fn effective_temperature(temperature: Option<f64>, noise: f64) -> Option<f64> {
	let t = temperature.unwrap_or(std::f64::consts::SQRT_2 * noise);
	(t >= MINIMUM_TEMPERATURE).then_some(t)
}

/// Like [`effective_temperature`], as a configuration error.
pub(crate) fn temperature_for(temperature: Option<f64>, noise: f64) -> Result<f64> {
	if let Some(t) = temperature {
		let _ = real("temperature", t)?;
	}
	effective_temperature(temperature, noise).ok_or_else(|| MemoryError::TemperatureTooLow {
		value: temperature.unwrap_or(std::f64::consts::SQRT_2 * noise),
		minimum: MINIMUM_TEMPERATURE,
	})
}
