//! # ACT-Up Core
//!
//! Declarative memory in the style of ACT-R: chunks of attribute/value
//! pairs that are learned at points in time, decay, and compete to be
//! remembered.
//!
//! ## Core Concepts
//!
//! ### Activation
//!
//! Every chunk has an activation that decides whether, and how strongly, it
//! is remembered. Activation comes from:
//!
//! 1. **Base-level activation** - Recency and frequency of learning
//!    ```text
//!    B = ln[Σ(t - t_k)^(-d)]
//!    ```
//!
//! 2. **Spreading activation** - From values currently in focus
//!    ```text
//!    S_i = Σ_j W_j × S_ji
//!    ```
//!
//! 3. **Importance** - A per-chunk salience term, set when learning
//!
//! 4. **Noise** - A fresh logistic sample on every computation
//!
//! With partial matching enabled, chunks that differ from a cue are still
//! candidates, penalized in proportion to how dissimilar they are.
//!
//! ### Retrieval and Blending
//!
//! *Retrieval* returns the single most active chunk matching a cue, if it
//! reaches the retrieval threshold. *Blending* instead averages a numeric
//! slot over every matching chunk, weighting each by `e^(A/t)`.
//!
//! ## Example
//!
//! ```rust
//! use actup_core::{attrs, Memory, MemoryConfig};
//!
//! let mut memory = Memory::new(MemoryConfig {
//!     noise: 0.0,
//!     temperature: Some(0.35),
//!     ..Default::default()
//! })?;
//!
//! // Two outcomes of choosing "A", one of choosing "B"
//! memory.learn(attrs! { "choice" => "A", "payoff" => 10 })?;
//! memory.advance(1.0)?;
//! memory.learn(attrs! { "choice" => "B", "payoff" => 4 })?;
//! memory.advance(1.0)?;
//! memory.learn(attrs! { "choice" => "A", "payoff" => 0 })?;
//! memory.advance(1.0)?;
//!
//! // The recent 0 weighs more than the older 10
//! let expected_a = memory.blend("payoff", attrs! { "choice" => "A" })?.unwrap_or(0.0);
//! assert!(expected_a > 0.0 && expected_a < 5.0);
//!
//! let b = memory.retrieve(attrs! { "choice" => "B" })?;
//! assert!(b.is_some());
//! # Ok::<(), actup_core::MemoryError>(())
//! ```
//!
//! ## References
//!
//! - Anderson, J. R. (2007). *How Can the Human Mind Occur in the Physical
//!   Universe?* - ACT-R theory
//! - Lebiere, C. (1999). *The dynamics of cognition: An ACT-R model of
//!   cognitive arithmetic* - Blending
//! - Gonzalez, C., Lerch, J. F., & Lebiere, C. (2003). *Instance-based
//!   learning in dynamic decision making*

#![warn(missing_docs)]

pub mod activation;
pub mod blending;
pub mod cache;
pub mod chunk;
pub mod config;
pub mod error;
pub mod history;
pub mod matching;
pub mod memory;
pub mod spreading;
pub mod value;

pub use activation::{
	combine_activations, compute_base_level, ActivationBreakdown, DefaultImportance, NoiseSource,
};
pub use blending::{blend_weight, BlendAccumulator};
pub use chunk::{Chunk, ChunkId, References};
pub use config::{
	effective_temperature, MemoryConfig, DEFAULT_DECAY, DEFAULT_MAS, DEFAULT_NOISE,
	DEFAULT_THRESHOLD, DEFAULT_W, MINIMUM_TEMPERATURE,
};
pub use error::{MemoryError, PluginError, Result};
pub use history::{ActivationRecord, ReferenceRecord};
pub use matching::{Similarity, SimilarityMode};
pub use memory::Memory;
pub use spreading::{AssociativeStrength, MatchingMatrix, SourceWeighting, SpreadingResult};
pub use value::{Attributes, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
