//! Spreading Activation Example
//!
//! Values in focus spread activation to every chunk that contains them.
//! Here three facts are equally recent, so a bare retrieval returns the
//! first one learned; spreading from the current context tips the balance
//! toward the fact that shares it.
//!
//! Run with: `cargo run --example spreading_activation`

use actup_core::{attrs, Memory, MemoryConfig, MemoryError};

fn main() -> Result<(), MemoryError> {
	println!("=== Spreading Activation ===\n");

	let mut memory = Memory::new(MemoryConfig {
		noise: 0.0,
		temperature: Some(1.0),
		..Default::default()
	})?;

	// Three facts about drinks, learned together
	let _ = memory.learn(attrs! { "drink" => "tea", "place" => "kitchen", "time" => "evening" })?;
	let _ = memory.learn(attrs! { "drink" => "coffee", "place" => "cafe", "time" => "morning" })?;
	let _ = memory.learn(attrs! { "drink" => "juice", "place" => "kitchen", "time" => "morning" })?;
	let _ = memory.advance(2.0)?;

	let bare = memory.retrieve(attrs! { "place" => "kitchen" })?;
	println!("Without context:     {:?}", bare.and_then(|c| c.get("drink")).map(ToString::to_string));

	// Context: it's morning. Both "coffee" and "juice" contain "morning"
	memory.spread(attrs! { "now" => "morning" }, true)?;
	for chunk in memory.chunks() {
		println!(
			"  {} {}: spreading {:.3}",
			chunk.name(),
			chunk.attributes(),
			chunk.spreading_activation().unwrap_or(0.0)
		);
	}

	let primed = memory.retrieve(attrs! { "place" => "kitchen" })?;
	println!("With morning context: {:?}", primed.and_then(|c| c.get("drink")).map(ToString::to_string));

	// Spreading accumulates until cleared
	memory.spread(attrs! { "now" => "evening" }, false)?;
	memory.spread(attrs! { "now" => "evening" }, false)?;
	let evening = memory.retrieve(attrs! { "place" => "kitchen" })?;
	println!("After two evening cues: {:?}", evening.and_then(|c| c.get("drink")).map(ToString::to_string));

	memory.clear_spread();
	let cleared = memory
		.chunks()
		.filter(|c| c.spreading_activation().is_none())
		.count();
	println!("\nCleared: {cleared} chunks without spreading activation");

	Ok(())
}
