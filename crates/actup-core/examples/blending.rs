//! Blending Example
//!
//! An instance-based learning agent choosing between a safe option that
//! always pays 3 and a risky one that pays 10 a quarter of the time. Each
//! round it blends the remembered payoffs of both options, picks the
//! better, and learns what happened.
//!
//! Run with: `cargo run --example blending`
//! Set `RUST_LOG=actup_core=debug` to watch the memory at work.

use actup_core::{attrs, Memory, MemoryConfig, MemoryError};
use rand::Rng;
use tracing_subscriber::EnvFilter;

const ROUNDS: usize = 60;

fn main() -> Result<(), MemoryError> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	println!("=== Blending: safe vs. risky ===\n");

	let mut memory = Memory::new(MemoryConfig {
		seed: Some(2024),
		..Default::default()
	})?;
	let mut rng = rand::thread_rng();

	// Optimistic prior: both options start out looking great
	for choice in ["safe", "risky"] {
		let _ = memory.learn(attrs! { "choice" => choice, "payoff" => 12 })?;
	}
	let _ = memory.advance(1.0)?;

	let mut risky_count = 0;
	for round in 1..=ROUNDS {
		let safe = memory.blend("payoff", attrs! { "choice" => "safe" })?.unwrap_or(0.0);
		let risky = memory.blend("payoff", attrs! { "choice" => "risky" })?.unwrap_or(0.0);

		let choice = if risky > safe { "risky" } else { "safe" };
		let payoff = match choice {
			"risky" if rng.gen_bool(0.25) => 10,
			"risky" => 0,
			_ => 3,
		};
		if choice == "risky" {
			risky_count += 1;
		}

		if round % 10 == 0 {
			println!("Round {round:2}: safe ≈ {safe:5.2}, risky ≈ {risky:5.2} → {choice} ({payoff})");
		}

		let _ = memory.learn(attrs! { "choice" => choice, "payoff" => payoff })?;
		let _ = memory.advance(1.0)?;
	}

	println!("\nChose risky {risky_count} of {ROUNDS} times");
	println!("{} distinct chunks in memory", memory.len());

	// How the last blend of the risky option was assembled
	memory.enable_activation_history();
	let _ = memory.blend("payoff", attrs! { "choice" => "risky" })?;
	println!("\n--- Last blend of \"risky\" ---");
	for record in memory.take_activation_history() {
		println!(
			"  Chunk {} {:?}: activation {:.3}, probability {:.3}",
			record.name,
			record.attributes,
			record.activation,
			record.retrieval_probability.unwrap_or(0.0)
		);
	}

	Ok(())
}
