//! Shenlun Engine — template-substitution essay generation.
//!
//! Builds essays by sampling template sentences from a categorized lexicon,
//! rewriting their placeholder tokens with sampled fragments, and padding
//! the beginning, body and ending sections to target lengths.

pub mod core;
pub mod observability;
pub mod schema;
