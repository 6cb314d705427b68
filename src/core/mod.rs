pub mod config;
pub mod lexicon;
pub mod pipeline;
pub mod rng;
pub mod rules;
