//! CLI command implementations.

pub mod config;
pub mod layers;
pub mod load;
pub mod normalize;
pub mod rules;
