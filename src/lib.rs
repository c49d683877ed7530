//! Spin-sequence pattern analysis and wager simulation for roulette logs.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod groups;
pub mod types;

pub use error::{Result, SpinbiasError};
pub use types::{BetDefinition, Group, Symbol};
