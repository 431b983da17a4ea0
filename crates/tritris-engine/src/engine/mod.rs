//! Game state transitions.
//!
//! - [`GameState`] - board plus falling piece; every transition returns a new value
//! - [`Action`] - the three primitive actions (drop, move left, move right)
//! - [`FeatureLayout`] - fixed-length numeric encodings of a state
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`] with an empty board and a random piece at the spawn position
//! 2. Apply actions; lateral moves are followed by one step of gravity
//! 3. When the piece can no longer fall it locks, full rows clear, and a new piece spawns
//! 4. The game ends when the spawned piece collides ([`GameState::is_terminal`])

pub use self::{action::*, features::*, state::*};

mod action;
mod features;
mod state;
