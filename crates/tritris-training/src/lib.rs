//! Q-learning with linear function approximation for tritris.
//!
//! The agent estimates the value of a game state as the dot product of the
//! state's feature vector ([`tritris_engine::FeatureLayout`]) and a learned
//! [`Weights`] vector. Training is online: every step of every episode updates
//! the weights immediately, and there is no replay buffer.
//!
//! # How Training Works
//!
//! 1. **Episode start** - A fresh [`GameState`](tritris_engine::GameState) with an empty board
//! 2. **Selection** - An epsilon-greedy policy picks a move from the [`ActionSet`]
//! 3. **Transition** - The move is applied through the engine
//! 4. **Update** - The TD target `reward + gamma * max eval(next')` drives a weight update
//! 5. **Repeat** - Until the game ends or `max_game_len` steps have been taken
//!
//! # Example
//!
//! ```
//! use tritris_training::{Trainer, TrainerConfig};
//!
//! let mut trainer = Trainer::with_seed(TrainerConfig::default(), 42).unwrap();
//! trainer.train(100).unwrap();
//!
//! let episode = trainer.greedy_episode();
//! assert!(!episode.states.is_empty());
//! println!("{}", trainer.weights());
//! ```

pub use self::{config::*, episode::*, moves::*, reward::*, trainer::*, weights::*};

mod config;
mod episode;
mod moves;
mod reward;
mod trainer;
mod weights;
