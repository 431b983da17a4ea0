//! Game engine for tritris, a falling-block puzzle on a 6x4 board with three-cell pieces.
//!
//! The crate is split into two layers:
//!
//! - [`core`] - board and piece geometry ([`Board`], [`Piece`], [`PieceKind`])
//! - [`engine`] - game states and transitions ([`GameState`], [`Action`], [`FeatureLayout`])
//!
//! Every transition produces a new [`GameState`]; nothing is mutated in place.
//! Randomness (the kind of the next spawned piece) is drawn from an RNG passed
//! in by the caller, so a seeded generator replays a game exactly.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use tritris_engine::{Action, GameState};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let state = GameState::new(&mut rng);
//!
//! let next = state.apply(Action::MoveLeft, &mut rng).apply(Action::Drop, &mut rng);
//! if next.is_terminal() {
//!     println!("Game over!");
//! }
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
