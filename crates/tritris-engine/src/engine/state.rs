use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{
    board::Board,
    piece::{Piece, PieceKind},
};

use super::{Action, FeatureLayout};

/// Snapshot of a tritris game: settled cells plus the falling piece.
///
/// `GameState` is a value type. Every transition returns a new state and leaves
/// the original untouched, so a state can be branched freely (for example to
/// evaluate each candidate action before committing to one).
///
/// A state is *terminal* when its falling piece collides with the board at its
/// own position, which happens when a freshly spawned piece has no room. Every
/// transition of a terminal state returns the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct GameState {
    board: Board,
    falling_piece: Piece,
}

impl GameState {
    /// Creates a state with an empty board and a uniformly random piece at the spawn position.
    #[must_use]
    pub fn new<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::with_board(Board::EMPTY, rng)
    }

    /// Spawns a uniformly random piece on the given board.
    #[must_use]
    pub fn with_board<R>(board: Board, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::with_piece(board, rng.random())
    }

    /// Spawns a piece of the given kind on the given board.
    #[must_use]
    pub const fn with_piece(board: Board, kind: PieceKind) -> Self {
        Self::from_parts(board, Piece::new(kind))
    }

    #[must_use]
    pub const fn from_parts(board: Board, falling_piece: Piece) -> Self {
        Self {
            board,
            falling_piece,
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    /// Checks if the falling piece cannot occupy its current position.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.board.is_colliding(self.falling_piece)
    }

    /// Extracts the feature vector of this state.
    #[must_use]
    pub fn feature_vector(&self, layout: FeatureLayout) -> Vec<f64> {
        layout.extract(self)
    }

    /// Applies a primitive action.
    ///
    /// - [`Action::Drop`] hard-drops and locks the piece (see [`Self::dropped`]).
    /// - [`Action::MoveLeft`] / [`Action::MoveRight`] shift the piece one column if
    ///   the target cells are free, then apply one [`Self::gravity_step`]. A blocked
    ///   shift keeps the column but still applies gravity.
    #[must_use]
    pub fn apply<R>(&self, action: Action, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.apply_with_cleared_lines(action, rng).0
    }

    /// Like [`Self::apply`], also reporting whether a piece was locked.
    ///
    /// The second element is `Some(rows cleared)` if the action locked the
    /// falling piece, and `None` if the piece is still falling.
    #[must_use]
    pub fn apply_with_cleared_lines<R>(
        &self,
        action: Action,
        rng: &mut R,
    ) -> (Self, Option<usize>)
    where
        R: Rng + ?Sized,
    {
        if self.is_terminal() {
            return (*self, None);
        }
        match action {
            Action::Drop => {
                let (next, cleared_lines) = self.lock(self.simulate_drop_position(), rng);
                (next, Some(cleared_lines))
            }
            Action::MoveLeft => self.shifted_left().gravity_step_with_cleared_lines(rng),
            Action::MoveRight => self.shifted_right().gravity_step_with_cleared_lines(rng),
        }
    }

    /// Moves the piece one column left if possible; no gravity is applied.
    #[must_use]
    pub fn shifted_left(&self) -> Self {
        self.try_move(self.falling_piece.left())
    }

    /// Moves the piece one column right if possible; no gravity is applied.
    #[must_use]
    pub fn shifted_right(&self) -> Self {
        self.try_move(self.falling_piece.right())
    }

    /// Moves the piece one row down, or locks it when it cannot fall further.
    #[must_use]
    pub fn gravity_step<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.gravity_step_with_cleared_lines(rng).0
    }

    fn gravity_step_with_cleared_lines<R>(&self, rng: &mut R) -> (Self, Option<usize>)
    where
        R: Rng + ?Sized,
    {
        if self.is_terminal() {
            return (*self, None);
        }
        let down = self.falling_piece.down();
        if self.board.is_colliding(down) {
            let (next, cleared_lines) = self.lock(self.falling_piece, rng);
            (next, Some(cleared_lines))
        } else {
            (self.with_falling_piece(down), None)
        }
    }

    /// Drops the piece as far as it can fall, locks it, clears full rows and spawns
    /// a new random piece.
    #[must_use]
    pub fn dropped<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.dropped_with_cleared_lines(rng).0
    }

    /// Like [`Self::dropped`], also returning the number of rows cleared.
    #[must_use]
    pub fn dropped_with_cleared_lines<R>(&self, rng: &mut R) -> (Self, usize)
    where
        R: Rng + ?Sized,
    {
        if self.is_terminal() {
            return (*self, 0);
        }
        self.lock(self.simulate_drop_position(), rng)
    }

    /// Returns where the falling piece would land on a hard drop.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        let mut dropped = self.falling_piece;
        while !self.board.is_colliding(dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }

    fn try_move(&self, piece: Piece) -> Self {
        if self.board.is_colliding(piece) {
            *self
        } else {
            self.with_falling_piece(piece)
        }
    }

    fn with_falling_piece(&self, falling_piece: Piece) -> Self {
        Self {
            board: self.board,
            falling_piece,
        }
    }

    fn lock<R>(&self, piece: Piece, rng: &mut R) -> (Self, usize)
    where
        R: Rng + ?Sized,
    {
        let mut board = self.board;
        board.fill_piece(piece);
        let cleared_lines = board.clear_lines();
        (Self::with_board(board, rng), cleared_lines)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.render(f, Some(self.falling_piece))
    }
}
