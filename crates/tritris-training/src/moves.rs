use rand::Rng;
use serde::{Deserialize, Serialize};
use tritris_engine::{Action, GameState};

use crate::placement_reward;

/// A single agent decision: primitive actions applied in order.
pub type Move = &'static [Action];

const PRIMITIVE_MOVES: [Move; 3] = [&[Action::Drop], &[Action::MoveLeft], &[Action::MoveRight]];

const MACRO_MOVES: [Move; 4] = [
    &[Action::Drop],
    &[Action::MoveRight, Action::Drop],
    &[Action::MoveLeft, Action::Drop],
    &[Action::MoveLeft, Action::MoveLeft, Action::Drop],
];

/// Moves the agent chooses from at every step.
///
/// - `Primitive`: drop, left, right (each left/right is followed by gravity)
/// - `Macro`: four compound placements that always end in a drop
///
/// Macros are composed from primitive actions here; the engine only ever sees
/// primitive actions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionSet {
    #[default]
    Primitive,
    Macro,
}

impl ActionSet {
    /// Maximum number of moves in any action set.
    pub const MAX_MOVES: usize = 4;

    #[must_use]
    pub const fn moves(self) -> &'static [Move] {
        match self {
            Self::Primitive => &PRIMITIVE_MOVES,
            Self::Macro => &MACRO_MOVES,
        }
    }
}

/// Outcome of applying a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State after the last applied action.
    pub next: GameState,
    /// Pieces locked along the way. Compound moves may lock more than one.
    pub placed_pieces: usize,
    /// Rows cleared by all locks.
    pub cleared_lines: usize,
    /// Sum of [`placement_reward`] over every lock.
    pub reward: f64,
}

impl Transition {
    fn unchanged(state: GameState) -> Self {
        Self {
            next: state,
            placed_pieces: 0,
            cleared_lines: 0,
            reward: 0.0,
        }
    }
}

/// Applies the actions of a move in order, stopping early once the state is terminal.
#[must_use]
pub fn apply_move<R>(state: &GameState, mv: Move, rng: &mut R) -> Transition
where
    R: Rng + ?Sized,
{
    let mut transition = Transition::unchanged(*state);
    for &action in mv {
        if transition.next.is_terminal() {
            break;
        }
        let (next, locked) = transition.next.apply_with_cleared_lines(action, rng);
        transition.next = next;
        if let Some(lines) = locked {
            transition.placed_pieces += 1;
            transition.cleared_lines += lines;
            transition.reward += placement_reward(lines);
        }
    }
    transition
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use tritris_engine::{Board, Piece, PieceKind, PiecePosition};

    use super::*;

    #[test]
    fn test_action_set_sizes() {
        assert_eq!(ActionSet::Primitive.moves().len(), 3);
        assert_eq!(ActionSet::Macro.moves().len(), 4);
        assert!(
            [ActionSet::Primitive, ActionSet::Macro]
                .iter()
                .all(|set| set.moves().len() <= ActionSet::MAX_MOVES)
        );
    }

    #[test]
    fn test_macros_end_with_drop() {
        for mv in ActionSet::Macro.moves() {
            assert_eq!(mv.last(), Some(&Action::Drop));
        }
    }

    #[test]
    fn test_apply_move_places_piece() {
        let mut rng = Pcg32::seed_from_u64(3);
        let state = GameState::with_piece(Board::EMPTY, PieceKind::VerticalLine);
        let transition = apply_move(
            &state,
            &[Action::MoveLeft, Action::MoveLeft, Action::Drop],
            &mut rng,
        );
        assert_eq!(
            *transition.next.board(),
            Board::from_ascii(
                r"
                ....
                ....
                ....
                #...
                #...
                #...
                ",
            )
        );
        assert_eq!(transition.placed_pieces, 1);
        assert_eq!(transition.cleared_lines, 0);
        assert!((transition.reward - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_apply_move_without_lock() {
        let mut rng = Pcg32::seed_from_u64(3);
        let state = GameState::with_piece(Board::EMPTY, PieceKind::VerticalLine);
        let transition = apply_move(&state, &[Action::MoveLeft], &mut rng);
        assert_eq!(transition.placed_pieces, 0);
        assert_eq!(transition.reward, 0.0);
        assert_eq!(*transition.next.board(), Board::EMPTY);
    }

    #[test]
    fn test_macro_locking_two_pieces() {
        // The right shift leaves the line resting on the floor, so gravity locks
        // it, and the trailing drop places the freshly spawned piece.
        let piece = Piece::new(PieceKind::VerticalLine).with_position(PiecePosition::new(1, 0));
        let state = GameState::from_parts(Board::EMPTY, piece);
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let transition = apply_move(&state, &[Action::MoveRight, Action::Drop], &mut rng);
            assert_eq!(transition.placed_pieces, 2, "seed {seed}");
            assert_eq!(transition.cleared_lines, 0, "seed {seed}");
            assert!((transition.reward - 0.2).abs() < 1e-12, "seed {seed}");
            assert_eq!(transition.next.board().occupied_count(), 6);
            assert!(transition.next.board().is_occupied(0, 1));
        }
    }
}
