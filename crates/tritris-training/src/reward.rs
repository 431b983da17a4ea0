//! Reward signal for a single transition.
//!
//! Each locked piece earns a reward depending on how many rows it cleared:
//!
//! | Rows cleared | Cell delta | Reward |
//! |--------------|------------|--------|
//! | none locked  | 0          | 0.0    |
//! | 0            | +3         | 0.1    |
//! | 1            | -1         | 1.0    |
//! | 2            | -5         | 4.0    |
//! | 3            | -9         | 16.0   |
//!
//! The trainer sums [`placement_reward`] over the locks reported by the engine
//! (see [`Transition`](crate::Transition)). [`reward`] recovers the same value
//! from the occupied-cell counts alone, which is exact whenever at most one
//! piece was locked.

use tritris_engine::{COLS, GameState};

/// Reward per number of rows cleared by a single placement, before scaling.
pub const LINE_CLEAR_REWARDS: [f64; 4] = [1.0, 10.0, 40.0, 160.0];

/// Scale applied to [`LINE_CLEAR_REWARDS`] whenever a piece was placed.
pub const REWARD_SCALE: f64 = 0.1;

/// Number of cells locked by one placement.
const PIECE_CELLS: usize = 3;

/// Reward for locking one piece that cleared `lines` rows.
#[must_use]
pub fn placement_reward(lines: usize) -> f64 {
    let index = lines.min(LINE_CLEAR_REWARDS.len() - 1);
    REWARD_SCALE * LINE_CLEAR_REWARDS[index]
}

/// Rows cleared between `state` and `next` judged by cell counts, or `None` if
/// no cells were placed.
///
/// A gain of more than one piece's cells counts as a placement without clears.
#[must_use]
pub fn cleared_lines(state: &GameState, next: &GameState) -> Option<usize> {
    let before = state.board().occupied_count();
    let after = next.board().occupied_count();
    if after == before {
        return None;
    }
    // after = before + 3 - COLS * lines
    Some((before + PIECE_CELLS).saturating_sub(after) / COLS)
}

/// Reward for the transition from `state` to `next`, derived from cell counts.
#[must_use]
pub fn reward(state: &GameState, next: &GameState) -> f64 {
    cleared_lines(state, next).map_or(0.0, placement_reward)
}

#[cfg(test)]
mod tests {
    use tritris_engine::{Board, PieceKind};

    use super::*;

    fn state(art: &str) -> GameState {
        GameState::with_piece(Board::from_ascii(art), PieceKind::VerticalLine)
    }

    const EMPTY: &str = r"
        ....
        ....
        ....
        ....
        ....
        ....
    ";

    #[test]
    fn test_no_placement_no_reward() {
        let s = state(EMPTY);
        assert_eq!(cleared_lines(&s, &s), None);
        assert_eq!(reward(&s, &s), 0.0);
    }

    #[test]
    fn test_placement_without_clear() {
        let before = state(EMPTY);
        let after = state(
            r"
            ....
            ....
            ....
            ..#.
            ..#.
            ..#.
            ",
        );
        assert_eq!(cleared_lines(&before, &after), Some(0));
        assert!((reward(&before, &after) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_multi_line_clears_are_super_linear() {
        // 9 cells before the placement; only the cell counts matter.
        let before = state(
            r"
            ....
            ....
            ....
            ###.
            ###.
            ###.
            ",
        );
        let single = state(
            r"
            ....
            ....
            ....
            ##..
            ###.
            ###.
            ",
        );
        let double = state(
            r"
            ....
            ....
            #...
            #...
            #...
            #...
            ",
        );
        let triple = state(EMPTY);

        assert_eq!(cleared_lines(&before, &single), Some(1));
        assert_eq!(cleared_lines(&before, &double), Some(2));
        assert_eq!(cleared_lines(&before, &triple), Some(3));

        let r1 = reward(&before, &single);
        let r2 = reward(&before, &double);
        let r3 = reward(&before, &triple);
        assert!((r1 - 1.0).abs() < 1e-12);
        assert!((r2 - 4.0).abs() < 1e-12);
        assert!((r3 - 16.0).abs() < 1e-12);
        assert!(r2 > 2.0 * r1);
        assert!(r3 > 3.0 * r1);
    }

    #[test]
    fn test_two_placements_still_rewarded() {
        let before = state(
            r"
            ....
            ....
            ....
            ...#
            ...#
            ...#
            ",
        );
        let after = state(
            r"
            ....
            ...#
            ...#
            ...#
            ...#
            ..##
            ",
        );
        assert_eq!(cleared_lines(&before, &after), Some(0));
        assert!((reward(&before, &after) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_placement_reward() {
        assert!((placement_reward(0) - 0.1).abs() < 1e-12);
        assert!((placement_reward(3) - 16.0).abs() < 1e-12);
        assert!((placement_reward(7) - 16.0).abs() < 1e-12);
    }
}
