//! Rollout invariants of the transition engine under generated seeds and action sequences.

use proptest::prelude::*;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use tritris_engine::{Action, Board, COLS, FeatureLayout, GameState, PiecePosition, ROWS};

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Drop),
        Just(Action::MoveLeft),
        Just(Action::MoveRight),
    ]
}

fn assert_piece_fits(state: &GameState) {
    for (row, col) in state.falling_piece().occupied_positions() {
        assert!((0..ROWS as i8).contains(&row), "{state:?}");
        assert!((0..COLS as i8).contains(&col), "{state:?}");
        assert!(!state.board().is_occupied(row, col), "{state:?}");
    }
}

proptest! {
    #[test]
    fn generated_rollout_respects_core_invariants(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..120),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(&mut rng);

        for action in actions {
            if state.is_terminal() {
                for a in Action::ALL {
                    prop_assert_eq!(state.apply(a, &mut rng), state);
                }
                break;
            }
            assert_piece_fits(&state);

            let before = state.board().occupied_count();
            let next = state.apply(action, &mut rng);
            let after = next.board().occupied_count();

            // Either nothing locked, or three cells locked and whole rows were removed.
            if after != before {
                let cleared = (before + 3 - after) / COLS;
                prop_assert_eq!(after + COLS * cleared, before + 3);
                prop_assert!(cleared <= 3);
            }
            prop_assert!(!next.board().has_filled_row());
            prop_assert_eq!(next.is_terminal(), next.board().is_colliding(next.falling_piece()));

            for layout in [FeatureLayout::Occupancy, FeatureLayout::OccupancyWithPosition] {
                prop_assert_eq!(next.feature_vector(layout).len(), layout.dimension());
            }
            state = next;
        }
    }

    #[test]
    fn drop_reports_cleared_rows_consistently(
        seed in any::<u64>(),
        cells in prop::collection::vec(any::<bool>(), 3 * COLS),
    ) {
        // Random bottom half, empty spawn area.
        let mut cells = cells;
        cells.resize(ROWS * COLS, false);
        let mut board = Board::from_cells(&cells);
        board.clear_lines();
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::with_board(board, &mut rng);
        prop_assert!(!state.is_terminal());

        let before = state.board().occupied_count();
        let (next, cleared) = state.dropped_with_cleared_lines(&mut rng);

        prop_assert_eq!(next.board().occupied_count() + COLS * cleared, before + 3);
        prop_assert!(!next.board().has_filled_row());
        prop_assert_eq!(next.falling_piece().position(), PiecePosition::SPAWN_POSITION);
    }
}

#[test]
fn drop_on_empty_board_never_clears() {
    let mut rng = Pcg32::seed_from_u64(1);
    for _ in 0..100 {
        let state = GameState::new(&mut rng);
        let (next, cleared) = state.dropped_with_cleared_lines(&mut rng);
        assert_eq!(cleared, 0);
        assert_eq!(next.board().occupied_count(), 3);
        assert!(!next.is_terminal());
    }
}
