//! Property tests over generated boards and grid cells.

use proptest::prelude::*;
use rust_curling::core::{Cell, GridTransform};
use rust_curling::rules::symmetries;
use rust_curling::{Board, Player};

const MAX_COL: u32 = 336;
const MAX_ROW: u32 = 659;

/// Boards whose live stones sit on grid cells, like boards read back from
/// the physics world.
fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec((any::<bool>(), any::<bool>(), 0..=MAX_COL, 0..=MAX_ROW), 16).prop_map(
        |stones| {
            let grid = GridTransform::default();
            let mut board = Board::new();
            for (column, (thrown, in_play, col, row)) in stones.into_iter().enumerate() {
                let player = Player::of_column(column);
                let position = grid.to_real(Cell::new(col, row));
                board.set_stone(player, column - player.column_offset(), position, thrown, in_play);
            }
            board
        },
    )
}

proptest! {
    #[test]
    fn canonical_form_is_an_involution(board in arb_board()) {
        for player in Player::ALL {
            prop_assert_eq!(board.canonical(player).canonical(player), board.clone());
        }
    }

    #[test]
    fn canonical_form_swaps_turn(board in arb_board()) {
        let swapped = board.canonical(Player::Two);
        prop_assert_eq!(swapped.thrown_by(Player::One), board.thrown_by(Player::Two));
        prop_assert_eq!(swapped.in_play_count(), board.in_play_count());
    }

    #[test]
    fn text_form_round_trips(board in arb_board()) {
        let text = board.to_text();
        let parsed = Board::from_text(&text).unwrap();
        prop_assert_eq!(parsed.to_text(), text);
        prop_assert_eq!(parsed.key(), board.key());
        prop_assert_eq!(parsed, board);
    }

    #[test]
    fn mirror_is_an_involution(board in arb_board()) {
        prop_assert_eq!(board.mirrored().mirrored(), board);
    }

    #[test]
    fn symmetry_count_matches_live_pairs(board in arb_board()) {
        let pairs = |player: Player| {
            let n = player.columns().filter(|&c| board.is_live(c)).count();
            n * n.saturating_sub(1) / 2
        };
        let expected = 2 * (1 + pairs(Player::One) + pairs(Player::Two));
        prop_assert_eq!(symmetries(&board, &[1.0]).len(), expected);
    }

    #[test]
    fn raw_rows_land_on_grid(
        xs in prop::collection::vec(-100.0f64..100.0, 16),
        ys in prop::collection::vec(1200.0f64..1600.0, 16),
        flags in prop::collection::vec((any::<bool>(), any::<bool>()), 16),
    ) {
        let mut rows = *Board::new().rows();
        for column in 0..16 {
            rows[0][column] = xs[column];
            rows[1][column] = ys[column];
            rows[2][column] = f64::from(u8::from(flags[column].0));
            rows[3][column] = f64::from(u8::from(flags[column].1));
        }

        let grid = GridTransform::default();
        let board = Board::from_rows(rows);
        for column in board.live_columns() {
            let position = board.position(column);
            prop_assert_eq!(grid.snap(position), Some(position));
        }
        prop_assert_eq!(Board::from_text(&board.to_text()).unwrap(), board);
    }

    #[test]
    fn grid_cells_round_trip(col in 0..=MAX_COL, row in 0..=MAX_ROW) {
        let grid = GridTransform::default();
        let cell = Cell::new(col, row);
        prop_assert_eq!(grid.to_cell(grid.to_real(cell)), Some(cell));
    }
}
